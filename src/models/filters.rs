//! Asset list filters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{AssetStatus, ConditionStatus, Location};

/// Conjunction of optional predicates narrowing an asset listing.
/// Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFilters {
    /// Case-insensitive substring over name, description and serial number
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<AssetStatus>,
    pub condition: Option<ConditionStatus>,
    pub location: Option<Location>,
    /// Inclusive lower bound on the purchase date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the purchase date
    pub date_to: Option<NaiveDate>,
}

impl AssetFilters {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.category_id.as_deref().map_or(true, str::is_empty)
            && self.status.is_none()
            && self.condition.is_none()
            && self.location.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}
