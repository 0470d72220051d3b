//! Asset category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named grouping an asset may belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon identifier used by the front end
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
