//! Asset assignment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Record of an asset handed to a person or department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAssignment {
    pub id: String,
    pub asset_id: String,
    pub assigned_to_name: String,
    #[serde(default)]
    pub assigned_to_email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub assignment_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
