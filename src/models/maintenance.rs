//! Asset maintenance model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{MaintenanceStatus, MaintenanceType};

/// Scheduled or completed maintenance work on an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMaintenance {
    pub id: String,
    pub asset_id: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
