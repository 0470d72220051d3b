//! Shared domain enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

/// Implements `as_str`, `label`, `Display` and `FromStr` for a stored enum.
macro_rules! stored_enum {
    ($ty:ident, $what:literal, { $($variant:ident => ($stored:literal, $label:literal)),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Value as persisted by the store
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $stored),+
                }
            }

            /// Human readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($stored => Ok($ty::$variant),)+
                    other => Err(AppError::Validation(format!("Unknown {} '{}'", $what, other))),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Region an asset is kept in (South African provinces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Eastern Cape")]
    EasternCape,
    #[serde(rename = "Free State")]
    FreeState,
    #[serde(rename = "Gauteng")]
    Gauteng,
    #[serde(rename = "KwaZulu-Natal")]
    KwaZuluNatal,
    #[serde(rename = "Limpopo")]
    Limpopo,
    #[serde(rename = "Mpumalanga")]
    Mpumalanga,
    #[serde(rename = "Northern Cape")]
    NorthernCape,
    #[serde(rename = "North West")]
    NorthWest,
    #[serde(rename = "Western Cape")]
    WesternCape,
}

stored_enum!(Location, "location", {
    EasternCape => ("Eastern Cape", "Eastern Cape"),
    FreeState => ("Free State", "Free State"),
    Gauteng => ("Gauteng", "Gauteng"),
    KwaZuluNatal => ("KwaZulu-Natal", "KwaZulu-Natal"),
    Limpopo => ("Limpopo", "Limpopo"),
    Mpumalanga => ("Mpumalanga", "Mpumalanga"),
    NorthernCape => ("Northern Cape", "Northern Cape"),
    NorthWest => ("North West", "North West"),
    WesternCape => ("Western Cape", "Western Cape"),
});

// ---------------------------------------------------------------------------
// ConditionStatus
// ---------------------------------------------------------------------------

/// Physical condition of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

stored_enum!(ConditionStatus, "condition", {
    Excellent => ("excellent", "Excellent"),
    Good => ("good", "Good"),
    Fair => ("fair", "Fair"),
    Poor => ("poor", "Poor"),
});

impl Default for ConditionStatus {
    fn default() -> Self {
        ConditionStatus::Excellent
    }
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    InRepair,
    Retired,
    Disposed,
}

stored_enum!(AssetStatus, "asset status", {
    Active => ("active", "Active"),
    InRepair => ("in_repair", "In Repair"),
    Retired => ("retired", "Retired"),
    Disposed => ("disposed", "Disposed"),
});

impl Default for AssetStatus {
    fn default() -> Self {
        AssetStatus::Active
    }
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    Scheduled,
    Repair,
    Inspection,
    Cleaning,
}

stored_enum!(MaintenanceType, "maintenance type", {
    Scheduled => ("scheduled", "Scheduled"),
    Repair => ("repair", "Repair"),
    Inspection => ("inspection", "Inspection"),
    Cleaning => ("cleaning", "Cleaning"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

stored_enum!(MaintenanceStatus, "maintenance status", {
    Scheduled => ("scheduled", "Scheduled"),
    InProgress => ("in_progress", "In Progress"),
    Completed => ("completed", "Completed"),
    Cancelled => ("cancelled", "Cancelled"),
});

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Photo,
    Manual,
    Receipt,
    Warranty,
    Other,
}

stored_enum!(DocumentType, "document type", {
    Photo => ("photo", "Photo"),
    Manual => ("manual", "Manual"),
    Receipt => ("receipt", "Receipt"),
    Warranty => ("warranty", "Warranty"),
    Other => ("other", "Other"),
});
