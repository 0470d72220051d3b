//! Asset model and the payloads used to create and update assets

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::{Validate, ValidationError};

use super::{
    assignment::AssetAssignment,
    category::AssetCategory,
    document::AssetDocument,
    enums::{AssetStatus, ConditionStatus, Location},
    maintenance::AssetMaintenance,
};

/// Names of the date-valued columns a payload may carry
pub const DATE_FIELDS: [&str; 3] = ["purchase_date", "warranty_start_date", "warranty_end_date"];

/// Tracked inventory item, as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub supplier_vendor: Option<String>,
    #[serde(default)]
    pub warranty_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub warranty_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub warranty_details: Option<String>,
    pub location: Location,
    pub condition_status: ConditionStatus,
    pub asset_status: AssetStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Embedded category (resolved by the store from `category_id`)
    #[serde(default)]
    pub category: Option<AssetCategory>,
}

impl Asset {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

/// Asset with its related records, as shown by the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetDetails {
    pub asset: Asset,
    /// Newest first
    pub assignments: Vec<AssetAssignment>,
    /// Newest first
    pub maintenance: Vec<AssetMaintenance>,
    /// Newest first
    pub documents: Vec<AssetDocument>,
}

/// Create asset request
///
/// Date fields carry raw form input: an empty string means "no date" and is
/// turned into an explicit null before submission.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewAsset {
    #[validate(custom(function = "validate_required_text"))]
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    #[validate(custom(function = "validate_date_input"))]
    pub purchase_date: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom(function = "validate_non_negative"))]
    pub purchase_price: Option<Decimal>,
    pub supplier_vendor: Option<String>,
    #[validate(custom(function = "validate_date_input"))]
    pub warranty_start_date: Option<String>,
    #[validate(custom(function = "validate_date_input"))]
    pub warranty_end_date: Option<String>,
    pub warranty_details: Option<String>,
    pub location: Location,
    pub condition_status: ConditionStatus,
    pub asset_status: AssetStatus,
    pub notes: Option<String>,
}

impl NewAsset {
    /// Minimal payload with only the required fields set
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            description: None,
            category_id: None,
            serial_number: None,
            model: None,
            brand: None,
            purchase_date: None,
            purchase_price: None,
            supplier_vendor: None,
            warranty_start_date: None,
            warranty_end_date: None,
            warranty_details: None,
            location,
            condition_status: ConditionStatus::default(),
            asset_status: AssetStatus::default(),
            notes: None,
        }
    }
}

/// Update asset request. Only fields that are `Some` are sent.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_patch_price"))]
pub struct AssetPatch {
    #[validate(custom(function = "validate_required_text"))]
    pub name: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` detaches the asset from its category
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub category_id: Option<Option<String>>,
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    #[validate(custom(function = "validate_date_input"))]
    pub purchase_date: Option<String>,
    /// `Some(None)` clears the stored price
    #[serde(default, with = "nullable_price")]
    pub purchase_price: Option<Option<Decimal>>,
    pub supplier_vendor: Option<String>,
    #[validate(custom(function = "validate_date_input"))]
    pub warranty_start_date: Option<String>,
    #[validate(custom(function = "validate_date_input"))]
    pub warranty_end_date: Option<String>,
    pub warranty_details: Option<String>,
    pub location: Option<Location>,
    pub condition_status: Option<ConditionStatus>,
    pub asset_status: Option<AssetStatus>,
    pub notes: Option<String>,
}

impl AssetPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "must not be blank"));
    }
    Ok(())
}

/// Empty input is allowed (it clears the date); anything else must be `YYYY-MM-DD`.
fn validate_date_input(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return Ok(());
    }
    Err(invalid("date", "must be a valid YYYY-MM-DD date"))
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid("range", "must not be negative"));
    }
    Ok(())
}

fn validate_patch_price(patch: &AssetPatch) -> Result<(), ValidationError> {
    match &patch.purchase_price {
        Some(Some(price)) if validate_non_negative(price).is_err() => {
            Err(invalid("range", "purchase_price: must not be negative"))
        }
        _ => Ok(()),
    }
}

/// Three-state price for patches: absent, explicit null, or a number.
mod nullable_price {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Option<Decimal>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(Some(price)) => rust_decimal::serde::float::serialize(price, serializer),
            _ => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float_option::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_new_asset_requires_name() {
        let asset = NewAsset::new("   ", Location::Gauteng);
        let err = AppError::from(asset.validate().unwrap_err());
        assert_eq!(err, AppError::Validation("name: must not be blank".to_string()));
    }

    #[test]
    fn test_new_asset_date_and_price_rules() {
        let mut asset = NewAsset::new("Laptop", Location::Gauteng);
        asset.purchase_date = Some(String::new());
        asset.purchase_price = Some(Decimal::ZERO);
        assert!(asset.validate().is_ok());

        asset.purchase_date = Some("2024-02-30".to_string());
        asset.purchase_price = Some(Decimal::new(-1, 0));
        let err = AppError::from(asset.validate().unwrap_err());
        assert_eq!(
            err,
            AppError::Validation(
                "purchase_date: must be a valid YYYY-MM-DD date; purchase_price: must not be negative"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch = AssetPatch {
            name: Some("Renamed".to_string()),
            category_id: Some(None),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "name": "Renamed", "category_id": null })
        );
        assert!(AssetPatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_price_is_three_state() {
        let cleared = AssetPatch {
            purchase_price: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&cleared).unwrap(), json!({ "purchase_price": null }));

        let priced = AssetPatch {
            purchase_price: Some(Some(Decimal::new(4995, 1))),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&priced).unwrap(), json!({ "purchase_price": 499.5 }));

        let read: AssetPatch = serde_json::from_value(json!({ "purchase_price": null })).unwrap();
        assert_eq!(read.purchase_price, Some(None));
        let read: AssetPatch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(read.purchase_price, None);
    }

    #[test]
    fn test_patch_rejects_negative_price() {
        let patch = AssetPatch {
            purchase_price: Some(Some(Decimal::new(-5, 0))),
            ..Default::default()
        };
        let err = AppError::from(patch.validate().unwrap_err());
        assert_eq!(err, AppError::Validation("purchase_price: must not be negative".to_string()));

        let cleared = AssetPatch {
            purchase_price: Some(None),
            ..Default::default()
        };
        assert!(cleared.validate().is_ok());
    }

    #[test]
    fn test_new_asset_rejects_unknown_enum_values() {
        let payload = json!({
            "name": "Projector",
            "location": "Gauteng",
            "condition_status": "mint",
            "asset_status": "active"
        });
        assert!(serde_json::from_value::<NewAsset>(payload).is_err());
    }

    #[test]
    fn test_asset_reads_store_row() {
        let row = json!({
            "id": "5f0c",
            "name": "Forklift",
            "description": null,
            "category_id": "c1",
            "purchase_date": "2023-06-01",
            "purchase_price": 1234.5,
            "location": "Western Cape",
            "condition_status": "good",
            "asset_status": "in_repair",
            "created_at": "2024-01-02T10:00:00.123456+00:00",
            "updated_at": "2024-01-02T10:00:00+00:00",
            "category": { "id": "c1", "name": "Vehicles" }
        });
        let asset: Asset = serde_json::from_value(row).unwrap();
        assert_eq!(asset.purchase_price, Some(Decimal::new(12345, 1)));
        assert_eq!(asset.asset_status, AssetStatus::InRepair);
        assert_eq!(asset.category_name(), Some("Vehicles"));
        assert_eq!(asset.warranty_end_date, None);
    }
}
