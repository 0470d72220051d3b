//! Asset detail display

use chrono::{Duration, NaiveDate};

use crate::{
    format,
    models::{AssetAssignment, AssetDetails, AssetDocument, AssetMaintenance},
};

use super::table::UNCATEGORIZED;

/// Days before the end date at which a warranty counts as expiring
pub const WARRANTY_NOTICE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyStatus {
    /// No end date recorded
    None,
    Valid,
    /// Ends within the notice window, today included
    ExpiringSoon,
    Expired,
}

impl WarrantyStatus {
    pub fn evaluate(end: Option<NaiveDate>, today: NaiveDate) -> Self {
        match end {
            None => WarrantyStatus::None,
            Some(end) if end < today => WarrantyStatus::Expired,
            Some(end) if end <= today + Duration::days(WARRANTY_NOTICE_DAYS) => {
                WarrantyStatus::ExpiringSoon
            }
            Some(_) => WarrantyStatus::Valid,
        }
    }

    /// Banner text, if the status warrants one
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            WarrantyStatus::Expired => Some("Warranty has expired"),
            WarrantyStatus::ExpiringSoon => Some("Warranty expires within 30 days"),
            WarrantyStatus::None | WarrantyStatus::Valid => None,
        }
    }
}

/// Display strings for a fetched asset and its related records
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDetailView {
    pub name: String,
    pub category: String,
    pub location: &'static str,
    pub condition: &'static str,
    pub status: &'static str,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<String>,
    pub warranty_start: Option<String>,
    pub warranty_end: Option<String>,
    pub warranty_details: Option<String>,
    pub warranty_status: WarrantyStatus,
    /// The warranty section only shows when any warranty field is set
    pub show_warranty: bool,
    pub created_at: String,
    pub updated_at: String,
    pub assignments: Vec<AssetAssignment>,
    pub maintenance: Vec<AssetMaintenance>,
    pub documents: Vec<AssetDocument>,
}

impl AssetDetailView {
    pub fn new(details: &AssetDetails, today: NaiveDate) -> Self {
        let asset = &details.asset;
        let warranty_details = asset.warranty_details.clone().filter(|d| !d.is_empty());
        Self {
            name: asset.name.clone(),
            category: asset.category_name().unwrap_or(UNCATEGORIZED).to_string(),
            location: asset.location.label(),
            condition: asset.condition_status.label(),
            status: asset.asset_status.label(),
            purchase_date: asset.purchase_date.map(format::format_naive_date),
            purchase_price: asset.purchase_price.map(format::format_currency),
            warranty_start: asset.warranty_start_date.map(format::format_naive_date),
            warranty_end: asset.warranty_end_date.map(format::format_naive_date),
            show_warranty: asset.warranty_start_date.is_some()
                || asset.warranty_end_date.is_some()
                || warranty_details.is_some(),
            warranty_details,
            warranty_status: WarrantyStatus::evaluate(asset.warranty_end_date, today),
            created_at: format::format_timestamp(asset.created_at),
            updated_at: format::format_timestamp(asset.updated_at),
            assignments: details.assignments.clone(),
            maintenance: details.maintenance.clone(),
            documents: details.documents.clone(),
        }
    }

    /// Assignment currently holding the asset
    pub fn active_assignment(&self) -> Option<&AssetAssignment> {
        self.assignments.iter().find(|a| a.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, AssetStatus, ConditionStatus, Location};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn details() -> AssetDetails {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap();
        AssetDetails {
            asset: Asset {
                id: "a1".to_string(),
                name: "Compressor".to_string(),
                description: None,
                category_id: None,
                serial_number: None,
                model: None,
                brand: None,
                purchase_date: Some(date(2024, 3, 1)),
                purchase_price: Some(Decimal::new(899900, 2)),
                supplier_vendor: None,
                warranty_start_date: None,
                warranty_end_date: None,
                warranty_details: None,
                location: Location::FreeState,
                condition_status: ConditionStatus::Excellent,
                asset_status: AssetStatus::Active,
                notes: None,
                created_by: None,
                created_at: at,
                updated_at: at,
                category: None,
            },
            assignments: Vec::new(),
            maintenance: Vec::new(),
            documents: Vec::new(),
        }
    }

    #[test]
    fn test_warranty_status_boundaries() {
        let today = date(2024, 6, 1);
        assert_eq!(WarrantyStatus::evaluate(None, today), WarrantyStatus::None);
        let expired = WarrantyStatus::evaluate(Some(date(2024, 5, 31)), today);
        assert_eq!(expired, WarrantyStatus::Expired);
        assert_eq!(WarrantyStatus::evaluate(Some(today), today), WarrantyStatus::ExpiringSoon);
        let last_notice_day = WarrantyStatus::evaluate(Some(date(2024, 7, 1)), today);
        assert_eq!(last_notice_day, WarrantyStatus::ExpiringSoon);
        assert_eq!(WarrantyStatus::evaluate(Some(date(2024, 7, 2)), today), WarrantyStatus::Valid);
        assert_eq!(WarrantyStatus::Valid.notice(), None);
    }

    #[test]
    fn test_view_without_warranty() {
        let view = AssetDetailView::new(&details(), date(2024, 6, 1));
        assert_eq!(view.category, "Uncategorized");
        assert_eq!(view.purchase_date.as_deref(), Some("01 Mar 2024"));
        assert_eq!(view.purchase_price.as_deref(), Some("R8,999.00"));
        assert_eq!(view.created_at, "05 Mar 2024, 14:30");
        assert!(!view.show_warranty);
        assert_eq!(view.warranty_status, WarrantyStatus::None);
        assert!(view.active_assignment().is_none());
    }

    #[test]
    fn test_view_with_expired_warranty() {
        let mut details = details();
        details.asset.warranty_end_date = Some(date(2024, 1, 31));
        let view = AssetDetailView::new(&details, date(2024, 6, 1));
        assert!(view.show_warranty);
        assert_eq!(view.warranty_end.as_deref(), Some("31 Jan 2024"));
        assert_eq!(view.warranty_status.notice(), Some("Warranty has expired"));

        details.asset.warranty_end_date = None;
        details.asset.warranty_details = Some(String::new());
        assert!(!AssetDetailView::new(&details, date(2024, 6, 1)).show_warranty);
    }
}
