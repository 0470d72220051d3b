//! Asset table: client-side sorting and row display

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{format, models::Asset};

pub const UNCATEGORIZED: &str = "Uncategorized";
const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Category,
    PurchaseDate,
    PurchasePrice,
    Location,
    AssetStatus,
    ConditionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Header indicator for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Price(Decimal),
    Date(NaiveDate),
}

fn sort_key(field: SortField, asset: &Asset) -> Option<SortKey> {
    match field {
        SortField::Name => Some(SortKey::Text(asset.name.to_lowercase())),
        // Uncategorized assets sort as an empty name, not as missing
        SortField::Category => Some(SortKey::Text(
            asset.category_name().unwrap_or_default().to_lowercase(),
        )),
        SortField::PurchaseDate => asset.purchase_date.map(SortKey::Date),
        SortField::PurchasePrice => asset.purchase_price.map(SortKey::Price),
        SortField::Location => Some(SortKey::Text(asset.location.as_str().to_lowercase())),
        SortField::AssetStatus => Some(SortKey::Text(asset.asset_status.as_str().to_string())),
        SortField::ConditionStatus => {
            Some(SortKey::Text(asset.condition_status.as_str().to_string()))
        }
    }
}

/// Active sort of the table; name ascending by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl TableSort {
    /// Clicking the active column flips direction; another column starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flip();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn indicator(&self, field: SortField) -> SortIndicator {
        match (self.field == field, self.direction) {
            (false, _) => SortIndicator::Unsorted,
            (true, SortDirection::Ascending) => SortIndicator::Ascending,
            (true, SortDirection::Descending) => SortIndicator::Descending,
        }
    }

    /// Missing values go last when ascending and first when descending.
    pub fn compare(&self, a: &Asset, b: &Asset) -> Ordering {
        let ascending = self.direction == SortDirection::Ascending;
        match (sort_key(self.field, a), sort_key(self.field, b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => if ascending { Ordering::Greater } else { Ordering::Less },
            (Some(_), None) => if ascending { Ordering::Less } else { Ordering::Greater },
            (Some(x), Some(y)) => {
                let ord = x.cmp(&y);
                if ascending { ord } else { ord.reverse() }
            }
        }
    }

    /// Stable sort of a borrowed list; the input is left untouched.
    pub fn sort<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        let mut rows: Vec<&Asset> = assets.iter().collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }
}

/// Display strings for one table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRow {
    pub id: String,
    pub name: String,
    pub serial_number: Option<String>,
    pub category: String,
    pub location: String,
    pub value: String,
    pub condition: &'static str,
    pub status: &'static str,
    pub purchase_date: String,
}

impl From<&Asset> for AssetRow {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            name: asset.name.clone(),
            serial_number: asset
                .serial_number
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(|s| format!("SN: {}", s)),
            category: asset.category_name().unwrap_or(UNCATEGORIZED).to_string(),
            location: asset.location.as_str().to_string(),
            value: asset
                .purchase_price
                .filter(|p| !p.is_zero())
                .map(format::format_currency)
                .unwrap_or_else(|| MISSING.to_string()),
            condition: asset.condition_status.label(),
            status: asset.asset_status.label(),
            purchase_date: asset
                .purchase_date
                .map(format::format_naive_date)
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

/// Sorted display rows
pub fn rows(assets: &[Asset], sort: &TableSort) -> Vec<AssetRow> {
    sort.sort(assets).into_iter().map(AssetRow::from).collect()
}
