//! Filter panel state

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::AssetFilters,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Search,
    Category,
    Status,
    Location,
    Condition,
    DateFrom,
    DateTo,
}

/// Raw filter inputs as entered. An empty input is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanel {
    values: BTreeMap<FilterKey, String>,
    pub show_advanced: bool,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn toggle_advanced(&mut self) {
        self.show_advanced = !self.show_advanced;
    }

    pub fn has_active_filters(&self) -> bool {
        !self.values.is_empty()
    }

    /// Condition or date range set; hinted on the collapsed panel
    pub fn has_advanced_filters(&self) -> bool {
        [FilterKey::Condition, FilterKey::DateFrom, FilterKey::DateTo]
            .iter()
            .any(|key| self.values.contains_key(key))
    }

    pub fn to_filters(&self) -> AppResult<AssetFilters> {
        Ok(AssetFilters {
            search: self.get(FilterKey::Search).map(str::to_string),
            category_id: self.get(FilterKey::Category).map(str::to_string),
            status: self.get(FilterKey::Status).map(str::parse).transpose()?,
            condition: self.get(FilterKey::Condition).map(str::parse).transpose()?,
            location: self.get(FilterKey::Location).map(str::parse).transpose()?,
            date_from: self.get(FilterKey::DateFrom).map(parse_date).transpose()?,
            date_to: self.get(FilterKey::DateTo).map(parse_date).transpose()?,
        })
    }
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}'", value)))
}
