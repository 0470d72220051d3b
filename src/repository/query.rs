//! Filter-to-query translation
//!
//! An [`AssetQuery`] is the transport-independent form of an asset listing:
//! a conjunction of predicates over typed columns. It renders to PostgREST
//! query parameters for the HTTP store and evaluates directly against an
//! [`Asset`] for in-process stores.

use crate::models::{Asset, AssetFilters};

/// Filterable columns of the `assets` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Description,
    SerialNumber,
    CategoryId,
    AssetStatus,
    ConditionStatus,
    Location,
    PurchaseDate,
}

/// Columns covered by the free-text search
pub const SEARCH_COLUMNS: [Column; 3] = [Column::Name, Column::Description, Column::SerialNumber];

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Description => "description",
            Column::SerialNumber => "serial_number",
            Column::CategoryId => "category_id",
            Column::AssetStatus => "asset_status",
            Column::ConditionStatus => "condition_status",
            Column::Location => "location",
            Column::PurchaseDate => "purchase_date",
        }
    }

    /// Stored value of this column for an asset (`None` is SQL NULL)
    fn value(&self, asset: &Asset) -> Option<String> {
        match self {
            Column::Name => Some(asset.name.clone()),
            Column::Description => asset.description.clone(),
            Column::SerialNumber => asset.serial_number.clone(),
            Column::CategoryId => asset.category_id.clone(),
            Column::AssetStatus => Some(asset.asset_status.as_str().to_string()),
            Column::ConditionStatus => Some(asset.condition_status.as_str().to_string()),
            Column::Location => Some(asset.location.as_str().to_string()),
            Column::PurchaseDate => asset.purchase_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Single predicate; values are stored representations (ISO dates compare
/// chronologically as strings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(Column, String),
    Gte(Column, String),
    Lte(Column, String),
    /// Case-insensitive substring match on any of the columns. `*` in the
    /// term matches any run of characters; `%` and `_` are literal.
    AnyILike(Vec<Column>, String),
}

impl Predicate {
    pub fn matches(&self, asset: &Asset) -> bool {
        match self {
            Predicate::Eq(column, expected) => {
                column.value(asset).as_deref() == Some(expected.as_str())
            }
            Predicate::Gte(column, bound) => column
                .value(asset)
                .map_or(false, |v| v.as_str() >= bound.as_str()),
            Predicate::Lte(column, bound) => column
                .value(asset)
                .map_or(false, |v| v.as_str() <= bound.as_str()),
            Predicate::AnyILike(columns, needle) => {
                let needle = needle.to_lowercase();
                columns.iter().any(|column| {
                    column
                        .value(asset)
                        .map_or(false, |v| contains_pattern(&v.to_lowercase(), &needle))
                })
            }
        }
    }

    /// PostgREST `(key, value)` query parameter for this predicate
    pub fn to_param(&self) -> (String, String) {
        match self {
            Predicate::Eq(column, value) => param(*column, "eq", value),
            Predicate::Gte(column, value) => param(*column, "gte", value),
            Predicate::Lte(column, value) => param(*column, "lte", value),
            Predicate::AnyILike(columns, needle) => {
                let pattern = quote(&format!("*{}*", escape_like(needle)));
                let alternatives: Vec<String> = columns
                    .iter()
                    .map(|column| format!("{}.ilike.{}", column.as_str(), pattern))
                    .collect();
                ("or".to_string(), format!("({})", alternatives.join(",")))
            }
        }
    }
}

fn param(column: Column, operator: &str, value: &str) -> (String, String) {
    (column.as_str().to_string(), format!("{}.{}", operator, value))
}

/// `needle` occurs in `haystack`, with each `*` standing for any run of characters
fn contains_pattern(haystack: &str, needle: &str) -> bool {
    let mut rest = haystack;
    for piece in needle.split('*').filter(|p| !p.is_empty()) {
        match rest.find(piece) {
            Some(at) => rest = &rest[at + piece.len()..],
            None => return false,
        }
    }
    true
}

/// Make LIKE's own wildcards literal. `*` is left for PostgREST to turn into `%`.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Double-quote a value for use inside a PostgREST logical expression,
/// where `,` `.` `:` `(` `)` would otherwise be reserved.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Conjunction of predicates; empty means "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub predicates: Vec<Predicate>,
}

impl AssetQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// Each populated filter contributes exactly one predicate.
    pub fn from_filters(filters: &AssetFilters) -> Self {
        let mut predicates = Vec::new();

        if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
            predicates.push(Predicate::AnyILike(SEARCH_COLUMNS.to_vec(), search.to_string()));
        }
        if let Some(category_id) = filters.category_id.as_deref().filter(|s| !s.is_empty()) {
            predicates.push(Predicate::Eq(Column::CategoryId, category_id.to_string()));
        }
        if let Some(status) = filters.status {
            predicates.push(Predicate::Eq(Column::AssetStatus, status.as_str().to_string()));
        }
        if let Some(condition) = filters.condition {
            predicates.push(Predicate::Eq(Column::ConditionStatus, condition.as_str().to_string()));
        }
        if let Some(location) = filters.location {
            predicates.push(Predicate::Eq(Column::Location, location.as_str().to_string()));
        }
        if let Some(from) = filters.date_from {
            let from = from.format("%Y-%m-%d").to_string();
            predicates.push(Predicate::Gte(Column::PurchaseDate, from));
        }
        if let Some(to) = filters.date_to {
            let to = to.format("%Y-%m-%d").to_string();
            predicates.push(Predicate::Lte(Column::PurchaseDate, to));
        }

        Self { predicates }
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        self.predicates.iter().all(|p| p.matches(asset))
    }

    /// Filter parameters, in predicate order. Selection and ordering are
    /// added by the store.
    pub fn render_params(&self) -> Vec<(String, String)> {
        self.predicates.iter().map(Predicate::to_param).collect()
    }
}
