//! View models consumed by the front end
//!
//! These hold display state only and talk to data exclusively through
//! [`crate::services::AssetService`].

pub mod detail;
pub mod export;
pub mod filters;
pub mod form;
pub mod table;

pub use detail::{AssetDetailView, WarrantyStatus};
pub use export::{assets_to_csv, export_filename};
pub use filters::{FilterKey, FilterPanel};
pub use form::{AssetForm, AssetFormFields, FormMode};
pub use table::{AssetRow, SortDirection, SortField, SortIndicator, TableSort};
