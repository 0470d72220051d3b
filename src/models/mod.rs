//! Data models for the asset inventory

pub mod asset;
pub mod assignment;
pub mod category;
pub mod document;
pub mod enums;
pub mod filters;
pub mod maintenance;

// Re-export commonly used types
pub use asset::{Asset, AssetDetails, AssetPatch, NewAsset};
pub use assignment::AssetAssignment;
pub use category::AssetCategory;
pub use document::AssetDocument;
pub use enums::{
    AssetStatus, ConditionStatus, DocumentType, Location, MaintenanceStatus, MaintenanceType,
};
pub use filters::AssetFilters;
pub use maintenance::AssetMaintenance;
