//! Asset document model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::DocumentType;

/// File attached to an asset (photo, manual, receipt...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDocument {
    pub id: String,
    pub asset_id: String,
    pub document_name: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub file_url: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
