//! Error types for the asset inventory

use thiserror::Error;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    RemoteFailure(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, AppError::NotAuthenticated)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        tracing::error!("Transport error: {:?}", e);
        AppError::RemoteFailure(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::RemoteFailure(format!("Malformed response from store: {}", e))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                if field == "__all__" {
                    reasons.join(", ")
                } else {
                    format!("{}: {}", field, reasons.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("; ");

        AppError::Validation(message)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
