//! Lustre error types

use std::num::ParseFloatError;

use crate::types::CategoryField;

/// Lustre error types
#[derive(Debug, thiserror::Error)]
pub enum LustreError {
    // Request errors
    /// A categorical label is not a key of its mapping.
    ///
    /// This is the only error surfaced to callers verbatim; everything else
    /// is collapsed into a generic message by [`LustreError::response_text`].
    #[error("{field} value not recognized. Available values: {}", .field.mapping().joined_labels())]
    UnrecognizedCategory { field: CategoryField, label: String },

    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("could not convert '{value}' to float for field '{field}': {source}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("malformed form body: {0}")]
    MalformedForm(String),

    // Artifact errors
    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("inference error: {0}")]
    Inference(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("no scaler configured")]
    NoScaler,

    #[error("no regressor configured")]
    NoRegressor,

    #[error("configuration error: {0}")]
    Configuration(String),

    // Transport errors (client side)
    #[error("HTTP error: {0}")]
    Http(String),
}

impl LustreError {
    /// Whether this error is a category rejection rather than a failure.
    ///
    /// Rejections carry a user-facing message listing the accepted labels.
    pub fn is_rejection(&self) -> bool {
        matches!(self, LustreError::UnrecognizedCategory { .. })
    }

    /// The plain-text body returned to a form caller for this error.
    ///
    /// Category rejections are returned as-is; every other kind is folded
    /// into `Error occurred: <message>` with no further distinction.
    pub fn response_text(&self) -> String {
        if self.is_rejection() {
            self.to_string()
        } else {
            format!("Error occurred: {self}")
        }
    }
}

/// Result type alias for Lustre operations
pub type Result<T> = std::result::Result<T, LustreError>;
