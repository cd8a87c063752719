//! Service health reporting

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always "ok" when the server answers.
    pub status: String,
    /// Full build version string.
    pub version: String,
    /// Scaler kind in use.
    pub scaler: String,
    /// Regressor kind in use.
    pub model: String,
}
