//! File-backed scaler and regressor artifacts.
//!
//! Artifacts are JSON documents tagged by `"kind"`, loaded once at startup
//! and validated up front so that evaluation can never fail on shape:
//!
//! ```json
//! { "kind": "standard", "mean": [..9], "scale": [..9] }
//! { "kind": "linear", "coefficients": [..9], "intercept": 326.0 }
//! ```
//!
//! See [`FittedScaler`] and [`FittedRegressor`] for every supported kind.

mod regressor;
mod scaler;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

pub use regressor::{Aggregation, FittedRegressor, LinearRegressor, Tree, TreeEnsemble, TreeNode};
pub use scaler::{FittedScaler, MinMaxScaler, StandardScaler};

use crate::types::FEATURE_COUNT;
use crate::{LustreError, Result};

/// Read and deserialize a JSON artifact file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        LustreError::Artifact(format!("Failed to read artifact file {path:?}: {e}"))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        LustreError::Artifact(format!("Failed to parse artifact file {path:?}: {e}"))
    })
}

/// Convert a parameter list into one value per feature column.
fn columns(name: &str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT]> {
    let len = values.len();
    values.try_into().map_err(|_| {
        LustreError::Artifact(format!(
            "'{name}' must have {FEATURE_COUNT} values, got {len}"
        ))
    })
}

/// Reject NaN and infinite parameters.
fn ensure_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(LustreError::Artifact(format!(
            "'{name}' has a non-finite value at column {i}"
        ))),
        None => Ok(()),
    }
}
