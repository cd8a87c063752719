//! Core model traits

use crate::{FeatureVector, Result};

/// A pre-fitted normalizer applied to encoded rows before prediction.
///
/// Implementations are loaded once and shared read-only across requests.
pub trait Scaler: Send + Sync {
    /// Short identifier used in logs and `/health`.
    fn name(&self) -> &str;

    /// Map an encoded row to its normalized equivalent.
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector>;
}

/// A pre-trained regressor producing one price per normalized row.
pub trait Regressor: Send + Sync {
    /// Short identifier used in logs and `/health`.
    fn name(&self) -> &str;

    /// Predict a single value for a normalized row.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}
