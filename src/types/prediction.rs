//! Prediction output

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FeatureVector;

/// Prefix of every successful `/predict` response.
pub const PREDICTION_PREFIX: &str = "Predicted Diamond Price (in US dollars): ";

/// A model output together with the encoded row that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted price in US dollars.
    pub price: f64,
    /// Unscaled encoded input.
    pub features: FeatureVector,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREDICTION_PREFIX}{:.2}", self.price)
    }
}
