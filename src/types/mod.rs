//! Public types for the Lustre API.

mod category;
mod feature;
pub mod form;
mod health;
mod prediction;

pub use category::{CLARITY, COLOR, CUT, CategoryField, CategoryMapping};
pub use feature::{FEATURE_COLUMNS, FEATURE_COUNT, FeatureVector};
pub use form::{PredictionForm, PredictionRequest};
pub use health::HealthStatus;
pub use prediction::{PREDICTION_PREFIX, Prediction};
