//! Lustre - diamond price prediction over an HTTP form endpoint
//!
//! This crate encodes raw diamond attributes into the fixed 9-column row a
//! pre-trained regressor expects, scales it with a pre-fitted normalizer
//! and formats the predicted price. The categorical tables (cut, color,
//! clarity) are static; the scaler and regressor sit behind the [`Scaler`]
//! and [`Regressor`] traits so any artifact format can be plugged in.
//!
//! # Example
//!
//! ```rust,no_run
//! use lustre::{Lustre, PredictionRequest};
//!
//! fn main() -> lustre::Result<()> {
//!     let gateway = Lustre::builder()
//!         .scaler_path("scaler.json")
//!         .regressor_path("model.json")
//!         .build()?;
//!
//!     let request = PredictionRequest::new("Ideal", "E", "VS1")
//!         .carat(1.0)
//!         .depth(61.5)
//!         .table(55.0)
//!         .dimensions(6.3, 6.3, 3.9);
//!
//!     println!("{}", gateway.predict(&request)?);
//!     Ok(())
//! }
//! ```
//!
//! # Encoding only
//!
//! ```rust
//! use lustre::{PredictionRequest, encode};
//!
//! let request = PredictionRequest::new("Ideal", "E", "VS1").carat(1.0);
//! let features = encode(&request).unwrap();
//! assert_eq!(features.cut(), 0.0);
//! assert_eq!(features.color(), 1.0);
//! assert_eq!(features.clarity(), 3.0);
//! ```

pub mod artifact;
#[cfg(feature = "client")]
pub mod client;
pub mod encoder;
pub mod error;
pub mod gateway;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod traits;
pub mod types;
mod version;

// Re-export main types at crate root
pub use encoder::encode;
pub use error::{LustreError, Result};
pub use gateway::{Lustre, LustreBuilder, PricingGateway};
pub use traits::{Regressor, Scaler};
pub use version::{PKG_VERSION, version_string};

pub use types::{
    CLARITY, COLOR, CUT, CategoryField, CategoryMapping, FEATURE_COLUMNS, FEATURE_COUNT,
    FeatureVector, HealthStatus, Prediction, PredictionForm, PredictionRequest,
};
