//! Builder for configuring gateway instances

use std::path::PathBuf;
use std::sync::Arc;

use super::PricingGateway;
use crate::artifact::{FittedRegressor, FittedScaler};
use crate::{LustreError, Regressor, Result, Scaler};

/// Main entry point for creating gateway instances.
pub struct Lustre;

impl Lustre {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> LustreBuilder {
        LustreBuilder::new()
    }
}

enum Source<T: ?Sized> {
    Instance(Arc<T>),
    File(PathBuf),
}

/// Builder for configuring gateway instances.
///
/// Each artifact comes either from an in-memory implementation or from a
/// JSON file loaded at [`build`](Self::build) time. The last call wins.
#[derive(Default)]
pub struct LustreBuilder {
    scaler: Option<Source<dyn Scaler>>,
    regressor: Option<Source<dyn Regressor>>,
}

impl LustreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an in-memory scaler.
    pub fn scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.scaler = Some(Source::Instance(Arc::new(scaler)));
        self
    }

    /// Load the scaler from a JSON artifact file.
    pub fn scaler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scaler = Some(Source::File(path.into()));
        self
    }

    /// Use an in-memory regressor.
    pub fn regressor(mut self, regressor: impl Regressor + 'static) -> Self {
        self.regressor = Some(Source::Instance(Arc::new(regressor)));
        self
    }

    /// Load the regressor from a JSON artifact file.
    pub fn regressor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.regressor = Some(Source::File(path.into()));
        self
    }

    /// Build the gateway, loading any file-backed artifacts.
    pub fn build(self) -> Result<PricingGateway> {
        let scaler: Arc<dyn Scaler> = match self.scaler.ok_or(LustreError::NoScaler)? {
            Source::Instance(scaler) => scaler,
            Source::File(path) => Arc::new(FittedScaler::load(&path)?),
        };
        let regressor: Arc<dyn Regressor> = match self.regressor.ok_or(LustreError::NoRegressor)? {
            Source::Instance(regressor) => regressor,
            Source::File(path) => Arc::new(FittedRegressor::load(&path)?),
        };
        Ok(PricingGateway::new(scaler, regressor))
    }
}
