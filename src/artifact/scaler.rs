//! Pre-fitted scalers

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{columns, ensure_finite, read_json};
use crate::types::FEATURE_COUNT;
use crate::{FeatureVector, LustreError, Result, Scaler};

/// Standardization: `(x - mean) / scale` per column.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Build from fitted parameters. Every `scale` entry must be non-zero.
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self> {
        ensure_finite("mean", &mean)?;
        ensure_finite("scale", &scale)?;
        if let Some(i) = scale.iter().position(|s| *s == 0.0) {
            return Err(LustreError::Artifact(format!(
                "'scale' is zero at column {i}"
            )));
        }
        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }
}

impl Scaler for StandardScaler {
    fn name(&self) -> &str {
        "standard"
    }

    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        let x = features.as_array();
        Ok(FeatureVector::from_array(std::array::from_fn(|i| {
            (x[i] - self.mean[i]) / self.scale[i]
        })))
    }
}

/// Range scaling: `x * scale + min` per column.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl MinMaxScaler {
    pub fn new(min: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self> {
        ensure_finite("min", &min)?;
        ensure_finite("scale", &scale)?;
        Ok(Self { min, scale })
    }
}

impl Scaler for MinMaxScaler {
    fn name(&self) -> &str {
        "min_max"
    }

    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        let x = features.as_array();
        Ok(FeatureVector::from_array(std::array::from_fn(|i| {
            x[i] * self.scale[i] + self.min[i]
        })))
    }
}

/// Any supported scaler artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedScaler {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
    /// Pass-through, for models trained on unscaled input.
    Identity,
}

/// On-disk shape, validated into [`FittedScaler`].
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerArtifact {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    Identity,
}

impl FittedScaler {
    /// Load and validate a scaler artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact: ScalerArtifact = read_json(path)?;
        let scaler = Self::from_artifact(artifact).map_err(|e| match e {
            LustreError::Artifact(msg) => {
                LustreError::Artifact(format!("Invalid scaler artifact {path:?}: {msg}"))
            }
            other => other,
        })?;
        info!(path = %path.display(), kind = scaler.name(), "loaded scaler");
        Ok(scaler)
    }

    /// Parse and validate a scaler artifact from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_artifact(serde_json::from_str(json)?)
    }

    fn from_artifact(artifact: ScalerArtifact) -> Result<Self> {
        match artifact {
            ScalerArtifact::Standard { mean, scale } => Ok(FittedScaler::Standard(
                StandardScaler::new(columns("mean", mean)?, columns("scale", scale)?)?,
            )),
            ScalerArtifact::MinMax { min, scale } => Ok(FittedScaler::MinMax(MinMaxScaler::new(
                columns("min", min)?,
                columns("scale", scale)?,
            )?)),
            ScalerArtifact::Identity => Ok(FittedScaler::Identity),
        }
    }
}

impl Scaler for FittedScaler {
    fn name(&self) -> &str {
        match self {
            FittedScaler::Standard(s) => s.name(),
            FittedScaler::MinMax(s) => s.name(),
            FittedScaler::Identity => "identity",
        }
    }

    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        match self {
            FittedScaler::Standard(s) => s.transform(features),
            FittedScaler::MinMax(s) => s.transform(features),
            FittedScaler::Identity => Ok(*features),
        }
    }
}
