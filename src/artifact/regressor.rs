//! Pre-trained regressors

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{columns, ensure_finite, read_json};
use crate::types::FEATURE_COUNT;
use crate::{FeatureVector, LustreError, Regressor, Result};

/// `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self> {
        ensure_finite("coefficients", &coefficients)?;
        ensure_finite("intercept", &[intercept])?;
        Ok(Self {
            coefficients,
            intercept,
        })
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }
}

/// A single node of a regression tree.
///
/// Splits send a row left when `x[feature] <= threshold` (NaN goes right).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A regression tree stored as a flat node array rooted at index 0.
///
/// Children always sit at higher indices than their parent, which makes
/// every traversal terminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let len = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(format!(
                            "node {index} splits on feature {feature}, only {FEATURE_COUNT} exist"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {index} has a NaN threshold"));
                    }
                    for child in [left, right] {
                        if child <= index || child >= len {
                            return Err(format!(
                                "node {index} has invalid child {child} (tree has {len} nodes)"
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {index} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaf value reached by `features`. Only call on validated trees.
    fn evaluate(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Gradient boosting: outputs are added.
    #[default]
    Sum,
    /// Random forest: outputs are averaged.
    Mean,
}

/// Boosted or bagged regression trees.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    base_score: f64,
    aggregation: Aggregation,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn new(base_score: f64, aggregation: Aggregation, trees: Vec<Tree>) -> Result<Self> {
        ensure_finite("base_score", &[base_score])?;
        if trees.is_empty() {
            return Err(LustreError::Artifact("ensemble has no trees".to_string()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| LustreError::Artifact(format!("tree {i}: {e}")))?;
        }
        Ok(Self {
            base_score,
            aggregation,
            trees,
        })
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl Regressor for TreeEnsemble {
    fn name(&self) -> &str {
        "tree_ensemble"
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let row = features.as_array();
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(row)).sum();
        let combined = match self.aggregation {
            Aggregation::Sum => total,
            Aggregation::Mean => total / self.trees.len() as f64,
        };
        Ok(self.base_score + combined)
    }
}

/// Any supported regressor artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedRegressor {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

/// On-disk shape, validated into [`FittedRegressor`].
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RegressorArtifact {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    TreeEnsemble {
        #[serde(default)]
        base_score: f64,
        #[serde(default)]
        aggregation: Aggregation,
        trees: Vec<Tree>,
    },
}

impl FittedRegressor {
    /// Load and validate a regressor artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact: RegressorArtifact = read_json(path)?;
        let regressor = Self::from_artifact(artifact).map_err(|e| match e {
            LustreError::Artifact(msg) => {
                LustreError::Artifact(format!("Invalid model artifact {path:?}: {msg}"))
            }
            other => other,
        })?;
        info!(path = %path.display(), kind = regressor.name(), "loaded regressor");
        Ok(regressor)
    }

    /// Parse and validate a regressor artifact from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_artifact(serde_json::from_str(json)?)
    }

    fn from_artifact(artifact: RegressorArtifact) -> Result<Self> {
        match artifact {
            RegressorArtifact::Linear {
                coefficients,
                intercept,
            } => Ok(FittedRegressor::Linear(LinearRegressor::new(
                columns("coefficients", coefficients)?,
                intercept,
            )?)),
            RegressorArtifact::TreeEnsemble {
                base_score,
                aggregation,
                trees,
            } => Ok(FittedRegressor::TreeEnsemble(TreeEnsemble::new(
                base_score,
                aggregation,
                trees,
            )?)),
        }
    }
}

impl Regressor for FittedRegressor {
    fn name(&self) -> &str {
        match self {
            FittedRegressor::Linear(r) => r.name(),
            FittedRegressor::TreeEnsemble(r) => r.name(),
        }
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        match self {
            FittedRegressor::Linear(r) => r.predict(features),
            FittedRegressor::TreeEnsemble(r) => r.predict(features),
        }
    }
}
