//! Fixed-order model input

use serde::{Deserialize, Serialize};

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 9;

/// Column names in the order the scaler and regressor were fitted on.
///
/// These double as the `/predict` form field names.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Carat(Weight of Daimond)",
    "Cut(Quality)",
    "Color",
    "Clarity",
    "Depth",
    "Table",
    "X(length)",
    "Y(width)",
    "Z(Depth)",
];

/// The 9-column numeric row handed to the scaler and regressor.
///
/// Column order is load-bearing: a reordered vector produces wrong
/// predictions without any error. Build one through the encoder or
/// [`FeatureVector::new`], which fixes the order by parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carat: f64,
        cut: u8,
        color: u8,
        clarity: u8,
        depth: f64,
        table: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Self {
        Self([
            carat,
            f64::from(cut),
            f64::from(color),
            f64::from(clarity),
            depth,
            table,
            x,
            y,
            z,
        ])
    }

    /// Wrap an already-ordered row, e.g. the output of a scaler.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, column: usize) -> Option<f64> {
        self.0.get(column).copied()
    }

    /// `(column name, value)` pairs in column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }

    pub fn carat(&self) -> f64 {
        self.0[0]
    }

    pub fn cut(&self) -> f64 {
        self.0[1]
    }

    pub fn color(&self) -> f64 {
        self.0[2]
    }

    pub fn clarity(&self) -> f64 {
        self.0[3]
    }

    pub fn depth(&self) -> f64 {
        self.0[4]
    }

    pub fn table(&self) -> f64 {
        self.0[5]
    }

    pub fn x(&self) -> f64 {
        self.0[6]
    }

    pub fn y(&self) -> f64 {
        self.0[7]
    }

    pub fn z(&self) -> f64 {
        self.0[8]
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}
