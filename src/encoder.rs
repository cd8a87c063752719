//! Categorical encoding and feature assembly.
//!
//! [`encode`] turns a [`PredictionRequest`] into the [`FeatureVector`] the
//! scaler and regressor expect. Categorical labels are checked in a fixed
//! order (cut, color, clarity) and the first unknown label short-circuits:
//! a request with a bad cut and a bad color only reports the cut.

use crate::Result;
use crate::types::{CLARITY, COLOR, CUT, FeatureVector, PredictionRequest};

/// Encode a request into a model row.
///
/// Pure: identical requests always produce identical vectors.
pub fn encode(request: &PredictionRequest) -> Result<FeatureVector> {
    let cut = CUT.lookup(&request.cut)?;
    let color = COLOR.lookup(&request.color)?;
    let clarity = CLARITY.lookup(&request.clarity)?;

    Ok(FeatureVector::new(
        request.carat,
        cut,
        color,
        clarity,
        request.depth,
        request.table,
        request.x,
        request.y,
        request.z,
    ))
}
