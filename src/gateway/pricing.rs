//! PricingGateway - runs the encode, scale, predict pipeline

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::encoder;
use crate::telemetry;
use crate::{
    FEATURE_COLUMNS, FeatureVector, LustreError, Prediction, PredictionForm, PredictionRequest,
    Regressor, Result, Scaler,
};

/// Gateway owning one scaler and one regressor, shared read-only.
///
/// Every call is a single synchronous pass; the gateway keeps no state
/// between calls, so it can be wrapped in an `Arc` and used from any
/// number of request handlers.
pub struct PricingGateway {
    scaler: Arc<dyn Scaler>,
    regressor: Arc<dyn Regressor>,
}

impl PricingGateway {
    pub(crate) fn new(scaler: Arc<dyn Scaler>, regressor: Arc<dyn Regressor>) -> Self {
        Self { scaler, regressor }
    }

    pub fn scaler_name(&self) -> &str {
        self.scaler.name()
    }

    pub fn regressor_name(&self) -> &str {
        self.regressor.name()
    }

    /// Encode a request without running the model.
    pub fn encode(&self, request: &PredictionRequest) -> Result<FeatureVector> {
        encoder::encode(request)
    }

    /// Encode, scale and predict a parsed request.
    pub fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        self.observe(|| self.run(request))
    }

    /// Parse a raw form, then [`predict`](Self::predict) it.
    ///
    /// Numeric fields are parsed before any categorical label is checked.
    pub fn predict_form(&self, form: &PredictionForm) -> Result<Prediction> {
        self.observe(|| {
            let request = PredictionRequest::try_from(form)?;
            self.run(&request)
        })
    }

    /// Read raw form pairs field by field, then [`predict`](Self::predict).
    ///
    /// A missing field is only reported once every field ahead of it has
    /// been read and parsed.
    pub fn predict_pairs<K, V>(&self, pairs: &[(K, V)]) -> Result<Prediction>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.observe(|| {
            let request = PredictionRequest::from_pairs(pairs)?;
            self.run(&request)
        })
    }

    /// Response body for a form submission: the formatted prediction, the
    /// category rejection, or the generic error text.
    pub fn respond(&self, form: &PredictionForm) -> String {
        response_text(self.predict_form(form))
    }

    /// [`respond`](Self::respond) for raw form pairs.
    pub fn respond_pairs<K, V>(&self, pairs: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        response_text(self.predict_pairs(pairs))
    }

    fn run(&self, request: &PredictionRequest) -> Result<Prediction> {
        let features = encoder::encode(request)?;
        ensure_finite("input", &features)?;
        let scaled = self.scaler.transform(&features)?;
        ensure_finite("scaled input", &scaled)?;
        let price = self.regressor.predict(&scaled)?;
        if !price.is_finite() {
            return Err(LustreError::Inference(format!(
                "model produced a non-finite price ({price})"
            )));
        }
        Ok(Prediction { price, features })
    }

    fn observe(&self, f: impl FnOnce() -> Result<Prediction>) -> Result<Prediction> {
        let start = Instant::now();
        let result = f();
        self.record(start, &result);
        result
    }

    /// Record outcome metrics (counter + histogram) and log the result.
    fn record(&self, start: Instant, result: &Result<Prediction>) {
        let model = self.regressor.name().to_owned();
        let status = match result {
            Ok(prediction) => {
                debug!(model = %model, price = prediction.price, "prediction served");
                "ok"
            }
            Err(LustreError::UnrecognizedCategory { field, label }) => {
                warn!(field = field.key(), label = %label, "rejected unrecognized category");
                metrics::counter!(telemetry::CATEGORY_REJECTIONS_TOTAL,
                    "field" => field.key(),
                )
                .increment(1);
                "rejected"
            }
            Err(e) => {
                warn!(model = %model, error = %e, "prediction failed");
                "error"
            }
        };
        metrics::counter!(telemetry::PREDICTIONS_TOTAL,
            "model" => model.clone(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::PREDICTION_DURATION_SECONDS,
            "model" => model,
        )
        .record(start.elapsed().as_secs_f64());
    }
}

fn response_text(result: Result<Prediction>) -> String {
    match result {
        Ok(prediction) => prediction.to_string(),
        Err(e) => e.response_text(),
    }
}

/// Models only see finite rows.
fn ensure_finite(stage: &str, features: &FeatureVector) -> Result<()> {
    match features.as_slice().iter().position(|v| !v.is_finite()) {
        Some(column) => Err(LustreError::Inference(format!(
            "{stage} contains a non-finite value in column '{}'",
            FEATURE_COLUMNS[column]
        ))),
        None => Ok(()),
    }
}
