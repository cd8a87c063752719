//! Telemetry metric name constants.
//!
//! Centralised metric names for lustre operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `lustre_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status`: outcome: "ok", "rejected" or "error"
//! - `field`: categorical attribute: "cut", "color" or "clarity"
//! - `model`: regressor kind (e.g. "linear", "tree_ensemble")

/// Total prediction requests handled by the gateway.
///
/// Labels: `model`, `status` ("ok" | "rejected" | "error").
pub const PREDICTIONS_TOTAL: &str = "lustre_predictions_total";

/// End-to-end prediction duration in seconds (parse through predict).
///
/// Labels: `model`.
pub const PREDICTION_DURATION_SECONDS: &str = "lustre_prediction_duration_seconds";

/// Total requests rejected for an unrecognized categorical label.
///
/// Labels: `field`.
pub const CATEGORY_REJECTIONS_TOTAL: &str = "lustre_category_rejections_total";
