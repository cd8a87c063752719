//! Tests for metrics emitted by the pricing gateway.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use lustre::artifact::FittedScaler;
use lustre::telemetry;
use lustre::{FeatureVector, Lustre, LustreError, PredictionForm, PricingGateway, Regressor, Result};

// ============================================================================
// Mock regressors
// ============================================================================

struct ConstantRegressor;

impl Regressor for ConstantRegressor {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(1000.0)
    }
}

struct BrokenRegressor;

impl Regressor for BrokenRegressor {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Err(LustreError::Inference("corrupt weights".to_string()))
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum counter values for `name` whose labels include `label = value`.
fn counter_with_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| {
            key.key()
                .labels()
                .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Number of histogram samples recorded for a metric name.
fn histogram_samples(snapshot: &SnapshotVec, name: &str) -> usize {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Histogram(samples) => samples.len(),
            _ => 0,
        })
        .sum()
}

fn gateway(regressor: impl Regressor + 'static) -> PricingGateway {
    Lustre::builder()
        .scaler(FittedScaler::Identity)
        .regressor(regressor)
        .build()
        .unwrap()
}

fn form() -> PredictionForm {
    PredictionForm {
        carat: "0.9".into(),
        cut: "Premium".into(),
        color: "G".into(),
        clarity: "SI1".into(),
        depth: "62.0".into(),
        table: "58.0".into(),
        x: "6.1".into(),
        y: "6.2".into(),
        z: "3.8".into(),
    }
}

/// Run `f` with a fresh local recorder and return the snapshot.
fn capture(f: impl FnOnce()) -> SnapshotVec {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    metrics::with_local_recorder(&recorder, f);
    snapshotter.snapshot().into_vec()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn successful_prediction_records_metrics() {
    let gateway = gateway(ConstantRegressor);
    let snapshot = capture(|| {
        assert!(gateway.predict_form(&form()).is_ok());
    });

    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "ok"),
        1
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "model", "constant"),
        1
    );
    assert_eq!(
        histogram_samples(&snapshot, telemetry::PREDICTION_DURATION_SECONDS),
        1
    );
}

#[test]
fn rejection_records_field() {
    let gateway = gateway(ConstantRegressor);
    let snapshot = capture(|| {
        let mut bad = form();
        bad.color = "Z".into();
        let _ = gateway.respond(&bad);
    });

    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "rejected"),
        1
    );
    assert_eq!(
        counter_with_label(
            &snapshot,
            telemetry::CATEGORY_REJECTIONS_TOTAL,
            "field",
            "color"
        ),
        1
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "ok"),
        0
    );
}

#[test]
fn failures_record_error_status() {
    let broken = gateway(BrokenRegressor);
    let healthy = gateway(ConstantRegressor);
    let snapshot = capture(|| {
        let _ = broken.respond(&form());
        let mut bad = form();
        bad.table = "wide".into();
        let _ = healthy.respond(&bad);
    });

    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "error"),
        2
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::CATEGORY_REJECTIONS_TOTAL, "field", "cut"),
        0
    );
    assert_eq!(
        histogram_samples(&snapshot, telemetry::PREDICTION_DURATION_SECONDS),
        2
    );
}

#[test]
fn unreadable_pairs_and_non_finite_inputs_record_error_status() {
    let gateway = gateway(ConstantRegressor);
    let snapshot = capture(|| {
        let _ = gateway.respond_pairs(&[("Carat(Weight of Daimond)", "1.0")]);
        let mut bad = form();
        bad.z = "inf".into();
        let _ = gateway.respond(&bad);
    });

    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "error"),
        2
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "ok"),
        0
    );
}

#[test]
fn one_record_per_form_prediction() {
    let gateway = gateway(ConstantRegressor);
    let snapshot = capture(|| {
        for _ in 0..3 {
            let _ = gateway.respond(&form());
        }
    });
    assert_eq!(
        counter_with_label(&snapshot, telemetry::PREDICTIONS_TOTAL, "status", "ok"),
        3
    );
}

#[test]
fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let gateway = gateway(ConstantRegressor);
    assert!(gateway.predict_form(&form()).is_ok());
}
