use std::sync::{Arc, Mutex};

use lustre::artifact::{FittedScaler, LinearRegressor, StandardScaler};
use lustre::{
    FeatureVector, Lustre, LustreError, PredictionForm, PredictionRequest, Regressor, Result,
    Scaler,
};

// ============================================================================
// Mock artifacts
// ============================================================================

/// Scaler that records every row it sees and passes it through.
#[derive(Default, Clone)]
struct RecordingScaler {
    seen: Arc<Mutex<Vec<FeatureVector>>>,
}

impl Scaler for RecordingScaler {
    fn name(&self) -> &str {
        "recording"
    }

    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        self.seen.lock().unwrap().push(*features);
        Ok(*features)
    }
}

/// Regressor returning a fixed price.
struct FixedRegressor(f64);

impl Regressor for FixedRegressor {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(self.0)
    }
}

/// Regressor that always fails, as a broken artifact would.
struct FailingRegressor;

impl Regressor for FailingRegressor {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Err(LustreError::Inference("shape mismatch in booster".to_string()))
    }
}

fn scenario_form() -> PredictionForm {
    PredictionForm {
        carat: "1.0".into(),
        cut: "Ideal".into(),
        color: "E".into(),
        clarity: "VS1".into(),
        depth: "61.5".into(),
        table: "55.0".into(),
        x: "6.3".into(),
        y: "6.3".into(),
        z: "3.9".into(),
    }
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn build_requires_scaler() {
    let result = Lustre::builder().regressor(FixedRegressor(1.0)).build();
    assert!(matches!(result, Err(LustreError::NoScaler)));
}

#[test]
fn build_requires_regressor() {
    let result = Lustre::builder().scaler(FittedScaler::Identity).build();
    assert!(matches!(result, Err(LustreError::NoRegressor)));
}

#[test]
fn build_reports_artifact_load_failure() {
    let result = Lustre::builder()
        .scaler_path("/nonexistent/scaler.json")
        .regressor(FixedRegressor(1.0))
        .build();
    let err = result.err().unwrap();
    assert!(matches!(err, LustreError::Artifact(_)));
}

#[test]
fn build_from_artifact_files() {
    let dir = tempfile::tempdir().unwrap();
    let scaler = dir.path().join("scaler.json");
    let model = dir.path().join("model.json");
    std::fs::write(&scaler, r#"{"kind": "identity"}"#).unwrap();
    std::fs::write(
        &model,
        r#"{"kind": "tree_ensemble", "trees": [{"nodes": [{"value": 4321.0}]}]}"#,
    )
    .unwrap();

    let gateway = Lustre::builder()
        .scaler_path(&scaler)
        .regressor_path(&model)
        .build()
        .unwrap();
    assert_eq!(gateway.scaler_name(), "identity");
    assert_eq!(gateway.regressor_name(), "tree_ensemble");
    assert_eq!(
        gateway.respond(&scenario_form()),
        "Predicted Diamond Price (in US dollars): 4321.00"
    );
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn scaler_receives_encoded_row_in_column_order() {
    let scaler = RecordingScaler::default();
    let seen = scaler.seen.clone();
    let gateway = Lustre::builder()
        .scaler(scaler)
        .regressor(FixedRegressor(0.0))
        .build()
        .unwrap();

    gateway.predict_form(&scenario_form()).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].as_array(),
        &[1.0, 0.0, 1.0, 3.0, 61.5, 55.0, 6.3, 6.3, 3.9]
    );
}

#[test]
fn regressor_receives_scaled_row() {
    let scaler = StandardScaler::new([0.0; 9], [2.0; 9]).unwrap();
    let gateway = Lustre::builder()
        .scaler(scaler)
        .regressor(
            LinearRegressor::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.0).unwrap(),
        )
        .build()
        .unwrap();

    let prediction = gateway.predict_form(&scenario_form()).unwrap();
    // carat 1.0 halved by the scaler
    assert_eq!(prediction.price, 0.5);
    // the prediction keeps the unscaled row
    assert_eq!(prediction.features.carat(), 1.0);
}

#[test]
fn rejected_category_never_reaches_scaler() {
    let scaler = RecordingScaler::default();
    let seen = scaler.seen.clone();
    let gateway = Lustre::builder()
        .scaler(scaler)
        .regressor(FixedRegressor(1.0))
        .build()
        .unwrap();

    let mut form = scenario_form();
    form.clarity = "FL".into();
    let text = gateway.respond(&form);

    assert_eq!(
        text,
        "Clarity value not recognized. Available values: IF, VVS1, VVS2, VS1, VS2, SI1, SI2, I1"
    );
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn invalid_number_reported_before_category() {
    let gateway = Lustre::builder()
        .scaler(FittedScaler::Identity)
        .regressor(FixedRegressor(1.0))
        .build()
        .unwrap();

    let mut form = scenario_form();
    form.carat = "abc".into();
    form.cut = "ideal".into();
    let text = gateway.respond(&form);

    assert!(text.starts_with("Error occurred: "), "{text}");
    assert!(text.contains("abc"));
    assert!(!text.contains("Available values"));
}

#[test]
fn regressor_failure_becomes_generic_error() {
    let gateway = Lustre::builder()
        .scaler(FittedScaler::Identity)
        .regressor(FailingRegressor)
        .build()
        .unwrap();

    let text = gateway.respond(&scenario_form());
    assert_eq!(
        text,
        "Error occurred: inference error: shape mismatch in booster"
    );
}

#[test]
fn non_finite_inputs_never_reach_the_model() {
    let gateway = Lustre::builder()
        .scaler(StandardScaler::new([0.5; 9], [2.0; 9]).unwrap())
        .regressor(LinearRegressor::new([100.0; 9], 10.0).unwrap())
        .build()
        .unwrap();

    for raw in ["inf", "-inf", "nan", "NaN", "1e400"] {
        let mut form = scenario_form();
        form.depth = raw.into();
        let text = gateway.respond(&form);
        assert_eq!(
            text,
            "Error occurred: inference error: input contains a non-finite value in column 'Depth'",
            "depth = {raw}"
        );
    }
}

#[test]
fn non_finite_scaler_output_is_an_error() {
    struct OverflowingScaler;

    impl Scaler for OverflowingScaler {
        fn name(&self) -> &str {
            "overflowing"
        }

        fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
            let mut values = *features.as_array();
            values[6] = f64::MAX * 2.0;
            Ok(FeatureVector::from(values))
        }
    }

    let gateway = Lustre::builder()
        .scaler(OverflowingScaler)
        .regressor(FixedRegressor(1.0))
        .build()
        .unwrap();
    assert_eq!(
        gateway.respond(&scenario_form()),
        "Error occurred: inference error: scaled input contains a non-finite value in column 'X(length)'"
    );
}

#[test]
fn non_finite_price_is_an_error() {
    for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let gateway = Lustre::builder()
            .scaler(FittedScaler::Identity)
            .regressor(FixedRegressor(price))
            .build()
            .unwrap();
        let text = gateway.respond(&scenario_form());
        assert!(text.starts_with("Error occurred: "), "{text}");
        assert!(text.contains("non-finite price"), "{text}");
        assert!(!text.contains("Predicted Diamond Price"));
    }
}

#[test]
fn price_is_formatted_to_two_decimals() {
    for (price, expected) in [
        (1234.5, "1234.50"),
        (326.0, "326.00"),
        (0.004, "0.00"),
        (-12.345678, "-12.35"),
        (18823.999, "18824.00"),
    ] {
        let gateway = Lustre::builder()
            .scaler(FittedScaler::Identity)
            .regressor(FixedRegressor(price))
            .build()
            .unwrap();
        assert_eq!(
            gateway.respond(&scenario_form()),
            format!("Predicted Diamond Price (in US dollars): {expected}")
        );
    }
}

#[test]
fn predict_and_encode_agree_on_parsed_request() {
    let gateway = Lustre::builder()
        .scaler(FittedScaler::Identity)
        .regressor(FixedRegressor(7.0))
        .build()
        .unwrap();

    let request = PredictionRequest::try_from(&scenario_form()).unwrap();
    let encoded = gateway.encode(&request).unwrap();
    let prediction = gateway.predict(&request).unwrap();
    assert_eq!(prediction.features, encoded);
    assert_eq!(prediction.price, 7.0);
}

#[test]
fn gateway_is_shareable_across_threads() {
    let gateway = Arc::new(
        Lustre::builder()
            .scaler(FittedScaler::Identity)
            .regressor(FixedRegressor(99.0))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gateway = Arc::clone(&gateway);
            std::thread::spawn(move || gateway.respond(&scenario_form()))
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            "Predicted Diamond Price (in US dollars): 99.00"
        );
    }
}

// ============================================================================
// Raw form pairs
// ============================================================================

#[test]
fn respond_pairs_matches_respond() {
    let gateway = Lustre::builder()
        .scaler(FittedScaler::Identity)
        .regressor(FixedRegressor(326.0))
        .build()
        .unwrap();

    let form = scenario_form();
    let pairs = [
        ("Carat(Weight of Daimond)", form.carat.as_str()),
        ("Cut(Quality)", form.cut.as_str()),
        ("Color", form.color.as_str()),
        ("Clarity", form.clarity.as_str()),
        ("Depth", form.depth.as_str()),
        ("Table", form.table.as_str()),
        ("X(length)", form.x.as_str()),
        ("Y(width)", form.y.as_str()),
        ("Z(Depth)", form.z.as_str()),
    ];
    assert_eq!(gateway.respond_pairs(&pairs), gateway.respond(&form));
}

#[test]
fn respond_pairs_reports_bad_number_ahead_of_missing_field() {
    let gateway = Lustre::builder()
        .scaler(FittedScaler::Identity)
        .regressor(FixedRegressor(1.0))
        .build()
        .unwrap();

    let pairs = [("Carat(Weight of Daimond)", "abc"), ("Cut(Quality)", "Ideal")];
    let text = gateway.respond_pairs(&pairs);
    assert!(text.starts_with("Error occurred: could not convert 'abc'"), "{text}");

    let pairs = [("Carat(Weight of Daimond)", "1.0"), ("Cut(Quality)", "Ideal")];
    assert_eq!(
        gateway.respond_pairs(&pairs),
        "Error occurred: missing form field 'Color'"
    );
}
