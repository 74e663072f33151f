//! End-to-end prediction tests against the shipped artifact set.
//!
//! These run the real pipeline exactly as the service does: artifacts read
//! from `artifacts/` in the crate root, feature vectors assembled in
//! registry order, forecasts banded for display.

use std::path::Path;

use flopred_service::alert::banding::{self, RiverCondition};
use flopred_service::loader::{self, FsSource};
use flopred_service::model::{PipelineVariant, PredictError};
use flopred_service::stations;

fn shipped_set() -> flopred_service::pipeline::ArtifactSet {
    loader::load_set(&FsSource, Path::new("artifacts"))
        .expect("shipped artifact set should load")
}

#[test]
fn test_full_variant_defaults_predict_a_normal_level() {
    let set = shipped_set();
    let pipeline = set.pipeline(PipelineVariant::Full);

    let defaults = stations::default_features(PipelineVariant::Full);
    let forecast = pipeline.forecast(&defaults).expect("defaults are valid input");

    println!(
        "full variant defaults -> {:.1} cm ({})",
        forecast.predicted_cm,
        banding::classify(forecast.predicted_cm)
    );

    assert!(forecast.predicted.is_finite());
    assert!(
        forecast.predicted_cm > 60.0 && forecast.predicted_cm < 100.0,
        "quiet-day defaults should forecast a below-attention level, got {:.1}",
        forecast.predicted_cm
    );
    assert_eq!(
        banding::classify(forecast.predicted_cm),
        RiverCondition::Normal
    );
}

#[test]
fn test_rain_only_variant_reports_meters_normalized_to_centimeters() {
    let set = shipped_set();
    let pipeline = set.pipeline(PipelineVariant::RainOnly);

    let defaults = stations::default_features(PipelineVariant::RainOnly);
    let forecast = pipeline.forecast(&defaults).expect("defaults are valid input");

    println!(
        "rain-only defaults -> {:.2} m = {:.1} cm",
        forecast.predicted, forecast.predicted_cm
    );

    assert!(forecast.predicted.is_finite());
    assert!(
        forecast.predicted > 0.5 && forecast.predicted < 2.0,
        "rain-only forecast should be on the meter scale, got {}",
        forecast.predicted
    );
    assert_eq!(forecast.predicted_cm, forecast.predicted * 100.0);
}

#[test]
fn test_heavy_rain_scenario_raises_the_forecast() {
    let set = shipped_set();
    let pipeline = set.pipeline(PipelineVariant::Full);

    let quiet = pipeline
        .predict(&[50.0, 10.0, 120.0, 5.0])
        .expect("valid input");
    let storm = pipeline
        .predict(&[320.0, 180.0, 460.0, 150.0])
        .expect("valid input");

    println!("quiet {:.1} cm, storm {:.1} cm", quiet, storm);
    assert!(
        storm > quiet,
        "high upstream readings must forecast a higher level ({:.1} <= {:.1})",
        storm,
        quiet
    );
    assert_eq!(
        banding::classify(storm),
        RiverCondition::FloodAlert,
        "a major storm scenario should reach the alert band, got {:.1} cm",
        storm
    );
}

#[test]
fn test_prediction_is_byte_identical_across_calls() {
    let set = shipped_set();
    let pipeline = set.pipeline(PipelineVariant::Full);
    let input = [53.7, 12.1, 131.9, 6.4];

    let first = pipeline.predict(&input).expect("valid input");
    let second = pipeline.predict(&input).expect("valid input");
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_wrong_arity_is_rejected_against_the_shipped_artifacts() {
    let set = shipped_set();

    let err = set
        .pipeline(PipelineVariant::Full)
        .predict(&[50.0, 10.0, 120.0])
        .expect_err("a 3-vector must not reach the 4-feature model");
    assert_eq!(
        err,
        PredictError::ShapeMismatch {
            expected: 4,
            actual: 3
        }
    );

    // The same vector is likewise wrong for the rain-only pipeline: the
    // variant tag, not the vector length, selects the pipeline.
    let err = set
        .pipeline(PipelineVariant::RainOnly)
        .predict(&[50.0, 10.0, 120.0])
        .expect_err("a 3-vector must not reach the 2-feature model");
    assert_eq!(
        err,
        PredictError::ShapeMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_process_wide_loader_returns_the_same_cached_set() {
    let first = loader::load_artifacts().expect("shipped artifacts load");
    let second = loader::load_artifacts_from(Path::new("artifacts"))
        .expect("second call hits the cache");
    assert!(
        std::ptr::eq(first, second),
        "both calls must return the identical process-wide instance"
    );
}
