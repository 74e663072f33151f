//! Artifact Verification Module
//!
//! Framework for testing an artifact directory before it goes live:
//! checks that every file exists, parses, pairs into a consistent pipeline,
//! and produces a finite probe forecast from the documented field defaults.
//!
//! Run via `flopred_service --verify` before deploying new artifacts.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::alert::banding;
use crate::loader::{self, ArtifactSource, FsSource};
use crate::model::PipelineVariant;
use crate::stations;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub artifact_dir: String,
    pub variant_results: Vec<VariantVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub variants_total: usize,
    pub variants_working: usize,
    pub variants_failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantVerification {
    pub variant: String,
    pub status: VerificationStatus,
    pub scaler_file: String,
    pub model_file: String,
    pub pipeline_loaded: bool,
    pub arity: Option<usize>,
    /// Probe forecast from the field defaults, in the variant's output unit.
    pub probe_prediction: Option<f64>,
    /// Condition band of the probe forecast.
    pub probe_condition: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

// ============================================================================
// Per-Variant Verification
// ============================================================================

pub fn verify_variant<S: ArtifactSource>(
    source: &S,
    dir: &Path,
    variant: PipelineVariant,
) -> VariantVerification {
    let mut result = VariantVerification {
        variant: variant.id().to_string(),
        status: VerificationStatus::Failed,
        scaler_file: dir.join(loader::scaler_file(variant)).display().to_string(),
        model_file: dir.join(loader::model_file(variant)).display().to_string(),
        pipeline_loaded: false,
        arity: None,
        probe_prediction: None,
        probe_condition: None,
        error_message: None,
    };

    // Test 1: load and pair this variant's artifact files. Each variant is
    // verified independently, so a broken file in one variant does not mask
    // the state of the other.
    let pipeline = match loader::load_pipeline(source, dir, variant) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            result.error_message = Some(e.to_string());
            return result;
        }
    };
    result.pipeline_loaded = true;
    result.arity = Some(pipeline.arity());

    // Test 2: probe prediction from the documented widget defaults.
    let defaults = stations::default_features(variant);
    match pipeline.forecast(&defaults) {
        Ok(forecast) => {
            result.probe_prediction = Some(forecast.predicted);
            result.probe_condition =
                Some(banding::classify(forecast.predicted_cm).id().to_string());

            if forecast.predicted.is_finite() {
                result.status = VerificationStatus::Success;
            } else {
                // Validated artifacts can still overflow to infinity with
                // extreme fitted parameters.
                result.status = VerificationStatus::PartialSuccess;
                result.error_message =
                    Some("probe prediction is not finite".to_string());
            }
        }
        Err(e) => {
            result.error_message = Some(format!("probe prediction failed: {}", e));
        }
    }

    result
}

// ============================================================================
// Full Verification Runner
// ============================================================================

pub fn run_full_verification(dir: &Path) -> VerificationReport {
    let mut report = VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        artifact_dir: dir.display().to_string(),
        variant_results: Vec::new(),
        summary: VerificationSummary {
            variants_total: 0,
            variants_working: 0,
            variants_failed: 0,
        },
    };

    println!("Verifying artifacts in {} ...", dir.display());
    for variant in [PipelineVariant::Full, PipelineVariant::RainOnly] {
        print!("  {} ... ", variant);
        let result = verify_variant(&FsSource, dir, variant);
        report.summary.variants_total += 1;

        match result.status {
            VerificationStatus::Success => {
                println!(
                    "✓ OK (arity {}, probe {:.1} {} → {})",
                    result.arity.unwrap_or(0),
                    result.probe_prediction.unwrap_or(f64::NAN),
                    variant.output_unit(),
                    result.probe_condition.as_deref().unwrap_or("?")
                );
                report.summary.variants_working += 1;
            }
            VerificationStatus::PartialSuccess => {
                println!(
                    "⚠ Partial: {}",
                    result.error_message.as_deref().unwrap_or("unknown")
                );
                report.summary.variants_working += 1;
            }
            VerificationStatus::Failed => {
                println!(
                    "✗ FAILED: {}",
                    result.error_message.as_deref().unwrap_or("unknown")
                );
                report.summary.variants_failed += 1;
            }
        }

        report.variant_results.push(result);
    }

    report
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("VERIFICATION SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "Pipeline variants: {}/{} working  ({} failed)",
        report.summary.variants_working,
        report.summary.variants_total,
        report.summary.variants_failed
    );
    println!("Artifact dir: {}", report.artifact_dir);
    println!("═══════════════════════════════════════════════════════════");
}

// ============================================================================
// Tests
// ============================================================================
