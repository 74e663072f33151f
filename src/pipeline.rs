/// Prediction pipeline: validation → scaling → inference.
///
/// A `Pipeline` pairs one fitted `Scaler` and one fitted `Predictor` with
/// the `PipelineVariant` they were trained for. Arity consistency between
/// the three is checked at construction time, so a successfully built
/// pipeline can only fail on per-call input problems.
///
/// Prediction is deterministic and side-effect-free: for fixed artifacts
/// and a fixed input vector the output is byte-identical across calls.

use crate::artifact::{Predictor, Scaler};
use crate::model::{Forecast, PipelineVariant, PredictError};

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// One fixed-arity inference pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    variant: PipelineVariant,
    scaler: Scaler,
    predictor: Predictor,
}

impl Pipeline {
    /// Pairs a scaler and predictor for a variant.
    ///
    /// Returns a description of the mismatch if the scaler or predictor
    /// arity disagrees with the variant's trained arity — pairing artifacts
    /// from different trainings would silently produce garbage forecasts.
    pub fn new(
        variant: PipelineVariant,
        scaler: Scaler,
        predictor: Predictor,
    ) -> Result<Pipeline, String> {
        if scaler.arity() != variant.arity() {
            return Err(format!(
                "scaler was fitted on {} features but the {} variant expects {}",
                scaler.arity(),
                variant,
                variant.arity()
            ));
        }
        if predictor.arity() != variant.arity() {
            return Err(format!(
                "predictor was fitted on {} features but the {} variant expects {}",
                predictor.arity(),
                variant,
                variant.arity()
            ));
        }
        Ok(Pipeline {
            variant,
            scaler,
            predictor,
        })
    }

    pub fn variant(&self) -> PipelineVariant {
        self.variant
    }

    /// The feature-vector length this pipeline accepts.
    pub fn arity(&self) -> usize {
        self.variant.arity()
    }

    /// Runs the full inference pipeline on a raw feature vector.
    ///
    /// Steps: reject wrong arity, reject non-finite values, standardize
    /// through the scaler, run the regression. Values outside the
    /// documented UI ranges are deliberately accepted — range metadata is
    /// advisory and enforced (softly) at the presentation layer only.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != self.arity() {
            return Err(PredictError::ShapeMismatch {
                expected: self.arity(),
                actual: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(PredictError::NonFiniteInput { index });
        }
        let standardized = self.scaler.transform(features)?;
        self.predictor.predict(&standardized)
    }

    /// Like `predict`, but wraps the scalar in a `Forecast` with the value
    /// normalized to centimeters for banding.
    pub fn forecast(&self, features: &[f64]) -> Result<Forecast, PredictError> {
        let predicted = self.predict(features)?;
        Ok(Forecast {
            variant: self.variant,
            predicted,
            predicted_cm: self.variant.output_unit().to_centimeters(predicted),
        })
    }
}

// ---------------------------------------------------------------------------
// Artifact set
// ---------------------------------------------------------------------------

/// Both trained pipelines, loaded together.
///
/// The whole presentation layer is unusable without all artifacts, so this
/// set is all-or-nothing: there is no partially loaded state.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    full: Pipeline,
    rain_only: Pipeline,
}

impl ArtifactSet {
    pub fn new(full: Pipeline, rain_only: Pipeline) -> ArtifactSet {
        ArtifactSet { full, rain_only }
    }

    /// Resolves a variant to its pipeline. Explicit dispatch — the variant
    /// tag, not the input length, selects the pipeline.
    pub fn pipeline(&self, variant: PipelineVariant) -> &Pipeline {
        match variant {
            PipelineVariant::Full => &self.full,
            PipelineVariant::RainOnly => &self.rain_only,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
