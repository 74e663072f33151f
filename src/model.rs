/// PipelineVariant, LevelUnit, Forecast, ArtifactError, PredictError
/// core data structures and error handling
///
/// Core data types for the Rio do Sul forecast service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no logic beyond unit conversion — only types.

use std::fmt;

// ---------------------------------------------------------------------------
// Pipeline variants
// ---------------------------------------------------------------------------

/// The two trained pipeline variants.
///
/// Each variant pairs a specific scaler/model artifact pair with a fixed
/// input arity. The variant is always resolved explicitly by callers —
/// never inferred from the length of an incoming feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineVariant {
    /// Four features: level @ Ituporanga (cm), rainfall @ Ituporanga (mm),
    /// level @ Taió (cm), rainfall @ Taió (mm). Predicts centimeters.
    Full,
    /// Two features: rainfall @ Ituporanga (mm), rainfall @ Taió (mm).
    /// Predicts meters.
    RainOnly,
}

impl PipelineVariant {
    /// The feature-vector length this variant was trained with.
    pub fn arity(self) -> usize {
        match self {
            PipelineVariant::Full => 4,
            PipelineVariant::RainOnly => 2,
        }
    }

    /// The unit of the raw model output for this variant.
    pub fn output_unit(self) -> LevelUnit {
        match self {
            PipelineVariant::Full => LevelUnit::Centimeters,
            PipelineVariant::RainOnly => LevelUnit::Meters,
        }
    }

    /// Stable identifier used in API payloads and artifact file names.
    pub fn id(self) -> &'static str {
        match self {
            PipelineVariant::Full => "full",
            PipelineVariant::RainOnly => "rain_only",
        }
    }

    /// Parses an API identifier back into a variant.
    pub fn from_id(id: &str) -> Option<PipelineVariant> {
        match id {
            "full" => Some(PipelineVariant::Full),
            "rain_only" => Some(PipelineVariant::RainOnly),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Unit of a predicted river level.
///
/// Banding thresholds are defined in centimeters, so meter-valued forecasts
/// are normalized through `to_centimeters` before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUnit {
    Centimeters,
    Meters,
}

impl LevelUnit {
    pub fn to_centimeters(self, value: f64) -> f64 {
        match self {
            LevelUnit::Centimeters => value,
            LevelUnit::Meters => value * 100.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LevelUnit::Centimeters => "cm",
            LevelUnit::Meters => "m",
        }
    }
}

impl fmt::Display for LevelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// One pipeline output: the raw predicted value in the variant's unit,
/// plus the same value normalized to centimeters.
///
/// Ephemeral — recomputed on every prediction, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    pub variant: PipelineVariant,
    /// Raw model output, in `variant.output_unit()`.
    pub predicted: f64,
    /// `predicted` converted to centimeters for banding and display.
    pub predicted_cm: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading or validating artifact files.
///
/// All of these are fatal for the prediction capability: the service has no
/// retry, fallback, or partial-success path without a complete artifact set.
#[derive(Debug)]
pub enum ArtifactError {
    /// The artifact file is missing or unreadable.
    Io { path: String, source: std::io::Error },
    /// The file contents could not be deserialized as the expected artifact.
    Parse { path: String, detail: String },
    /// The artifact deserialized but is internally inconsistent
    /// (length mismatch, zero scale, arity disagreement with the variant).
    Invalid { path: String, detail: String },
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::Io { path, source } => {
                write!(f, "cannot read artifact {}: {}", path, source)
            }
            ArtifactError::Parse { path, detail } => {
                write!(f, "cannot parse artifact {}: {}", path, detail)
            }
            ArtifactError::Invalid { path, detail } => {
                write!(f, "invalid artifact {}: {}", path, detail)
            }
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtifactError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can arise during a single prediction.
///
/// A rejected request, never a silent wrong answer: a feature vector whose
/// length does not match the trained arity surfaces as `ShapeMismatch`
/// rather than being truncated or padded.
#[derive(Debug, PartialEq)]
pub enum PredictError {
    /// Feature-vector length does not match the arity the pipeline was
    /// trained with.
    ShapeMismatch { expected: usize, actual: usize },
    /// A feature value is NaN or infinite.
    NonFiniteInput { index: usize },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "feature vector has {} values but the pipeline expects {}",
                    actual, expected
                )
            }
            PredictError::NonFiniteInput { index } => {
                write!(f, "feature value at position {} is not finite", index)
            }
        }
    }
}

impl std::error::Error for PredictError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_arities_match_trained_pipelines() {
        assert_eq!(PipelineVariant::Full.arity(), 4);
        assert_eq!(PipelineVariant::RainOnly.arity(), 2);
    }

    #[test]
    fn test_variant_ids_round_trip() {
        for variant in [PipelineVariant::Full, PipelineVariant::RainOnly] {
            assert_eq!(
                PipelineVariant::from_id(variant.id()),
                Some(variant),
                "id '{}' should parse back to its variant",
                variant.id()
            );
        }
        assert_eq!(PipelineVariant::from_id("hourly"), None);
    }

    #[test]
    fn test_meters_normalize_to_centimeters() {
        assert_eq!(LevelUnit::Meters.to_centimeters(1.5), 150.0);
        assert_eq!(LevelUnit::Centimeters.to_centimeters(87.3), 87.3);
    }

    #[test]
    fn test_shape_mismatch_message_names_both_lengths() {
        let err = PredictError::ShapeMismatch {
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains('3'), "got: {}", msg);
    }
}
