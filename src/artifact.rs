/// Fitted model artifacts: the feature scaler and the regression predictor.
///
/// Both are produced by an external training process and deserialized from
/// JSON files on disk. They are immutable after load — every operation here
/// is a pure function of the input vector and the fitted parameters.
///
/// The rest of the crate treats these as opaque capabilities exposing only
/// `transform` and `predict`; the on-disk format is an adapter concern
/// confined to this module and the loader.

use serde::Deserialize;

use crate::model::PredictError;

// ---------------------------------------------------------------------------
// Scaler
// ---------------------------------------------------------------------------

/// A pre-fitted affine standardization: per feature, subtract the trained
/// mean and divide by the trained scale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Scaler {
    /// Builds a scaler from fitted parameters.
    ///
    /// Returns a description of the problem if the parameter vectors
    /// disagree in length, are empty, or contain a zero or non-finite scale
    /// (division by such a scale would poison every prediction).
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Scaler, String> {
        let scaler = Scaler { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Checks internal consistency of the fitted parameters.
    ///
    /// Deserialization bypasses `new`, so the loader calls this explicitly
    /// after parsing an artifact file.
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler has no features".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "scaler mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        for (i, s) in self.scale.iter().enumerate() {
            if *s == 0.0 || !s.is_finite() {
                return Err(format!("scaler scale[{}] is {}", i, s));
            }
        }
        Ok(())
    }

    /// Number of features this scaler was fitted on.
    pub fn arity(&self) -> usize {
        self.mean.len()
    }

    /// Standardizes a raw feature vector into the units the model was
    /// trained on. Pure; rejects a vector of the wrong length.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        if features.len() != self.arity() {
            return Err(PredictError::ShapeMismatch {
                expected: self.arity(),
                actual: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Predictor
// ---------------------------------------------------------------------------

/// A pre-fitted linear regression: dot product of the standardized feature
/// vector with the learned coefficients, plus the learned intercept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Predictor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl Predictor {
    /// Builds a predictor from fitted parameters. Rejects an empty
    /// coefficient vector or non-finite parameters.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Predictor, String> {
        let predictor = Predictor {
            coefficients,
            intercept,
        };
        predictor.validate()?;
        Ok(predictor)
    }

    /// Checks internal consistency of the fitted parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("predictor has no coefficients".to_string());
        }
        for (i, c) in self.coefficients.iter().enumerate() {
            if !c.is_finite() {
                return Err(format!("predictor coefficient[{}] is {}", i, c));
            }
        }
        if !self.intercept.is_finite() {
            return Err(format!("predictor intercept is {}", self.intercept));
        }
        Ok(())
    }

    /// Number of features this predictor was fitted on.
    pub fn arity(&self) -> usize {
        self.coefficients.len()
    }

    /// Runs inference on a standardized feature vector, returning the
    /// single scalar forecast. Pure; rejects a vector of the wrong length.
    pub fn predict(&self, standardized: &[f64]) -> Result<f64, PredictError> {
        if standardized.len() != self.arity() {
            return Err(PredictError::ShapeMismatch {
                expected: self.arity(),
                actual: standardized.len(),
            });
        }
        let dot: f64 = standardized
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, c)| x * c)
            .sum();
        Ok(dot + self.intercept)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler(arity: usize) -> Scaler {
        Scaler::new(vec![0.0; arity], vec![1.0; arity]).expect("identity scaler is valid")
    }

    #[test]
    fn test_identity_scaler_passes_features_through() {
        let scaler = identity_scaler(4);
        let out = scaler
            .transform(&[50.0, 10.0, 120.0, 5.0])
            .expect("arity matches");
        assert_eq!(out, vec![50.0, 10.0, 120.0, 5.0]);
    }

    #[test]
    fn test_transform_subtracts_mean_and_divides_by_scale() {
        let scaler = Scaler::new(vec![10.0, 100.0], vec![2.0, 50.0]).expect("valid");
        let out = scaler.transform(&[14.0, 25.0]).expect("arity matches");
        assert_eq!(out, vec![2.0, -1.5]);
    }

    #[test]
    fn test_transform_rejects_wrong_arity() {
        let scaler = identity_scaler(4);
        let err = scaler.transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            PredictError::ShapeMismatch {
                expected: 4,
                actual: 3
            },
            "a 3-vector against a 4-feature scaler must be a shape error"
        );
    }

    #[test]
    fn test_scaler_rejects_zero_scale() {
        let result = Scaler::new(vec![0.0, 0.0], vec![1.0, 0.0]);
        assert!(result.is_err(), "zero scale would divide by zero");
    }

    #[test]
    fn test_scaler_rejects_length_mismatch() {
        let result = Scaler::new(vec![0.0, 0.0, 0.0], vec![1.0, 1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_predictor_is_affine_combination() {
        let predictor = Predictor::new(vec![2.0, -1.0], 10.0).expect("valid");
        let out = predictor.predict(&[3.0, 4.0]).expect("arity matches");
        // 2*3 + (-1)*4 + 10
        assert_eq!(out, 12.0);
    }

    #[test]
    fn test_predictor_rejects_wrong_arity() {
        let predictor = Predictor::new(vec![1.0, 1.0, 1.0, 1.0], 0.0).expect("valid");
        let err = predictor.predict(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            PredictError::ShapeMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_predictor_rejects_non_finite_parameters() {
        assert!(Predictor::new(vec![1.0, f64::NAN], 0.0).is_err());
        assert!(Predictor::new(vec![1.0], f64::INFINITY).is_err());
    }

    #[test]
    fn test_artifacts_deserialize_from_json() {
        let scaler: Scaler =
            serde_json::from_str(r#"{"mean": [1.0, 2.0], "scale": [0.5, 2.0]}"#)
                .expect("well-formed scaler JSON");
        scaler.validate().expect("parameters are consistent");
        assert_eq!(scaler.arity(), 2);

        let predictor: Predictor =
            serde_json::from_str(r#"{"coefficients": [3.0, 4.0], "intercept": -1.0}"#)
                .expect("well-formed predictor JSON");
        predictor.validate().expect("parameters are consistent");
        assert_eq!(predictor.arity(), 2);
    }

    #[test]
    fn test_deserialized_scaler_can_be_invalid_until_validated() {
        // serde bypasses `new`, so a zero scale parses fine and must be
        // caught by the explicit validate() the loader performs.
        let scaler: Scaler =
            serde_json::from_str(r#"{"mean": [0.0], "scale": [0.0]}"#).expect("parses");
        assert!(scaler.validate().is_err());
    }
}
