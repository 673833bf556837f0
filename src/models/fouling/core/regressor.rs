use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::error::{PredictorError, PredictorRole};

use super::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};

/// Error a [`Regressor`] reports when it cannot evaluate.
pub type RegressorError = Box<dyn std::error::Error + Send + Sync>;

/// A trained model mapping a feature vector to one scalar.
pub trait Regressor: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the model cannot evaluate `features`.
    fn predict(&self, features: &FeatureVector) -> Result<f64, RegressorError>;
}

/// `y = intercept + Σ coefficientᵢ·xᵢ`.
///
/// Artifacts are TOML documents:
///
/// ```toml
/// intercept = 0.12
/// coefficients = [1e-4, 0.0, 0.0, 0.002, 0.0, 0.0, 0.0, 0.0, 0.01, 0.0, 1e-3]
/// feature_names = ["runtime_since_cleaning_hr", "deltaT_hot_C", ...]
/// ```
///
/// `feature_names` is optional; when present it must match
/// [`FEATURE_NAMES`](super::FEATURE_NAMES) exactly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

impl LinearRegressor {
    #[must_use]
    pub fn new(intercept: f64, coefficients: [f64; FEATURE_COUNT]) -> Self {
        Self {
            intercept,
            coefficients,
            feature_names: None,
        }
    }

    /// A regressor that ignores its features.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(value, [0.0; FEATURE_COUNT])
    }

    /// Parses and validates an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`PredictorError::Corrupt`] for malformed TOML, a wrong
    /// coefficient count, non-finite parameters, or feature names that
    /// differ from the contract order.
    pub fn from_toml_str(role: PredictorRole, text: &str) -> Result<Self, PredictorError> {
        let corrupt = |reason: String| PredictorError::Corrupt { role, reason };
        let regressor: Self = toml::from_str(text).map_err(|error| corrupt(error.to_string()))?;

        let finite = regressor.intercept.is_finite()
            && regressor.coefficients.iter().all(|c| c.is_finite());
        if !finite {
            return Err(corrupt("parameters must be finite".to_owned()));
        }
        if let Some(names) = &regressor.feature_names
            && !names.iter().map(String::as_str).eq(FEATURE_NAMES)
        {
            return Err(corrupt(format!(
                "feature names {names:?} do not match the expected order {FEATURE_NAMES:?}"
            )));
        }
        Ok(regressor)
    }

    /// Reads and validates an artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`PredictorError::Missing`] if the file cannot be read and
    /// [`PredictorError::Corrupt`] as for [`LinearRegressor::from_toml_str`].
    pub fn load(role: PredictorRole, path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PredictorError::Missing {
            role,
            path: path.to_path_buf(),
            source,
        })?;
        let regressor = Self::from_toml_str(role, &text)?;
        debug!(%role, path = %path.display(), "loaded regressor artifact");
        Ok(regressor)
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, RegressorError> {
        Ok(self
            .coefficients
            .iter()
            .zip(features.values())
            .fold(self.intercept, |sum, (c, x)| sum + c * x))
    }
}
