//! Fouling level and time-to-clean prognostics.
//!
//! [`FoulingPredictor`] maps one telemetry snapshot through two regressors,
//! one for the fouling index and one for the hours left until cleaning, and
//! classifies the index into a [`RiskBand`]. The computational core is in the
//! internal `core` module.
//!
//! ```
//! use shell_tube_rating::models::fouling::{
//!     FoulingPredictor, LinearRegressor, RiskBand, Telemetry,
//! };
//! use twine_core::Model;
//!
//! fn main() -> shell_tube_rating::Result<()> {
//!     let predictor = FoulingPredictor::new(
//!         LinearRegressor::constant(0.7),
//!         LinearRegressor::constant(-12.0),
//!     );
//!     let prediction = predictor.call(&Telemetry::default())?;
//!
//!     assert_eq!(prediction.risk, RiskBand::Watch);
//!     assert_eq!(prediction.time_to_clean_hours(), 0.0);
//!     Ok(())
//! }
//! ```

mod core;

pub use self::core::{
    FEATURE_COUNT, FEATURE_NAMES, FeatureVector, FoulingPrediction, LinearRegressor, Regressor,
    RegressorError, RiskBand, Telemetry, build_feature_vector,
};

use std::{fmt, path::Path};

use twine_core::Model;

use crate::error::{Error, PredictorRole, Result};

/// The two fouling regressors, loaded once and then read-only.
pub struct FoulingPredictor {
    fouling_index: Box<dyn Regressor>,
    time_to_clean: Box<dyn Regressor>,
}

impl FoulingPredictor {
    /// Wraps already constructed regressors.
    #[must_use]
    pub fn new(
        fouling_index: impl Regressor + 'static,
        time_to_clean: impl Regressor + 'static,
    ) -> Self {
        Self {
            fouling_index: Box::new(fouling_index),
            time_to_clean: Box::new(time_to_clean),
        }
    }

    /// Loads both regressors from [`LinearRegressor`] TOML artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PredictorUnavailable`] if either artifact is missing
    /// or corrupt. No predictor is built from a partial load.
    pub fn from_artifacts(
        fouling_index: impl AsRef<Path>,
        time_to_clean: impl AsRef<Path>,
    ) -> Result<Self> {
        let fouling_index = LinearRegressor::load(PredictorRole::FoulingIndex, fouling_index)?;
        let time_to_clean = LinearRegressor::load(PredictorRole::TimeToClean, time_to_clean)?;
        Ok(Self::new(fouling_index, time_to_clean))
    }

    /// Predicts the fouling state for one telemetry snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PredictorUnavailable`] if a regressor fails or
    /// returns a non-finite value.
    pub fn predict(&self, telemetry: &Telemetry) -> Result<FoulingPrediction> {
        self::core::predict(
            self.fouling_index.as_ref(),
            self.time_to_clean.as_ref(),
            &build_feature_vector(telemetry),
        )
    }
}

impl fmt::Debug for FoulingPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoulingPredictor").finish_non_exhaustive()
    }
}

impl Model for FoulingPredictor {
    type Input = Telemetry;
    type Output = FoulingPrediction;
    type Error = Error;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.predict(input)
    }
}
