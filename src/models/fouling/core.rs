//! Feature contract, regressors, and post-processing of the predictions.

mod regressor;
mod risk;
mod telemetry;

pub use regressor::{LinearRegressor, Regressor, RegressorError};
pub use risk::{FoulingPrediction, RiskBand};
pub use telemetry::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, Telemetry, build_feature_vector};

use tracing::trace;
use uom::si::{f64::Time, time::hour};

use crate::error::{PredictorError, PredictorRole, Result};

/// Runs both regressors and post-processes their outputs.
///
/// The time to clean is clamped at zero; the fouling index is reported as
/// predicted.
pub(super) fn predict(
    fouling_index: &dyn Regressor,
    time_to_clean: &dyn Regressor,
    features: &FeatureVector,
) -> Result<FoulingPrediction> {
    let index = evaluate(PredictorRole::FoulingIndex, fouling_index, features)?;
    let raw_hours = evaluate(PredictorRole::TimeToClean, time_to_clean, features)?;
    let risk = RiskBand::classify(index);

    trace!(index, raw_hours, ?risk, "fouling prediction");

    Ok(FoulingPrediction {
        fouling_index: index,
        time_to_clean: Time::new::<hour>(raw_hours.max(0.0)),
        risk,
    })
}

fn evaluate(
    role: PredictorRole,
    regressor: &dyn Regressor,
    features: &FeatureVector,
) -> Result<f64> {
    let value = regressor
        .predict(features)
        .map_err(|error| PredictorError::Failed {
            role,
            reason: error.to_string(),
        })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PredictorError::NonFinite { role }.into())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::Error;

    struct Failing;

    impl Regressor for Failing {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, RegressorError> {
            Err("model not fitted".into())
        }
    }

    fn features() -> FeatureVector {
        build_feature_vector(&Telemetry::default())
    }

    #[test]
    fn time_to_clean_is_clamped_at_zero() -> Result<()> {
        let overdue = predict(
            &LinearRegressor::constant(0.9),
            &LinearRegressor::constant(-40.0),
            &features(),
        )?;
        assert_eq!(overdue.time_to_clean_hours(), 0.0);

        let pending = predict(
            &LinearRegressor::constant(0.2),
            &LinearRegressor::constant(310.5),
            &features(),
        )?;
        assert_relative_eq!(pending.time_to_clean_hours(), 310.5, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn fouling_index_is_not_clamped() -> Result<()> {
        let prediction = predict(
            &LinearRegressor::constant(1.3),
            &LinearRegressor::constant(0.0),
            &features(),
        )?;
        assert_relative_eq!(prediction.fouling_index, 1.3);
        assert_eq!(prediction.risk, RiskBand::Critical);
        Ok(())
    }

    #[test]
    fn failures_never_yield_a_prediction() {
        let failed = predict(&Failing, &LinearRegressor::constant(1.0), &features());
        assert!(matches!(
            failed,
            Err(Error::PredictorUnavailable(PredictorError::Failed {
                role: PredictorRole::FoulingIndex,
                ..
            }))
        ));

        let non_finite = predict(
            &LinearRegressor::constant(0.5),
            &LinearRegressor::constant(f64::INFINITY),
            &features(),
        );
        assert!(matches!(
            non_finite,
            Err(Error::PredictorUnavailable(PredictorError::NonFinite {
                role: PredictorRole::TimeToClean
            }))
        ));
    }
}
