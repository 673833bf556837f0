//! Error taxonomy shared by every calculation in the crate.
//!
//! Each failure class carries a structured reason so callers can surface it
//! verbatim. No calculation retries internally; all errors are local to a
//! single call.

use std::{fmt, path::PathBuf};

use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::constraint::ConstraintError;

/// Errors returned by the calculation core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A required parameter combination is missing or contradictory.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// A physical input is numerically invalid.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The discretization cannot express the requested boundary geometry.
    #[error("ill-posed mesh: {0}")]
    IllPosedMesh(#[from] MeshError),

    /// A regression predictor could not be loaded or evaluated.
    #[error("predictor unavailable: {0}")]
    PredictorUnavailable(#[from] PredictorError),

    /// An iterative solve reached its iteration limit.
    #[error("{solver} did not converge after {iters} iterations (residual {residual:e})")]
    NotConverged {
        /// Which solver gave up.
        solver: &'static str,
        /// Iterations performed.
        iters: usize,
        /// Best residual reached.
        residual: f64,
    },

    /// The bisection solver rejected its bracket or configuration.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),
}

impl From<ConstraintError> for Error {
    fn from(error: ConstraintError) -> Self {
        Self::Domain(DomainError::Constraint(error))
    }
}

/// A result type alias defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons for [`Error::InvalidConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The arrangement does not support this pass count.
    #[error("{arrangement} does not support {passes} pass(es); supported: {supported}")]
    UnsupportedPassCount {
        arrangement: &'static str,
        passes: u16,
        supported: &'static str,
    },

    /// The air cooler row count is outside the supported range.
    #[error("air cooler supports 1 to {max} tube rows, got {rows}")]
    UnsupportedRows { rows: u16, max: u16 },

    /// Air cooler rows must split evenly between tube passes.
    #[error("{rows} tube rows cannot be split evenly into {passes} passes")]
    RowsNotDivisibleByPasses { rows: u16, passes: u16 },

    /// Tube layouts are laid out at 30°, 45°, 60° or 90°.
    #[error("tube layout angle must be 30, 45, 60 or 90 degrees, got {degrees}")]
    UnsupportedLayoutAngle { degrees: u16 },

    /// Neither of two mutually exclusive inputs was supplied.
    #[error("{quantity} requires exactly one of {options}, got neither")]
    MissingBasis {
        quantity: &'static str,
        options: &'static str,
    },

    /// A calculation needs an input that was left unset.
    #[error("{needed_for} requires the {input}")]
    MissingInput {
        input: &'static str,
        needed_for: &'static str,
    },

    /// Both of two mutually exclusive inputs were supplied.
    #[error("{quantity} requires exactly one of {options}, got both")]
    AmbiguousBasis {
        quantity: &'static str,
        options: &'static str,
    },
}

/// Reasons for [`Error::Domain`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum DomainError {
    /// A value violated a numeric constraint.
    #[error("constraint violated: {0}")]
    Constraint(#[from] ConstraintError),

    /// A quantity that must be strictly positive was not.
    #[error("{quantity} must be strictly positive, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    /// A quantity was NaN or infinite.
    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },

    /// A quantity fell outside a correlation's validity range.
    #[error("{quantity} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Two quantities violated a required ordering.
    #[error("{smaller} must be smaller than {larger}")]
    OrderViolation {
        smaller: &'static str,
        larger: &'static str,
    },
}

impl DomainError {
    /// Returns `value` if it is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`] or [`DomainError::NonPositive`].
    pub fn require_positive(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { quantity });
        }
        if value <= 0.0 {
            return Err(Self::NonPositive { quantity, value });
        }
        Ok(value)
    }

    /// Returns `value` if it is finite.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`].
    pub fn require_finite(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { quantity })
        }
    }

    /// Returns `value` if it lies in `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`], or [`DomainError::NonFinite`] for NaN.
    pub fn require_in_range(
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<f64, Self> {
        if value.is_nan() {
            return Err(Self::NonFinite { quantity });
        }
        if value < min || value > max {
            return Err(Self::OutOfRange {
                quantity,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}

/// Reasons for [`Error::IllPosedMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// Not enough cells to place a boundary on each side.
    #[error("at least {min} cells are required, got {cells}")]
    TooFewCells { cells: usize, min: usize },

    /// Every cell is pinned by a boundary condition.
    #[error("no interior cells remain between the boundaries")]
    NoInteriorCells,

    /// A boundary region captured no cells.
    #[error("the {boundary} boundary contains no cells")]
    EmptyBoundary { boundary: &'static str },

    /// A cell satisfies both boundary predicates.
    #[error("the inner and outer boundary regions overlap")]
    OverlappingBoundaries,

    /// Field values and coordinates differ in length.
    #[error("{values} field values do not match {coords} coordinates")]
    LengthMismatch { values: usize, coords: usize },

    /// The annulus is thinner than two cells.
    #[error("annulus thickness {gap} m is not resolved by cells of {cell} m")]
    UnresolvedAnnulus { gap: f64, cell: f64 },
}

/// Which of the two fouling regressors is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorRole {
    /// Predicts the fouling index.
    FoulingIndex,
    /// Predicts hours until cleaning.
    TimeToClean,
}

impl fmt::Display for PredictorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FoulingIndex => f.write_str("fouling index"),
            Self::TimeToClean => f.write_str("time-to-clean"),
        }
    }
}

/// Reasons for [`Error::PredictorUnavailable`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PredictorError {
    /// The artifact could not be read.
    #[error("{role} artifact {} could not be read", path.display())]
    Missing {
        role: PredictorRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact was read but does not describe a valid predictor.
    #[error("{role} artifact is corrupt: {reason}")]
    Corrupt { role: PredictorRole, reason: String },

    /// The predictor failed while evaluating.
    #[error("{role} predictor failed: {reason}")]
    Failed { role: PredictorRole, reason: String },

    /// The predictor returned NaN or infinity.
    #[error("{role} predictor returned a non-finite value")]
    NonFinite { role: PredictorRole },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_are_domain_errors() {
        let error = Error::from(ConstraintError::Negative);
        assert!(matches!(
            error,
            Error::Domain(DomainError::Constraint(ConstraintError::Negative))
        ));
    }

    #[test]
    fn require_positive_classifies_failures() {
        assert!(DomainError::require_positive("flow", 1.5).is_ok());
        assert!(matches!(
            DomainError::require_positive("flow", 0.0),
            Err(DomainError::NonPositive { quantity: "flow", .. })
        ));
        assert!(matches!(
            DomainError::require_positive("flow", f64::INFINITY),
            Err(DomainError::NonFinite { quantity: "flow" })
        ));
        assert!(matches!(
            DomainError::require_positive("flow", f64::NAN),
            Err(DomainError::NonFinite { .. })
        ));
    }

    #[test]
    fn messages_name_the_quantity() {
        let error = Error::from(ConfigurationError::MissingBasis {
            quantity: "shell clearance",
            options: "bundle diameter or shell diameter",
        });
        assert_eq!(
            error.to_string(),
            "invalid configuration: shell clearance requires exactly one of \
             bundle diameter or shell diameter, got neither"
        );
    }
}
