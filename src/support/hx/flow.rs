use std::cmp::Ordering;

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};
use uom::{ConstZero, si::f64::Power};

/// Heat crossing a stream's boundary.
///
/// - `In`: the stream is heated.
/// - `Out`: the stream is cooled.
/// - `None`: the stream leaves at its inlet temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatFlow {
    /// Heat flowing into the stream.
    In(Constrained<Power, StrictlyPositive>),
    /// Heat flowing out of the stream.
    Out(Constrained<Power, StrictlyPositive>),
    /// No heat flow.
    None,
}

impl HeatFlow {
    /// Heat flowing into the stream.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `heat_rate` is not strictly positive.
    pub fn incoming(heat_rate: Power) -> Result<Self, ConstraintError> {
        Ok(Self::In(Constrained::new(heat_rate)?))
    }

    /// Heat flowing out of the stream.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `heat_rate` is not strictly positive.
    pub fn outgoing(heat_rate: Power) -> Result<Self, ConstraintError> {
        Ok(Self::Out(Constrained::new(heat_rate)?))
    }

    /// Classifies a signed heat rate, positive into the stream.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::NotANumber`] if the value is NaN.
    pub fn from_signed(heat_rate: Power) -> Result<Self, ConstraintError> {
        match heat_rate.partial_cmp(&Power::ZERO) {
            Some(Ordering::Greater) => Self::incoming(heat_rate),
            Some(Ordering::Less) => Self::outgoing(-heat_rate),
            Some(Ordering::Equal) => Ok(Self::None),
            None => Err(ConstraintError::NotANumber),
        }
    }

    /// The signed heat rate, positive into the stream.
    #[must_use]
    pub fn signed(&self) -> Power {
        match self {
            Self::In(heat_rate) => heat_rate.into_inner(),
            Self::Out(heat_rate) => -heat_rate.into_inner(),
            Self::None => Power::ZERO,
        }
    }

    /// The heat rate magnitude, regardless of direction.
    #[must_use]
    pub fn magnitude(&self) -> Power {
        self.signed().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::power::kilowatt;

    #[test]
    fn cooled_stream_has_negative_signed_rate() -> Result<(), ConstraintError> {
        let duty = Power::new::<kilowatt>(179.8);
        let flow = HeatFlow::outgoing(duty)?;

        assert!(matches!(flow, HeatFlow::Out(_)));
        assert_relative_eq!(flow.signed().get::<kilowatt>(), -179.8);
        assert_relative_eq!(flow.magnitude().get::<kilowatt>(), 179.8);
        Ok(())
    }

    #[test]
    fn from_signed_classifies() -> Result<(), ConstraintError> {
        assert!(matches!(
            HeatFlow::from_signed(Power::new::<kilowatt>(5.0))?,
            HeatFlow::In(_)
        ));
        assert!(matches!(
            HeatFlow::from_signed(Power::new::<kilowatt>(-5.0))?,
            HeatFlow::Out(_)
        ));
        assert_eq!(HeatFlow::from_signed(Power::ZERO)?, HeatFlow::None);
        assert_eq!(
            HeatFlow::from_signed(Power::new::<kilowatt>(f64::NAN)),
            Err(ConstraintError::NotANumber)
        );
        Ok(())
    }

    #[test]
    fn incoming_rejects_zero() {
        assert!(HeatFlow::incoming(Power::ZERO).is_err());
    }
}
