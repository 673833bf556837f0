use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};
use uom::si::{f64::Ratio, ratio::ratio};

use super::CapacitanceRate;

/// Capacity ratio `R1 = C1 / C2` of stream 1 to stream 2.
///
/// Stream 1 is the shell-side (or air-side, or plate side 1) stream. The ratio
/// may exceed one; when stream 1 is the minimum-capacity stream it coincides
/// with the classical `C_min / C_max`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacityRatio(Constrained<Ratio, StrictlyPositive>);

impl CapacityRatio {
    /// Create a [`CapacityRatio`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create a [`CapacityRatio`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Create a [`CapacityRatio`] from the capacitance rates of streams 1 and 2.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the ratio underflows to zero.
    pub fn from_capacitance_rates(
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Self> {
        let [first, second] = capacitance_rates;
        Self::from_quantity(*first / *second)
    }

    /// The ratio as a plain number.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.get::<ratio>()
    }
}

impl Deref for CapacityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use super::*;

    #[test]
    fn stream_one_over_stream_two() -> ConstraintResult<()> {
        let shell = CapacitanceRate::new::<watt_per_kelvin>(20.)?;
        let tube = CapacitanceRate::new::<watt_per_kelvin>(10.)?;

        assert_relative_eq!(CapacityRatio::from_capacitance_rates([shell, tube])?.value(), 2.0);
        assert_relative_eq!(CapacityRatio::from_capacitance_rates([tube, shell])?.value(), 0.5);
        Ok(())
    }

    #[test]
    fn rejects_zero() {
        assert!(CapacityRatio::new(0.0).is_err());
    }
}
