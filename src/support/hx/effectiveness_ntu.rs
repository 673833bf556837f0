use std::ops::Deref;

use crate::{
    error::{DomainError, Result},
    support::constraint::{Constrained, ConstraintResult, StrictlyPositive, UnitIntervalLowerOpen},
};
use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use super::{CapacitanceRate, CapacityRatio};

/// Computes the temperature effectiveness of stream 1 for a flow arrangement.
pub trait TemperatureEffectiveness {
    /// Temperature effectiveness `P1` for capacity ratio `R1 = C1/C2` and
    /// `NTU1 = UA/C1`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-configuration error if the arrangement's parameters
    /// are not supported, or a domain error if the inputs leave the range the
    /// relation is defined on.
    fn temperature_effectiveness(&self, r1: CapacityRatio, ntu1: Ntu) -> Result<Effectiveness>;
}

/// Temperature effectiveness `P1 = (T1,in − T1,out) / (T1,in − T2,in)`.
///
/// Always in `(0, 1]` for an exchanger with positive NTU.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Effectiveness(Constrained<Ratio, UnitIntervalLowerOpen>);

impl Effectiveness {
    /// Create an [`Effectiveness`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside `(0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create an [`Effectiveness`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside `(0, 1]`.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitIntervalLowerOpen::new(quantity)?))
    }

    /// The effectiveness as a plain number.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.get::<ratio>()
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Number of transfer units of stream 1, `NTU1 = UA / C1`.
///
/// Must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, StrictlyPositive>);

impl Ntu {
    /// Create an [`Ntu`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create an [`Ntu`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// `UA / C1` for stream 1's capacitance rate.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is not strictly positive.
    pub fn from_conductance_and_capacitance_rate(
        ua: ThermalConductance,
        capacitance_rate: CapacitanceRate,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(ua / *capacitance_rate)
    }

    /// The NTU as a plain number.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.get::<ratio>()
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Wraps a raw effectiveness from a correlation.
///
/// Rounding can push a saturated result a hair above one, so values up to
/// `1 + 1e-9` are pulled back to one. Anything else outside `(0, 1]` means the
/// relation was evaluated outside its valid range.
pub(crate) fn effectiveness_via(raw: f64) -> Result<Effectiveness> {
    let raw = DomainError::require_finite("temperature effectiveness", raw)?;
    let clamped = if raw > 1.0 && raw <= 1.0 + 1e-9 { 1.0 } else { raw };
    if clamped <= 0.0 || clamped > 1.0 {
        return Err(DomainError::OutOfRange {
            quantity: "temperature effectiveness",
            value: raw,
            min: 0.0,
            max: 1.0,
        }
        .into());
    }
    Ok(Effectiveness::new(clamped)?)
}

/// Checks the inputs shared by every relation and returns them as plain numbers.
pub(crate) fn relation_inputs(r1: CapacityRatio, ntu1: Ntu) -> Result<(f64, f64)> {
    let r1 = DomainError::require_positive("capacity ratio R1", r1.value())?;
    let ntu1 = DomainError::require_positive("NTU1", ntu1.value())?;
    Ok((r1, ntu1))
}

/// Samples `P1` over `points` NTU values spaced evenly in `[ntu_min, ntu_max]`.
///
/// This is chart data; the single-point relation is authoritative.
///
/// # Errors
///
/// Returns `Err` if the range is empty or inverted, or if any point fails.
pub fn effectiveness_curve(
    arrangement: &impl TemperatureEffectiveness,
    r1: CapacityRatio,
    ntu_range: (Ntu, Ntu),
    points: usize,
) -> Result<Vec<(Ntu, Effectiveness)>> {
    let (lo, hi) = (ntu_range.0.value(), ntu_range.1.value());
    if hi < lo {
        return Err(DomainError::OrderViolation {
            smaller: "maximum NTU",
            larger: "minimum NTU",
        }
        .into());
    }
    if points < 2 {
        return Err(DomainError::OutOfRange {
            quantity: "curve points",
            value: points as f64,
            min: 2.0,
            max: f64::INFINITY,
        }
        .into());
    }

    let step = (hi - lo) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let ntu = Ntu::new(if i == points - 1 { hi } else { lo + step * i as f64 })?;
            Ok((ntu, arrangement.temperature_effectiveness(r1, ntu)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use super::*;
    use crate::support::hx::{Arrangement, BasicFlow};

    #[test]
    fn ntu_uses_stream_one() -> ConstraintResult<()> {
        let ua = ThermalConductance::new::<watt_per_kelvin>(10.);
        let c1 = CapacitanceRate::new::<watt_per_kelvin>(20.)?;

        assert_relative_eq!(Ntu::from_conductance_and_capacitance_rate(ua, c1)?.value(), 0.5);
        Ok(())
    }

    #[test]
    fn ntu_rejects_zero_conductance() -> ConstraintResult<()> {
        let c1 = CapacitanceRate::new::<watt_per_kelvin>(20.)?;
        assert!(
            Ntu::from_conductance_and_capacitance_rate(
                ThermalConductance::new::<watt_per_kelvin>(0.0),
                c1
            )
            .is_err()
        );
        Ok(())
    }

    #[test]
    fn rounding_above_one_is_absorbed() -> Result<()> {
        assert_relative_eq!(effectiveness_via(1.0 + 1e-12)?.value(), 1.0);
        assert!(effectiveness_via(1.01).is_err());
        assert!(effectiveness_via(0.0).is_err());
        assert!(effectiveness_via(f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn chart_sweep_rises_for_counterflow() -> Result<()> {
        let curve = effectiveness_curve(
            &Arrangement::Basic(BasicFlow::Counterflow),
            CapacityRatio::new(0.5)?,
            (Ntu::new(0.1)?, Ntu::new(10.0)?),
            50,
        )?;

        assert_eq!(curve.len(), 50);
        assert_relative_eq!(curve[0].0.value(), 0.1);
        assert_relative_eq!(curve[49].0.value(), 10.0);
        assert!(curve.windows(2).all(|w| w[0].1 < w[1].1));
        Ok(())
    }
}
