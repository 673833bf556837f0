use std::ops::Deref;

use crate::support::{
    constraint::{Constrained, ConstraintResult, StrictlyPositive},
    units::imperial,
};
use uom::si::f64::{MassRate, SpecificHeatCapacity, ThermalConductance};

/// Capacitance rate (`ṁ·cp`) of a stream passing through the exchanger.
///
/// The value must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacitanceRate(Constrained<ThermalConductance, StrictlyPositive>);

impl CapacitanceRate {
    /// Create a [`CapacitanceRate`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new<U>(value: f64) -> ConstraintResult<Self>
    where
        U: uom::si::thermal_conductance::Unit + uom::Conversion<f64, T = f64>,
    {
        Self::from_quantity(ThermalConductance::new::<U>(value))
    }

    /// Create a [`CapacitanceRate`] from a thermal-conductance quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: ThermalConductance) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Create a [`CapacitanceRate`] from a mass rate and specific heat.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either operand is not strictly positive.
    pub fn from_mass_rate_and_specific_heat(
        mass_rate: MassRate,
        specific_heat: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(mass_rate * specific_heat)
    }

    /// Create a [`CapacitanceRate`] from a flow in lb/h and a specific heat in
    /// BTU/(lb·°F).
    ///
    /// See [`imperial::capacitance_rate`] for the conversion contract.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the product is not strictly positive.
    pub fn from_imperial(
        pound_per_hour: f64,
        btu_per_pound_fahrenheit: f64,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(imperial::capacitance_rate(
            pound_per_hour,
            btu_per_pound_fahrenheit,
        ))
    }
}

impl Deref for CapacitanceRate {
    type Target = ThermalConductance;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductance::watt_per_kelvin,
    };

    use super::*;

    #[test]
    fn from_mass_rate_and_specific_heat() -> ConstraintResult<()> {
        let mass_rate = MassRate::new::<kilogram_per_second>(1.389);
        let specific_heat = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(3358.0);

        let c = CapacitanceRate::from_mass_rate_and_specific_heat(mass_rate, specific_heat)?;

        assert_relative_eq!(c.get::<watt_per_kelvin>(), 1.389 * 3358.0);
        Ok(())
    }

    #[test]
    fn from_imperial_flow_and_specific_heat() -> ConstraintResult<()> {
        // 1 BTU/(h·°F) is 1055.06/3600·9/5 W/K.
        let c = CapacitanceRate::from_imperial(1.0, 1.0)?;
        assert_relative_eq!(
            c.get::<watt_per_kelvin>(),
            1055.06 / 3600.0 * 1.8,
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn rejects_stagnant_stream() {
        assert!(CapacitanceRate::from_imperial(0.0, 0.624).is_err());
        assert!(CapacitanceRate::new::<watt_per_kelvin>(-3.0).is_err());
    }
}
