//! Imperial/engineering unit contract.
//!
//! Operator inputs arrive in °F, lb/h, BTU-based properties, centipoise,
//! lb/ft³, and inches. These conversions are applied exactly once, at the
//! boundary, with the constants below. The constants are contractual: the
//! downstream correlations were tuned against them, so they are not replaced
//! by [`uom`]'s own (more precise) unit definitions.
//!
//! ```
//! use shell_tube_rating::support::units::imperial::{convert_units, UnitKind};
//!
//! let celsius = convert_units(212.0, UnitKind::FahrenheitToCelsius);
//! assert!((celsius - 100.0).abs() < 1e-12);
//! ```

use uom::si::{
    f64::{
        DynamicViscosity, Length, MassDensity, MassRate, Power, SpecificHeatCapacity,
        ThermalConductance, ThermalConductivity, ThermodynamicTemperature,
    },
    dynamic_viscosity::pascal_second,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

/// Joules per BTU.
pub const JOULE_PER_BTU: f64 = 1055.06;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// BTU/(lb·°F) to J/(kg·K) multiplier.
pub const SPECIFIC_HEAT_FACTOR: f64 = 4186.8 / 778.0;

/// BTU/(ft·h·°F) to W/(m·K) multiplier.
pub const CONDUCTIVITY_FACTOR: f64 = 1.7307;

/// Centipoise to Pa·s multiplier.
pub const VISCOSITY_FACTOR: f64 = 0.001;

/// lb/ft³ to kg/m³ multiplier.
pub const DENSITY_FACTOR: f64 = 16.0185;

/// Meters per inch.
pub const METER_PER_INCH: f64 = 0.0254;

/// Kilograms per pound.
pub const KILOGRAM_PER_POUND: f64 = 0.4536;

/// Meters per foot; fouling resistances are divided by its square.
pub const METER_PER_FOOT: f64 = 0.3048;

/// Kelvin per degree Fahrenheit (interval).
pub const KELVIN_PER_FAHRENHEIT: f64 = 5.0 / 9.0;

/// Conversions covered by the unit contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// °F → °C: `(F − 32)·5/9`.
    FahrenheitToCelsius,
    /// °C → °F: `C·9/5 + 32`.
    CelsiusToFahrenheit,
    /// BTU/h → W: `×1055.06/3600`.
    BtuPerHourToWatt,
    /// W → BTU/h: `×3600/1055.06`.
    WattToBtuPerHour,
    /// BTU/(lb·°F) → J/(kg·K): `×4186.8/778`.
    SpecificHeat,
    /// BTU/(ft·h·°F) → W/(m·K): `×1.7307`.
    ThermalConductivity,
    /// cP → Pa·s: `×0.001`.
    CentipoiseToPascalSecond,
    /// lb/ft³ → kg/m³: `×16.0185`.
    PoundPerCubicFootToKilogramPerCubicMeter,
    /// in → m: `×0.0254`.
    InchToMeter,
    /// lb/h → kg/s: `×0.4536/3600`.
    PoundPerHourToKilogramPerSecond,
    /// Fouling resistance area basis: `÷0.3048²`.
    FoulingAreaBasis,
}

/// Converts `value` according to `kind`.
///
/// Every conversion is total over finite inputs.
#[must_use]
pub fn convert_units(value: f64, kind: UnitKind) -> f64 {
    match kind {
        UnitKind::FahrenheitToCelsius => fahrenheit_to_celsius(value),
        UnitKind::CelsiusToFahrenheit => celsius_to_fahrenheit(value),
        UnitKind::BtuPerHourToWatt => value * JOULE_PER_BTU / SECONDS_PER_HOUR,
        UnitKind::WattToBtuPerHour => value * SECONDS_PER_HOUR / JOULE_PER_BTU,
        UnitKind::SpecificHeat => value * SPECIFIC_HEAT_FACTOR,
        UnitKind::ThermalConductivity => value * CONDUCTIVITY_FACTOR,
        UnitKind::CentipoiseToPascalSecond => value * VISCOSITY_FACTOR,
        UnitKind::PoundPerCubicFootToKilogramPerCubicMeter => value * DENSITY_FACTOR,
        UnitKind::InchToMeter => value * METER_PER_INCH,
        UnitKind::PoundPerHourToKilogramPerSecond => {
            value * KILOGRAM_PER_POUND / SECONDS_PER_HOUR
        }
        UnitKind::FoulingAreaBasis => value / (METER_PER_FOOT * METER_PER_FOOT),
    }
}

/// °F → °C.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// °C → °F.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// An absolute temperature given in °F.
#[must_use]
pub fn temperature(fahrenheit: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(fahrenheit_to_celsius(fahrenheit))
}

/// Reports an absolute temperature in °F.
#[must_use]
pub fn fahrenheit(temperature: ThermodynamicTemperature) -> f64 {
    celsius_to_fahrenheit(temperature.get::<degree_celsius>())
}

/// A mass flow given in lb/h.
#[must_use]
pub fn mass_rate(pound_per_hour: f64) -> MassRate {
    MassRate::new::<kilogram_per_second>(convert_units(
        pound_per_hour,
        UnitKind::PoundPerHourToKilogramPerSecond,
    ))
}

/// A specific heat given in BTU/(lb·°F).
#[must_use]
pub fn specific_heat(btu_per_pound_fahrenheit: f64) -> SpecificHeatCapacity {
    SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(convert_units(
        btu_per_pound_fahrenheit,
        UnitKind::SpecificHeat,
    ))
}

/// A thermal conductivity given in BTU/(ft·h·°F).
#[must_use]
pub fn thermal_conductivity(btu_per_foot_hour_fahrenheit: f64) -> ThermalConductivity {
    ThermalConductivity::new::<watt_per_meter_kelvin>(convert_units(
        btu_per_foot_hour_fahrenheit,
        UnitKind::ThermalConductivity,
    ))
}

/// A dynamic viscosity given in centipoise.
#[must_use]
pub fn viscosity(centipoise: f64) -> DynamicViscosity {
    DynamicViscosity::new::<pascal_second>(convert_units(
        centipoise,
        UnitKind::CentipoiseToPascalSecond,
    ))
}

/// A density given in lb/ft³.
#[must_use]
pub fn density(pound_per_cubic_foot: f64) -> MassDensity {
    MassDensity::new::<kilogram_per_cubic_meter>(convert_units(
        pound_per_cubic_foot,
        UnitKind::PoundPerCubicFootToKilogramPerCubicMeter,
    ))
}

/// A length given in inches.
#[must_use]
pub fn length(inches: f64) -> Length {
    Length::new::<meter>(convert_units(inches, UnitKind::InchToMeter))
}

/// A heat rate given in BTU/h.
#[must_use]
pub fn power(btu_per_hour: f64) -> Power {
    Power::new::<watt>(convert_units(btu_per_hour, UnitKind::BtuPerHourToWatt))
}

/// Reports a heat rate in BTU/h.
#[must_use]
pub fn btu_per_hour(power: Power) -> f64 {
    convert_units(power.get::<watt>(), UnitKind::WattToBtuPerHour)
}

/// A capacitance rate `ṁ·cp` from lb/h and BTU/(lb·°F).
///
/// The product is in BTU/(h·°F) and is converted as a whole with the BTU/h
/// contract and the °F interval, so that an energy balance in SI reproduces
/// the duty an operator computes by hand in BTU/h. The specific-heat contract
/// factor is reserved for property groups such as the Prandtl number.
#[must_use]
pub fn capacitance_rate(pound_per_hour: f64, btu_per_pound_fahrenheit: f64) -> ThermalConductance {
    let btu_per_hour_fahrenheit = pound_per_hour * btu_per_pound_fahrenheit;
    ThermalConductance::new::<watt_per_kelvin>(
        convert_units(btu_per_hour_fahrenheit, UnitKind::BtuPerHourToWatt)
            / KELVIN_PER_FAHRENHEIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn fahrenheit_round_trip() {
        for f in [-459.67, -40.0, -9.67, 0.0, 32.0, 117.04, 206.33, 1.0e6] {
            assert_relative_eq!(
                celsius_to_fahrenheit(fahrenheit_to_celsius(f)),
                f,
                max_relative = 1e-12,
                epsilon = 1e-9
            );
        }
        assert_relative_eq!(fahrenheit_to_celsius(-40.0), -40.0);
    }

    #[test]
    fn contract_constants() {
        let cases = [
            (3600.0, UnitKind::BtuPerHourToWatt, 1055.06),
            (778.0, UnitKind::SpecificHeat, 4186.8),
            (1.0, UnitKind::ThermalConductivity, 1.7307),
            (4.83, UnitKind::CentipoiseToPascalSecond, 0.00483),
            (1.0, UnitKind::PoundPerCubicFootToKilogramPerCubicMeter, 16.0185),
            (10.0, UnitKind::InchToMeter, 0.254),
            (3600.0, UnitKind::PoundPerHourToKilogramPerSecond, 0.4536),
            (0.3048 * 0.3048, UnitKind::FoulingAreaBasis, 1.0),
        ];
        for (value, kind, expected) in cases {
            assert_relative_eq!(convert_units(value, kind), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn power_round_trip() {
        let q = power(613_600.0);
        assert_relative_eq!(btu_per_hour(q), 613_600.0, max_relative = 1e-12);
    }

    #[test]
    fn capacitance_rate_matches_hand_balance() {
        // Duty in BTU/h computed by hand must survive the trip through SI.
        let c_hot = capacitance_rate(11_023.1, 0.624);
        let drop = (206.33 - 117.04) * KELVIN_PER_FAHRENHEIT;
        let q = power(11_023.1 * 0.624 * (206.33 - 117.04));

        assert_relative_eq!(
            c_hot.get::<watt_per_kelvin>() * drop,
            q.get::<watt>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn quantity_helpers_use_contract() {
        assert_relative_eq!(
            temperature(212.0).get::<degree_celsius>(),
            100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(fahrenheit(temperature(-9.67)), -9.67, epsilon = 1e-9);
        assert_relative_eq!(length(0.75).get::<meter>(), 0.01905, max_relative = 1e-12);
        assert_relative_eq!(
            specific_heat(0.624).get::<joule_per_kilogram_kelvin>(),
            0.624 * 4186.8 / 778.0,
            max_relative = 1e-12
        );
    }
}
