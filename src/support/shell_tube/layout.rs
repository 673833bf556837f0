//! Validated geometry and stream descriptions.

use uom::si::{
    area::square_meter,
    dynamic_viscosity::pascal_second,
    f64::{
        Area, DynamicViscosity, Length, MassDensity, MassRate,
        SpecificHeatCapacity, ThermalConductivity, ThermodynamicTemperature,
    },
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    error::{ConfigurationError, DomainError, Result},
    support::{
        constraint::{Constrained, NonNegative},
        hx::CapacitanceRate,
    },
};

/// Angle of the tube layout pattern relative to the shell-side flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutAngle {
    /// Triangular pitch.
    #[default]
    Triangular30,
    /// Rotated square pitch.
    RotatedSquare45,
    /// Rotated triangular pitch.
    RotatedTriangular60,
    /// Inline square pitch.
    Square90,
}

impl LayoutAngle {
    /// The layout angle in degrees.
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::Triangular30 => 30,
            Self::RotatedSquare45 => 45,
            Self::RotatedTriangular60 => 60,
            Self::Square90 => 90,
        }
    }

    /// Whether the tubes sit on a triangular lattice (30° and 60°).
    #[must_use]
    pub fn is_triangular(self) -> bool {
        matches!(self, Self::Triangular30 | Self::RotatedTriangular60)
    }
}

impl TryFrom<u16> for LayoutAngle {
    type Error = ConfigurationError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            30 => Ok(Self::Triangular30),
            45 => Ok(Self::RotatedSquare45),
            60 => Ok(Self::RotatedTriangular60),
            90 => Ok(Self::Square90),
            degrees => Err(ConfigurationError::UnsupportedLayoutAngle { degrees }),
        }
    }
}

/// Tube material classes with distinct allowable unsupported spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TubeMaterial {
    /// Carbon and alloy steels.
    #[default]
    CarbonSteel,
    /// Aluminium and copper alloys.
    Aluminium,
}

/// Tube bundle dimensions.
///
/// Construction enforces `0 < D_i < D_o < pitch`, a positive length, and at
/// least one tube and one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeGeometry {
    outer_diameter: Length,
    inner_diameter: Length,
    length: Length,
    pitch: Length,
    layout: LayoutAngle,
    tube_count: u32,
    passes: u16,
}

impl TubeGeometry {
    /// Validates and captures the bundle dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if a dimension is not positive and finite or
    /// the diameters and pitch are out of order, and
    /// [`ConfigurationError`] for a zero tube or pass count.
    pub fn new(
        outer_diameter: Length,
        inner_diameter: Length,
        length: Length,
        pitch: Length,
        layout: LayoutAngle,
        tube_count: u32,
        passes: u16,
    ) -> Result<Self> {
        let d_o =
            DomainError::require_positive("tube outer diameter", outer_diameter.get::<meter>())?;
        let d_i =
            DomainError::require_positive("tube inner diameter", inner_diameter.get::<meter>())?;
        let p = DomainError::require_positive("tube pitch", pitch.get::<meter>())?;
        DomainError::require_positive("tube length", length.get::<meter>())?;
        if d_i >= d_o {
            return Err(DomainError::OrderViolation {
                smaller: "tube inner diameter",
                larger: "tube outer diameter",
            }
            .into());
        }
        if d_o >= p {
            return Err(DomainError::OrderViolation {
                smaller: "tube outer diameter",
                larger: "tube pitch",
            }
            .into());
        }
        if tube_count == 0 {
            return Err(DomainError::NonPositive {
                quantity: "tube count",
                value: 0.0,
            }
            .into());
        }
        if passes == 0 {
            return Err(ConfigurationError::UnsupportedPassCount {
                arrangement: "tube bundle",
                passes,
                supported: "one or more",
            }
            .into());
        }

        Ok(Self {
            outer_diameter,
            inner_diameter,
            length,
            pitch,
            layout,
            tube_count,
            passes,
        })
    }

    #[must_use]
    pub fn outer_diameter(&self) -> Length {
        self.outer_diameter
    }

    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        self.inner_diameter
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn pitch(&self) -> Length {
        self.pitch
    }

    #[must_use]
    pub fn layout(&self) -> LayoutAngle {
        self.layout
    }

    #[must_use]
    pub fn tube_count(&self) -> u32 {
        self.tube_count
    }

    #[must_use]
    pub fn passes(&self) -> u16 {
        self.passes
    }

    /// Total in-tube flow area, `N·π·(D_i/2)²`.
    #[must_use]
    pub fn flow_area(&self) -> Area {
        let radius = self.inner_diameter.get::<meter>() / 2.0;
        let tubes = f64::from(self.tube_count);
        Area::new::<square_meter>(tubes * std::f64::consts::PI * radius * radius)
    }
}

/// Shell inner diameter and the bundle it houses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellGeometry {
    inner_diameter: Length,
    bundle_diameter: Length,
}

impl ShellGeometry {
    /// Validates that the bundle fits inside the shell.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OrderViolation`] when the bundle is not smaller
    /// than the shell, which would imply a negative clearance.
    pub fn new(inner_diameter: Length, bundle_diameter: Length) -> Result<Self> {
        let shell =
            DomainError::require_positive("shell inner diameter", inner_diameter.get::<meter>())?;
        let bundle =
            DomainError::require_positive("bundle diameter", bundle_diameter.get::<meter>())?;
        if bundle >= shell {
            return Err(DomainError::OrderViolation {
                smaller: "bundle diameter",
                larger: "shell inner diameter",
            }
            .into());
        }
        Ok(Self {
            inner_diameter,
            bundle_diameter,
        })
    }

    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        self.inner_diameter
    }

    #[must_use]
    pub fn bundle_diameter(&self) -> Length {
        self.bundle_diameter
    }

    /// Diametral shell-to-bundle clearance; always positive.
    #[must_use]
    pub fn clearance(&self) -> Length {
        self.inner_diameter - self.bundle_diameter
    }

    /// Cross-sectional area of the empty shell, `π·(D_s/2)²`.
    #[must_use]
    pub fn cross_section(&self) -> Area {
        let radius = self.inner_diameter.get::<meter>() / 2.0;
        Area::new::<square_meter>(std::f64::consts::PI * radius * radius)
    }
}

/// Transport properties of a fluid, assumed constant through the exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    specific_heat: SpecificHeatCapacity,
    viscosity: DynamicViscosity,
    thermal_conductivity: ThermalConductivity,
    density: MassDensity,
}

impl FluidProperties {
    /// # Errors
    ///
    /// Returns [`DomainError`] unless every property is finite and positive.
    pub fn new(
        specific_heat: SpecificHeatCapacity,
        viscosity: DynamicViscosity,
        thermal_conductivity: ThermalConductivity,
        density: MassDensity,
    ) -> Result<Self> {
        DomainError::require_positive(
            "specific heat",
            specific_heat.get::<joule_per_kilogram_kelvin>(),
        )?;
        DomainError::require_positive("viscosity", viscosity.get::<pascal_second>())?;
        DomainError::require_positive(
            "thermal conductivity",
            thermal_conductivity.get::<watt_per_meter_kelvin>(),
        )?;
        DomainError::require_positive("density", density.get::<kilogram_per_cubic_meter>())?;
        Ok(Self {
            specific_heat,
            viscosity,
            thermal_conductivity,
            density,
        })
    }

    #[must_use]
    pub fn specific_heat(&self) -> SpecificHeatCapacity {
        self.specific_heat
    }

    #[must_use]
    pub fn viscosity(&self) -> DynamicViscosity {
        self.viscosity
    }

    #[must_use]
    pub fn thermal_conductivity(&self) -> ThermalConductivity {
        self.thermal_conductivity
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.density
    }

    /// `Pr = cp·μ/k`.
    #[must_use]
    pub fn prandtl(&self) -> f64 {
        let cp = self.specific_heat.get::<joule_per_kilogram_kelvin>();
        let mu = self.viscosity.get::<pascal_second>();
        cp * mu / self.thermal_conductivity.get::<watt_per_meter_kelvin>()
    }
}

/// A process stream entering the exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidStream {
    mass_flow: MassRate,
    inlet_temperature: ThermodynamicTemperature,
    outlet_temperature: Option<ThermodynamicTemperature>,
    properties: FluidProperties,
    capacitance_rate: CapacitanceRate,
}

impl FluidStream {
    /// A stream with a known inlet; the capacitance rate is `ṁ·cp`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the mass flow is not positive or the inlet
    /// temperature is not finite.
    pub fn new(
        mass_flow: MassRate,
        inlet_temperature: ThermodynamicTemperature,
        properties: FluidProperties,
    ) -> Result<Self> {
        DomainError::require_positive("mass flow", mass_flow.get::<kilogram_per_second>())?;
        DomainError::require_finite("inlet temperature", inlet_temperature.get::<kelvin>())?;
        let capacitance_rate =
            CapacitanceRate::from_mass_rate_and_specific_heat(mass_flow, properties.specific_heat)?;
        Ok(Self {
            mass_flow,
            inlet_temperature,
            outlet_temperature: None,
            properties,
            capacitance_rate,
        })
    }

    /// Records a known outlet temperature.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`] for a NaN or infinite temperature.
    pub fn with_outlet(mut self, outlet_temperature: ThermodynamicTemperature) -> Result<Self> {
        DomainError::require_finite("outlet temperature", outlet_temperature.get::<kelvin>())?;
        self.outlet_temperature = Some(outlet_temperature);
        Ok(self)
    }

    /// Replaces the `ṁ·cp` capacitance rate.
    ///
    /// The imperial boundary uses this to carry the BTU/(h·°F) product through
    /// [`imperial::capacitance_rate`](crate::support::units::imperial::capacitance_rate),
    /// while the specific heat keeps its property-group conversion.
    #[must_use]
    pub fn with_capacitance_rate(mut self, capacitance_rate: CapacitanceRate) -> Self {
        self.capacitance_rate = capacitance_rate;
        self
    }

    #[must_use]
    pub fn mass_flow(&self) -> MassRate {
        self.mass_flow
    }

    #[must_use]
    pub fn inlet_temperature(&self) -> ThermodynamicTemperature {
        self.inlet_temperature
    }

    #[must_use]
    pub fn outlet_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.outlet_temperature
    }

    #[must_use]
    pub fn properties(&self) -> &FluidProperties {
        &self.properties
    }

    #[must_use]
    pub fn capacitance_rate(&self) -> CapacitanceRate {
        self.capacitance_rate
    }
}

/// Fouling resistances on each side of the tube wall.
///
/// Resistances are per unit area in m²·K/W. Imperial values in
/// h·ft²·°F/BTU enter through [`FoulingSpec::from_imperial_area_basis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoulingSpec {
    pub outer: Constrained<f64, NonNegative>,
    pub inner: Constrained<f64, NonNegative>,
}

impl Default for FoulingSpec {
    /// A clean exchanger.
    fn default() -> Self {
        Self {
            outer: NonNegative::zero(),
            inner: NonNegative::zero(),
        }
    }
}

impl FoulingSpec {
    /// # Errors
    ///
    /// Returns a constraint error if either resistance is negative or NaN.
    pub fn new(outer: f64, inner: f64) -> Result<Self> {
        Ok(Self {
            outer: NonNegative::new(outer)?,
            inner: NonNegative::new(inner)?,
        })
    }

    /// Converts resistances entered on the imperial area basis by dividing by
    /// `0.3048²`, the factor the rating correlations were tuned with.
    ///
    /// # Errors
    ///
    /// Returns a constraint error if either resistance is negative or NaN.
    pub fn from_imperial_area_basis(outer: f64, inner: f64) -> Result<Self> {
        use crate::support::units::imperial::{UnitKind, convert_units};
        Self::new(
            convert_units(outer, UnitKind::FoulingAreaBasis),
            convert_units(inner, UnitKind::FoulingAreaBasis),
        )
    }

    /// Combined fouling resistance in m²·K/W.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.outer.into_inner() + self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::length::inch;

    use super::*;
    use crate::error::Error;

    fn inches(value: f64) -> Length {
        Length::new::<inch>(value)
    }

    #[test]
    fn layout_angles_round_trip() {
        for degrees in [30, 45, 60, 90] {
            let layout = LayoutAngle::try_from(degrees);
            assert_eq!(layout.map(LayoutAngle::degrees), Ok(degrees));
        }
        assert_eq!(
            LayoutAngle::try_from(40),
            Err(ConfigurationError::UnsupportedLayoutAngle { degrees: 40 })
        );
        assert!(LayoutAngle::RotatedTriangular60.is_triangular());
        assert!(!LayoutAngle::RotatedSquare45.is_triangular());
    }

    #[test]
    fn tube_geometry_orders_diameters_and_pitch() -> Result<()> {
        let tubes = TubeGeometry::new(
            inches(0.75),
            inches(0.584),
            inches(112.2),
            inches(0.9375),
            LayoutAngle::Triangular30,
            56,
            1,
        )?;
        assert_relative_eq!(
            tubes.flow_area().get::<square_meter>(),
            56.0 * std::f64::consts::PI * (0.292 * 0.0254_f64).powi(2),
            max_relative = 1e-12
        );

        let swapped = TubeGeometry::new(
            inches(0.584),
            inches(0.75),
            inches(112.2),
            inches(0.9375),
            LayoutAngle::Triangular30,
            56,
            1,
        );
        assert!(matches!(swapped, Err(Error::Domain(DomainError::OrderViolation { .. }))));

        let crowded = TubeGeometry::new(
            inches(0.75),
            inches(0.584),
            inches(112.2),
            inches(0.7),
            LayoutAngle::Triangular30,
            56,
            1,
        );
        assert!(matches!(
            crowded,
            Err(Error::Domain(DomainError::OrderViolation { larger: "tube pitch", .. }))
        ));
        Ok(())
    }

    #[test]
    fn bundle_must_fit_the_shell() -> Result<()> {
        let shell = ShellGeometry::new(inches(10.136), inches(8.0))?;
        assert_relative_eq!(shell.clearance().get::<inch>(), 2.136, max_relative = 1e-12);
        assert!(ShellGeometry::new(inches(10.0), inches(10.0)).is_err());
        assert!(ShellGeometry::new(inches(10.0), inches(10.5)).is_err());
        Ok(())
    }

    #[test]
    fn fouling_uses_the_imperial_area_basis() -> Result<()> {
        let fouling = FoulingSpec::from_imperial_area_basis(0.0006, 0.0006)?;
        assert_relative_eq!(fouling.total(), 0.0012 / 0.3048 / 0.3048, max_relative = 1e-12);
        assert!(FoulingSpec::new(-1e-4, 0.0).is_err());
        assert_relative_eq!(FoulingSpec::default().total(), 0.0);
        Ok(())
    }
}
