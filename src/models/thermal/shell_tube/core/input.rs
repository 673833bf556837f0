use uom::si::{f64::ThermalConductivity, thermal_conductivity::watt_per_meter_kelvin};

use crate::{
    error::Result,
    support::{
        hx::CapacitanceRate,
        shell_tube::{FluidProperties, FluidStream, LayoutAngle, TubeGeometry},
        units::imperial,
    },
};

/// A process stream as entered on the rating form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInput {
    /// lb/h.
    pub mass_flow: f64,
    /// °F.
    pub inlet_temperature: f64,
    /// °F; required on the hot stream.
    pub outlet_temperature: Option<f64>,
    /// BTU/(lb·°F).
    pub specific_heat: f64,
    /// cP.
    pub viscosity: f64,
    /// BTU/(ft·h·°F).
    pub thermal_conductivity: f64,
    /// lb/ft³.
    pub density: f64,
}

impl StreamInput {
    /// The shell-side hot stream of the default form.
    #[must_use]
    pub fn default_hot() -> Self {
        Self {
            mass_flow: 11_023.1,
            inlet_temperature: 206.33,
            outlet_temperature: Some(117.04),
            specific_heat: 0.624,
            viscosity: 4.83,
            thermal_conductivity: 0.1495,
            density: 67.20,
        }
    }

    /// The tube-side cold stream of the default form.
    #[must_use]
    pub fn default_cold() -> Self {
        Self {
            mass_flow: 26_455.5,
            inlet_temperature: -9.67,
            outlet_temperature: None,
            specific_heat: 0.261,
            viscosity: 0.276,
            thermal_conductivity: 0.0465,
            density: 86.4,
        }
    }

    /// Converts the form values through the unit contract.
    ///
    /// The capacitance rate is formed in BTU/(h·°F) before conversion so the
    /// energy balance closes in BTU/h.
    pub(super) fn to_stream(&self) -> Result<FluidStream> {
        let properties = FluidProperties::new(
            imperial::specific_heat(self.specific_heat),
            imperial::viscosity(self.viscosity),
            imperial::thermal_conductivity(self.thermal_conductivity),
            imperial::density(self.density),
        )?;
        let stream = FluidStream::new(
            imperial::mass_rate(self.mass_flow),
            imperial::temperature(self.inlet_temperature),
            properties,
        )?
        .with_capacitance_rate(CapacitanceRate::from_imperial(self.mass_flow, self.specific_heat)?);

        match self.outlet_temperature {
            Some(outlet) => stream.with_outlet(imperial::temperature(outlet)),
            None => Ok(stream),
        }
    }
}

/// Tube bundle and shell as entered on the rating form, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeInput {
    pub tube_count: u32,
    pub length: f64,
    pub pitch: f64,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
    pub shell_diameter: f64,
    pub passes: u16,
    pub layout: LayoutAngle,
}

impl Default for TubeInput {
    fn default() -> Self {
        Self {
            tube_count: 56,
            length: 112.20,
            pitch: 0.9375,
            outer_diameter: 0.75,
            inner_diameter: 0.584,
            shell_diameter: 10.136,
            passes: 1,
            layout: LayoutAngle::Triangular30,
        }
    }
}

impl TubeInput {
    pub(super) fn to_geometry(&self) -> Result<TubeGeometry> {
        TubeGeometry::new(
            imperial::length(self.outer_diameter),
            imperial::length(self.inner_diameter),
            imperial::length(self.length),
            imperial::length(self.pitch),
            self.layout,
            self.tube_count,
            self.passes,
        )
    }
}

/// Resolution of the wall conduction solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshConfig {
    /// Finite volumes across the tube wall.
    pub radial_cells: usize,
    /// `(nx, ny)` of the shell cross-section grid, or `None` to skip it.
    pub cross_section: Option<(usize, usize)>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            radial_cells: 60,
            cross_section: Some((200, 200)),
        }
    }
}

/// Everything the rating pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingInput {
    /// Shell-side stream.
    pub hot: StreamInput,
    /// Tube-side stream.
    pub cold: StreamInput,
    pub tubes: TubeInput,
    pub wall_conductivity: ThermalConductivity,
    /// Shell-side fouling, h·ft²·°F/BTU.
    pub fouling_outer: f64,
    /// Tube-side fouling, h·ft²·°F/BTU.
    pub fouling_inner: f64,
    pub mesh: MeshConfig,
}

impl Default for RatingInput {
    fn default() -> Self {
        Self {
            hot: StreamInput::default_hot(),
            cold: StreamInput::default_cold(),
            tubes: TubeInput::default(),
            wall_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(16.5),
            fouling_outer: 0.0006,
            fouling_inner: 0.0006,
            mesh: MeshConfig::default(),
        }
    }
}
