//! Convective film coefficients.
//!
//! The cold stream flows inside the tubes and the hot stream on the shell
//! side, matching the rating pipeline's allocation.

use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    dynamic_viscosity::pascal_second,
    f64::{HeatTransfer, Velocity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    thermal_conductivity::watt_per_meter_kelvin,
    velocity::meter_per_second,
};

use crate::error::{DomainError, Result};

use super::{FluidStream, ShellGeometry, TubeGeometry};

/// Dimensionless groups and the resulting film coefficient for one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmResult {
    pub reynolds: f64,
    pub prandtl: f64,
    pub nusselt: f64,
    pub velocity: Velocity,
    pub coefficient: HeatTransfer,
}

/// Film coefficients on both sides of the tube wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmCoefficients {
    /// Tube side, the cold stream.
    pub inner: FilmResult,
    /// Shell side, the hot stream.
    pub outer: FilmResult,
}

/// Computes the tube-side and shell-side film coefficients.
///
/// # Errors
///
/// Returns [`DomainError`] if either side yields a non-positive or
/// non-finite Reynolds or Prandtl number.
pub fn compute_film_coefficients(
    hot: &FluidStream,
    cold: &FluidStream,
    tubes: &TubeGeometry,
    shell: &ShellGeometry,
) -> Result<FilmCoefficients> {
    Ok(FilmCoefficients {
        inner: tube_side_film(cold, tubes)?,
        outer: shell_side_film(hot, tubes, shell)?,
    })
}

/// Dittus-Boelter film coefficient for flow inside the tubes.
///
/// `Nu = 0.023·Re^0.8·Pr^0.4` on the inner diameter, with the stream split
/// evenly across every tube.
///
/// # Errors
///
/// Returns [`DomainError`] for a non-physical Reynolds or Prandtl number.
pub fn tube_side_film(stream: &FluidStream, tubes: &TubeGeometry) -> Result<FilmResult> {
    let d_i = tubes.inner_diameter().get::<meter>();
    let groups = Groups::new(stream, tubes.flow_area().get::<square_meter>(), d_i)?;

    let nusselt = 0.023 * groups.reynolds.powf(0.8) * groups.prandtl.powf(0.4);
    groups.finish(nusselt)
}

/// Kern film coefficient for the shell side.
///
/// Flow is referred to the empty shell cross-section and the equivalent
/// diameter `D_e = 4·(p² − π·D_o²/4)/(π·D_o)`, with `j_H = 0.36·Re^−0.55`
/// and `Nu = j_H·Re·Pr^(1/3)`.
///
/// # Errors
///
/// Returns [`DomainError`] for a non-physical Reynolds or Prandtl number.
pub fn shell_side_film(
    stream: &FluidStream,
    tubes: &TubeGeometry,
    shell: &ShellGeometry,
) -> Result<FilmResult> {
    let d_o = tubes.outer_diameter().get::<meter>();
    let p = tubes.pitch().get::<meter>();
    let d_e = 4.0 * (p * p - PI * d_o * d_o / 4.0) / (PI * d_o);
    let groups = Groups::new(stream, shell.cross_section().get::<square_meter>(), d_e)?;

    let j_h = 0.36 * groups.reynolds.powf(-0.55);
    let nusselt = j_h * groups.reynolds * groups.prandtl.cbrt();
    groups.finish(nusselt)
}

/// Flow groups shared by both correlations.
struct Groups {
    velocity: f64,
    reynolds: f64,
    prandtl: f64,
    conductivity: f64,
    diameter: f64,
}

impl Groups {
    fn new(stream: &FluidStream, area: f64, diameter: f64) -> Result<Self> {
        let properties = stream.properties();
        let rho = properties.density().get::<kilogram_per_cubic_meter>();
        let mu = properties.viscosity().get::<pascal_second>();

        let velocity = stream.mass_flow().get::<kilogram_per_second>() / (rho * area);
        let reynolds =
            DomainError::require_positive("reynolds number", rho * velocity * diameter / mu)?;
        let prandtl = DomainError::require_positive("prandtl number", properties.prandtl())?;

        Ok(Self {
            velocity,
            reynolds,
            prandtl,
            conductivity: properties.thermal_conductivity().get::<watt_per_meter_kelvin>(),
            diameter,
        })
    }

    fn finish(self, nusselt: f64) -> Result<FilmResult> {
        let nusselt = DomainError::require_positive("nusselt number", nusselt)?;
        Ok(FilmResult {
            reynolds: self.reynolds,
            prandtl: self.prandtl,
            nusselt,
            velocity: Velocity::new::<meter_per_second>(self.velocity),
            coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(
                nusselt * self.conductivity / self.diameter,
            ),
        })
    }
}

#[cfg(test)]
pub(super) mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        error::Error,
        support::{
            shell_tube::{FluidProperties, LayoutAngle},
            units::imperial,
        },
    };

    pub(in crate::support::shell_tube) type Case =
        (FluidStream, FluidStream, TubeGeometry, ShellGeometry);

    /// The default rating case: a 56-tube, one-pass bundle in a 10.136 in shell.
    pub(in crate::support::shell_tube) fn default_case() -> Result<Case> {
        let hot = FluidStream::new(
            imperial::mass_rate(11_023.1),
            imperial::temperature(206.33),
            FluidProperties::new(
                imperial::specific_heat(0.624),
                imperial::viscosity(4.83),
                imperial::thermal_conductivity(0.1495),
                imperial::density(67.20),
            )?,
        )?
        .with_outlet(imperial::temperature(117.04))?;
        let cold = FluidStream::new(
            imperial::mass_rate(26_455.5),
            imperial::temperature(-9.67),
            FluidProperties::new(
                imperial::specific_heat(0.261),
                imperial::viscosity(0.276),
                imperial::thermal_conductivity(0.0465),
                imperial::density(86.4),
            )?,
        )?;
        let tubes = TubeGeometry::new(
            imperial::length(0.75),
            imperial::length(0.584),
            imperial::length(112.20),
            imperial::length(0.9375),
            LayoutAngle::Triangular30,
            56,
            1,
        )?;
        let shell = ShellGeometry::new(imperial::length(10.136), imperial::length(9.0))?;
        Ok((hot, cold, tubes, shell))
    }

    #[test]
    fn default_case_films() -> Result<()> {
        let (hot, cold, tubes, shell) = default_case()?;
        let films = compute_film_coefficients(&hot, &cold, &tubes, &shell)?;

        let velocity = films.inner.velocity.get::<meter_per_second>();
        assert_relative_eq!(velocity, 0.248_87, max_relative = 1e-4);
        assert_relative_eq!(films.inner.reynolds, 18_511.98, max_relative = 1e-5);
        assert_relative_eq!(films.inner.prandtl, 0.004_817_0, max_relative = 1e-4);
        assert_relative_eq!(films.inner.nusselt, 7.059_94, max_relative = 1e-5);
        assert_relative_eq!(
            films.inner.coefficient.get::<watt_per_square_meter_kelvin>(),
            38.3027,
            max_relative = 1e-5
        );

        assert_relative_eq!(films.outer.reynolds, 104.1165, max_relative = 1e-5);
        assert_relative_eq!(films.outer.prandtl, 0.062_686, max_relative = 1e-4);
        assert_relative_eq!(films.outer.nusselt, 1.156_76, max_relative = 1e-5);
        assert_relative_eq!(
            films.outer.coefficient.get::<watt_per_square_meter_kelvin>(),
            15.879_01,
            max_relative = 1e-5
        );
        Ok(())
    }

    #[test]
    fn faster_flow_raises_both_films() -> Result<()> {
        let (hot, cold, tubes, shell) = default_case()?;
        let base = compute_film_coefficients(&hot, &cold, &tubes, &shell)?;

        let double = |stream: &FluidStream| {
            let properties = *stream.properties();
            FluidStream::new(stream.mass_flow() * 2.0, stream.inlet_temperature(), properties)
        };
        let faster = compute_film_coefficients(&double(&hot)?, &double(&cold)?, &tubes, &shell)?;

        assert!(faster.inner.coefficient > base.inner.coefficient);
        assert!(faster.outer.coefficient > base.outer.coefficient);
        assert_relative_eq!(faster.inner.reynolds, 2.0 * base.inner.reynolds, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn zero_flow_is_rejected_before_the_correlations() {
        let stream = FluidStream::new(
            imperial::mass_rate(0.0),
            imperial::temperature(60.0),
            FluidProperties::new(
                imperial::specific_heat(1.0),
                imperial::viscosity(1.0),
                imperial::thermal_conductivity(0.35),
                imperial::density(62.4),
            )
            .expect("valid properties"),
        );
        assert!(matches!(
            stream,
            Err(Error::Domain(DomainError::NonPositive { .. }))
        ));
    }

    #[test]
    fn velocities_follow_the_geometry_flow_areas() -> Result<()> {
        let (hot, cold, tubes, shell) = default_case()?;
        let films = compute_film_coefficients(&hot, &cold, &tubes, &shell)?;

        let superficial = |stream: &FluidStream, area: f64| {
            stream.mass_flow().get::<kilogram_per_second>()
                / (stream.properties().density().get::<kilogram_per_cubic_meter>() * area)
        };
        let tube_area = tubes.flow_area().get::<square_meter>();
        let shell_area = shell.cross_section().get::<square_meter>();
        assert_relative_eq!(
            films.inner.velocity.get::<meter_per_second>(),
            superficial(&cold, tube_area),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            films.outer.velocity.get::<meter_per_second>(),
            superficial(&hot, shell_area),
            max_relative = 1e-12
        );
        Ok(())
    }
}
