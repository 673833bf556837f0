//! Overall heat transfer coefficient from the series resistances.

use uom::si::{
    f64::{HeatTransfer, ThermalConductivity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::error::{DomainError, Result};

use super::{FoulingSpec, TubeGeometry};

/// Series thermal resistances between the shell-side and tube-side fluids.
///
/// Film and fouling terms are in m²·K/W referred to the outer tube surface.
/// The wall term is `ln(D_o/D_i)/(2π·k_wall·L)`, the per-tube form the rating
/// correlations were calibrated with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceStack {
    pub outer_film: f64,
    pub inner_film: f64,
    pub wall: f64,
    pub fouling: f64,
}

impl ResistanceStack {
    /// Builds the stack from film coefficients and the tube wall.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if a film coefficient or the wall conductivity
    /// is not positive and finite.
    pub fn assemble(
        h_inner: HeatTransfer,
        h_outer: HeatTransfer,
        tubes: &TubeGeometry,
        wall_conductivity: ThermalConductivity,
        fouling: &FoulingSpec,
    ) -> Result<Self> {
        let h_i = DomainError::require_positive(
            "inner film coefficient",
            h_inner.get::<watt_per_square_meter_kelvin>(),
        )?;
        let h_o = DomainError::require_positive(
            "outer film coefficient",
            h_outer.get::<watt_per_square_meter_kelvin>(),
        )?;
        let k_wall = DomainError::require_positive(
            "wall conductivity",
            wall_conductivity.get::<watt_per_meter_kelvin>(),
        )?;

        let d_o = tubes.outer_diameter().get::<meter>();
        let d_i = tubes.inner_diameter().get::<meter>();
        let length = tubes.length().get::<meter>();

        Ok(Self {
            outer_film: 1.0 / h_o,
            inner_film: (d_o / d_i) / h_i,
            wall: (d_o / d_i).ln() / (2.0 * std::f64::consts::PI * k_wall * length),
            fouling: fouling.total(),
        })
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.outer_film + self.inner_film + self.wall + self.fouling
    }

    /// `U = 1/ΣR`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the summed resistance is not positive and
    /// finite.
    pub fn overall_coefficient(&self) -> Result<HeatTransfer> {
        let total = DomainError::require_positive("total thermal resistance", self.total())?;
        Ok(HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0 / total))
    }
}

/// Overall heat-transfer coefficient from the film coefficients, the wall,
/// and fouling.
///
/// # Errors
///
/// Returns [`DomainError`] for non-physical inputs or a non-positive total
/// resistance.
pub fn compute_overall_coefficient(
    h_inner: HeatTransfer,
    h_outer: HeatTransfer,
    tubes: &TubeGeometry,
    wall_conductivity: ThermalConductivity,
    fouling: &FoulingSpec,
) -> Result<HeatTransfer> {
    ResistanceStack::assemble(h_inner, h_outer, tubes, wall_conductivity, fouling)?
        .overall_coefficient()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        error::Error,
        support::shell_tube::{compute_film_coefficients, film::tests::default_case},
    };

    fn h(value: f64) -> HeatTransfer {
        HeatTransfer::new::<watt_per_square_meter_kelvin>(value)
    }

    fn k(value: f64) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(value)
    }

    #[test]
    fn default_case_overall_coefficient() -> Result<()> {
        let (hot, cold, tubes, shell) = default_case()?;
        let films = compute_film_coefficients(&hot, &cold, &tubes, &shell)?;
        let fouling = FoulingSpec::from_imperial_area_basis(0.0006, 0.0006)?;

        let stack = ResistanceStack::assemble(
            films.inner.coefficient,
            films.outer.coefficient,
            &tubes,
            k(16.5),
            &fouling,
        )?;
        assert_relative_eq!(stack.wall, 0.000_846_74, max_relative = 1e-4);
        assert_relative_eq!(stack.fouling, 0.012_916_7, max_relative = 1e-4);

        let u = stack.overall_coefficient()?;
        assert_relative_eq!(u.get::<watt_per_square_meter_kelvin>(), 9.068_77, max_relative = 1e-5);
        assert_eq!(
            u,
            compute_overall_coefficient(
                films.inner.coefficient,
                films.outer.coefficient,
                &tubes,
                k(16.5),
                &fouling
            )?
        );
        Ok(())
    }

    #[test]
    fn raising_any_resistance_never_raises_u() -> Result<()> {
        let (_, _, tubes, _) = default_case()?;
        let clean = FoulingSpec::default();
        let base = compute_overall_coefficient(h(40.0), h(16.0), &tubes, k(16.5), &clean)?;

        let variants = [
            compute_overall_coefficient(h(20.0), h(16.0), &tubes, k(16.5), &clean)?,
            compute_overall_coefficient(h(40.0), h(8.0), &tubes, k(16.5), &clean)?,
            compute_overall_coefficient(h(40.0), h(16.0), &tubes, k(1.0), &clean)?,
            compute_overall_coefficient(
                h(40.0),
                h(16.0),
                &tubes,
                k(16.5),
                &FoulingSpec::new(1e-3, 0.0)?,
            )?,
        ];
        for u in variants {
            assert!(u < base);
        }
        Ok(())
    }

    #[test]
    fn rejects_non_physical_films() -> Result<()> {
        let (_, _, tubes, _) = default_case()?;
        let clean = FoulingSpec::default();
        for (inner, outer) in [(0.0, 16.0), (40.0, -1.0), (f64::NAN, 16.0)] {
            assert!(matches!(
                compute_overall_coefficient(h(inner), h(outer), &tubes, k(16.5), &clean),
                Err(Error::Domain(_))
            ));
        }
        Ok(())
    }
}
