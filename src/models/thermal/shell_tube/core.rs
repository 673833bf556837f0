//! Rating pipeline: geometry, films, resistances, energy balance, and the
//! wall conduction solves.

mod input;
mod report;

pub use input::{MeshConfig, RatingInput, StreamInput, TubeInput};
pub use report::RatingReport;

use tracing::debug;
use uom::si::{
    f64::Length, heat_transfer::watt_per_square_meter_kelvin, power::watt,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    error::Result,
    support::{
        conduction::{AXIAL_POINTS, ConductionConfig, CrossSection, axial_profile, solve_radial},
        shell_tube::{
            BundleMethod, BundlePasses, FoulingSpec, ResistanceStack, ShellGeometry,
            bundle_diameter, compute_film_coefficients, solve_energy_balance,
        },
        units::imperial,
    },
};

/// Runs the full rating chain.
///
/// The bundle diameter is the HEDH estimate for the tube count; it must fit
/// inside the shell.
pub(super) fn rate(input: &RatingInput, conduction: ConductionConfig) -> Result<RatingReport> {
    let hot = input.hot.to_stream()?;
    let cold = input.cold.to_stream()?;
    let tubes = input.tubes.to_geometry()?;

    let bundle = bundle_diameter(
        BundleMethod::Hedh,
        tubes.tube_count(),
        tubes.outer_diameter(),
        tubes.pitch(),
        BundlePasses::try_from(tubes.passes())?,
        tubes.layout(),
    )?;
    let shell = ShellGeometry::new(imperial::length(input.tubes.shell_diameter), bundle)?;

    let films = compute_film_coefficients(&hot, &cold, &tubes, &shell)?;
    let fouling = FoulingSpec::from_imperial_area_basis(input.fouling_outer, input.fouling_inner)?;
    let resistances = ResistanceStack::assemble(
        films.inner.coefficient,
        films.outer.coefficient,
        &tubes,
        input.wall_conductivity,
        &fouling,
    )?;
    let overall_coefficient = resistances.overall_coefficient()?;
    let balance = solve_energy_balance(&hot, &cold)?;

    debug!(
        u = overall_coefficient.get::<watt_per_square_meter_kelvin>(),
        duty_w = balance.duty.get::<watt>(),
        cold_outlet_c = balance.cold_outlet.get::<degree_celsius>(),
        "rated shell-and-tube exchanger"
    );

    let hot_inlet = hot.inlet_temperature();
    let half = |diameter: Length| diameter / 2.0;
    let (radial, cross_section) = rayon::join(
        || {
            solve_radial(
                half(tubes.inner_diameter()),
                half(tubes.outer_diameter()),
                input.wall_conductivity,
                balance.cold_outlet,
                hot_inlet,
                input.mesh.radial_cells,
            )
        },
        || {
            input
                .mesh
                .cross_section
                .map(|(nx, ny)| {
                    CrossSection {
                        shell_diameter: shell.inner_diameter(),
                        tube_diameter: tubes.inner_diameter(),
                        wall_conductivity: input.wall_conductivity,
                        hot: hot_inlet,
                        cold: balance.cold_outlet,
                        nx,
                        ny,
                    }
                    .solve(conduction)
                })
                .transpose()
        },
    );

    let axial = axial_profile(
        tubes.length(),
        [hot_inlet, balance.hot.outlet_temperature],
        [cold.inlet_temperature(), balance.cold_outlet],
        AXIAL_POINTS,
    )?;

    Ok(RatingReport {
        tubes,
        shell,
        films,
        resistances,
        overall_coefficient,
        duty: balance.duty,
        duty_btu_per_hour: imperial::btu_per_hour(balance.duty),
        cold_outlet: balance.cold_outlet,
        cold_outlet_fahrenheit: imperial::fahrenheit(balance.cold_outlet),
        radial: radial?,
        cross_section: cross_section?,
        axial,
    })
}
