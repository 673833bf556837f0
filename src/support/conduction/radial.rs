//! Radial conduction through the tube wall.

use tracing::debug;
use uom::si::{
    f64::{HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::error::{DomainError, MeshError, Result};

use super::gradient;

/// Solved temperature and heat flux across the wall, by cell-centre radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialProfile {
    /// Cell-centre radii, inner to outer.
    pub radii: Vec<Length>,
    /// Temperature at each cell centre.
    pub temperatures: Vec<ThermodynamicTemperature>,
    /// Radial heat flux `q = −k·dT/dr`; negative values flow inward.
    pub heat_flux: Vec<HeatFluxDensity>,
}

/// Solves the steady radial field between two fixed surface temperatures.
///
/// The annulus `[r_inner, r_outer]` is divided into `cell_count` uniform
/// finite volumes. Each volume balances the conductances `k·r_face/Δr` of its
/// two faces; the faces on the wetted surfaces use a half-cell spacing to the
/// imposed temperature. As the mesh is refined the field converges to
///
/// ```text
/// T(r) = T_outer + (T_inner − T_outer)·ln(r/r_outer)/ln(r_inner/r_outer)
/// ```
///
/// # Errors
///
/// Fails if fewer than two cells are requested, if the radii are not
/// positive and increasing, if `k` is not positive, or if a boundary
/// temperature is not finite.
pub fn solve_radial(
    r_inner: Length,
    r_outer: Length,
    wall_conductivity: ThermalConductivity,
    t_inner: ThermodynamicTemperature,
    t_outer: ThermodynamicTemperature,
    cell_count: usize,
) -> Result<RadialProfile> {
    if cell_count < 2 {
        return Err(MeshError::TooFewCells {
            cells: cell_count,
            min: 2,
        }
        .into());
    }
    let ri = DomainError::require_positive("inner radius", r_inner.get::<meter>())?;
    let ro = DomainError::require_positive("outer radius", r_outer.get::<meter>())?;
    if ro <= ri {
        return Err(DomainError::OrderViolation {
            smaller: "inner radius",
            larger: "outer radius",
        }
        .into());
    }
    let k = DomainError::require_positive(
        "wall conductivity",
        wall_conductivity.get::<watt_per_meter_kelvin>(),
    )?;
    let ti = DomainError::require_finite("inner temperature", t_inner.get::<degree_celsius>())?;
    let to = DomainError::require_finite("outer temperature", t_outer.get::<degree_celsius>())?;

    let dr = (ro - ri) / cell_count as f64;
    let radii: Vec<f64> = (0..cell_count)
        .map(|i| ri + (i as f64 + 0.5) * dr)
        .collect();

    // Face `i` separates cell `i − 1` from cell `i`; faces 0 and n are wetted.
    let face_conductance = |face: usize| {
        let spacing = if face == 0 || face == cell_count {
            dr / 2.0
        } else {
            dr
        };
        (ri + face as f64 * dr) / spacing
    };

    let mut lower = vec![0.0; cell_count];
    let mut diagonal = vec![0.0; cell_count];
    let mut upper = vec![0.0; cell_count];
    let mut rhs = vec![0.0; cell_count];
    for i in 0..cell_count {
        let (west, east) = (face_conductance(i), face_conductance(i + 1));
        diagonal[i] = west + east;
        if i == 0 {
            rhs[i] += west * ti;
        } else {
            lower[i] = -west;
        }
        if i == cell_count - 1 {
            rhs[i] += east * to;
        } else {
            upper[i] = -east;
        }
    }

    let celsius = thomas(&lower, &diagonal, &upper, &rhs);
    let slope = gradient(&celsius, &radii)?;
    debug!(cells = cell_count, dr, "solved radial wall conduction");

    Ok(RadialProfile {
        radii: radii.iter().map(|&r| Length::new::<meter>(r)).collect(),
        temperatures: celsius
            .iter()
            .map(|&t| ThermodynamicTemperature::new::<degree_celsius>(t))
            .collect(),
        heat_flux: slope
            .iter()
            .map(|&s| HeatFluxDensity::new::<watt_per_square_meter>(-k * s))
            .collect(),
    })
}

/// Thomas elimination for a diagonally dominant tridiagonal system.
fn thomas(lower: &[f64], diagonal: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diagonal.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];
    c[0] = upper[0] / diagonal[0];
    d[0] = rhs[0] / diagonal[0];
    for i in 1..n {
        let pivot = diagonal[i] - lower[i] * c[i - 1];
        c[i] = upper[i] / pivot;
        d[i] = (rhs[i] - lower[i] * d[i - 1]) / pivot;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    x
}
