//! Steady conduction over the shell cross-section.
//!
//! The square `D_s × D_s` around the bundle centre is divided into `nx × ny`
//! cells. A cell belongs to the shell (hot) surface when its centre lies at
//! least `R_s − h/2` from the centre, and to the tube (cold) surface when it
//! lies within `r_t + h/2`, where `h` is the smaller cell size. The remaining
//! cells are solved with a Jacobi-preconditioned conjugate gradient; the
//! outer faces of the grid are adiabatic.

use rayon::prelude::*;
use tracing::{debug, trace};
use uom::si::{
    f64::{HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::error::{DomainError, Error, MeshError, Result};

use super::{ConductionConfig, gradient_2d};

/// Inputs of a cross-section solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// Shell diameter; also the side of the square grid.
    pub shell_diameter: Length,
    /// Diameter of the cold tube surface at the bundle centre.
    pub tube_diameter: Length,
    /// Conductivity of the solid.
    pub wall_conductivity: ThermalConductivity,
    /// Temperature imposed on the shell region.
    pub hot: ThermodynamicTemperature,
    /// Temperature imposed on the tube region.
    pub cold: ThermodynamicTemperature,
    /// Cells along `x`.
    pub nx: usize,
    /// Cells along `y`.
    pub ny: usize,
}

/// Solved cross-section, stored row-major with `ny` rows of `nx` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionField {
    pub nx: usize,
    pub ny: usize,
    /// Cell-centre `x` coordinates.
    pub x: Vec<Length>,
    /// Cell-centre `y` coordinates.
    pub y: Vec<Length>,
    pub temperature: Vec<ThermodynamicTemperature>,
    /// `−k·∂T/∂x`.
    pub heat_flux_x: Vec<HeatFluxDensity>,
    /// `−k·∂T/∂y`.
    pub heat_flux_y: Vec<HeatFluxDensity>,
    /// Number of cells solved for.
    pub interior_cells: usize,
    /// Conjugate-gradient iterations performed.
    pub iterations: usize,
}

impl CrossSectionField {
    /// Temperature of the cell in `row`, `col`.
    #[must_use]
    pub fn temperature_at(&self, row: usize, col: usize) -> Option<ThermodynamicTemperature> {
        (row < self.ny && col < self.nx).then(|| self.temperature[row * self.nx + col])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Hot,
    Cold,
    Interior,
}

/// Cell classification and the stencil weights of the grid.
struct Grid {
    nx: usize,
    ny: usize,
    cells: Vec<Cell>,
    weight_x: f64,
    weight_y: f64,
}

impl Grid {
    fn neighbours(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (row, col) = (index / self.nx, index % self.nx);
        [
            (col > 0).then(|| (index - 1, self.weight_x)),
            (col + 1 < self.nx).then(|| (index + 1, self.weight_x)),
            (row > 0).then(|| (index - self.nx, self.weight_y)),
            (row + 1 < self.ny).then(|| (index + self.nx, self.weight_y)),
        ]
        .into_iter()
        .flatten()
    }

    /// `out = A·v` over interior cells; zero elsewhere.
    fn apply(&self, diagonal: &[f64], v: &[f64], out: &mut [f64]) {
        out.par_chunks_mut(self.nx)
            .enumerate()
            .for_each(|(row, out_row)| {
                for (col, slot) in out_row.iter_mut().enumerate() {
                    let index = row * self.nx + col;
                    *slot = if self.cells[index] == Cell::Interior {
                        self.neighbours(index)
                            .filter(|&(n, _)| self.cells[n] == Cell::Interior)
                            .fold(diagonal[index] * v[index], |acc, (n, w)| acc - w * v[n])
                    } else {
                        0.0
                    };
                }
            });
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl CrossSection {
    /// Solves the steady field and derives the heat flux.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllPosedMesh`] when the grid cannot separate the two
    /// surfaces: a region is empty, the regions overlap, no cell is left
    /// between them, or the annulus is thinner than two cells. Returns
    /// [`Error::NotConverged`] if the iteration limit is reached, and
    /// [`Error::Domain`] for non-physical inputs.
    pub fn solve(&self, config: ConductionConfig) -> Result<CrossSectionField> {
        let grid = self.classify()?;
        let (nx, ny) = (grid.nx, grid.ny);
        let shell = self.shell_diameter.get::<meter>();
        let (dx, dy) = (shell / nx as f64, shell / ny as f64);
        let k = self.wall_conductivity.get::<watt_per_meter_kelvin>();
        let hot = self.hot.get::<degree_celsius>();
        let cold = self.cold.get::<degree_celsius>();

        let boundary = |cell: Cell| if cell == Cell::Hot { hot } else { cold };
        let mut diagonal = vec![0.0; nx * ny];
        let mut forcing = vec![0.0; nx * ny];
        for (index, &cell) in grid.cells.iter().enumerate() {
            if cell != Cell::Interior {
                continue;
            }
            for (n, w) in grid.neighbours(index) {
                diagonal[index] += w;
                if grid.cells[n] != Cell::Interior {
                    forcing[index] += w * boundary(grid.cells[n]);
                }
            }
        }

        // Interior cells start at the tube temperature.
        let mut solution: Vec<f64> = grid
            .cells
            .iter()
            .map(|&cell| if cell == Cell::Interior { cold } else { 0.0 })
            .collect();
        let iterations = conjugate_gradient(&grid, &diagonal, &forcing, &mut solution, config)?;

        let celsius: Vec<f64> = grid
            .cells
            .iter()
            .zip(&solution)
            .map(|(&cell, &t)| if cell == Cell::Interior { t } else { boundary(cell) })
            .collect();
        let (d_dy, d_dx) = gradient_2d(&celsius, nx, ny, dx, dy)?;
        let flux = |slope: &f64| HeatFluxDensity::new::<watt_per_square_meter>(-k * slope);
        let interior_cells = grid.cells.iter().filter(|&&c| c == Cell::Interior).count();

        debug!(nx, ny, interior_cells, iterations, "solved cross-section conduction");

        Ok(CrossSectionField {
            nx,
            ny,
            x: (0..nx * ny)
                .map(|i| Length::new::<meter>((i % nx) as f64 * dx + dx / 2.0))
                .collect(),
            y: (0..nx * ny)
                .map(|i| Length::new::<meter>((i / nx) as f64 * dy + dy / 2.0))
                .collect(),
            temperature: celsius
                .iter()
                .map(|&t| ThermodynamicTemperature::new::<degree_celsius>(t))
                .collect(),
            heat_flux_x: d_dx.iter().map(flux).collect(),
            heat_flux_y: d_dy.iter().map(flux).collect(),
            interior_cells,
            iterations,
        })
    }

    fn classify(&self) -> Result<Grid> {
        let (nx, ny) = (self.nx, self.ny);
        if nx.min(ny) < 3 {
            return Err(MeshError::TooFewCells {
                cells: nx.min(ny),
                min: 3,
            }
            .into());
        }
        let shell =
            DomainError::require_positive("shell diameter", self.shell_diameter.get::<meter>())?;
        let tube =
            DomainError::require_positive("tube diameter", self.tube_diameter.get::<meter>())?;
        if tube >= shell {
            return Err(DomainError::OrderViolation {
                smaller: "tube diameter",
                larger: "shell diameter",
            }
            .into());
        }
        DomainError::require_positive(
            "wall conductivity",
            self.wall_conductivity.get::<watt_per_meter_kelvin>(),
        )?;
        DomainError::require_finite("hot temperature", self.hot.get::<degree_celsius>())?;
        DomainError::require_finite("cold temperature", self.cold.get::<degree_celsius>())?;

        let (dx, dy) = (shell / nx as f64, shell / ny as f64);
        let (r_shell, r_tube) = (shell / 2.0, tube / 2.0);
        let half_cell = dx.min(dy) / 2.0;

        let mut cells = Vec::with_capacity(nx * ny);
        for row in 0..ny {
            for col in 0..nx {
                let x = (col as f64 + 0.5) * dx - r_shell;
                let y = (row as f64 + 0.5) * dy - r_shell;
                let r = x.hypot(y);
                let (is_hot, is_cold) = (r >= r_shell - half_cell, r <= r_tube + half_cell);
                cells.push(match (is_hot, is_cold) {
                    (true, true) => return Err(MeshError::OverlappingBoundaries.into()),
                    (true, false) => Cell::Hot,
                    (false, true) => Cell::Cold,
                    (false, false) => Cell::Interior,
                });
            }
        }

        if !cells.contains(&Cell::Hot) {
            return Err(MeshError::EmptyBoundary { boundary: "shell" }.into());
        }
        if !cells.contains(&Cell::Cold) {
            return Err(MeshError::EmptyBoundary { boundary: "tube" }.into());
        }
        if !cells.contains(&Cell::Interior) {
            return Err(MeshError::NoInteriorCells.into());
        }
        let (gap, cell) = (r_shell - r_tube, dx.max(dy));
        if gap < 2.0 * cell {
            return Err(MeshError::UnresolvedAnnulus { gap, cell }.into());
        }

        Ok(Grid {
            nx,
            ny,
            cells,
            weight_x: dy / dx,
            weight_y: dx / dy,
        })
    }
}

/// Preconditioned conjugate gradient on the interior cells of `solution`.
///
/// Returns the iteration count.
fn conjugate_gradient(
    grid: &Grid,
    diagonal: &[f64],
    forcing: &[f64],
    solution: &mut [f64],
    config: ConductionConfig,
) -> Result<usize> {
    let size = solution.len();
    let precondition = |residual: &[f64], out: &mut [f64]| {
        for ((z, r), d) in out.iter_mut().zip(residual).zip(diagonal) {
            *z = if *d > 0.0 { r / d } else { 0.0 };
        }
    };

    let mut product = vec![0.0; size];
    grid.apply(diagonal, solution, &mut product);
    let mut residual: Vec<f64> = forcing.iter().zip(&product).map(|(b, a)| b - a).collect();
    let mut preconditioned = vec![0.0; size];
    precondition(&residual, &mut preconditioned);
    let mut direction = preconditioned.clone();
    let mut rho = dot(&residual, &preconditioned);

    let threshold = config.tolerance * dot(forcing, forcing).sqrt();
    let mut residual_norm = dot(&residual, &residual).sqrt();
    for iteration in 0..config.max_iters {
        if residual_norm <= threshold {
            return Ok(iteration);
        }

        grid.apply(diagonal, &direction, &mut product);
        let alpha = rho / dot(&direction, &product);
        for ((x, r), (p, ap)) in solution
            .iter_mut()
            .zip(residual.iter_mut())
            .zip(direction.iter().zip(&product))
        {
            *x += alpha * p;
            *r -= alpha * ap;
        }

        precondition(&residual, &mut preconditioned);
        let rho_next = dot(&residual, &preconditioned);
        let beta = rho_next / rho;
        for (p, z) in direction.iter_mut().zip(&preconditioned) {
            *p = z + beta * *p;
        }
        rho = rho_next;
        residual_norm = dot(&residual, &residual).sqrt();
        trace!(iteration, residual_norm, "conjugate gradient step");
    }

    if residual_norm <= threshold {
        return Ok(config.max_iters);
    }
    Err(Error::NotConverged {
        solver: "cross-section conjugate gradient",
        iters: config.max_iters,
        residual: residual_norm,
    })
}
