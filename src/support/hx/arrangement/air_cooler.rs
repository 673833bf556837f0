//! Air-cooled exchangers.
//!
//! Stream 1 is the air. It crosses the tube rows in order, each row exchanging
//! with the air as a crossflow element with the air unmixed and the row fluid
//! locally mixed, so the air leaving row `k` is
//!
//! ```text
//! T_air,k+1 = (1 − K)·T_air,k + K·t_k,   K = 1 − e^(−NTU1/rows)
//! ```
//!
//! Along the tube length each row temperature then obeys a linear equation in
//! the row temperatures of the rows the air has already crossed. The mean air
//! outlet is carried as an extra integral state.

use nalgebra::DMatrix;

use crate::{
    error::Result,
    support::hx::network::{Direction, End, PassNetwork},
};

pub(super) fn effectiveness(
    r: f64,
    n: f64,
    rows: u16,
    passes: u16,
    counterflow: bool,
) -> Result<f64> {
    let rows = usize::from(rows);
    let passes = usize::from(passes);
    let rows_per_pass = rows / passes;

    // Pass `p` holds rows `pass_rows(p)` in the order the air meets them.
    let pass_rows = |pass: usize| {
        if counterflow {
            rows - (pass + 1) * rows_per_pass..rows - pass * rows_per_pass
        } else {
            pass * rows_per_pass..(pass + 1) * rows_per_pass
        }
    };
    let pass_direction = |pass: usize| Direction::Forward.alternating(pass);

    let direction_of = |row: usize| {
        (0..passes)
            .find(|&pass| pass_rows(pass).contains(&row))
            .map_or(Direction::Forward, pass_direction)
    };

    let mut network = PassNetwork::new(r, n);
    let generator = row_generator(&network, rows, rows_per_pass, &direction_of);
    let integral = rows;
    // The air-outlet integral accumulates from the start of the tube length.
    let directions = (0..rows)
        .map(direction_of)
        .chain([Direction::Forward])
        .collect();
    let zone = network.add_zone_with(generator, directions);

    network.fix(zone.port(integral, End::Start), 0.0);
    for pass in 0..passes {
        let inlet = pass_direction(pass).inlet();
        let previous: Vec<_> = match pass.checked_sub(1) {
            Some(prior) => pass_rows(prior).map(|row| zone.port(row, inlet)).collect(),
            None => Vec::new(),
        };
        for row in pass_rows(pass) {
            if previous.is_empty() {
                network.fix(zone.port(row, inlet), 0.0);
            } else {
                network.mix(zone.port(row, inlet), &previous);
            }
        }
    }

    let solved = network.solve()?;
    Ok(1.0 - solved.temperature(zone.port(integral, End::Finish)))
}

/// States: one per row, then the air-outlet integral, then the constant.
fn row_generator(
    network: &PassNetwork,
    rows: usize,
    rows_per_pass: usize,
    direction_of: impl Fn(usize) -> Direction,
) -> DMatrix<f64> {
    let dim = rows + 2;
    let (integral, constant) = (rows, rows + 1);
    let k = -(-network.ntu1() / rows as f64).exp_m1();

    // Air temperature as a combination of states; it enters at one.
    let mut air = vec![0.0; dim];
    air[constant] = 1.0;

    // Each row carries 1/rows_per_pass of the tube flow.
    let mut generator = DMatrix::zeros(dim, dim);
    for row in 0..rows {
        let rate = direction_of(row).sign() * rows_per_pass as f64 * network.r1() * k;
        for (j, weight) in air.iter().enumerate() {
            generator[(row, j)] += rate * weight;
        }
        generator[(row, row)] -= rate;

        for weight in &mut air {
            *weight *= 1.0 - k;
        }
        air[row] += k;
    }
    for (j, weight) in air.iter().enumerate() {
        generator[(integral, j)] = *weight;
    }
    generator
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::support::hx::arrangement::{BasicFlow, basic};

    #[test]
    fn single_row_is_crossflow_with_tube_side_mixed() -> Result<()> {
        for (r, n) in [(0.5, 1.0), (1.0, 2.0), (2.0, 0.7)] {
            assert_relative_eq!(
                effectiveness(r, n, 1, 1, true)?,
                basic::effectiveness(BasicFlow::CrossflowMixed2, r, n)?,
                max_relative = 1e-10
            );
        }
        Ok(())
    }

    #[test]
    fn reference_values() -> Result<()> {
        let (r, n) = (0.5, 1.0);
        assert_relative_eq!(effectiveness(r, n, 2, 2, true)?, 0.558_314_728, max_relative = 1e-7);
        assert_relative_eq!(effectiveness(r, n, 2, 1, true)?, 0.546_118_347, max_relative = 1e-7);
        assert_relative_eq!(effectiveness(r, n, 4, 2, true)?, 0.558_905_076, max_relative = 1e-7);
        assert_relative_eq!(effectiveness(r, n, 4, 4, true)?, 0.563_112_020, max_relative = 1e-7);
        Ok(())
    }

    #[test]
    fn counter_current_passes_beat_co_current() -> Result<()> {
        let (r, n) = (1.0, 3.0);
        assert!(effectiveness(r, n, 4, 4, true)? > effectiveness(r, n, 4, 4, false)?);
        Ok(())
    }

    #[test]
    fn more_passes_approach_counterflow() -> Result<()> {
        let (r, n) = (1.0, 2.0);
        let two = effectiveness(r, n, 4, 2, true)?;
        let four = effectiveness(r, n, 4, 4, true)?;
        assert!(two < four && four < basic::counterflow(r, n));
        Ok(())
    }
}
