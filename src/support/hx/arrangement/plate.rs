//! Plate exchangers with independent pass counts.
//!
//! The plate pack is cut into `L = lcm(n1, n2)` blocks of equal area so every
//! block lies inside exactly one pass of each fluid. Within a block both
//! fluids see a single channel pair, and passes of the same fluid are joined
//! by mixing the outlets of the previous pass.

use crate::{
    error::Result,
    support::hx::network::{Coupling, Direction, PassNetwork, Segment, Side, ZoneId},
};

struct Block {
    zone: ZoneId,
    pass_1: usize,
    pass_2: usize,
    direction_1: Direction,
    direction_2: Direction,
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub(super) fn effectiveness(
    r: f64,
    n: f64,
    passes_1: u16,
    passes_2: u16,
    counterflow: bool,
    passes_counterflow: bool,
) -> Result<f64> {
    let (n1, n2) = (usize::from(passes_1), usize::from(passes_2));
    let blocks = n1 / gcd(n1, n2) * n2;
    let (per_pass_1, per_pass_2) = (blocks / n1, blocks / n2);

    let pass_2_of = |block: usize| {
        if counterflow {
            (blocks - 1 - block) / per_pass_2
        } else {
            block / per_pass_2
        }
    };
    let direction_1 = |block: usize| Direction::Forward.alternating(block / per_pass_1);
    let first_block_2 = if counterflow { blocks - 1 } else { 0 };
    let base_2 = if passes_counterflow {
        direction_1(first_block_2).reversed()
    } else {
        direction_1(first_block_2)
    };

    let mut network = PassNetwork::new(r, n);
    let layout: Vec<Block> = (0..blocks)
        .map(|block| {
            let (pass_1, pass_2) = (block / per_pass_1, pass_2_of(block));
            let (d1, d2) = (direction_1(block), base_2.alternating(pass_2));
            let zone = network.add_zone(
                &[
                    Segment {
                        side: Side::One,
                        direction: d1,
                        capacity_share: n1 as f64 / blocks as f64,
                    },
                    Segment {
                        side: Side::Two,
                        direction: d2,
                        capacity_share: n2 as f64 / blocks as f64,
                    },
                ],
                &[Coupling {
                    a: 0,
                    b: 1,
                    conductance_share: 1.0 / blocks as f64,
                }],
            );
            Block {
                zone,
                pass_1,
                pass_2,
                direction_1: d1,
                direction_2: d2,
            }
        })
        .collect();

    for block in &layout {
        let inlet_1 = block.zone.port(0, block.direction_1.inlet());
        if block.pass_1 == 0 {
            network.fix(inlet_1, 1.0);
        } else {
            let previous: Vec<_> = layout
                .iter()
                .filter(|other| other.pass_1 + 1 == block.pass_1)
                .map(|other| other.zone.port(0, other.direction_1.outlet()))
                .collect();
            network.mix(inlet_1, &previous);
        }

        let inlet_2 = block.zone.port(1, block.direction_2.inlet());
        if block.pass_2 == 0 {
            network.fix(inlet_2, 0.0);
        } else {
            let previous: Vec<_> = layout
                .iter()
                .filter(|other| other.pass_2 + 1 == block.pass_2)
                .map(|other| other.zone.port(1, other.direction_2.outlet()))
                .collect();
            network.mix(inlet_2, &previous);
        }
    }

    let outlets: Vec<_> = layout
        .iter()
        .filter(|block| block.pass_1 + 1 == n1)
        .map(|block| block.zone.port(0, block.direction_1.outlet()))
        .collect();

    let solved = network.solve()?;
    Ok(1.0 - solved.mixed(&outlets))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::support::hx::arrangement::basic;

    #[test]
    fn single_pass_matches_basic_forms() -> Result<()> {
        for (r, n) in [(0.5, 1.0), (1.0, 2.0), (2.0, 0.7)] {
            assert_relative_eq!(
                effectiveness(r, n, 1, 1, true, true)?,
                basic::counterflow(r, n),
                max_relative = 1e-10
            );
            assert_relative_eq!(
                effectiveness(r, n, 1, 1, false, false)?,
                basic::parallel(r, n),
                max_relative = 1e-10
            );
        }
        Ok(())
    }

    #[test]
    fn equal_pass_counts_in_counterflow_are_pure_counterflow() -> Result<()> {
        let (r, n) = (1.5, 3.0);
        assert_relative_eq!(
            effectiveness(r, n, 2, 2, true, true)?,
            basic::counterflow(r, n),
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn reference_values() -> Result<()> {
        let (r, n) = (0.5, 1.0);
        for ((passes_1, counterflow), expected) in [
            ((2, true), 0.557_022_324),
            ((2, false), 0.525_439_844),
            ((1, true), 0.544_524_683),
        ] {
            let p = effectiveness(r, n, passes_1, 3, counterflow, true)?;
            assert_relative_eq!(p, expected, max_relative = 1e-7);
        }
        Ok(())
    }
}
