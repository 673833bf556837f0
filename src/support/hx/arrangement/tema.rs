//! TEMA E, G, H and J shells.
//!
//! Stream 1 is the shell-side fluid. The 1-1, 1-2 and J 1-1 shells use their
//! closed forms; every other pass count is evaluated on the pass network.

use crate::{
    error::Result,
    support::hx::network::{Coupling, Direction, End, PassNetwork, Segment, Side, ZoneId},
};

use super::basic;

/// Below this distance from `R1 = 2` the J 1-1 form switches to its limit.
const J_SINGULAR_BAND: f64 = 1e-6;

pub(super) fn e_shell(r: f64, n: f64, tube_passes: u16, counterflow: bool) -> Result<f64> {
    match tube_passes {
        1 if counterflow => Ok(basic::counterflow(r, n)),
        1 => Ok(basic::parallel(r, n)),
        2 => Ok(e_one_two(r, n)),
        _ => e_network(r, n, tube_passes, counterflow),
    }
}

/// `P1 = 2 / (1 + R1 + E·coth(E·NTU1/2))` with `E = √(1 + R1²)`.
fn e_one_two(r: f64, n: f64) -> f64 {
    let e = r.hypot(1.0);
    2.0 / (1.0 + r + e / (e * n / 2.0).tanh())
}

/// Adds a zone with one shell segment coupled to every tube segment.
fn shell_zone(
    network: &mut PassNetwork,
    shell: Segment,
    tubes: &[Segment],
    conductance_share: f64,
) -> ZoneId {
    let mut segments = Vec::with_capacity(tubes.len() + 1);
    segments.push(shell);
    segments.extend_from_slice(tubes);

    let couplings: Vec<_> = (1..=tubes.len())
        .map(|b| Coupling {
            a: 0,
            b,
            conductance_share,
        })
        .collect();

    network.add_zone(&segments, &couplings)
}

fn tube_passes_from(first: Direction, passes: usize, capacity_share: f64) -> Vec<Segment> {
    (0..passes)
        .map(|j| Segment {
            side: Side::Two,
            direction: first.alternating(j),
            capacity_share,
        })
        .collect()
}

fn e_network(r: f64, n: f64, tube_passes: u16, counterflow: bool) -> Result<f64> {
    let passes = usize::from(tube_passes);
    let first = if counterflow {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let tubes = tube_passes_from(first, passes, 1.0);

    let mut network = PassNetwork::new(r, n);
    let zone = shell_zone(
        &mut network,
        Segment {
            side: Side::One,
            direction: Direction::Forward,
            capacity_share: 1.0,
        },
        &tubes,
        1.0 / passes as f64,
    );

    network.fix(zone.port(0, End::Start), 1.0);
    network.fix(zone.port(1, tubes[0].direction.inlet()), 0.0);
    for j in 1..passes {
        let turn = tubes[j - 1].direction.outlet();
        network.link(zone.port(1 + j, turn), zone.port(j, turn));
    }

    let solved = network.solve()?;
    Ok(1.0 - solved.temperature(zone.port(0, End::Finish)))
}

pub(super) fn j_shell(r: f64, n: f64, tube_passes: u16) -> Result<f64> {
    if tube_passes == 1 {
        Ok(j_one_one(r, n))
    } else {
        j_network(r, n, tube_passes)
    }
}

/// Divided-flow shell with one tube pass.
///
/// ```text
/// P1 = (1/R1)·[1 − (2 − R1)(2A + R1·B) / ((2 + R1)(2A − R1/B))]
/// ```
///
/// with `A = e^NTU1` and `B = e^(−NTU1·R1/2)`, evaluated with every exponent
/// shifted by `max(NTU1, NTU1·R1/2)` so large NTU stays finite.
fn j_one_one(r: f64, n: f64) -> f64 {
    if (r - 2.0).abs() < J_SINGULAR_BAND {
        let a_inv_sq = (-2.0 * n).exp();
        return 0.5 * (1.0 - (1.0 + a_inv_sq) / (2.0 * (1.0 + n)));
    }

    let half = n * r / 2.0;
    let shift = n.max(half);
    let a = (n - shift).exp();
    let b = (-half - shift).exp();
    let b_inv = (half - shift).exp();

    let ratio = (2.0 * a + r * b) / (2.0 * a - r * b_inv);
    (1.0 - (2.0 - r) / (2.0 + r) * ratio) / r
}

/// Shell fluid enters at mid-length and splits into a left half flowing
/// backward and a right half flowing forward.
fn j_network(r: f64, n: f64, tube_passes: u16) -> Result<f64> {
    let passes = usize::from(tube_passes);
    let tubes = tube_passes_from(Direction::Forward, passes, 1.0);
    let share = 0.5 / passes as f64;

    let mut network = PassNetwork::new(r, n);
    let half = |direction| Segment {
        side: Side::One,
        direction,
        capacity_share: 0.5,
    };
    let left = shell_zone(&mut network, half(Direction::Backward), &tubes, share);
    let right = shell_zone(&mut network, half(Direction::Forward), &tubes, share);

    network.fix(left.port(0, End::Finish), 1.0);
    network.fix(right.port(0, End::Start), 1.0);
    for j in 1..=passes {
        network.link(right.port(j, End::Start), left.port(j, End::Finish));
    }
    network.fix(left.port(1, End::Start), 0.0);
    for j in 1..passes {
        let (zone, turn) = match tubes[j - 1].direction {
            Direction::Forward => (right, End::Finish),
            Direction::Backward => (left, End::Start),
        };
        network.link(zone.port(1 + j, turn), zone.port(j, turn));
    }

    let solved = network.solve()?;
    Ok(1.0 - solved.mixed(&[left.port(0, End::Start), right.port(0, End::Finish)]))
}

/// The four quadrants of one split-flow unit.
///
/// The shell fluid enters the upper half at mid-length, flows outward to both
/// ends, turns under the longitudinal baffle, and leaves the lower half at
/// mid-length.
struct SplitUnit {
    upper: [ZoneId; 2],
    lower: [ZoneId; 2],
}

/// TEMA G (`units = 1`) or H (`units = 2`) shell.
pub(super) fn split_flow(
    r: f64,
    n: f64,
    tube_passes: u16,
    counterflow: bool,
    units: usize,
) -> Result<f64> {
    let two_pass = tube_passes == 2;
    let shell_share = 0.5 / units as f64;
    let conductance_share = 1.0 / (4 * units) as f64;

    // With two passes the first pass occupies the lower half when counterflow.
    let tube_in = |lower: bool| -> Segment {
        if two_pass {
            let first = lower == counterflow;
            Segment {
                side: Side::Two,
                direction: if first {
                    Direction::Forward
                } else {
                    Direction::Backward
                },
                capacity_share: 1.0,
            }
        } else {
            Segment {
                side: Side::Two,
                direction: Direction::Forward,
                capacity_share: 0.5,
            }
        }
    };

    let mut network = PassNetwork::new(r, n);
    let mut quadrant = |lower: bool, shell: Direction| {
        shell_zone(
            &mut network,
            Segment {
                side: Side::One,
                direction: shell,
                capacity_share: shell_share,
            },
            &[tube_in(lower)],
            conductance_share,
        )
    };

    let split_units: Vec<SplitUnit> = (0..units)
        .map(|_| SplitUnit {
            upper: [
                quadrant(false, Direction::Backward),
                quadrant(false, Direction::Forward),
            ],
            lower: [
                quadrant(true, Direction::Forward),
                quadrant(true, Direction::Backward),
            ],
        })
        .collect();

    let mut outlets = Vec::with_capacity(2 * units);
    for unit in &split_units {
        let [upper_left, upper_right] = unit.upper;
        let [lower_left, lower_right] = unit.lower;
        network.fix(upper_left.port(0, End::Finish), 1.0);
        network.fix(upper_right.port(0, End::Start), 1.0);
        network.link(lower_left.port(0, End::Start), upper_left.port(0, End::Start));
        network.link(lower_right.port(0, End::Finish), upper_right.port(0, End::Finish));
        outlets.push(lower_left.port(0, End::Finish));
        outlets.push(lower_right.port(0, End::Start));
    }

    // Tube rows run continuously along the shell through every quadrant.
    let upper: Vec<ZoneId> = split_units.iter().flat_map(|unit| unit.upper).collect();
    let lower: Vec<ZoneId> = split_units.iter().flat_map(|unit| unit.lower).collect();
    for chain in [&upper, &lower] {
        for pair in chain.windows(2) {
            network.link(pair[1].port(1, End::Start), pair[0].port(1, End::Finish));
        }
    }

    if two_pass {
        let (first, second) = if counterflow {
            (&lower, &upper)
        } else {
            (&upper, &lower)
        };
        network.fix(first[0].port(1, End::Start), 0.0);
        if let (Some(first_end), Some(second_end)) = (first.last(), second.last()) {
            network.link(second_end.port(1, End::Finish), first_end.port(1, End::Finish));
        }
    } else {
        network.fix(upper[0].port(1, End::Start), 0.0);
        network.fix(lower[0].port(1, End::Start), 0.0);
    }

    let solved = network.solve()?;
    Ok(1.0 - solved.mixed(&outlets))
}
