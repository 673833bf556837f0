//! Exact effectiveness of idealized pass networks.
//!
//! Multi-pass and split-flow arrangements are modeled as a set of zones laid
//! along a normalized flow length `ξ ∈ [0, 1]`. Within a zone every stream
//! segment has a uniform temperature across its cross-section and exchanges
//! heat with the segments it is coupled to:
//!
//! ```text
//! dT_i/dξ = dir_i · NTU1 · (ua_share / capacity_share) · (1 or R1) · (T_j − T_i)
//! ```
//!
//! Temperatures are normalized so stream 1 enters at 1 and stream 2 at 0.
//! Each zone is a linear system `dy/dξ = A·y` whose last state is held at one
//! so inlet constants stay homogeneous.
//!
//! A zone is reduced to its scattering form: the temperature at each outlet
//! end as a combination of the temperatures at every inlet end. These
//! coefficients are bounded by the maximum principle, unlike the propagator
//! `exp(A)`, whose growing modes overflow once counterflow NTU reaches a few
//! hundred. The zone is cut into `2^k` pieces short enough for `exp(A/2^k)`
//! to be accurate, and the piece is joined to itself `k` times with the
//! Redheffer star product. Inlet, turnaround, and mixing conditions then form
//! one small linear system in the zone inlet temperatures.

use nalgebra::{DMatrix, DVector};

use crate::error::{DomainError, Result};

/// Largest row-sum norm of `A` over one piece before doubling.
const PIECE_NORM: f64 = 0.5;

/// Which stream a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    One,
    Two,
}

/// Flow direction of a segment along `ξ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    pub(crate) fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// `Forward` for even `index`, `Backward` for odd, starting from `self`.
    pub(crate) fn alternating(self, index: usize) -> Self {
        if index % 2 == 0 { self } else { self.reversed() }
    }

    /// The zone end where a segment flowing this way enters.
    pub(crate) fn inlet(self) -> End {
        match self {
            Self::Forward => End::Start,
            Self::Backward => End::Finish,
        }
    }

    /// The zone end where a segment flowing this way leaves.
    pub(crate) fn outlet(self) -> End {
        match self {
            Self::Forward => End::Finish,
            Self::Backward => End::Start,
        }
    }
}

/// One stream's share of a zone.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment {
    pub side: Side,
    pub direction: Direction,
    /// Fraction of the stream's total capacitance rate carried by this segment.
    pub capacity_share: f64,
}

/// Heat exchange between two segments of the same zone.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coupling {
    pub a: usize,
    pub b: usize,
    /// Fraction of the exchanger's total UA acting between the segments.
    pub conductance_share: f64,
}

/// An end of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum End {
    Start,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ZoneId(usize);

impl ZoneId {
    pub(crate) fn port(self, state: usize, end: End) -> Port {
        Port {
            zone: self,
            state,
            end,
        }
    }
}

/// A state evaluated at one end of a zone.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Port {
    zone: ZoneId,
    state: usize,
    end: End,
}

#[derive(Debug)]
struct Condition {
    terms: Vec<(f64, Port)>,
    value: f64,
}

#[derive(Debug)]
struct Zone {
    generator: DMatrix<f64>,
    /// One per state, the constant included.
    directions: Vec<Direction>,
}

impl Zone {
    /// Outlet temperatures as combinations of inlet temperatures, indexed by
    /// state on both axes.
    fn transfer(&self) -> Option<DMatrix<f64>> {
        let (forward, backward): (Vec<usize>, Vec<usize>) = (0..self.directions.len())
            .partition(|&i| self.directions[i] == Direction::Forward);

        let norm = self
            .generator
            .row_iter()
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max);
        if !norm.is_finite() {
            return None;
        }
        let halvings = if norm > PIECE_NORM {
            (norm / PIECE_NORM).log2().ceil() as i32
        } else {
            0
        };

        let mut scattering =
            Scattering::piece(&self.generator, 0.5_f64.powi(halvings), &forward, &backward)?;
        for _ in 0..halvings {
            scattering = scattering.then(&scattering)?;
        }
        tracing::trace!(halvings, dim = self.directions.len(), "reduced zone");

        let dim = self.directions.len();
        let mut transfer = DMatrix::zeros(dim, dim);
        for (outlets, to_forward, to_backward) in [
            (&forward, &scattering.ff, &scattering.fb),
            (&backward, &scattering.bf, &scattering.bb),
        ] {
            for (p, &i) in outlets.iter().enumerate() {
                for (q, &j) in forward.iter().enumerate() {
                    transfer[(i, j)] = to_forward[(p, q)];
                }
                for (q, &j) in backward.iter().enumerate() {
                    transfer[(i, j)] = to_backward[(p, q)];
                }
            }
        }
        Some(transfer)
    }
}

/// Scattering form of a stretch of zone.
///
/// Forward states enter at the start and backward states at the finish. The
/// block `fb` maps backward inlets to forward outlets, and so on.
#[derive(Debug, Clone)]
struct Scattering {
    ff: DMatrix<f64>,
    fb: DMatrix<f64>,
    bf: DMatrix<f64>,
    bb: DMatrix<f64>,
}

impl Scattering {
    /// Scattering form of a piece of normalized `length`.
    fn piece(
        generator: &DMatrix<f64>,
        length: f64,
        forward: &[usize],
        backward: &[usize],
    ) -> Option<Self> {
        let propagator = (generator * length).exp();
        let block =
            |rows: &[usize], cols: &[usize]| propagator.select_rows(rows).select_columns(cols);

        if backward.is_empty() {
            let nf = forward.len();
            return Some(Self {
                ff: block(forward, forward),
                fb: DMatrix::zeros(nf, 0),
                bf: DMatrix::zeros(0, nf),
                bb: DMatrix::zeros(0, 0),
            });
        }

        let bb = block(backward, backward).try_inverse()?;
        let bf = -(&bb * block(backward, forward));
        let to_forward = block(forward, backward);
        Some(Self {
            ff: block(forward, forward) + &to_forward * &bf,
            fb: to_forward * &bb,
            bf,
            bb,
        })
    }

    /// Joins `next` downstream of `self` along `ξ`.
    fn then(&self, next: &Self) -> Option<Self> {
        if self.bb.is_empty() {
            return Some(Self {
                ff: &next.ff * &self.ff,
                ..self.clone()
            });
        }

        let nf = self.ff.nrows();
        let nb = self.bb.nrows();
        let reflected = (DMatrix::identity(nf, nf) - &self.fb * &next.bf).try_inverse()?;
        let forward = &next.ff * &reflected;
        let backward = &next.bf * &reflected;
        Some(Self {
            ff: &forward * &self.ff,
            fb: &next.fb + &forward * &self.fb * &next.bb,
            bf: &self.bf + &self.bb * &backward * &self.ff,
            bb: &self.bb * (DMatrix::identity(nb, nb) + &backward * &self.fb) * &next.bb,
        })
    }
}

/// A network under construction.
#[derive(Debug)]
pub(crate) struct PassNetwork {
    r1: f64,
    ntu1: f64,
    zones: Vec<Zone>,
    conditions: Vec<Condition>,
}

impl PassNetwork {
    pub(crate) fn new(r1: f64, ntu1: f64) -> Self {
        Self {
            r1,
            ntu1,
            zones: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub(crate) fn r1(&self) -> f64 {
        self.r1
    }

    pub(crate) fn ntu1(&self) -> f64 {
        self.ntu1
    }

    /// Adds a zone of coupled segments; state `i` is `segments[i]`.
    pub(crate) fn add_zone(&mut self, segments: &[Segment], couplings: &[Coupling]) -> ZoneId {
        let dim = segments.len() + 1;
        let mut generator = DMatrix::zeros(dim, dim);

        for coupling in couplings {
            for (i, j) in [(coupling.a, coupling.b), (coupling.b, coupling.a)] {
                let segment = &segments[i];
                let side_factor = match segment.side {
                    Side::One => 1.0,
                    Side::Two => self.r1,
                };
                let rate = segment.direction.sign() * self.ntu1 * coupling.conductance_share
                    / segment.capacity_share
                    * side_factor;
                generator[(i, i)] -= rate;
                generator[(i, j)] += rate;
            }
        }

        let directions = segments.iter().map(|segment| segment.direction).collect();
        self.add_zone_with(generator, directions)
    }

    /// Adds a zone from its generator matrix.
    ///
    /// The last state must be the constant one: its row of `generator` is zero.
    /// `directions` names the end each other state enters at.
    pub(crate) fn add_zone_with(
        &mut self,
        generator: DMatrix<f64>,
        mut directions: Vec<Direction>,
    ) -> ZoneId {
        directions.push(Direction::Forward);
        self.zones.push(Zone {
            generator,
            directions,
        });
        ZoneId(self.zones.len() - 1)
    }

    /// Pins `port` to `value`.
    pub(crate) fn fix(&mut self, port: Port, value: f64) {
        self.conditions.push(Condition {
            terms: vec![(1.0, port)],
            value,
        });
    }

    /// Sets `port` to the mixed-mean of `sources`, which carry equal flow.
    pub(crate) fn mix(&mut self, port: Port, sources: &[Port]) {
        let weight = 1.0 / sources.len() as f64;
        let mut terms = Vec::with_capacity(sources.len() + 1);
        terms.push((1.0, port));
        terms.extend(sources.iter().map(|&source| (-weight, source)));
        self.conditions.push(Condition { terms, value: 0.0 });
    }

    /// Sets `port` equal to `source`.
    pub(crate) fn link(&mut self, port: Port, source: Port) {
        self.mix(port, &[source]);
    }

    /// Solves the boundary-value problem.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the conditions do not determine the network
    /// or the solution is not finite.
    pub(crate) fn solve(&self) -> Result<SolvedNetwork> {
        let unresolved = DomainError::NonFinite {
            quantity: "pass network temperatures",
        };

        let mut layouts = Vec::with_capacity(self.zones.len());
        let mut offset = 0;
        for zone in &self.zones {
            let transfer = zone.transfer().ok_or(unresolved)?;
            layouts.push(Layout {
                offset,
                directions: zone.directions.clone(),
                transfer,
            });
            offset += zone.directions.len();
        }
        let unknowns = offset;

        let required: usize = layouts.iter().map(|layout| layout.dim() - 1).sum();
        if self.conditions.len() != required {
            return Err(unresolved.into());
        }

        let mut system = DMatrix::zeros(unknowns, unknowns);
        let mut rhs = DVector::zeros(unknowns);
        let mut row = 0;

        for layout in &layouts {
            system[(row, layout.offset + layout.dim() - 1)] = 1.0;
            rhs[row] = 1.0;
            row += 1;
        }

        for condition in &self.conditions {
            for &(coefficient, port) in &condition.terms {
                let layout = &layouts[port.zone.0];
                if layout.is_inlet(port) {
                    system[(row, layout.offset + port.state)] += coefficient;
                } else {
                    for j in 0..layout.dim() {
                        system[(row, layout.offset + j)] +=
                            coefficient * layout.transfer[(port.state, j)];
                    }
                }
            }
            rhs[row] = condition.value;
            row += 1;
        }

        let inlets = system.lu().solve(&rhs).ok_or(unresolved)?;
        if inlets.iter().any(|x| !x.is_finite()) {
            return Err(unresolved.into());
        }

        tracing::trace!(unknowns, zones = layouts.len(), "solved pass network");
        Ok(SolvedNetwork { layouts, inlets })
    }
}

#[derive(Debug)]
struct Layout {
    offset: usize,
    directions: Vec<Direction>,
    transfer: DMatrix<f64>,
}

impl Layout {
    fn dim(&self) -> usize {
        self.directions.len()
    }

    fn is_inlet(&self, port: Port) -> bool {
        self.directions[port.state].inlet() == port.end
    }
}

/// Normalized temperatures of a solved network.
#[derive(Debug)]
pub(crate) struct SolvedNetwork {
    layouts: Vec<Layout>,
    inlets: DVector<f64>,
}

impl SolvedNetwork {
    pub(crate) fn temperature(&self, port: Port) -> f64 {
        let layout = &self.layouts[port.zone.0];
        if layout.is_inlet(port) {
            self.inlets[layout.offset + port.state]
        } else {
            (0..layout.dim())
                .map(|j| layout.transfer[(port.state, j)] * self.inlets[layout.offset + j])
                .sum()
        }
    }

    /// Mixed-mean temperature of equal-flow ports.
    pub(crate) fn mixed(&self, ports: &[Port]) -> f64 {
        ports.iter().map(|&port| self.temperature(port)).sum::<f64>() / ports.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn single_zone(r1: f64, ntu1: f64, tube: Direction) -> Result<f64> {
        let mut network = PassNetwork::new(r1, ntu1);
        let zone = network.add_zone(
            &[
                Segment {
                    side: Side::One,
                    direction: Direction::Forward,
                    capacity_share: 1.0,
                },
                Segment {
                    side: Side::Two,
                    direction: tube,
                    capacity_share: 1.0,
                },
            ],
            &[Coupling {
                a: 0,
                b: 1,
                conductance_share: 1.0,
            }],
        );
        network.fix(zone.port(0, End::Start), 1.0);
        network.fix(zone.port(1, tube.inlet()), 0.0);

        let solved = network.solve()?;
        Ok(1.0 - solved.temperature(zone.port(0, End::Finish)))
    }

    #[test]
    fn single_zone_counterflow() -> Result<()> {
        let (r, n) = (0.5_f64, 2.0_f64);
        let e = (-n * (1.0 - r)).exp();
        let expected = (1.0 - e) / (1.0 - r * e);

        assert_relative_eq!(
            single_zone(r, n, Direction::Backward)?,
            expected,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn single_zone_parallel_flow() -> Result<()> {
        let (r, n) = (2.0_f64, 0.7_f64);
        let expected = (1.0 - (-n * (1.0 + r)).exp()) / (1.0 + r);

        assert_relative_eq!(
            single_zone(r, n, Direction::Forward)?,
            expected,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn missing_condition_is_reported() {
        let mut network = PassNetwork::new(1.0, 1.0);
        network.add_zone(
            &[Segment {
                side: Side::One,
                direction: Direction::Forward,
                capacity_share: 1.0,
            }],
            &[],
        );
        let mut underdetermined = PassNetwork::new(1.0, 1.0);
        underdetermined.add_zone(
            &[
                Segment {
                    side: Side::One,
                    direction: Direction::Forward,
                    capacity_share: 1.0,
                },
                Segment {
                    side: Side::Two,
                    direction: Direction::Backward,
                    capacity_share: 1.0,
                },
            ],
            &[],
        );

        assert!(network.solve().is_err());
        assert!(underdetermined.solve().is_err());
    }

    #[test]
    fn long_counterflow_zone_stays_bounded() -> Result<()> {
        let p = single_zone(0.8, 40.0, Direction::Backward)?;
        let e = (-40.0 * 0.2_f64).exp();
        assert_relative_eq!(p, (1.0 - e) / (1.0 - 0.8 * e), max_relative = 1e-10);

        // Balanced counterflow approaches one only as `NTU/(1 + NTU)`.
        for ntu in [1e3, 1e5, 1e6] {
            let p = single_zone(1.0, ntu, Direction::Backward)?;
            assert_relative_eq!(p, ntu / (1.0 + ntu), max_relative = 1e-8);
        }
        assert_relative_eq!(
            single_zone(0.5, 1e5, Direction::Backward)?,
            1.0,
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn fully_forward_zone_needs_no_reflection() -> Result<()> {
        let p = single_zone(1.0, 1e5, Direction::Forward)?;
        assert_relative_eq!(p, 0.5, max_relative = 1e-12);
        Ok(())
    }
}
