//! P-NTU rating of two-stream exchangers.
//!
//! Given both inlets and the conductance `UA`, [`known_conductance_and_inlets`]
//! resolves the duty and both outlets through the arrangement's temperature
//! effectiveness. [`required_conductance`] runs the same relation backwards,
//! searching for the `UA` that brings stream 1 to a target outlet temperature.

mod config;
mod problem;

pub use config::PntuConfig;

use std::cmp::Ordering;

use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, ThermalConductance, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
};

use crate::{
    error::{ConfigurationError, DomainError, Error, Result},
    support::{
        hx::{
            Arrangement, BasicFlow, CapacityRatio, Effectiveness, HeatFlow, Ntu, Stream,
            StreamInlet, TemperatureEffectiveness,
        },
        units::TemperatureDifference,
    },
};

use problem::{ConductanceModel, TargetEffectivenessProblem};

/// Smallest `NTU1` the conductance search considers.
pub const NTU_SEARCH_MIN: f64 = 1e-6;

/// Largest `NTU1` the conductance search considers.
pub const NTU_SEARCH_MAX: f64 = 50.0;

/// Exchanger families accepted by [`solve_p_ntu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangerSubtype {
    /// TEMA E shell, first tube pass in counterflow.
    E,
    /// TEMA G shell.
    G,
    /// TEMA H shell.
    H,
    /// TEMA J shell.
    J,
    /// Crossflow, both streams unmixed.
    Crossflow,
    /// Pure counterflow.
    Counterflow,
    /// Pure parallel flow.
    Parallel,
}

impl ExchangerSubtype {
    /// Builds the arrangement for this subtype with `passes` tube passes.
    ///
    /// The basic subtypes have no passes, and `passes` is ignored for them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a shell subtype does not support
    /// the pass count.
    pub fn arrangement(self, passes: u16) -> Result<Arrangement, ConfigurationError> {
        let basic = |flow| {
            if passes != 1 {
                tracing::debug!(subtype = ?self, passes, "ignoring pass count for basic flow");
            }
            Arrangement::Basic(flow)
        };

        let arrangement = match self {
            Self::E => Arrangement::TemaE {
                tube_passes: passes,
                counterflow: true,
            },
            Self::G => Arrangement::TemaG {
                tube_passes: passes,
                counterflow: true,
            },
            Self::H => Arrangement::TemaH {
                tube_passes: passes,
                counterflow: true,
            },
            Self::J => Arrangement::TemaJ {
                tube_passes: passes,
            },
            Self::Crossflow => basic(BasicFlow::Crossflow),
            Self::Counterflow => basic(BasicFlow::Counterflow),
            Self::Parallel => basic(BasicFlow::Parallel),
        };

        arrangement.validate()?;
        Ok(arrangement)
    }
}

/// Rated exchanger state.
#[derive(Debug, Clone, Copy)]
pub struct PNtuResult {
    /// Final state for each stream (same order as the inputs).
    pub streams: [Stream; 2],
    /// Heat transferred from the hotter to the colder stream.
    pub duty: Power,
    /// Temperature effectiveness of stream 1.
    pub effectiveness: Effectiveness,
    /// `UA / C1`.
    pub ntu1: Ntu,
    /// `C1 / C2`.
    pub r1: CapacityRatio,
}

/// Rates an exchanger whose conductance and inlet conditions are known.
///
/// # Example
///
/// ```
/// use shell_tube_rating::support::hx::{
///     Arrangement, BasicFlow, CapacitanceRate, StreamInlet,
///     p_ntu::known_conductance_and_inlets,
/// };
/// use uom::si::{
///     f64::{ThermalConductance, ThermodynamicTemperature},
///     thermal_conductance::kilowatt_per_kelvin,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// # fn main() -> shell_tube_rating::Result<()> {
/// let result = known_conductance_and_inlets(
///     &Arrangement::Basic(BasicFlow::Counterflow),
///     ThermalConductance::new::<kilowatt_per_kelvin>(3.0 * 4.0_f64.ln()),
///     [
///         StreamInlet::new(
///             CapacitanceRate::new::<kilowatt_per_kelvin>(3.0)?,
///             ThermodynamicTemperature::new::<degree_celsius>(50.0),
///         ),
///         StreamInlet::new(
///             CapacitanceRate::new::<kilowatt_per_kelvin>(6.0)?,
///             ThermodynamicTemperature::new::<degree_celsius>(80.0),
///         ),
///     ],
/// )?;
///
/// assert!((result.effectiveness.value() - 2.0 / 3.0).abs() < 1e-12);
/// let [cold, hot] = result.streams;
/// assert!(cold.outlet_temperature > cold.inlet_temperature);
/// assert!(hot.outlet_temperature < hot.inlet_temperature);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns `Err` if `ua` is not strictly positive, or if the arrangement
/// rejects its configuration or the resulting `(R1, NTU1)`.
pub fn known_conductance_and_inlets(
    arrangement: &impl TemperatureEffectiveness,
    ua: ThermalConductance,
    inlets: [StreamInlet; 2],
) -> Result<PNtuResult> {
    let [first, second] = inlets;
    let c1 = first.capacitance_rate();

    let r1 = CapacityRatio::from_capacitance_rates([c1, second.capacitance_rate()])?;
    let ntu1 = Ntu::from_conductance_and_capacitance_rate(ua, c1)?;
    let effectiveness = arrangement.temperature_effectiveness(r1, ntu1)?;

    // Signed heat into stream 1: negative when stream 1 is the hotter one.
    let max_rise_1 = second.temperature().minus(first.temperature());
    let into_first = *effectiveness * *c1 * max_rise_1;
    let duty = into_first.abs();

    let streams = [
        first.with_heat_flow(HeatFlow::from_signed(into_first)?),
        second.with_heat_flow(HeatFlow::from_signed(-into_first)?),
    ];

    tracing::debug!(
        r1 = r1.value(),
        ntu1 = ntu1.value(),
        p1 = effectiveness.value(),
        "rated exchanger"
    );

    Ok(PNtuResult {
        streams,
        duty,
        effectiveness,
        ntu1,
        r1,
    })
}

/// Rates an exchanger of the given subtype and tube pass count.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] for an unsupported subtype and pass
/// combination, otherwise as [`known_conductance_and_inlets`].
pub fn solve_p_ntu(
    inlets: [StreamInlet; 2],
    ua: ThermalConductance,
    subtype: ExchangerSubtype,
    passes: u16,
) -> Result<PNtuResult> {
    let arrangement = subtype.arrangement(passes)?;
    known_conductance_and_inlets(&arrangement, ua, inlets)
}

/// Finds the conductance that brings stream 1 to `target_outlet_1`.
///
/// The search brackets `NTU1` in
/// [`NTU_SEARCH_MIN`]`..=`[`NTU_SEARCH_MAX`]. When the effectiveness peaks
/// inside that range the target can have two roots; the bisection returns one.
///
/// # Errors
///
/// Returns a domain error if the inlets are at the same temperature or the
/// target cannot be reached inside the bracket, [`Error::NotConverged`] if the
/// bisection hits its iteration limit, and propagates rating errors.
pub fn required_conductance(
    arrangement: &impl TemperatureEffectiveness,
    inlets: [StreamInlet; 2],
    target_outlet_1: ThermodynamicTemperature,
    config: PntuConfig,
) -> Result<PNtuResult> {
    let [first, second] = inlets;
    let span = second
        .temperature()
        .minus(first.temperature())
        .get::<delta_kelvin>();
    let change = target_outlet_1
        .minus(first.temperature())
        .get::<delta_kelvin>();
    let span = DomainError::require_finite("inlet temperature difference", span)?;
    if span == 0.0 {
        return Err(DomainError::NonPositive {
            quantity: "inlet temperature difference",
            value: 0.0,
        }
        .into());
    }
    let target = DomainError::require_finite("target effectiveness", change / span)?;

    let model = ConductanceModel::new(arrangement, inlets);
    let reach = |ntu1: f64| -> Result<f64> { Ok(model.call(&ntu1)?.effectiveness.value()) };
    let (lowest, highest) = (reach(NTU_SEARCH_MIN)?, reach(NTU_SEARCH_MAX)?);
    let (min, max) = (lowest.min(highest), lowest.max(highest));
    if !(min..=max).contains(&target) {
        return Err(DomainError::OutOfRange {
            quantity: "target effectiveness",
            value: target,
            min,
            max,
        }
        .into());
    }

    let problem = TargetEffectivenessProblem::new(target);
    let solution = bisection::solve(
        &model,
        &problem,
        [NTU_SEARCH_MIN.ln(), NTU_SEARCH_MAX.ln()],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(Error::NotConverged {
            solver: "conductance search",
            iters: solution.iters,
            residual: solution.residual,
        });
    }

    let result = solution.snapshot.output;
    tracing::debug!(
        iters = solution.iters,
        ntu1 = result.ntu1.value(),
        "found required conductance"
    );
    Ok(result)
}

/// The conductance implied by a rated result, `UA = NTU1 · C1`.
#[must_use]
pub fn conductance(result: &PNtuResult) -> ThermalConductance {
    *result.streams[0].capacitance_rate * result.ntu1.value()
}

impl PNtuResult {
    /// Stream whose temperature drops, or `None` when no heat flows.
    #[must_use]
    pub fn hot_stream(&self) -> Option<&Stream> {
        self.streams
            .iter()
            .find(|stream| matches!(stream.heat_flow, HeatFlow::Out(_)))
    }

    /// Whether the outlets cross, meaning the cold outlet leaves hotter than
    /// the hot outlet.
    #[must_use]
    pub fn has_temperature_cross(&self) -> bool {
        let [a, b] = &self.streams;
        match a.inlet_temperature.partial_cmp(&b.inlet_temperature) {
            Some(Ordering::Greater) => b.outlet_temperature > a.outlet_temperature,
            Some(Ordering::Less) => a.outlet_temperature > b.outlet_temperature,
            _ => false,
        }
    }
}
