//! Hot-side energy balance.

use uom::si::f64::{Power, ThermodynamicTemperature};

use crate::{
    error::{ConfigurationError, Result},
    support::hx::{HeatFlow, Stream},
};

use super::FluidStream;

/// Hot-side duty and the cold outlet it implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBalance {
    /// Heat released by the hot stream.
    pub duty: Power,
    pub cold_outlet: ThermodynamicTemperature,
    pub hot: Stream,
    pub cold: Stream,
}

/// First-law balance on the hot side, then the cold outlet in one pass.
///
/// `Q = C_hot·(T_hot,in − T_hot,out)` and `T_cold,out = T_cold,in + Q/C_cold`.
/// A hot stream that warms up yields a negative duty and a cooled cold stream.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingInput`] if the hot outlet temperature
/// is unset.
pub fn solve_energy_balance(hot: &FluidStream, cold: &FluidStream) -> Result<EnergyBalance> {
    let hot_outlet = hot.outlet_temperature().ok_or(ConfigurationError::MissingInput {
        input: "hot outlet temperature",
        needed_for: "energy balance",
    })?;

    let hot = Stream::new_from_outlet_temperature(
        hot.capacitance_rate(),
        hot.inlet_temperature(),
        hot_outlet,
    )?;
    let released = -hot.heat_flow.signed();
    let cold = Stream::new_from_heat_flow(
        cold.capacitance_rate(),
        cold.inlet_temperature(),
        HeatFlow::from_signed(released)?,
    );

    Ok(EnergyBalance {
        duty: released,
        cold_outlet: cold.outlet_temperature,
        hot,
        cold,
    })
}
