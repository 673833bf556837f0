//! Heat exchanger analysis toolkit.
//!
//! This module provides the temperature effectiveness relations of the common
//! exchanger arrangements and a P-NTU rating built on top of them.
//!
//! # Overview
//!
//! The P-NTU method relates the temperature effectiveness `P1` of stream 1 to
//! the capacity ratio `R1 = C1/C2` and the thermal size `NTU1 = UA/C1`. When
//! stream 1 is the minimum-capacity stream this is the classical ε-NTU method.
//!
//! This toolkit provides:
//!
//! - **Core types**: [`CapacitanceRate`], [`CapacityRatio`], [`Effectiveness`],
//!   [`Ntu`], [`HeatFlow`]
//! - **Stream modeling**: [`StreamInlet`], [`Stream`]
//! - **Flow arrangements**: [`Arrangement`] and [`BasicFlow`], all implementing
//!   [`TemperatureEffectiveness`]
//! - **Rating**: [`p_ntu::solve_p_ntu`], [`p_ntu::known_conductance_and_inlets`],
//!   [`p_ntu::required_conductance`]
//!
//! # Example
//!
//! ```
//! use shell_tube_rating::support::hx::{
//!     CapacitanceRate, StreamInlet,
//!     p_ntu::{ExchangerSubtype, solve_p_ntu},
//! };
//! use uom::si::{
//!     f64::{ThermalConductance, ThermodynamicTemperature},
//!     thermal_conductance::kilowatt_per_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! fn main() -> shell_tube_rating::Result<()> {
//!     let result = solve_p_ntu(
//!         [
//!             StreamInlet::new(
//!                 CapacitanceRate::new::<kilowatt_per_kelvin>(3.0)?,
//!                 ThermodynamicTemperature::new::<degree_celsius>(80.0),
//!             ),
//!             StreamInlet::new(
//!                 CapacitanceRate::new::<kilowatt_per_kelvin>(6.0)?,
//!                 ThermodynamicTemperature::new::<degree_celsius>(20.0),
//!             ),
//!         ],
//!         ThermalConductance::new::<kilowatt_per_kelvin>(4.0),
//!         ExchangerSubtype::E,
//!         2,
//!     )?;
//!
//!     let [shell, tube] = result.streams;
//!     assert!(shell.outlet_temperature < shell.inlet_temperature);
//!     assert!(tube.outlet_temperature > tube.inlet_temperature);
//!
//!     Ok(())
//! }
//! ```

pub mod arrangement;
mod capacitance_rate;
mod capacity_ratio;
mod effectiveness_ntu;
mod flow;
mod network;
pub mod p_ntu;
mod stream;

pub use arrangement::{Arrangement, BasicFlow};
pub use capacitance_rate::CapacitanceRate;
pub use capacity_ratio::CapacityRatio;
pub use effectiveness_ntu::{Effectiveness, Ntu, TemperatureEffectiveness, effectiveness_curve};
pub use flow::HeatFlow;
pub use stream::{Stream, StreamInlet};
