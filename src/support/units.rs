//! Extensions to [`uom`] and the imperial unit contract.
//!
//! This crate uses [`uom`] for all physical units. This module provides:
//!
//! - [`TemperatureDifference`]: subtract absolute temperatures to get an interval.
//! - [`imperial`]: the fixed conversion constants between the engineering
//!   units operators enter (°F, lb/h, BTU, cP, inches) and SI.
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use shell_tube_rating::support::units::TemperatureDifference;
//!
//! let hot_in = ThermodynamicTemperature::new::<kelvin>(370.0);
//! let cold_in = ThermodynamicTemperature::new::<kelvin>(250.0);
//! let approach = hot_in.minus(cold_in);
//! // approach is a TemperatureInterval, not a ThermodynamicTemperature
//! ```

pub mod imperial;
mod temperature_difference;

pub use temperature_difference::TemperatureDifference;
