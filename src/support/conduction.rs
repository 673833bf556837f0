//! Steady wall and cross-section conduction.
//!
//! Solves `∇·(k∇T) = 0` with constant conductivity and Dirichlet values at
//! the fluid-wetted surfaces:
//!
//! - [`solve_radial`]: the tube wall as a 1-D radial annulus, solved directly.
//! - [`CrossSection`]: the shell cross-section on a Cartesian grid, with the
//!   shell and tube surfaces carved out as cell regions and the remaining
//!   cells solved iteratively.
//! - [`axial_profile`]: the linear stream temperature profiles along the tube.
//!
//! Heat flux is derived from the solved field by numerical differentiation
//! ([`gradient`], [`gradient_2d`]) scaled by `−k`.
//!
//! Fields are solved in degrees Celsius and reported as
//! [`ThermodynamicTemperature`](uom::si::f64::ThermodynamicTemperature).
//!
//! # Example
//!
//! ```
//! use shell_tube_rating::support::conduction::solve_radial;
//! use uom::si::{
//!     f64::{Length, ThermalConductivity, ThermodynamicTemperature},
//!     length::millimeter,
//!     thermal_conductivity::watt_per_meter_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! fn main() -> shell_tube_rating::Result<()> {
//!     let profile = solve_radial(
//!         Length::new::<millimeter>(7.4),
//!         Length::new::<millimeter>(9.5),
//!         ThermalConductivity::new::<watt_per_meter_kelvin>(28.6),
//!         ThermodynamicTemperature::new::<degree_celsius>(26.0),
//!         ThermodynamicTemperature::new::<degree_celsius>(96.8),
//!         60,
//!     )?;
//!
//!     assert_eq!(profile.temperatures.len(), 60);
//!     // Heat flows inward, toward the cold bore.
//!     assert!(profile.heat_flux.iter().all(|q| q.value < 0.0));
//!     Ok(())
//! }
//! ```

mod axial;
mod config;
mod cross_section;
mod gradient;
mod radial;

pub use axial::{AXIAL_POINTS, AxialProfile, axial_profile};
pub use config::ConductionConfig;
pub use cross_section::{CrossSection, CrossSectionField};
pub use gradient::{gradient, gradient_2d};
pub use radial::{RadialProfile, solve_radial};
