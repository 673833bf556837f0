//! Shell-and-tube rating toolkit.
//!
//! The rating chain runs leaf-first:
//!
//! 1. [`resolve_geometry`]: bundle diameter by several estimation methods,
//!    shell clearance, baffle holes, and maximum unsupported span.
//! 2. [`compute_film_coefficients`]: tube-side Dittus-Boelter and shell-side
//!    Kern film coefficients.
//! 3. [`compute_overall_coefficient`]: the series resistance stack and `U`.
//! 4. [`solve_energy_balance`]: hot-side duty and cold outlet temperature.
//!
//! Every function takes SI quantities; imperial inputs are converted once by
//! [`units::imperial`](crate::support::units::imperial).

mod bundle;
mod energy_balance;
mod film;
mod layout;
mod resistance;
mod resolve;
pub mod tema;

pub use bundle::{BundleMethod, BundlePasses, bundle_diameter, tube_count};
pub use energy_balance::{EnergyBalance, solve_energy_balance};
pub use film::{
    FilmCoefficients, FilmResult, compute_film_coefficients, shell_side_film, tube_side_film,
};
pub use layout::{
    FluidProperties, FluidStream, FoulingSpec, LayoutAngle, ShellGeometry, TubeGeometry,
    TubeMaterial,
};
pub use resistance::{ResistanceStack, compute_overall_coefficient};
pub use resolve::{GeometryRequest, GeometryResult, resolve_geometry};
