//! Steady-state rating of a shell-and-tube exchanger.
//!
//! [`ShellTubeRating`] takes the operator's imperial form values and returns
//! the film coefficients, overall coefficient, duty, cold outlet, and wall
//! temperature fields. The computational core is in the internal `core`
//! module.
//!
//! ```
//! use shell_tube_rating::models::thermal::shell_tube::{
//!     MeshConfig, RatingInput, ShellTubeRating,
//! };
//! use twine_core::Model;
//!
//! fn main() -> shell_tube_rating::Result<()> {
//!     let input = RatingInput {
//!         mesh: MeshConfig {
//!             radial_cells: 20,
//!             cross_section: None,
//!         },
//!         ..RatingInput::default()
//!     };
//!     let report = ShellTubeRating::default().call(&input)?;
//!
//!     assert!(report.duty_btu_per_hour > 600_000.0);
//!     assert!(report.cold_outlet_fahrenheit > -9.67);
//!     Ok(())
//! }
//! ```

mod core;

pub use self::core::{MeshConfig, RatingInput, RatingReport, StreamInput, TubeInput};

use twine_core::Model;

use crate::{error::Error, support::conduction::ConductionConfig};

/// The rating pipeline as a [`Model`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShellTubeRating {
    /// Limits for the cross-section solve.
    pub conduction: ConductionConfig,
}

impl Model for ShellTubeRating {
    type Input = RatingInput;
    type Output = RatingReport;
    type Error = Error;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::rate(input, self.conduction)
    }
}
