//! # Shell-and-tube rating
//!
//! Thermal rating, wall conduction, and fouling prognostics for
//! shell-and-tube heat exchangers.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations for the rating pipeline
//!   and the fouling predictor.
//! - [`support`]: Calculation toolkits used by the models (unit contract,
//!   bundle geometry, film coefficients, effectiveness-NTU, conduction).
//! - [`error`]: The crate-wide [`Error`] taxonomy.
//!
//! All internal calculations run in SI units through [`uom`]. Imperial and
//! engineering units are converted once, at the boundary, by
//! [`support::units::imperial`].
//!
//! Solvers emit [`tracing`] events but never install a subscriber, so the
//! crate stays silent unless the caller opts in.

pub mod error;
pub mod models;
pub mod support;

pub use error::{Error, Result};
