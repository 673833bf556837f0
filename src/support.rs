//! Supporting utilities used by models.
//!
//! Modules here are part of the public API because they're useful on their
//! own, but their APIs are not stable.

pub mod conduction;
pub mod constraint;
pub mod hx;
pub mod shell_tube;
pub mod units;
