//! Thermal models.
//!
//! This module contains the shell-and-tube rating model, which chains film
//! coefficients, the resistance network, the energy balance, and the wall
//! conduction solves.

pub mod shell_tube;
