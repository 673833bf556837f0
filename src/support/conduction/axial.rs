//! Stream temperatures along the tube length.

use uom::si::{
    f64::{Length, TemperatureInterval, ThermodynamicTemperature},
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    error::{DomainError, Result},
    support::units::TemperatureDifference,
};

use super::gradient;

/// Default number of stations along the tube.
pub const AXIAL_POINTS: usize = 30;

/// Linear hot and cold temperature profiles from inlet to outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialProfile {
    /// Stations from `0` to the tube length.
    pub positions: Vec<Length>,
    pub hot: Vec<ThermodynamicTemperature>,
    pub cold: Vec<ThermodynamicTemperature>,
    /// `dT_hot/dz` in K/m.
    pub hot_gradient: Vec<f64>,
    /// `dT_cold/dz` in K/m.
    pub cold_gradient: Vec<f64>,
    /// `T_hot − T_cold` at each station.
    pub local_difference: Vec<TemperatureInterval>,
}

/// Interpolates both streams linearly between `[inlet, outlet]` over `points`
/// evenly spaced stations.
///
/// # Errors
///
/// Fails if `length` is not positive, a temperature is not finite, or fewer
/// than two stations are requested.
pub fn axial_profile(
    length: Length,
    hot: [ThermodynamicTemperature; 2],
    cold: [ThermodynamicTemperature; 2],
    points: usize,
) -> Result<AxialProfile> {
    let length = DomainError::require_positive("tube length", length.get::<meter>())?;
    for t in hot.iter().chain(&cold) {
        DomainError::require_finite("stream temperature", t.get::<degree_celsius>())?;
    }

    let z: Vec<f64> = (0..points)
        .map(|i| length * i as f64 / (points.max(2) - 1) as f64)
        .collect();
    let along = |[inlet, outlet]: [ThermodynamicTemperature; 2]| -> Vec<f64> {
        let (t_in, t_out) = (inlet.get::<degree_celsius>(), outlet.get::<degree_celsius>());
        z.iter().map(|z| t_in + (t_out - t_in) * z / length).collect()
    };
    let (hot, cold) = (along(hot), along(cold));
    let hot_gradient = gradient(&hot, &z)?;
    let cold_gradient = gradient(&cold, &z)?;

    let celsius = |values: Vec<f64>| -> Vec<ThermodynamicTemperature> {
        values
            .into_iter()
            .map(ThermodynamicTemperature::new::<degree_celsius>)
            .collect()
    };
    let (hot, cold) = (celsius(hot), celsius(cold));
    let local_difference = hot.iter().zip(&cold).map(|(h, c)| h.minus(*c)).collect();

    Ok(AxialProfile {
        positions: z.into_iter().map(Length::new::<meter>).collect(),
        hot,
        cold,
        hot_gradient,
        cold_gradient,
        local_difference,
    })
}

impl AxialProfile {
    /// Largest hot-to-cold difference along the tube.
    #[must_use]
    pub fn max_difference(&self) -> Option<TemperatureInterval> {
        self.local_difference
            .iter()
            .copied()
            .max_by(|a, b| a.get::<delta_kelvin>().total_cmp(&b.get::<delta_kelvin>()))
    }
}
