/// Number of features the regressors were trained on.
pub const FEATURE_COUNT: usize = 11;

/// Feature names in the order the regressors expect them.
///
/// The order is part of the artifact contract; a reordered vector still
/// evaluates but predicts garbage.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "runtime_since_cleaning_hr",
    "deltaT_hot_C",
    "deltaT_cold_C",
    "deltaP_shell_kPa",
    "hot_inlet_temp_C",
    "cold_inlet_temp_C",
    "hot_flow_kg_s",
    "cold_flow_kg_s",
    "hot_visc_cP",
    "cold_visc_cP",
    "solids_ppm",
];

/// One snapshot of exchanger operating data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    /// Hours since the last cleaning.
    pub runtime_since_cleaning: f64,
    /// Hot-side temperature drop, °C.
    pub delta_t_hot: f64,
    /// Cold-side temperature rise, °C.
    pub delta_t_cold: f64,
    /// Shell-side pressure drop, kPa.
    pub delta_p_shell: f64,
    /// °C.
    pub hot_inlet_temperature: f64,
    /// °C.
    pub cold_inlet_temperature: f64,
    /// kg/s.
    pub hot_flow: f64,
    /// kg/s.
    pub cold_flow: f64,
    /// cP.
    pub hot_viscosity: f64,
    /// cP.
    pub cold_viscosity: f64,
    /// Suspended solids, ppm.
    pub solids: f64,
}

impl Default for Telemetry {
    /// A mid-cycle snapshot of a lightly loaded exchanger.
    fn default() -> Self {
        Self {
            runtime_since_cleaning: 500.0,
            delta_t_hot: 20.0,
            delta_t_cold: 15.0,
            delta_p_shell: 30.0,
            hot_inlet_temperature: 120.0,
            cold_inlet_temperature: 25.0,
            hot_flow: 5.0,
            cold_flow: 6.0,
            hot_viscosity: 1.2,
            cold_viscosity: 0.9,
            solids: 50.0,
        }
    }
}

/// Telemetry in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// `(name, value)` pairs in contract order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Lays out a telemetry snapshot in the contract order.
#[must_use]
pub fn build_feature_vector(telemetry: &Telemetry) -> FeatureVector {
    FeatureVector([
        telemetry.runtime_since_cleaning,
        telemetry.delta_t_hot,
        telemetry.delta_t_cold,
        telemetry.delta_p_shell,
        telemetry.hot_inlet_temperature,
        telemetry.cold_inlet_temperature,
        telemetry.hot_flow,
        telemetry.cold_flow,
        telemetry.hot_viscosity,
        telemetry.cold_viscosity,
        telemetry.solids,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_land_in_contract_order() {
        let telemetry = Telemetry {
            runtime_since_cleaning: 1.0,
            delta_t_hot: 2.0,
            delta_t_cold: 3.0,
            delta_p_shell: 4.0,
            hot_inlet_temperature: 5.0,
            cold_inlet_temperature: 6.0,
            hot_flow: 7.0,
            cold_flow: 8.0,
            hot_viscosity: 9.0,
            cold_viscosity: 10.0,
            solids: 11.0,
        };
        let features = build_feature_vector(&telemetry);

        for (position, (_, value)) in features.named().enumerate() {
            assert_eq!(value, (position + 1) as f64);
        }
        let named: Vec<_> = features.named().collect();
        assert_eq!(named[3], ("deltaP_shell_kPa", 4.0));
        assert_eq!(named[10], ("solids_ppm", 11.0));
    }
}
