use std::cmp::Ordering;

use crate::support::{
    constraint::{ConstraintError, ConstraintResult},
    units::TemperatureDifference,
};
use uom::si::f64::ThermodynamicTemperature;

use super::{CapacitanceRate, HeatFlow};

/// Inlet state for a stream entering the exchanger.
///
/// Specific heat is assumed constant through the exchanger.
#[derive(Debug, Clone, Copy)]
pub struct StreamInlet {
    pub(crate) capacitance_rate: CapacitanceRate,
    pub(crate) temperature: ThermodynamicTemperature,
}

impl StreamInlet {
    /// Capture the inlet capacitance rate and temperature.
    #[must_use]
    pub fn new(capacitance_rate: CapacitanceRate, temperature: ThermodynamicTemperature) -> Self {
        Self {
            capacitance_rate,
            temperature,
        }
    }

    /// The stream's capacitance rate.
    #[must_use]
    pub fn capacitance_rate(&self) -> CapacitanceRate {
        self.capacitance_rate
    }

    /// The inlet temperature.
    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    pub(crate) fn with_heat_flow(self, heat_flow: HeatFlow) -> Stream {
        Stream::new_from_heat_flow(self.capacitance_rate, self.temperature, heat_flow)
    }
}

/// A fully-resolved exchanger stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stream {
    /// Capacitance rate of the stream.
    pub capacitance_rate: CapacitanceRate,
    /// Temperature at the exchanger inlet.
    pub inlet_temperature: ThermodynamicTemperature,
    /// Temperature at the exchanger outlet.
    pub outlet_temperature: ThermodynamicTemperature,
    /// Heat gained or lost by the stream.
    pub heat_flow: HeatFlow,
}

impl Stream {
    /// Resolve a stream from a known heat flow: `T_out = T_in + Q/C`.
    #[must_use]
    pub fn new_from_heat_flow(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        heat_flow: HeatFlow,
    ) -> Self {
        Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature: match heat_flow {
                HeatFlow::In(heat_rate) => {
                    inlet_temperature + heat_rate.into_inner() / *capacitance_rate
                }
                HeatFlow::Out(heat_rate) => {
                    inlet_temperature - heat_rate.into_inner() / *capacitance_rate
                }
                HeatFlow::None => inlet_temperature,
            },
            heat_flow,
        }
    }

    /// Resolve a stream from known inlet and outlet temperatures:
    /// `Q = C·(T_out − T_in)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::NotANumber`] if the temperatures cannot be
    /// compared.
    pub fn new_from_outlet_temperature(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        outlet_temperature: ThermodynamicTemperature,
    ) -> ConstraintResult<Self> {
        let heat_rate = *capacitance_rate * outlet_temperature.minus(inlet_temperature).abs();

        let heat_flow = match inlet_temperature.partial_cmp(&outlet_temperature) {
            Some(Ordering::Less) => HeatFlow::incoming(heat_rate)?,
            Some(Ordering::Equal) => HeatFlow::None,
            Some(Ordering::Greater) => HeatFlow::outgoing(heat_rate)?,
            None => return Err(ConstraintError::NotANumber),
        };

        Ok(Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature,
            heat_flow,
        })
    }
}

impl From<Stream> for StreamInlet {
    fn from(stream: Stream) -> Self {
        Self {
            capacitance_rate: stream.capacitance_rate,
            temperature: stream.inlet_temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        f64::Power, power::watt, thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use super::*;

    #[test]
    fn heat_flow_sets_outlet() -> ConstraintResult<()> {
        let inlet = StreamInlet::new(
            CapacitanceRate::new::<watt_per_kelvin>(10.)?,
            ThermodynamicTemperature::new::<kelvin>(300.),
        );
        let heat_rate = Power::new::<watt>(20.);

        let heated = inlet.with_heat_flow(HeatFlow::incoming(heat_rate)?);
        let cooled = inlet.with_heat_flow(HeatFlow::outgoing(heat_rate)?);
        let idle = inlet.with_heat_flow(HeatFlow::None);

        assert_relative_eq!(heated.outlet_temperature.get::<kelvin>(), 302.);
        assert_relative_eq!(cooled.outlet_temperature.get::<kelvin>(), 298.);
        assert_eq!(idle.outlet_temperature, idle.inlet_temperature);
        Ok(())
    }

    #[test]
    fn outlet_temperature_sets_heat_flow() -> ConstraintResult<()> {
        let stream = Stream::new_from_outlet_temperature(
            CapacitanceRate::new::<watt_per_kelvin>(10.)?,
            ThermodynamicTemperature::new::<kelvin>(350.),
            ThermodynamicTemperature::new::<kelvin>(340.),
        )?;

        assert!(matches!(stream.heat_flow, HeatFlow::Out(_)));
        assert_relative_eq!(stream.heat_flow.signed().get::<watt>(), -100.);
        Ok(())
    }

    #[test]
    fn nan_outlet_is_rejected() -> ConstraintResult<()> {
        let result = Stream::new_from_outlet_temperature(
            CapacitanceRate::new::<watt_per_kelvin>(10.)?,
            ThermodynamicTemperature::new::<kelvin>(350.),
            ThermodynamicTemperature::new::<kelvin>(f64::NAN),
        );
        assert!(result.is_err());
        Ok(())
    }
}
