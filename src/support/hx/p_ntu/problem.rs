//! Problem formulation for the conductance search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use crate::{
    error::{Error, Result},
    support::hx::{CapacitanceRate, StreamInlet, TemperatureEffectiveness},
};

use super::{PNtuResult, known_conductance_and_inlets};

/// Model adapter that rates the exchanger at a trial `NTU1`.
pub(super) struct ConductanceModel<'a, A> {
    arrangement: &'a A,
    inlets: [StreamInlet; 2],
}

impl<'a, A> ConductanceModel<'a, A> {
    pub(super) fn new(arrangement: &'a A, inlets: [StreamInlet; 2]) -> Self {
        Self {
            arrangement,
            inlets,
        }
    }

    fn stream_one(&self) -> CapacitanceRate {
        self.inlets[0].capacitance_rate()
    }
}

impl<A: TemperatureEffectiveness> Model for ConductanceModel<'_, A> {
    type Input = f64;
    type Output = PNtuResult;
    type Error = Error;

    fn call(&self, ntu1: &Self::Input) -> Result<Self::Output, Self::Error> {
        let ua = *self.stream_one() * *ntu1;
        known_conductance_and_inlets(self.arrangement, ua, self.inlets)
    }
}

/// Equation problem over `x = ln(NTU1)`.
///
/// Computes the residual as `achieved_effectiveness - target_effectiveness`.
pub(super) struct TargetEffectivenessProblem {
    target: f64,
}

impl TargetEffectivenessProblem {
    pub(super) fn new(target: f64) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for TargetEffectivenessProblem {
    type Input = f64;
    type Output = PNtuResult;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0].exp())
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.effectiveness.value() - self.target])
    }
}
