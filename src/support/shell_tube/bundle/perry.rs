//! Perry's tube-count fit.
//!
//! `N = a0 + a1·C + a2·C² + a3·C³ + a4·C⁴`, with `C = 0.75·D/D_o − 36` for
//! triangular layouts and `C = D/D_o − 36` for square layouts.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use crate::{
    error::{DomainError, Error, Result},
    support::shell_tube::LayoutAngle,
};

use super::BundlePasses;

const TRIANGULAR: [[f64; 5]; 4] = [
    [1298.0, 74.86, 1.283, -0.0078, -0.0006],
    [1266.0, 73.58, 1.234, -0.0071, -0.0005],
    [1196.0, 70.79, 1.180, -0.0059, -0.0004],
    [1166.0, 70.36, 1.269, -0.0074, -0.0006],
];

const SQUARE: [[f64; 5]; 4] = [
    [593.6, 33.52, 0.3782, -0.0012, 0.0001],
    [578.8, 33.36, 0.3847, -0.0013, 0.0001],
    [562.0, 33.04, 0.3661, -0.0016, 0.0002],
    [550.4, 32.49, 0.3873, -0.0013, 0.0001],
];

/// The fit for one layout family and pass count.
#[derive(Debug, Clone, Copy)]
struct Fit {
    coefficients: [f64; 5],
    /// Converts `D/D_o` to `C`.
    scale: f64,
    /// Monotone range of `C`.
    range: [f64; 2],
}

impl Fit {
    fn new(passes: BundlePasses, layout: LayoutAngle) -> Self {
        let row = match passes {
            BundlePasses::One => 0,
            BundlePasses::Two => 1,
            BundlePasses::Four => 2,
            BundlePasses::Six => 3,
        };
        if layout.is_triangular() {
            Self {
                coefficients: TRIANGULAR[row],
                scale: 0.75,
                range: [-36.0, 36.0],
            }
        } else {
            // Below C = −24 the square fits turn back on themselves.
            Self {
                coefficients: SQUARE[row],
                scale: 1.0,
                range: [-24.0, 36.0],
            }
        }
    }

    fn tubes(&self, c: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, a| acc * c + a)
    }
}

/// A point on the fit.
#[derive(Debug, Clone, Copy)]
struct FitPoint {
    c: f64,
    tubes: f64,
}

impl Model for Fit {
    type Input = f64;
    type Output = FitPoint;
    type Error = Error;

    fn call(&self, c: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(FitPoint {
            c: *c,
            tubes: self.tubes(*c),
        })
    }
}

struct TubeCountProblem {
    target: f64,
}

impl EquationProblem<1> for TubeCountProblem {
    type Input = f64;
    type Output = FitPoint;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.tubes - self.target])
    }
}

fn solver_config() -> bisection::Config {
    bisection::Config {
        max_iters: 200,
        x_abs_tol: 1e-13,
        x_rel_tol: 0.0,
        residual_tol: 1e-10,
    }
}

/// Tubes predicted for a bundle of diameter `d`.
pub(super) fn count(d: f64, d_o: f64, passes: BundlePasses, layout: LayoutAngle) -> Result<f64> {
    let fit = Fit::new(passes, layout);
    let c = fit.scale * d / d_o - 36.0;
    let [min, max] = fit.range;
    DomainError::require_in_range("Perry bundle parameter", c, min, max)?;
    Ok(fit.tubes(c))
}

/// Bundle diameter for `tubes` tubes.
pub(super) fn diameter(
    tubes: f64,
    d_o: f64,
    passes: BundlePasses,
    layout: LayoutAngle,
) -> Result<f64> {
    let fit = Fit::new(passes, layout);
    let [low, high] = fit.range;
    let (min, max) = (fit.tubes(low), fit.tubes(high));
    DomainError::require_in_range("tube count for Perry's fit", tubes, min.max(1.0), max)?;

    let solution = bisection::solve(
        &fit,
        &TubeCountProblem { target: tubes },
        [low, high],
        &solver_config(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(Error::NotConverged {
            solver: "Perry bundle diameter",
            iters: solution.iters,
            residual: solution.residual,
        });
    }

    let c = solution.snapshot.output.c;
    Ok((c + 36.0) * d_o / fit.scale)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn diameter_and_count_agree() -> Result<()> {
        let all = [
            BundlePasses::One,
            BundlePasses::Two,
            BundlePasses::Four,
            BundlePasses::Six,
        ];
        for passes in all {
            for layout in [LayoutAngle::Triangular30, LayoutAngle::Square90] {
                let d = diameter(500.0, 0.019_05, passes, layout)?;
                let n = count(d, 0.019_05, passes, layout)?;
                assert_relative_eq!(n, 500.0, max_relative = 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn fit_is_bounded() {
        let too_many = diameter(10_000.0, 0.025, BundlePasses::One, LayoutAngle::Triangular30);
        assert!(matches!(too_many, Err(Error::Domain(DomainError::OutOfRange { .. }))));
        let too_large = count(10.0, 0.025, BundlePasses::One, LayoutAngle::Triangular30);
        assert!(matches!(too_large, Err(Error::Domain(DomainError::OutOfRange { .. }))));
    }
}
