use twine_solvers::equation::bisection;

/// Solver configuration for finding the conductance that meets a target outlet.
///
/// The search runs over `ln(NTU1)`, so `ntu_tol` is effectively a relative
/// tolerance on NTU1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PntuConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on `ln(NTU1)`.
    pub ntu_tol: f64,

    /// Absolute tolerance on the effectiveness residual (achieved − target).
    pub effectiveness_tol: f64,
}

impl Default for PntuConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            ntu_tol: 1e-12,
            effectiveness_tol: 1e-12,
        }
    }
}

impl PntuConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.ntu_tol,
            x_rel_tol: 0.0,
            residual_tol: self.effectiveness_tol,
        }
    }
}
