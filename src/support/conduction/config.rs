/// Iteration limits for the cross-section solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductionConfig {
    /// Maximum conjugate-gradient iterations.
    pub max_iters: usize,

    /// Residual norm relative to the boundary forcing at which the solve stops.
    pub tolerance: f64,
}

impl Default for ConductionConfig {
    fn default() -> Self {
        Self {
            max_iters: 20_000,
            tolerance: 1e-10,
        }
    }
}
