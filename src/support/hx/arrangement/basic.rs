//! Closed forms for the basic single-pass arrangements.

use crate::error::{DomainError, Result};

use super::BasicFlow;

/// Above this `NTU1·(1 + R1)` the crossflow series needs too many terms.
const CROSSFLOW_SERIES_LIMIT: f64 = 5e5;

/// Relative size at which a crossflow series term no longer matters.
const CROSSFLOW_SERIES_TOL: f64 = 1e-17;

pub(super) fn effectiveness(flow: BasicFlow, r: f64, n: f64) -> Result<f64> {
    Ok(match flow {
        BasicFlow::Counterflow => counterflow(r, n),
        BasicFlow::Parallel => parallel(r, n),
        BasicFlow::Crossflow => crossflow_unmixed(r, n)?,
        BasicFlow::CrossflowMixed1 => {
            let k = -(-r * n).exp_m1();
            -(-k / r).exp_m1()
        }
        BasicFlow::CrossflowMixed2 => {
            let k = -(-n).exp_m1();
            -(-r * k).exp_m1() / r
        }
        BasicFlow::CrossflowMixedBoth => {
            let k1 = -(-n).exp_m1();
            let k2 = -(-r * n).exp_m1();
            1.0 / (1.0 / k1 + r / k2 - 1.0 / n)
        }
    })
}

/// `P1 = (1 − e^−x) / (1 − R1·e^−x)` with `x = NTU1·(1 − R1)`.
pub(super) fn counterflow(r: f64, n: f64) -> f64 {
    if (1.0 - r).abs() < 1e-9 {
        return n / (1.0 + n);
    }
    let x = n * (1.0 - r);
    if x >= 0.0 {
        let e = (-x).exp();
        (1.0 - e) / (1.0 - r * e)
    } else {
        let f = x.exp();
        (f - 1.0) / (f - r)
    }
}

pub(super) fn parallel(r: f64, n: f64) -> f64 {
    -(-n * (1.0 + r)).exp_m1() / (1.0 + r)
}

/// Both streams unmixed, from the exact double series
///
/// ```text
/// P1 = 1/(R1·NTU1) · Σₙ (1 − Σₖ≤ₙ pₖ(NTU1)) · (1 − Σₖ≤ₙ pₖ(R1·NTU1))
/// ```
///
/// where `pₖ(a) = aᵏ e^−a / k!`. The Poisson weights are accumulated in log
/// space and the tails start from `expm1` so small NTU keeps full precision.
fn crossflow_unmixed(r: f64, n: f64) -> Result<f64> {
    let a = n;
    let b = r * n;
    DomainError::require_in_range("NTU1·(1 + R1)", a + b, 0.0, CROSSFLOW_SERIES_LIMIT)?;

    let (ln_a, ln_b) = (a.ln(), b.ln());
    let (mut log_pa, mut log_pb) = (-a, -b);
    let (mut tail_a, mut tail_b) = (-(-a).exp_m1(), -(-b).exp_m1());
    let peak = a.max(b);

    let mut total = 0.0;
    let mut k = 0_u32;
    loop {
        let term = tail_a.max(0.0) * tail_b.max(0.0);
        total += term;
        if f64::from(k) > peak && term <= CROSSFLOW_SERIES_TOL * total {
            break;
        }

        let next = f64::from(k + 1);
        log_pa += ln_a - next.ln();
        log_pb += ln_b - next.ln();
        tail_a -= log_pa.exp();
        tail_b -= log_pb.exp();
        k += 1;
    }

    tracing::trace!(terms = k + 1, "crossflow series");
    Ok(total / b)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn counterflow_balanced_limit() {
        assert_relative_eq!(counterflow(1.0, 3.0), 0.75);
        assert_relative_eq!(counterflow(1.0 + 1e-12, 3.0), 0.75, max_relative = 1e-9);
    }

    #[test]
    fn counterflow_stays_finite_when_stream_one_is_larger() {
        // R1 > 1 and large NTU: P1 tends to 1/R1.
        assert_relative_eq!(counterflow(2.0, 2000.0), 0.5, max_relative = 1e-12);
        assert_relative_eq!(counterflow(0.5, 2000.0), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn counterflow_is_symmetric_between_streams() {
        // P1 = R2·P2, swapping roles exchanges R1 ↔ 1/R1 and NTU1 ↔ NTU1·R1.
        let (r, n) = (0.4, 2.5);
        assert_relative_eq!(
            counterflow(r, n),
            counterflow(1.0 / r, n * r) / r,
            max_relative = 1e-12
        );
    }

    #[test]
    fn parallel_saturates_at_mixed_temperature() {
        assert_relative_eq!(parallel(1.0, 50.0), 0.5, max_relative = 1e-12);
        assert_relative_eq!(parallel(0.5, 1.0), (1.0 - (-1.5_f64).exp()) / 1.5);
    }

    #[test]
    fn crossflow_unmixed_reference_values() -> Result<()> {
        assert_relative_eq!(crossflow_unmixed(0.5, 1.0)?, 0.547_49, max_relative = 1e-4);
        assert_relative_eq!(crossflow_unmixed(1.0, 1000.0)?, 0.982_16, max_relative = 1e-4);
        Ok(())
    }

    #[test]
    fn crossflow_unmixed_small_ntu_matches_first_order() -> Result<()> {
        // P1 → NTU1 as NTU1 → 0.
        let n = 1e-6;
        assert_relative_eq!(crossflow_unmixed(1e-3, n)?, n, max_relative = 1e-5);
        Ok(())
    }

    #[test]
    fn crossflow_unmixed_is_symmetric_between_streams() -> Result<()> {
        let (r, n) = (0.3, 4.0);
        assert_relative_eq!(
            crossflow_unmixed(r, n)?,
            crossflow_unmixed(1.0 / r, n * r)? / r,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn crossflow_unmixed_rejects_runaway_series() {
        assert!(crossflow_unmixed(1.0, 1e6).is_err());
    }

    #[test]
    fn mixed_forms_bracket_unmixed() -> Result<()> {
        let (r, n) = (0.8, 2.0);
        let unmixed = crossflow_unmixed(r, n)?;
        let one = effectiveness(BasicFlow::CrossflowMixed1, r, n)?;
        let two = effectiveness(BasicFlow::CrossflowMixed2, r, n)?;
        let both = effectiveness(BasicFlow::CrossflowMixedBoth, r, n)?;

        assert!(both < one.min(two));
        assert!(one.max(two) < unmixed);
        Ok(())
    }

    #[test]
    fn mixing_roles_swap_with_streams() -> Result<()> {
        let (r, n) = (0.6, 1.7);
        assert_relative_eq!(
            effectiveness(BasicFlow::CrossflowMixed1, r, n)?,
            effectiveness(BasicFlow::CrossflowMixed2, 1.0 / r, n * r)? / r,
            max_relative = 1e-12
        );
        Ok(())
    }
}
