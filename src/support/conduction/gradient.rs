//! Finite-difference gradients on uneven grids.

use crate::error::{DomainError, MeshError, Result};

/// Derivative of sampled `values` with respect to `coords`.
///
/// Interior points use the second-order central difference for unevenly
/// spaced samples; the two end points use first-order one-sided differences.
///
/// # Errors
///
/// Fails if fewer than two samples are given, if the slices differ in length,
/// or if `coords` is not strictly increasing.
pub fn gradient(values: &[f64], coords: &[f64]) -> Result<Vec<f64>> {
    if values.len() != coords.len() {
        return Err(MeshError::LengthMismatch {
            values: values.len(),
            coords: coords.len(),
        }
        .into());
    }
    let n = values.len();
    if n < 2 {
        return Err(MeshError::TooFewCells { cells: n, min: 2 }.into());
    }
    if coords.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(DomainError::OrderViolation {
            smaller: "each coordinate",
            larger: "the next coordinate",
        }
        .into());
    }

    let mut slope = Vec::with_capacity(n);
    slope.push((values[1] - values[0]) / (coords[1] - coords[0]));
    for i in 1..n - 1 {
        let hs = coords[i] - coords[i - 1];
        let hd = coords[i + 1] - coords[i];
        slope.push(
            (hs * hs * values[i + 1] + (hd * hd - hs * hs) * values[i] - hd * hd * values[i - 1])
                / (hs * hd * (hd + hs)),
        );
    }
    slope.push((values[n - 1] - values[n - 2]) / (coords[n - 1] - coords[n - 2]));
    Ok(slope)
}

/// Partial derivatives of a row-major `ny × nx` field on a uniform grid.
///
/// Returns `(∂f/∂y, ∂f/∂x)`, each in the same layout as `field`.
///
/// # Errors
///
/// Fails if either grid dimension is below two, if `field` does not hold
/// `nx·ny` values, or if a spacing is not strictly positive.
pub fn gradient_2d(
    field: &[f64],
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if field.len() != nx * ny {
        return Err(MeshError::LengthMismatch {
            values: field.len(),
            coords: nx * ny,
        }
        .into());
    }
    if nx.min(ny) < 2 {
        return Err(MeshError::TooFewCells {
            cells: nx.min(ny),
            min: 2,
        }
        .into());
    }
    DomainError::require_positive("grid spacing dx", dx)?;
    DomainError::require_positive("grid spacing dy", dy)?;

    let difference = |ahead: f64, behind: f64, steps: usize, h: f64| {
        (ahead - behind) / (steps as f64 * h)
    };
    let along = |index: usize, len: usize| match index {
        0 => (1, 0, 1),
        i if i == len - 1 => (i, i - 1, 1),
        i => (i + 1, i - 1, 2),
    };

    let mut d_dx = vec![0.0; field.len()];
    let mut d_dy = vec![0.0; field.len()];
    for row in 0..ny {
        for col in 0..nx {
            let (ahead, behind, steps) = along(col, nx);
            d_dx[row * nx + col] =
                difference(field[row * nx + ahead], field[row * nx + behind], steps, dx);

            let (ahead, behind, steps) = along(row, ny);
            d_dy[row * nx + col] =
                difference(field[ahead * nx + col], field[behind * nx + col], steps, dy);
        }
    }
    Ok((d_dy, d_dx))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::Error;

    #[test]
    fn exact_for_quadratics_in_the_interior() -> Result<()> {
        let coords = [0.0, 0.1, 0.25, 0.3, 0.7, 1.0];
        let values: Vec<f64> = coords.iter().map(|x| 3.0 * x * x - x + 2.0).collect();
        let slope = gradient(&values, &coords)?;

        for i in 1..coords.len() - 1 {
            assert_relative_eq!(slope[i], 6.0 * coords[i] - 1.0, epsilon = 1e-12);
        }
        // One-sided ends are exact for the chord, not the tangent.
        assert_relative_eq!(slope[0], (values[1] - values[0]) / 0.1, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn rejects_bad_samples() {
        assert!(matches!(
            gradient(&[1.0], &[0.0]),
            Err(Error::IllPosedMesh(MeshError::TooFewCells { cells: 1, min: 2 }))
        ));
        assert!(matches!(
            gradient(&[1.0, 2.0], &[0.0, 1.0, 2.0]),
            Err(Error::IllPosedMesh(MeshError::LengthMismatch { .. }))
        ));
        assert!(matches!(
            gradient(&[1.0, 2.0, 3.0], &[0.0, 1.0, 1.0]),
            Err(Error::Domain(DomainError::OrderViolation { .. }))
        ));
    }

    #[test]
    fn plane_field_has_constant_partials() -> Result<()> {
        let (nx, ny, dx, dy) = (5, 4, 0.5, 0.25);
        let field: Vec<f64> = (0..ny)
            .flat_map(|row| (0..nx).map(move |col| 2.0 * col as f64 * dx - 3.0 * row as f64 * dy))
            .collect();

        let (d_dy, d_dx) = gradient_2d(&field, nx, ny, dx, dy)?;
        for (gy, gx) in d_dy.iter().zip(&d_dx) {
            assert_relative_eq!(*gx, 2.0, epsilon = 1e-12);
            assert_relative_eq!(*gy, -3.0, epsilon = 1e-12);
        }
        Ok(())
    }
}
