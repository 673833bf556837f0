//! Exact tube counts on the layout lattice.
//!
//! The lattice is centred on the bundle axis. Pass partitions are lines
//! through the centre, one for two passes, two at right angles for four and
//! three at 60° for six; tubes whose centres lie within half a pitch of a
//! partition line are removed.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_3, FRAC_PI_2};

use crate::support::shell_tube::LayoutAngle;

use super::BundlePasses;

fn partition_angles(passes: BundlePasses) -> &'static [f64] {
    match passes {
        BundlePasses::One => &[],
        BundlePasses::Two => &[0.0],
        BundlePasses::Four => &[0.0, FRAC_PI_2],
        BundlePasses::Six => &[0.0, FRAC_PI_3, 2.0 * FRAC_PI_3],
    }
}

/// Distances from the axis of every admissible tube centre within `radius`.
fn site_distances(radius: f64, pitch: f64, passes: BundlePasses, layout: LayoutAngle) -> Vec<f64> {
    let lanes = partition_angles(passes);
    let admissible = |(x, y): (f64, f64)| {
        lanes
            .iter()
            .all(|angle| (y * angle.cos() - x * angle.sin()).abs() >= pitch / 2.0)
    };

    let mut sites = Vec::new();
    let mut visit = |x: f64, y: f64| {
        let r = x.hypot(y);
        if r <= radius && admissible((x, y)) {
            sites.push(r);
        }
    };

    match layout {
        LayoutAngle::Triangular30 | LayoutAngle::RotatedTriangular60 => {
            let row_pitch = pitch * 3.0_f64.sqrt() / 2.0;
            let rows = (radius / row_pitch).ceil() as i64 + 1;
            let cols = (radius / pitch).ceil() as i64 + 1;
            for j in -rows..=rows {
                let offset = if j.rem_euclid(2) == 1 { pitch / 2.0 } else { 0.0 };
                for i in -cols..=cols {
                    let (x, y) = (i as f64 * pitch + offset, j as f64 * row_pitch);
                    if layout == LayoutAngle::Triangular30 {
                        visit(x, y);
                    } else {
                        visit(y, x);
                    }
                }
            }
        }
        LayoutAngle::Square90 => {
            let n = (radius / pitch).ceil() as i64 + 1;
            for j in -n..=n {
                for i in -n..=n {
                    visit(i as f64 * pitch, j as f64 * pitch);
                }
            }
        }
        LayoutAngle::RotatedSquare45 => {
            let step = pitch * FRAC_1_SQRT_2;
            let n = (radius / step).ceil() as i64 + 1;
            for j in -n..=n {
                for i in -n..=n {
                    if (i + j).rem_euclid(2) == 0 {
                        visit(i as f64 * step, j as f64 * step);
                    }
                }
            }
        }
    }
    sites
}

/// Number of tube centres within `radius` of the axis.
pub(super) fn count(radius: f64, pitch: f64, passes: BundlePasses, layout: LayoutAngle) -> u32 {
    let radius = radius + 1e-9 * pitch;
    u32::try_from(site_distances(radius, pitch, passes, layout).len()).unwrap_or(u32::MAX)
}

/// Smallest tube-limit radius enclosing `tubes` tube centres.
pub(super) fn limit_radius(
    tubes: u32,
    pitch: f64,
    passes: BundlePasses,
    layout: LayoutAngle,
) -> f64 {
    let needed = tubes as usize;
    let mut radius = pitch * (f64::from(tubes).sqrt() + 2.0);
    loop {
        let mut distances = site_distances(radius, pitch, passes, layout);
        if distances.len() >= needed {
            distances.sort_by(f64::total_cmp);
            return distances[needed - 1];
        }
        radius *= 1.5;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn first_shells_of_each_lattice() {
        let p = 0.025;
        let tri = LayoutAngle::Triangular30;
        assert_relative_eq!(limit_radius(1, p, BundlePasses::One, tri), 0.0);
        // A hexagon around the centre tube.
        assert_relative_eq!(limit_radius(7, p, BundlePasses::One, tri), p, max_relative = 1e-12);
        assert_eq!(count(p, p, BundlePasses::One, tri), 7);
        // The pass lane removes the centre row.
        assert_relative_eq!(limit_radius(4, p, BundlePasses::Two, tri), p, max_relative = 1e-12);

        let square = LayoutAngle::Square90;
        assert_relative_eq!(limit_radius(5, p, BundlePasses::One, square), p, max_relative = 1e-12);
        assert_relative_eq!(
            limit_radius(9, p, BundlePasses::One, square),
            p * 2.0_f64.sqrt(),
            max_relative = 1e-12
        );
        // Rotating the square lattice does not change its shells.
        assert_relative_eq!(
            limit_radius(9, p, BundlePasses::One, LayoutAngle::RotatedSquare45),
            p * 2.0_f64.sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn more_passes_need_a_larger_bundle() {
        let p = 0.03125;
        let tri = LayoutAngle::Triangular30;
        let radii: Vec<f64> = [
            BundlePasses::One,
            BundlePasses::Two,
            BundlePasses::Four,
            BundlePasses::Six,
        ]
        .into_iter()
            .map(|passes| limit_radius(500, p, passes, tri))
            .collect();
        assert!(radii.windows(2).all(|pair| pair[0] <= pair[1]), "{radii:?}");
    }
}
