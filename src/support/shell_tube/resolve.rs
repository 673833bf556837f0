//! Bundle geometry from a tube count or a bundle diameter.

use std::collections::BTreeMap;

use tracing::debug;
use uom::si::{f64::Length, length::meter};

use crate::error::{ConfigurationError, DomainError, Result};

use super::{
    BundleMethod, BundlePasses, LayoutAngle, TubeMaterial, bundle_diameter, tema, tube_count,
};

/// Tube layout and bundle target for [`resolve_geometry`].
///
/// Exactly one of `tube_count` and `bundle_diameter` must be set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryRequest {
    pub tube_count: Option<u32>,
    pub bundle_diameter: Option<Length>,
    pub outer_diameter: Length,
    pub pitch: Length,
    pub passes: u16,
    pub layout: LayoutAngle,
    pub unsupported_length: Length,
    pub material: TubeMaterial,
}

impl Default for GeometryRequest {
    /// A 928-tube, two-pass, triangular carbon steel bundle of 25 mm tubes.
    fn default() -> Self {
        Self {
            tube_count: Some(928),
            bundle_diameter: None,
            outer_diameter: Length::new::<meter>(0.025),
            pitch: Length::new::<meter>(0.031_25),
            passes: 2,
            layout: LayoutAngle::Triangular30,
            unsupported_length: Length::new::<meter>(0.75),
            material: TubeMaterial::CarbonSteel,
        }
    }
}

/// Bundle sizes and TEMA mechanical limits for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryResult {
    /// Bundle diameter for [`GeometryResult::tube_count`] by every method that
    /// covers it.
    pub bundle_diameter_by_method: BTreeMap<BundleMethod, Length>,
    pub tube_count: u32,
    /// Tubes Perry's fit places in the HEDH bundle, if within its range.
    pub tube_count_estimate: Option<u32>,
    pub min_bundle_diameter: Length,
    /// Diametral shell clearance for the HEDH bundle.
    pub shell_clearance: Length,
    pub baffle_hole_diameter: Length,
    pub max_unsupported_length: Length,
}

impl GeometryResult {
    /// The bundle diameter reported by `method`, if it covers this layout.
    #[must_use]
    pub fn bundle_diameter(&self, method: BundleMethod) -> Option<Length> {
        self.bundle_diameter_by_method.get(&method).copied()
    }
}

/// Sizes the bundle by every method and looks up the TEMA limits.
///
/// A bundle-diameter target is first turned into a tube count with Perry's
/// fit, and every method then sizes that count. Methods whose range does not
/// cover the layout are left out of the map.
///
/// # Errors
///
/// Returns [`ConfigurationError`] unless exactly one bundle target is given or
/// for an unsupported pass count, and [`DomainError`] for a pitch not larger
/// than the tube or an unsupported length outside 0.1 m to 10 m.
pub fn resolve_geometry(request: &GeometryRequest) -> Result<GeometryResult> {
    let passes = BundlePasses::try_from(request.passes)?;
    let d_o = DomainError::require_positive(
        "tube outer diameter",
        request.outer_diameter.get::<meter>(),
    )?;
    let p = DomainError::require_positive("tube pitch", request.pitch.get::<meter>())?;
    if p <= d_o {
        return Err(DomainError::OrderViolation {
            smaller: "tube outer diameter",
            larger: "tube pitch",
        }
        .into());
    }
    DomainError::require_in_range(
        "unsupported tube length (m)",
        request.unsupported_length.get::<meter>(),
        0.1,
        10.0,
    )?;

    let GeometryRequest {
        outer_diameter,
        pitch,
        layout,
        ..
    } = *request;
    let size =
        |method, tubes| bundle_diameter(method, tubes, outer_diameter, pitch, passes, layout);
    let count =
        |method, diameter| tube_count(method, diameter, outer_diameter, pitch, passes, layout);

    let tubes = match (request.tube_count, request.bundle_diameter) {
        (Some(0), None) => {
            return Err(DomainError::NonPositive {
                quantity: "tube count",
                value: 0.0,
            }
            .into());
        }
        (Some(tubes), None) => tubes,
        (None, Some(diameter)) => count(BundleMethod::Perry, diameter)?,
        (None, None) => {
            return Err(ConfigurationError::MissingBasis {
                quantity: "bundle size",
                options: "tube count or bundle diameter",
            }
            .into());
        }
        (Some(_), Some(_)) => {
            return Err(ConfigurationError::AmbiguousBasis {
                quantity: "bundle size",
                options: "tube count or bundle diameter",
            }
            .into());
        }
    };

    let mut bundle_diameter_by_method = BTreeMap::new();
    for method in BundleMethod::ALL {
        match size(method, tubes) {
            Ok(diameter) => {
                bundle_diameter_by_method.insert(method, diameter);
            }
            Err(error) if method == BundleMethod::Perry => {
                debug!(tubes, %error, "perry fit does not cover this bundle");
            }
            Err(error) => return Err(error),
        }
    }

    let hedh = size(BundleMethod::Hedh, tubes)?;
    let tube_count_estimate = count(BundleMethod::Perry, hedh).ok();

    Ok(GeometryResult {
        bundle_diameter_by_method,
        tube_count: tubes,
        tube_count_estimate,
        min_bundle_diameter: tema::min_bundle_diameter(outer_diameter),
        shell_clearance: tema::shell_clearance(Some(hedh), None)?,
        baffle_hole_diameter: tema::baffle_hole_diameter(
            outer_diameter,
            request.unsupported_length,
        ),
        max_unsupported_length: tema::max_unsupported_span(outer_diameter, request.material)?,
    })
}
