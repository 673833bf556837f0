//! TEMA mechanical tables.

use uom::si::{
    f64::Length,
    length::{inch, meter},
};

use crate::error::{ConfigurationError, DomainError, Result};

use super::TubeMaterial;

/// Shell diameter upper bounds (m) and the diametral clearance below each.
const CLEARANCE_BY_SHELL: [(f64, f64); 5] = [
    (0.457, 0.0032),
    (1.016, 0.0048),
    (1.397, 0.0064),
    (1.778, 0.0079),
    (2.159, 0.0095),
];

/// Clearance for shells beyond the last tabulated diameter.
const CLEARANCE_LARGEST: f64 = 0.011;

/// Tabulated tube outer diameters (in) for the unsupported span limits.
const SPAN_TUBE_OD: [f64; 12] = [
    0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0, 1.25, 1.5, 2.0, 2.5, 3.0,
];

/// Maximum unsupported span (in) for steels.
const SPAN_STEEL: [f64; 12] = [
    26.0, 35.0, 44.0, 52.0, 60.0, 69.0, 74.0, 88.0, 100.0, 125.0, 139.0, 157.0,
];

/// Maximum unsupported span (in) for aluminium and copper alloys.
const SPAN_ALUMINIUM: [f64; 12] = [
    22.0, 30.0, 38.0, 45.0, 52.0, 60.0, 64.0, 76.0, 87.0, 110.0, 122.0, 137.0,
];

/// Shell-to-bundle diametral clearance, from either the bundle or the shell
/// diameter.
///
/// The bundle form uses the shell table shifted down by the next step's
/// clearance, so both forms step up together and never decrease.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingBasis`] when neither diameter is
/// given, [`ConfigurationError::AmbiguousBasis`] when both are, and
/// [`DomainError`] for a non-positive diameter.
pub fn shell_clearance(bundle: Option<Length>, shell: Option<Length>) -> Result<Length> {
    const OPTIONS: &str = "bundle diameter or shell diameter";
    let (diameter, shifted) = match (bundle, shell) {
        (Some(bundle), None) => (bundle, true),
        (None, Some(shell)) => (shell, false),
        (None, None) => {
            return Err(ConfigurationError::MissingBasis {
                quantity: "shell clearance",
                options: OPTIONS,
            }
            .into());
        }
        (Some(_), Some(_)) => {
            return Err(ConfigurationError::AmbiguousBasis {
                quantity: "shell clearance",
                options: OPTIONS,
            }
            .into());
        }
    };
    let d = DomainError::require_positive("clearance basis diameter", diameter.get::<meter>())?;

    let next_steps = CLEARANCE_BY_SHELL
        .iter()
        .map(|&(_, clearance)| clearance)
        .skip(1)
        .chain([CLEARANCE_LARGEST]);
    let clearance = CLEARANCE_BY_SHELL
        .iter()
        .zip(next_steps)
        .find(|&(&(limit, _), next)| d < if shifted { limit - next } else { limit })
        .map_or(CLEARANCE_LARGEST, |(&(_, clearance), _)| clearance);

    Ok(Length::new::<meter>(clearance))
}

/// Baffle-hole diameter for a tube: 0.8 mm oversize for tubes over 31.8 mm
/// or spans up to 914 mm, otherwise 0.4 mm.
#[must_use]
pub fn baffle_hole_diameter(outer_diameter: Length, unsupported_span: Length) -> Length {
    let large_tube = outer_diameter.get::<meter>() > 0.0318;
    let short_span = unsupported_span.get::<meter>() <= 0.914;
    let oversize = if large_tube || short_span { 0.0008 } else { 0.0004 };
    outer_diameter + Length::new::<meter>(oversize)
}

/// Longest span a tube may run between supports.
///
/// Tube sizes between tabulated diameters take the limit of the next smaller
/// size. Tubes outside the tabulated 1/4 in to 3 in take the first or last
/// limit.
///
/// # Errors
///
/// Returns [`DomainError`] for a non-positive tube diameter.
pub fn max_unsupported_span(outer_diameter: Length, material: TubeMaterial) -> Result<Length> {
    let od = DomainError::require_positive("tube outer diameter", outer_diameter.get::<inch>())?;

    let index = SPAN_TUBE_OD
        .iter()
        .rposition(|&tabulated| tabulated <= od + 1e-9)
        .unwrap_or(0);
    let spans = match material {
        TubeMaterial::CarbonSteel => &SPAN_STEEL,
        TubeMaterial::Aluminium => &SPAN_ALUMINIUM,
    };
    Ok(Length::new::<inch>(spans[index]))
}

/// A rough minimum bundle diameter for a tube size.
#[must_use]
pub fn min_bundle_diameter(outer_diameter: Length) -> Length {
    let d_o = outer_diameter.get::<meter>();
    let bundle = match d_o {
        d if d <= 0.01 => 0.1,
        d if d <= 0.014 => 0.3,
        d if d <= 0.02 => 0.5,
        d if d <= 0.03 => 1.0,
        _ => 1.5,
    };
    Length::new::<meter>(bundle)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::Error;

    fn m(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    #[test]
    fn clearance_is_positive_and_non_decreasing_in_bundle_diameter() -> Result<()> {
        let mut previous = 0.0;
        for step in 0..=290 {
            let bundle = 0.1 + 0.01 * f64::from(step);
            let clearance = shell_clearance(Some(m(bundle)), None)?.get::<meter>();
            assert!(clearance > 0.0);
            assert!(clearance >= previous, "{bundle} m: {clearance} < {previous}");
            previous = clearance;
        }
        Ok(())
    }

    #[test]
    fn both_forms_agree_on_a_matched_pair() -> Result<()> {
        let bundle = 0.9;
        let by_bundle = shell_clearance(Some(m(bundle)), None)?;
        let by_shell = shell_clearance(None, Some(m(bundle) + by_bundle))?;
        assert_relative_eq!(by_bundle.get::<meter>(), 0.0048);
        assert_eq!(by_bundle, by_shell);
        assert_relative_eq!(shell_clearance(None, Some(m(3.0)))?.get::<meter>(), 0.011);
        Ok(())
    }

    #[test]
    fn clearance_needs_exactly_one_basis() {
        assert!(matches!(
            shell_clearance(None, None),
            Err(Error::InvalidConfiguration(ConfigurationError::MissingBasis { .. }))
        ));
        assert!(matches!(
            shell_clearance(Some(m(0.5)), Some(m(0.51))),
            Err(Error::InvalidConfiguration(ConfigurationError::AmbiguousBasis { .. }))
        ));
    }

    #[test]
    fn baffle_holes() {
        let hole = |od, span| baffle_hole_diameter(m(od), m(span)).get::<meter>();
        assert_relative_eq!(hole(0.025, 0.75), 0.0258, max_relative = 1e-12);
        assert_relative_eq!(hole(0.025, 1.5), 0.0254, max_relative = 1e-12);
        assert_relative_eq!(hole(0.04, 1.5), 0.0408, max_relative = 1e-12);
    }

    #[test]
    fn spans_by_material() -> Result<()> {
        let one_inch = Length::new::<inch>(1.0);
        let steel = max_unsupported_span(one_inch, TubeMaterial::CarbonSteel)?;
        let aluminium = max_unsupported_span(one_inch, TubeMaterial::Aluminium)?;
        assert_relative_eq!(steel.get::<inch>(), 74.0, max_relative = 1e-12);
        assert_relative_eq!(aluminium.get::<inch>(), 64.0, max_relative = 1e-12);

        // 25 mm sits between 7/8 in and 1 in.
        let between = max_unsupported_span(m(0.025), TubeMaterial::CarbonSteel)?;
        assert_relative_eq!(between.get::<inch>(), 69.0, max_relative = 1e-12);

        assert!(max_unsupported_span(m(0.0), TubeMaterial::CarbonSteel).is_err());
        Ok(())
    }

    #[test]
    fn spans_outside_the_table_take_the_end_rows() -> Result<()> {
        let span = |od, material| max_unsupported_span(Length::new::<inch>(od), material);
        let steel = TubeMaterial::CarbonSteel;
        assert_relative_eq!(span(4.0, steel)?.get::<inch>(), 157.0, max_relative = 1e-12);
        assert_relative_eq!(span(0.125, steel)?.get::<inch>(), 26.0, max_relative = 1e-12);
        assert_relative_eq!(
            span(5.0, TubeMaterial::Aluminium)?.get::<inch>(),
            137.0,
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn minimum_bundle_steps_with_tube_size() {
        assert_relative_eq!(min_bundle_diameter(m(0.0254)).get::<meter>(), 1.0);
        assert_relative_eq!(min_bundle_diameter(m(0.006)).get::<meter>(), 0.1);
        assert_relative_eq!(min_bundle_diameter(m(0.05)).get::<meter>(), 1.5);
    }
}
