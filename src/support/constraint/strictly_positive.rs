use std::{cmp::Ordering, marker::PhantomData, ops::Add};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Flow rates, film coefficients, conductivities, and diameters are all
/// carried as `Constrained<_, StrictlyPositive>`.
///
/// # Examples
///
/// ```
/// use shell_tube_rating::support::constraint::StrictlyPositive;
/// use uom::si::{f64::ThermalConductivity, thermal_conductivity::watt_per_meter_kelvin};
///
/// let k_wall = StrictlyPositive::new(ThermalConductivity::new::<watt_per_meter_kelvin>(16.5));
/// assert!(k_wall.is_ok());
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Adds two strictly positive values.
///
/// # Panics
///
/// Panics in debug builds if the sum is unexpectedly non-positive.
impl<T> Add for Constrained<T, StrictlyPositive>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let value = self.value + rhs.value;
        debug_assert!(
            value > T::zero(),
            "Addition produced a non-positive value, violating StrictlyPositive bound invariant"
        );
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, MassRate},
        length::meter,
        mass_rate::kilogram_per_second,
    };

    #[test]
    fn tube_counts() {
        assert_eq!(StrictlyPositive::new(928_u32).map(|n| n.into_inner()), Ok(928));
        assert_eq!(StrictlyPositive::new(0_u32), Err(ConstraintError::Zero));
    }

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(1e-9).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-5.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn mass_rates() {
        let hot = MassRate::new::<kilogram_per_second>(1.389);
        assert!(StrictlyPositive::new(hot).is_ok());

        let stagnant = MassRate::new::<kilogram_per_second>(0.0);
        assert!(StrictlyPositive::new(stagnant).is_err());
    }

    #[test]
    fn sums_stay_positive() {
        let a = StrictlyPositive::new(Length::new::<meter>(0.01)).unwrap();
        let b = StrictlyPositive::new(Length::new::<meter>(0.02)).unwrap();
        approx::assert_relative_eq!((a + b).into_inner().get::<meter>(), 0.03);
    }
}
