use std::cmp::Ordering;

use num_traits::One;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing `x > 1`.
///
/// Ratios of specific heats, area ratios `A/A*` away from the throat, and
/// static ratios across a normal shock all live on this domain.
///
/// # Examples
///
/// ```
/// use twine_gasdynamics::support::constraint::AboveOne;
///
/// assert!(AboveOne::new(1.4).is_ok());
/// assert!(AboveOne::new(1.0).is_err());
/// assert!(AboveOne::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AboveOne;

impl AboveOne {
    /// Constructs a [`Constrained<T, AboveOne>`] if the value exceeds one.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::BelowMinimum`] for values at or below one
    /// and [`ConstraintError::NotANumber`] for `NaN`.
    pub fn new<T: PartialOrd + One>(value: T) -> Result<Constrained<T, AboveOne>, ConstraintError> {
        Constrained::<T, AboveOne>::new(value)
    }
}

impl<T: PartialOrd + One> Constraint<T> for AboveOne {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::one()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal | Ordering::Less) => Err(ConstraintError::BelowMinimum),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
