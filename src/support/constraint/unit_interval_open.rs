use num_traits::{One, Zero};

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing `0 < x < 1`.
///
/// Static-to-stagnation ratios (`T/T0`, `p/p0`, `ρ/ρ0`) of a moving gas fall
/// in this interval; both endpoints correspond to limits that no finite Mach
/// number reaches from the inverse side.
///
/// # Examples
///
/// ```
/// use twine_gasdynamics::support::constraint::UnitIntervalOpen;
///
/// assert!(UnitIntervalOpen::new(0.5).is_ok());
/// assert!(UnitIntervalOpen::new(0.0).is_err());
/// assert!(UnitIntervalOpen::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalOpen;

impl UnitIntervalOpen {
    /// Constructs a [`Constrained<T, UnitIntervalOpen>`] if `0 < value < 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if the value is zero or less.
    /// - [`ConstraintError::AboveMaximum`] if the value is one or more.
    /// - [`ConstraintError::NotANumber`] for `NaN`.
    pub fn new<T: PartialOrd + Zero + One>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalOpen>::new(value)
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitIntervalOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        let (Some(lower), Some(upper)) = (
            value.partial_cmp(&T::zero()),
            value.partial_cmp(&T::one()),
        ) else {
            return Err(ConstraintError::NotANumber);
        };

        if lower.is_le() {
            return Err(ConstraintError::BelowMinimum);
        }
        if upper.is_ge() {
            return Err(ConstraintError::AboveMaximum);
        }
        Ok(())
    }
}
