//! Construction-time numeric constraints.
//!
//! Gas dynamics relations are only meaningful on restricted domains: a ratio
//! of specific heats must exceed one, a Mach number cannot be negative, and a
//! static-to-stagnation ratio lies strictly between zero and one.
//! The types in this module check such a domain once, when a value is built,
//! so the relations that consume the value never have to check it again.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: `x ≥ 0`
//! - [`AboveOne`]: `x > 1`
//! - [`UnitIntervalOpen`]: `0 < x < 1`
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper and
//! also offers an associated `new()` shortcut.

mod above_one;
mod non_negative;
mod unit_interval_open;

use std::marker::PhantomData;

use thiserror::Error;

pub use above_one::AboveOne;
pub use non_negative::NonNegative;
pub use unit_interval_open::UnitIntervalOpen;

/// A numeric invariant checked at construction time.
///
/// Implement this trait on a zero-sized marker type to define a new invariant.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// A violated [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A value known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use twine_gasdynamics::support::constraint::{AboveOne, Constrained};
///
/// let gamma = Constrained::<f64, AboveOne>::new(1.4).unwrap();
/// assert_eq!(gamma.into_inner(), 1.4);
///
/// assert!(Constrained::<f64, AboveOne>::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> ConstraintResult<Self> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Wraps a value without checking it.
    ///
    /// Only for constants that satisfy the constraint by inspection.
    pub(crate) const fn new_unchecked(value: T) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns a copy of the inner value.
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
