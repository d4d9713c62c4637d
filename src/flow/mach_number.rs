use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative};

/// The ratio of flow speed to the local speed of sound.
///
/// A Mach number is non-negative. Flow is subsonic below one, sonic at one,
/// and supersonic above one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MachNumber(Constrained<f64, NonNegative>);

impl MachNumber {
    /// Sonic flow, `M = 1`.
    pub const SONIC: Self = Self(Constrained::new_unchecked(1.0));

    /// Create a [`MachNumber`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative or `NaN`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(value)?))
    }

    #[must_use]
    pub fn is_subsonic(self) -> bool {
        *self < 1.0
    }

    #[must_use]
    pub fn is_supersonic(self) -> bool {
        *self > 1.0
    }
}

impl Deref for MachNumber {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
