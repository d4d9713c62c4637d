use std::{f64::consts::FRAC_PI_2, ops::Deref};

use uom::si::{
    angle::radian,
    f64::{Angle, SpecificHeatCapacity},
    ratio::ratio,
};

use crate::support::constraint::{AboveOne, Constrained, ConstraintResult};

/// The ratio of specific heats `γ = cp / cv` of a calorically perfect gas.
///
/// Most compressible flow relations divide by `γ − 1`, so `γ` must be
/// strictly greater than one.
///
/// # Example
///
/// ```
/// use twine_gasdynamics::flow::SpecificHeatRatio;
///
/// let gamma = SpecificHeatRatio::new(1.4).unwrap();
/// assert_eq!(*gamma, 1.4);
/// assert!(SpecificHeatRatio::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpecificHeatRatio(Constrained<f64, AboveOne>);

impl SpecificHeatRatio {
    /// Diatomic gas such as dry air near room temperature.
    pub const AIR: Self = Self(Constrained::new_unchecked(1.4));

    /// Create a [`SpecificHeatRatio`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not greater than one.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(AboveOne::new(value)?))
    }

    /// Create a [`SpecificHeatRatio`] from constant-pressure and
    /// constant-volume specific heat capacities.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cp / cv` is not greater than one.
    pub fn from_heat_capacities(
        cp: SpecificHeatCapacity,
        cv: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Self::new((cp / cv).get::<ratio>())
    }

    /// The supremum of the Prandtl-Meyer function for this gas.
    ///
    /// `ν → π/2 · (sqrt((γ+1)/(γ−1)) − 1)` as `M → ∞`, about 130.45° for air.
    #[must_use]
    pub fn prandtl_meyer_limit(self) -> Angle {
        let g = *self;
        Angle::new::<radian>(FRAC_PI_2 * (((g + 1.0) / (g - 1.0)).sqrt() - 1.0))
    }
}

impl Deref for SpecificHeatRatio {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{angle::degree, specific_heat_capacity::joule_per_kilogram_kelvin};

    #[test]
    fn air_from_heat_capacities() -> ConstraintResult<()> {
        let cp = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0);
        let cv = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0 - 287.053);

        let gamma = SpecificHeatRatio::from_heat_capacities(cp, cv)?;

        assert_relative_eq!(*gamma, 1.3999, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn prandtl_meyer_limit_for_air() {
        let limit = SpecificHeatRatio::AIR.prandtl_meyer_limit();
        assert_relative_eq!(limit.get::<degree>(), 130.454_076, epsilon = 1e-6);
    }

    #[test]
    fn prandtl_meyer_limit_depends_on_gamma() -> ConstraintResult<()> {
        let monatomic = SpecificHeatRatio::new(5.0 / 3.0)?.prandtl_meyer_limit();
        assert_relative_eq!(monatomic.get::<degree>(), 90.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn rejects_non_physical_values() {
        assert!(SpecificHeatRatio::new(1.0).is_err());
        assert!(SpecificHeatRatio::new(0.7).is_err());
        assert!(SpecificHeatRatio::new(f64::NAN).is_err());
    }
}
