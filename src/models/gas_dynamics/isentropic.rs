use twine_core::Model;

use crate::flow::{
    FlowError,
    inverse::{InverseSolver, Inversion},
    isentropic::IsentropicRatios,
};

use super::Known;

/// Recovers the Mach number from a known quantity and tabulates the
/// isentropic relations there.
///
/// # Example
///
/// ```
/// use twine_core::Model;
/// use twine_gasdynamics::{
///     flow::{SpecificHeatRatio, inverse::RelationKind},
///     models::gas_dynamics::{IsentropicCalculator, Known},
/// };
///
/// let known = Known::new(SpecificHeatRatio::AIR, RelationKind::StagnationTemperatureRatio, 5.0 / 9.0);
/// let output = IsentropicCalculator::default().call(&known)?;
/// assert!((*output.ratios.mach - 2.0).abs() < 1e-12);
/// # Ok::<(), twine_gasdynamics::flow::FlowError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IsentropicCalculator {
    solver: InverseSolver,
}

impl IsentropicCalculator {
    #[must_use]
    pub fn new(solver: InverseSolver) -> Self {
        Self { solver }
    }
}

/// Output of [`IsentropicCalculator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsentropicOutput {
    pub inversion: Inversion,
    pub ratios: IsentropicRatios,
}

impl Model for IsentropicCalculator {
    type Input = Known;
    type Output = IsentropicOutput;
    type Error = FlowError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let inversion = self.solver.invert(input.kind, input.gamma, input.value)?;
        let ratios = IsentropicRatios::new(input.gamma, inversion.mach)?;
        Ok(IsentropicOutput { inversion, ratios })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::flow::{SpecificHeatRatio, inverse::RelationKind};

    #[test]
    fn subsonic_area_ratio_table() -> Result<(), FlowError> {
        let known = Known::new(SpecificHeatRatio::AIR, RelationKind::AreaRatioSubsonic, 1.6875);
        let output = IsentropicCalculator::default().call(&known)?;

        assert_relative_eq!(*output.ratios.mach, 0.372_244_49, max_relative = 1e-7);
        assert_eq!(output.ratios.mach_angle, None);
        assert_relative_eq!(output.ratios.area.unwrap(), 1.6875, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn invalid_input_is_reported() {
        let known = Known::new(SpecificHeatRatio::AIR, RelationKind::StagnationPressureRatio, 1.2);
        assert!(matches!(
            IsentropicCalculator::default().call(&known),
            Err(FlowError::InvalidInput { .. })
        ));
    }
}
