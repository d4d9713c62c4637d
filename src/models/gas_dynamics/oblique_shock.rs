use twine_core::Model;
use uom::si::f64::Angle;

use crate::flow::{FlowError, MachNumber, SpecificHeatRatio, oblique_shock::ObliqueShock};

/// Upstream state and wave angle of an oblique shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObliqueShockInput {
    pub gamma: SpecificHeatRatio,
    pub mach: MachNumber,
    pub wave_angle: Angle,
}

/// Resolves an oblique shock from its upstream Mach number and wave angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObliqueShockCalculator;

impl Model for ObliqueShockCalculator {
    type Input = ObliqueShockInput;
    type Output = ObliqueShock;
    type Error = FlowError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        ObliqueShock::new(input.gamma, input.mach, input.wave_angle)
    }
}
