use twine_core::Model;

use crate::flow::{
    FlowError,
    inverse::{InverseSolver, Inversion},
    normal_shock::NormalShock,
};

use super::Known;

/// Recovers the upstream Mach number from a known quantity and resolves the
/// normal shock there.
///
/// The `Shock*` kinds describe the shock itself. Any other kind describes
/// the upstream flow, which must then be supersonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalShockCalculator {
    solver: InverseSolver,
}

impl NormalShockCalculator {
    #[must_use]
    pub fn new(solver: InverseSolver) -> Self {
        Self { solver }
    }
}

/// Output of [`NormalShockCalculator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalShockOutput {
    pub inversion: Inversion,
    pub shock: NormalShock,
}

impl Model for NormalShockCalculator {
    type Input = Known;
    type Output = NormalShockOutput;
    type Error = FlowError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let inversion = self.solver.invert(input.kind, input.gamma, input.value)?;
        let shock = NormalShock::new(input.gamma, inversion.mach)?;
        Ok(NormalShockOutput { inversion, shock })
    }
}
