//! Compressible flow calculators.
//!
//! The calculators recover a Mach number from one known quantity and then
//! tabulate a family of relations at that Mach number:
//!
//! - [`IsentropicCalculator`]: any known quantity to the isentropic table.
//! - [`NormalShockCalculator`]: any known quantity to the normal shock table,
//!   treating the recovered Mach number as the upstream `M1`.
//! - [`ObliqueShockCalculator`]: upstream Mach number and wave angle to the
//!   oblique shock table.

mod isentropic;
mod normal_shock;
mod oblique_shock;

pub use isentropic::{IsentropicCalculator, IsentropicOutput};
pub use normal_shock::{NormalShockCalculator, NormalShockOutput};
pub use oblique_shock::{ObliqueShockCalculator, ObliqueShockInput};

use crate::flow::{SpecificHeatRatio, inverse::RelationKind};

/// A known flow quantity.
///
/// Angles are in radians, as for [`RelationKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Known {
    pub gamma: SpecificHeatRatio,
    pub kind: RelationKind,
    pub value: f64,
}

impl Known {
    #[must_use]
    pub fn new(gamma: SpecificHeatRatio, kind: RelationKind, value: f64) -> Self {
        Self { gamma, kind, value }
    }
}
