//! One-dimensional compressible flow of a calorically perfect gas.
//!
//! - [`isentropic`]: Stagnation, sonic and area ratios, Mach and
//!   Prandtl-Meyer angles.
//! - [`normal_shock`]: Jump relations across a stationary normal shock.
//! - [`oblique_shock`]: Turn angle and jumps across a straight oblique shock.
//! - [`inverse`]: Recovering the Mach number from any of the above.
//!
//! Every relation is a pure function of the [`SpecificHeatRatio`] `γ` and a
//! [`MachNumber`]. Nothing here holds state, so all of it may be called from
//! any number of threads.

mod error;
mod mach_number;
mod specific_heat_ratio;

pub mod inverse;
pub mod isentropic;
pub mod normal_shock;
pub mod oblique_shock;

pub use error::FlowError;
pub use mach_number::MachNumber;
pub use specific_heat_ratio::SpecificHeatRatio;

use uom::si::f64::Angle;

use isentropic::IsentropicRatios;
use normal_shock::NormalShock;
use oblique_shock::ObliqueShock;

/// A family of forward relations that can be tabulated at one Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelationFamily {
    Isentropic,
    NormalShock,
    /// A straight oblique shock at the given wave angle `β`.
    ObliqueShock { wave_angle: Angle },
}

/// Evaluates every relation of `family` at `(γ, M)` as labelled values.
///
/// Angles are reported in degrees. For the shock families the Mach number is
/// the upstream `M1`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] for a normal shock with subsonic
/// upstream flow or an oblique shock whose wave angle lies outside the Mach
/// angle and `π/2`, and [`FlowError::Overflow`] if a ratio exceeds the range
/// of `f64`.
///
/// # Example
///
/// ```
/// use twine_gasdynamics::flow::{MachNumber, RelationFamily, SpecificHeatRatio, compute_forward};
///
/// let table = compute_forward(
///     RelationFamily::NormalShock,
///     SpecificHeatRatio::AIR,
///     MachNumber::new(2.0)?,
/// )?;
/// assert_eq!(table[2], ("p2/p1", 4.5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compute_forward(
    family: RelationFamily,
    gamma: SpecificHeatRatio,
    mach: MachNumber,
) -> Result<Vec<(&'static str, f64)>, FlowError> {
    Ok(match family {
        RelationFamily::Isentropic => IsentropicRatios::new(gamma, mach)?.named(),
        RelationFamily::NormalShock => NormalShock::new(gamma, mach)?.named(),
        RelationFamily::ObliqueShock { wave_angle } => {
            ObliqueShock::new(gamma, mach, wave_angle)?.named()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    #[test]
    fn forward_tables_are_bit_identical() -> Result<(), FlowError> {
        let gamma = SpecificHeatRatio::new(1.3).unwrap();
        let mach = MachNumber::new(2.7).unwrap();
        let oblique = RelationFamily::ObliqueShock {
            wave_angle: Angle::new::<degree>(40.0),
        };
        for family in [RelationFamily::Isentropic, RelationFamily::NormalShock, oblique] {
            let first = compute_forward(family, gamma, mach)?;
            let second = compute_forward(family, gamma, mach)?;
            assert_eq!(first.len(), second.len());
            for ((label_a, a), (label_b, b)) in first.iter().zip(&second) {
                assert_eq!(label_a, label_b);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
        Ok(())
    }

    #[test]
    fn subsonic_normal_shock_is_rejected() {
        let mach = MachNumber::new(0.8).unwrap();
        assert!(matches!(
            compute_forward(RelationFamily::NormalShock, SpecificHeatRatio::AIR, mach),
            Err(FlowError::InvalidInput { .. })
        ));
    }

    #[test]
    fn oblique_shock_table() -> Result<(), FlowError> {
        let family = RelationFamily::ObliqueShock {
            wave_angle: Angle::new::<degree>(45.0),
        };
        let mach = MachNumber::new(2.0).unwrap();
        let table = compute_forward(family, SpecificHeatRatio::AIR, mach)?;

        assert_eq!(table[0], ("M1", 2.0));
        assert_eq!(table[2].0, "turn angle (deg)");
        assert_relative_eq!(table[2].1, 14.743_562_8, max_relative = 1e-8);

        let below_mach_angle = RelationFamily::ObliqueShock {
            wave_angle: Angle::new::<degree>(20.0),
        };
        assert!(matches!(
            compute_forward(below_mach_angle, SpecificHeatRatio::AIR, mach),
            Err(FlowError::InvalidInput { .. })
        ));
        Ok(())
    }

    #[test]
    fn subsonic_isentropic_table_omits_angles() -> Result<(), FlowError> {
        let mach = MachNumber::new(0.5).unwrap();
        let table = compute_forward(RelationFamily::Isentropic, SpecificHeatRatio::AIR, mach)?;
        assert!(table.iter().all(|(label, _)| !label.contains("angle")));
        assert_eq!(table.last().map(|(label, _)| *label), Some("A/A*"));
        Ok(())
    }
}
