//! Relations across a straight oblique shock.
//!
//! An oblique shock standing at wave angle `β` to the upstream flow turns the
//! flow through the angle `θ`. The velocity component normal to the wave sees
//! a normal shock, so the thermodynamic jumps are the [`NormalShock`]
//! relations evaluated at `M1n = M1 sin β`.

use std::f64::consts::FRAC_PI_2;

use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

pub use super::isentropic::mach_angle;

/// Shortfall of `M1 sin β` below one that still counts as a Mach wave.
const SONIC_TOL: f64 = 4.0 * f64::EPSILON;

use super::{
    FlowError, MachNumber, SpecificHeatRatio,
    error::{computed, finite},
    isentropic::require_supersonic,
    normal_shock::NormalShock,
};

/// The flow turn angle `θ` produced by a shock at wave angle `β`.
///
/// ```text
/// tan θ = 2 cot β (M² sin²β − 1) / (M² (γ + cos 2β) + 2)
/// ```
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] unless `0 < β < π/2`, and
/// [`FlowError::NumericDomain`] for subsonic upstream flow.
pub fn turn_angle(
    gamma: SpecificHeatRatio,
    mach: MachNumber,
    wave_angle: Angle,
) -> Result<Angle, FlowError> {
    let beta = check_wave_angle(wave_angle)?;
    require_supersonic(mach, "turn angle")?;

    let (g, m2) = (*gamma, *mach * *mach);
    let numerator = 2.0 / beta.tan() * (m2 * beta.sin().powi(2) - 1.0);
    let denominator = m2 * (g + (2.0 * beta).cos()) + 2.0;
    Ok(Angle::new::<radian>((numerator / denominator).atan()))
}

/// A resolved oblique shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObliqueShock {
    pub upstream_mach: MachNumber,
    pub wave_angle: Angle,
    pub turn_angle: Angle,
    pub downstream_mach: MachNumber,
    /// The normal shock seen by the velocity components normal to the wave.
    pub normal: NormalShock,
}

impl ObliqueShock {
    /// Resolves the shock for upstream Mach number `M1` and wave angle `β`.
    ///
    /// The wave angle must lie between the Mach angle and `π/2`, so that the
    /// normal component `M1 sin β` is at least sonic.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidInput`] for a wave angle outside that
    /// range, and the errors of [`turn_angle`] and [`NormalShock::new`].
    pub fn new(
        gamma: SpecificHeatRatio,
        upstream_mach: MachNumber,
        wave_angle: Angle,
    ) -> Result<Self, FlowError> {
        let theta = turn_angle(gamma, upstream_mach, wave_angle)?;
        let beta = wave_angle.get::<radian>();

        let normal_mach = *upstream_mach * beta.sin();
        if 1.0 - normal_mach > SONIC_TOL {
            return Err(FlowError::invalid(
                "wave angle (deg)",
                wave_angle.get::<degree>(),
                "the wave angle must be at least the Mach angle",
            ));
        }
        let normal_mach = MachNumber::new(normal_mach.max(1.0)).map_err(computed("M1n"))?;
        let normal = NormalShock::new(gamma, normal_mach)?;

        let downstream = *normal.downstream_mach / (beta - theta.get::<radian>()).sin();
        let downstream_mach =
            MachNumber::new(finite(downstream, "M2")?).map_err(computed("M2"))?;

        Ok(Self {
            upstream_mach,
            wave_angle,
            turn_angle: theta,
            downstream_mach,
            normal,
        })
    }

    /// Labelled values in display order, angles in degrees.
    #[must_use]
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("M1", *self.upstream_mach),
            ("wave angle (deg)", self.wave_angle.get::<degree>()),
            ("turn angle (deg)", self.turn_angle.get::<degree>()),
            ("M1n", *self.normal.upstream_mach),
            ("M2n", *self.normal.downstream_mach),
            ("M2", *self.downstream_mach),
            ("p2/p1", self.normal.pressure),
            ("p02/p01", self.normal.total_pressure),
            ("rho2/rho1", self.normal.density),
            ("T2/T1", self.normal.temperature),
        ]
    }
}

fn check_wave_angle(wave_angle: Angle) -> Result<f64, FlowError> {
    let beta = wave_angle.get::<radian>();
    if beta > 0.0 && beta < FRAC_PI_2 {
        Ok(beta)
    } else {
        Err(FlowError::invalid("wave angle (rad)", beta, "0 < beta < pi/2"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn mach(value: f64) -> MachNumber {
        MachNumber::new(value).unwrap()
    }

    fn degrees(value: f64) -> Angle {
        Angle::new::<degree>(value)
    }

    #[test]
    fn mach_two_at_forty_five_degrees() -> Result<(), FlowError> {
        let shock = ObliqueShock::new(SpecificHeatRatio::AIR, mach(2.0), degrees(45.0))?;

        assert_relative_eq!(shock.turn_angle.get::<degree>(), 14.743_562_8, max_relative = 1e-8);
        assert_relative_eq!(*shock.normal.upstream_mach, 2.0_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(shock.normal.pressure, 2.166_666_67, max_relative = 1e-8);
        assert_relative_eq!(*shock.downstream_mach, 1.456_323_84, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn ten_degree_wedge_at_mach_two() -> Result<(), FlowError> {
        // Weak-shock wave angle for a 10° wedge in air at Mach 2.
        let theta = turn_angle(SpecificHeatRatio::AIR, mach(2.0), degrees(39.3139))?;
        assert_relative_eq!(theta.get::<degree>(), 10.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn mach_wave_does_not_turn_the_flow() -> Result<(), FlowError> {
        let m = mach(3.0);
        let mu = mach_angle(m)?;
        let theta = turn_angle(SpecificHeatRatio::AIR, m, mu)?;
        assert_relative_eq!(theta.get::<radian>(), 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn wave_angle_outside_open_quadrant_is_rejected() {
        let right = Angle::new::<radian>(FRAC_PI_2);
        for beta in [degrees(0.0), right, degrees(-5.0), degrees(120.0)] {
            assert!(matches!(
                turn_angle(SpecificHeatRatio::AIR, mach(2.0), beta),
                Err(FlowError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn shock_at_the_mach_angle_is_a_mach_wave() -> Result<(), FlowError> {
        let m = mach(2.0);
        for beta in [degrees(30.0), mach_angle(m)?] {
            let shock = ObliqueShock::new(SpecificHeatRatio::AIR, m, beta)?;

            assert_eq!(*shock.normal.upstream_mach, 1.0);
            assert_relative_eq!(shock.turn_angle.get::<radian>(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(shock.normal.pressure, 1.0, epsilon = 1e-12);
            assert_relative_eq!(*shock.downstream_mach, 2.0, max_relative = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn wave_angle_below_mach_angle_is_rejected() {
        assert!(matches!(
            ObliqueShock::new(SpecificHeatRatio::AIR, mach(2.0), degrees(20.0)),
            Err(FlowError::InvalidInput { .. })
        ));
    }

    #[test]
    fn subsonic_upstream_is_a_domain_error() {
        assert!(matches!(
            turn_angle(SpecificHeatRatio::AIR, mach(0.7), degrees(60.0)),
            Err(FlowError::NumericDomain { .. })
        ));
    }
}
