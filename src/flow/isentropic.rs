//! Isentropic flow relations.
//!
//! Each relation maps `(γ, M)` to a static-to-stagnation ratio (`p/p0`,
//! `ρ/ρ0`, `T/T0`), a static-to-sonic ratio (`p/p*`, `ρ/ρ*`, `T/T*`, `A/A*`),
//! or one of the two supersonic angles (Mach angle and Prandtl-Meyer angle).
//!
//! The ratio relations are total for `M ≥ 0` and return plain `f64`.
//! Relations that are undefined somewhere on that domain return
//! `Result<_, FlowError>`: the angles require `M ≥ 1`, and `A/A*` is
//! singular at `M = 0`.
//!
//! [`IsentropicRatios`] evaluates the full set at once.

use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

use super::{FlowError, MachNumber, SpecificHeatRatio, error::finite};

/// The Mach angle `μ = asin(1/M)`.
///
/// # Errors
///
/// Returns [`FlowError::NumericDomain`] for subsonic flow, where `1/M > 1`.
pub fn mach_angle(mach: MachNumber) -> Result<Angle, FlowError> {
    require_supersonic(mach, "Mach angle")?;
    Ok(Angle::new::<radian>((1.0 / *mach).asin()))
}

/// The Prandtl-Meyer angle `ν(M)`, the turn that expands sonic flow to `M`.
///
/// # Errors
///
/// Returns [`FlowError::NumericDomain`] for subsonic flow.
pub fn prandtl_meyer_angle(gamma: SpecificHeatRatio, mach: MachNumber) -> Result<Angle, FlowError> {
    require_supersonic(mach, "Prandtl-Meyer angle")?;
    Ok(Angle::new::<radian>(prandtl_meyer(*gamma, *mach)))
}

/// Static to stagnation pressure ratio, `p/p0`.
#[must_use]
pub fn pressure_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    let g = *gamma;
    stagnation_factor(g, *mach).powf(-g / (g - 1.0))
}

/// Static to stagnation density ratio, `ρ/ρ0`.
#[must_use]
pub fn density_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    let g = *gamma;
    stagnation_factor(g, *mach).powf(-1.0 / (g - 1.0))
}

/// Static to stagnation temperature ratio, `T/T0`.
#[must_use]
pub fn temperature_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    stagnation_factor(*gamma, *mach).recip()
}

/// Stagnation to sonic pressure ratio, `p0/p*`.
#[must_use]
pub fn stagnation_to_sonic_pressure_ratio(gamma: SpecificHeatRatio) -> f64 {
    let g = *gamma;
    (2.0 / (g + 1.0)).powf(-g / (g - 1.0))
}

/// Stagnation to sonic density ratio, `ρ0/ρ*`.
#[must_use]
pub fn stagnation_to_sonic_density_ratio(gamma: SpecificHeatRatio) -> f64 {
    let g = *gamma;
    (2.0 / (g + 1.0)).powf(-1.0 / (g - 1.0))
}

/// Stagnation to sonic temperature ratio, `T0/T*`.
#[must_use]
pub fn stagnation_to_sonic_temperature_ratio(gamma: SpecificHeatRatio) -> f64 {
    (*gamma + 1.0) / 2.0
}

/// Static to sonic pressure ratio, `p/p*`.
#[must_use]
pub fn sonic_pressure_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    pressure_ratio(gamma, mach) * stagnation_to_sonic_pressure_ratio(gamma)
}

/// Static to sonic density ratio, `ρ/ρ*`.
#[must_use]
pub fn sonic_density_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    density_ratio(gamma, mach) * stagnation_to_sonic_density_ratio(gamma)
}

/// Static to sonic temperature ratio, `T/T*`.
#[must_use]
pub fn sonic_temperature_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    temperature_ratio(gamma, mach) * stagnation_to_sonic_temperature_ratio(gamma)
}

/// Flow area to sonic throat area ratio, `A/A*`.
///
/// # Errors
///
/// Returns [`FlowError::NumericDomain`] at `M = 0` and
/// [`FlowError::Overflow`] if the result exceeds the range of `f64`.
pub fn area_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> Result<f64, FlowError> {
    if *mach == 0.0 {
        return Err(FlowError::domain("A/A* is singular at M = 0"));
    }
    finite(area_ratio_unchecked(*gamma, *mach), "A/A*")
}

/// The full set of isentropic relations at one Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsentropicRatios {
    pub mach: MachNumber,
    /// `None` for subsonic flow.
    pub mach_angle: Option<Angle>,
    /// `None` for subsonic flow.
    pub prandtl_meyer_angle: Option<Angle>,
    /// `p/p0`
    pub pressure: f64,
    /// `ρ/ρ0`
    pub density: f64,
    /// `T/T0`
    pub temperature: f64,
    /// `p/p*`
    pub sonic_pressure: f64,
    /// `ρ/ρ*`
    pub sonic_density: f64,
    /// `T/T*`
    pub sonic_temperature: f64,
    /// `A/A*`, `None` at `M = 0`.
    pub area: Option<f64>,
}

impl IsentropicRatios {
    /// Evaluates every isentropic relation at `(γ, M)`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Overflow`] if any ratio exceeds the range of `f64`.
    ///
    /// # Example
    ///
    /// ```
    /// use twine_gasdynamics::flow::{MachNumber, SpecificHeatRatio, isentropic::IsentropicRatios};
    ///
    /// let ratios = IsentropicRatios::new(SpecificHeatRatio::AIR, MachNumber::new(2.0)?)?;
    /// assert!((ratios.temperature - 5.0 / 9.0).abs() < 1e-12);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(gamma: SpecificHeatRatio, mach: MachNumber) -> Result<Self, FlowError> {
        let supersonic = *mach >= 1.0;
        let area = if *mach == 0.0 {
            None
        } else {
            Some(area_ratio(gamma, mach)?)
        };

        Ok(Self {
            mach,
            mach_angle: supersonic.then(|| mach_angle(mach)).transpose()?,
            prandtl_meyer_angle: supersonic
                .then(|| prandtl_meyer_angle(gamma, mach))
                .transpose()?,
            pressure: finite(pressure_ratio(gamma, mach), "p/p0")?,
            density: finite(density_ratio(gamma, mach), "rho/rho0")?,
            temperature: finite(temperature_ratio(gamma, mach), "T/T0")?,
            sonic_pressure: finite(sonic_pressure_ratio(gamma, mach), "p/p*")?,
            sonic_density: finite(sonic_density_ratio(gamma, mach), "rho/rho*")?,
            sonic_temperature: finite(sonic_temperature_ratio(gamma, mach), "T/T*")?,
            area,
        })
    }

    /// Labelled values in display order, angles in degrees.
    ///
    /// Relations that are undefined at this Mach number are omitted.
    #[must_use]
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        let mut entries = Vec::with_capacity(10);
        entries.push(("M", *self.mach));
        if let Some(angle) = self.mach_angle {
            entries.push(("Mach angle (deg)", angle.get::<degree>()));
        }
        if let Some(angle) = self.prandtl_meyer_angle {
            entries.push(("P-M angle (deg)", angle.get::<degree>()));
        }
        entries.extend([
            ("p/p0", self.pressure),
            ("rho/rho0", self.density),
            ("T/T0", self.temperature),
            ("p/p*", self.sonic_pressure),
            ("rho/rho*", self.sonic_density),
            ("T/T*", self.sonic_temperature),
        ]);
        if let Some(area) = self.area {
            entries.push(("A/A*", area));
        }
        entries
    }
}

/// `1 + (γ−1)/2 · M²`
fn stagnation_factor(g: f64, m: f64) -> f64 {
    1.0 + 0.5 * (g - 1.0) * m * m
}

/// `ν(M)` in radians; `NaN` for `M < 1`.
pub(crate) fn prandtl_meyer(g: f64, m: f64) -> f64 {
    let b = m * m - 1.0;
    let k = (g + 1.0) / (g - 1.0);
    k.sqrt() * (b / k).sqrt().atan() - b.sqrt().atan()
}

/// `dν/dM`; zero at `M = 1` and `NaN` below it.
pub(crate) fn prandtl_meyer_slope(g: f64, m: f64) -> f64 {
    (m * m - 1.0).sqrt() / (m + 0.5 * (g - 1.0) * m.powi(3))
}

/// `A/A*` without the `M = 0` and overflow checks.
pub(crate) fn area_ratio_unchecked(g: f64, m: f64) -> f64 {
    let e = (g + 1.0) / (2.0 * (g - 1.0));
    ((g + 1.0) / 2.0).powf(-e) * stagnation_factor(g, m).powf(e) / m
}

pub(super) fn require_supersonic(mach: MachNumber, what: &str) -> Result<(), FlowError> {
    if *mach < 1.0 {
        return Err(FlowError::domain(format!(
            "{what} requires M >= 1, got M = {}",
            *mach
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::support::constraint::ConstraintResult;

    fn mach(value: f64) -> MachNumber {
        MachNumber::new(value).unwrap()
    }

    #[test]
    fn air_at_mach_two() {
        let g = SpecificHeatRatio::AIR;
        let m = mach(2.0);

        assert_relative_eq!(
            mach_angle(m).unwrap().get::<degree>(),
            29.999_999_9,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            prandtl_meyer_angle(g, m).unwrap().get::<degree>(),
            26.379_760_8,
            max_relative = 1e-6
        );
        assert_relative_eq!(pressure_ratio(g, m), 0.127_804_52, max_relative = 1e-6);
        assert_relative_eq!(density_ratio(g, m), 0.230_048_14, max_relative = 1e-6);
        assert_relative_eq!(temperature_ratio(g, m), 0.555_555_55, max_relative = 1e-6);
        assert_relative_eq!(sonic_pressure_ratio(g, m), 0.241_924_91, max_relative = 1e-6);
        assert_relative_eq!(sonic_density_ratio(g, m), 0.362_887_36, max_relative = 1e-6);
        assert_relative_eq!(sonic_temperature_ratio(g, m), 0.666_666_66, max_relative = 1e-6);
        assert_relative_eq!(area_ratio(g, m).unwrap(), 1.687_499_99, max_relative = 1e-6);
    }

    #[test]
    fn sonic_values_invert_the_stagnation_constants() {
        let g = SpecificHeatRatio::AIR;

        assert_relative_eq!(
            pressure_ratio(g, MachNumber::SONIC),
            stagnation_to_sonic_pressure_ratio(g).recip(),
            max_relative = 1e-14
        );
        assert_relative_eq!(
            density_ratio(g, MachNumber::SONIC),
            stagnation_to_sonic_density_ratio(g).recip(),
            max_relative = 1e-14
        );
        assert_relative_eq!(
            temperature_ratio(g, MachNumber::SONIC),
            stagnation_to_sonic_temperature_ratio(g).recip(),
            max_relative = 1e-14
        );
        assert_relative_eq!(area_ratio(g, MachNumber::SONIC).unwrap(), 1.0, max_relative = 1e-14);
    }

    #[test]
    fn stagnant_flow() {
        let g = SpecificHeatRatio::AIR;
        let m = mach(0.0);

        assert_relative_eq!(pressure_ratio(g, m), 1.0);
        assert_relative_eq!(density_ratio(g, m), 1.0);
        assert_relative_eq!(temperature_ratio(g, m), 1.0);
        assert!(matches!(area_ratio(g, m), Err(FlowError::NumericDomain { .. })));
    }

    #[test]
    fn angles_require_supersonic_flow() {
        let m = mach(0.8);
        assert!(matches!(mach_angle(m), Err(FlowError::NumericDomain { .. })));
        assert!(matches!(
            prandtl_meyer_angle(SpecificHeatRatio::AIR, m),
            Err(FlowError::NumericDomain { .. })
        ));

        assert_relative_eq!(
            mach_angle(MachNumber::SONIC).unwrap().get::<degree>(),
            90.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            prandtl_meyer_angle(SpecificHeatRatio::AIR, MachNumber::SONIC)
                .unwrap()
                .get::<radian>(),
            0.0
        );
    }

    #[test]
    fn area_ratio_overflow_is_reported() -> ConstraintResult<()> {
        let g = SpecificHeatRatio::new(1.000_001)?;
        assert!(matches!(
            area_ratio(g, mach(50.0)),
            Err(FlowError::Overflow { .. })
        ));
        Ok(())
    }

    #[test]
    fn table_omits_undefined_relations() -> Result<(), FlowError> {
        let subsonic = IsentropicRatios::new(SpecificHeatRatio::AIR, mach(0.5))?;
        assert!(subsonic.mach_angle.is_none());
        assert!(subsonic.prandtl_meyer_angle.is_none());

        let labels: Vec<_> = subsonic.named().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            labels,
            ["M", "p/p0", "rho/rho0", "T/T0", "p/p*", "rho/rho*", "T/T*", "A/A*"]
        );

        let stagnant = IsentropicRatios::new(SpecificHeatRatio::AIR, mach(0.0))?;
        assert!(stagnant.area.is_none());
        Ok(())
    }

    #[test]
    fn table_is_deterministic() -> Result<(), FlowError> {
        let a = IsentropicRatios::new(SpecificHeatRatio::AIR, mach(2.3))?;
        let b = IsentropicRatios::new(SpecificHeatRatio::AIR, mach(2.3))?;

        for ((ka, va), (kb, vb)) in a.named().into_iter().zip(b.named()) {
            assert_eq!(ka, kb);
            assert_eq!(va.to_bits(), vb.to_bits());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn pressure_ratio_decreases_with_mach(
            gamma in 1.01_f64..2.0,
            m in 0.0_f64..10.0,
            dm in 1e-3_f64..1.0,
        ) {
            let g = SpecificHeatRatio::new(gamma).unwrap();
            prop_assert!(pressure_ratio(g, mach(m + dm)) < pressure_ratio(g, mach(m)));
        }

        #[test]
        fn area_ratio_is_minimal_at_the_throat(
            gamma in 1.01_f64..2.0,
            m in 0.05_f64..8.0,
        ) {
            let g = SpecificHeatRatio::new(gamma).unwrap();
            prop_assume!((m - 1.0).abs() > 1e-3);
            prop_assert!(area_ratio(g, mach(m)).unwrap() > 1.0);
        }
    }
}
