//! Relations across a stationary normal shock.
//!
//! Subscript 1 denotes the upstream state and subscript 2 the downstream
//! state. The formulas are evaluated as written for any `M1`; only upstream
//! Mach numbers of one or more describe a physical shock, and
//! [`NormalShock::new`] enforces that.
//!
//! The `upstream_mach_from_*` functions are the closed-form inverses used by
//! the inverse solver. They expect inputs already checked against their
//! domain.

use super::{FlowError, MachNumber, SpecificHeatRatio, error::finite};

/// Downstream Mach number, `M2`.
#[must_use]
pub fn downstream_mach(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    let (g, m2) = (*gamma, mach_squared(mach));
    (((g - 1.0) * m2 + 2.0) / (2.0 * g * m2 - (g - 1.0))).sqrt()
}

/// Static pressure ratio, `p2/p1`.
#[must_use]
pub fn pressure_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    let (g, m2) = (*gamma, mach_squared(mach));
    (2.0 * g * m2 - (g - 1.0)) / (g + 1.0)
}

/// Stagnation pressure ratio, `p02/p01`.
#[must_use]
pub fn total_pressure_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    ln_total_pressure_ratio(*gamma, *mach).exp()
}

/// Upstream static to downstream stagnation pressure ratio, `p1/p02`.
///
/// This is the Rayleigh pitot relation.
#[must_use]
pub fn static_to_total_pressure_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    ln_static_to_total_pressure_ratio(*gamma, *mach).exp()
}

/// Density ratio, `ρ2/ρ1`.
#[must_use]
pub fn density_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    let (g, m2) = (*gamma, mach_squared(mach));
    (g + 1.0) * m2 / ((g - 1.0) * m2 + 2.0)
}

/// Static temperature ratio, `T2/T1`.
#[must_use]
pub fn temperature_ratio(gamma: SpecificHeatRatio, mach: MachNumber) -> f64 {
    let (g, m2) = (*gamma, mach_squared(mach));
    (2.0 * g * m2 - (g - 1.0)) * ((g - 1.0) * m2 + 2.0) / ((g + 1.0).powi(2) * m2)
}

/// Upstream Mach number from the static pressure ratio `p2/p1`.
///
/// The pressure ratio is linear in `M1²`, so this inverse is exact.
#[must_use]
pub fn upstream_mach_from_pressure_ratio(gamma: SpecificHeatRatio, ratio: f64) -> f64 {
    let g = *gamma;
    ((ratio * (g + 1.0) + (g - 1.0)) / (2.0 * g)).sqrt()
}

/// Upstream Mach number from the density ratio `ρ2/ρ1`.
///
/// Requires `1 ≤ ρ2/ρ1 < (γ+1)/(γ−1)`, the strong-shock density limit.
#[must_use]
pub fn upstream_mach_from_density_ratio(gamma: SpecificHeatRatio, ratio: f64) -> f64 {
    let g = *gamma;
    (2.0 * ratio / ((g + 1.0) - ratio * (g - 1.0))).sqrt()
}

/// Upstream Mach number from the static temperature ratio `T2/T1`.
///
/// `T2/T1` is quadratic in `M1²`; the positive root is returned.
#[must_use]
pub fn upstream_mach_from_temperature_ratio(gamma: SpecificHeatRatio, ratio: f64) -> f64 {
    let g = *gamma;
    let a = 2.0 * g * (g - 1.0);
    let b = 4.0 * g - (g - 1.0).powi(2) - ratio * (g + 1.0).powi(2);
    let c = -2.0 * (g - 1.0);
    ((-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)).sqrt()
}

/// Upstream Mach number from the downstream Mach number `M2`.
///
/// The relation between `M1` and `M2` is symmetric, so this is the
/// [`downstream_mach`] formula applied to `M2`.
/// Requires `sqrt((γ−1)/(2γ)) < M2 ≤ 1`.
#[must_use]
pub fn upstream_mach_from_downstream_mach(gamma: SpecificHeatRatio, downstream: f64) -> f64 {
    let (g, m2) = (*gamma, downstream * downstream);
    (((g - 1.0) * m2 + 2.0) / (2.0 * g * m2 - (g - 1.0))).sqrt()
}

/// The lower bound of the downstream Mach number, reached as `M1 → ∞`.
#[must_use]
pub fn limiting_downstream_mach(gamma: SpecificHeatRatio) -> f64 {
    let g = *gamma;
    ((g - 1.0) / (2.0 * g)).sqrt()
}

/// The upper bound of the density ratio, reached as `M1 → ∞`.
#[must_use]
pub fn limiting_density_ratio(gamma: SpecificHeatRatio) -> f64 {
    let g = *gamma;
    (g + 1.0) / (g - 1.0)
}

/// A resolved normal shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalShock {
    pub upstream_mach: MachNumber,
    pub downstream_mach: MachNumber,
    /// `p2/p1`
    pub pressure: f64,
    /// `p02/p01`
    pub total_pressure: f64,
    /// `p1/p02`
    pub static_to_total_pressure: f64,
    /// `ρ2/ρ1`
    pub density: f64,
    /// `T2/T1`
    pub temperature: f64,
}

impl NormalShock {
    /// Resolves the shock for an upstream Mach number `M1 ≥ 1`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidInput`] for subsonic upstream flow and
    /// [`FlowError::Overflow`] if a ratio exceeds the range of `f64`.
    ///
    /// # Example
    ///
    /// ```
    /// use twine_gasdynamics::flow::{MachNumber, SpecificHeatRatio, normal_shock::NormalShock};
    ///
    /// let shock = NormalShock::new(SpecificHeatRatio::AIR, MachNumber::new(2.0)?)?;
    /// assert!((shock.pressure - 4.5).abs() < 1e-12);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(gamma: SpecificHeatRatio, upstream_mach: MachNumber) -> Result<Self, FlowError> {
        if *upstream_mach < 1.0 {
            return Err(FlowError::invalid(
                "M1",
                *upstream_mach,
                "a normal shock requires supersonic upstream flow, M1 >= 1",
            ));
        }

        let downstream_mach = MachNumber::new(finite(downstream_mach(gamma, upstream_mach), "M2")?)
            .map_err(super::error::computed("M2"))?;

        Ok(Self {
            upstream_mach,
            downstream_mach,
            pressure: finite(pressure_ratio(gamma, upstream_mach), "p2/p1")?,
            total_pressure: finite(total_pressure_ratio(gamma, upstream_mach), "p02/p01")?,
            static_to_total_pressure: finite(
                static_to_total_pressure_ratio(gamma, upstream_mach),
                "p1/p02",
            )?,
            density: finite(density_ratio(gamma, upstream_mach), "rho2/rho1")?,
            temperature: finite(temperature_ratio(gamma, upstream_mach), "T2/T1")?,
        })
    }

    /// Labelled values in display order.
    #[must_use]
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("M1", *self.upstream_mach),
            ("M2", *self.downstream_mach),
            ("p2/p1", self.pressure),
            ("p02/p01", self.total_pressure),
            ("p1/p02", self.static_to_total_pressure),
            ("rho2/rho1", self.density),
            ("T2/T1", self.temperature),
        ]
    }
}

fn mach_squared(mach: MachNumber) -> f64 {
    *mach * *mach
}

/// `ln(p02/p01)`.
///
/// The two factors of `p02/p01` are raised to powers that grow without bound
/// as `γ → 1`, so the product underflows or overflows long before the ratio
/// itself leaves the range of `f64`. Their logarithms do not.
pub(crate) fn ln_total_pressure_ratio(g: f64, m: f64) -> f64 {
    let m2 = m * m;
    let compression = ((g + 1.0) * m2 / ((g - 1.0) * m2 + 2.0)).ln();
    let loss = ((g + 1.0) / (2.0 * g * m2 - (g - 1.0))).ln();
    (g * compression + loss) / (g - 1.0)
}

/// `ln(p1/p02)`.
fn ln_static_to_total_pressure_ratio(g: f64, m: f64) -> f64 {
    let m2 = m * m;
    let dynamic = ((g + 1.0) * m2 / 2.0).ln();
    let loss = ((g + 1.0) / (2.0 * g * m2 - (g - 1.0))).ln();
    -(g * dynamic + loss) / (g - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn mach(value: f64) -> MachNumber {
        MachNumber::new(value).unwrap()
    }

    #[test]
    fn air_at_mach_two() {
        let g = SpecificHeatRatio::AIR;
        let m = mach(2.0);

        assert_relative_eq!(downstream_mach(g, m), 0.577_350_26, max_relative = 1e-6);
        assert_relative_eq!(total_pressure_ratio(g, m), 0.720_873_86, max_relative = 1e-6);
        assert_relative_eq!(
            static_to_total_pressure_ratio(g, m),
            0.177_291_10,
            max_relative = 1e-6
        );
        assert_relative_eq!(pressure_ratio(g, m), 4.5, max_relative = 1e-12);
        assert_relative_eq!(density_ratio(g, m), 2.666_666_66, max_relative = 1e-6);
        assert_relative_eq!(temperature_ratio(g, m), 1.6875, max_relative = 1e-12);
    }

    #[test]
    fn sonic_shock_is_trivial() -> Result<(), FlowError> {
        let shock = NormalShock::new(SpecificHeatRatio::AIR, MachNumber::SONIC)?;

        assert_relative_eq!(*shock.downstream_mach, 1.0, max_relative = 1e-12);
        assert_relative_eq!(shock.pressure, 1.0, max_relative = 1e-12);
        assert_relative_eq!(shock.total_pressure, 1.0, max_relative = 1e-12);
        assert_relative_eq!(shock.density, 1.0, max_relative = 1e-12);
        assert_relative_eq!(shock.temperature, 1.0, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn subsonic_upstream_is_rejected() {
        assert!(matches!(
            NormalShock::new(SpecificHeatRatio::AIR, mach(0.9)),
            Err(FlowError::InvalidInput { quantity: "M1", .. })
        ));
    }

    #[test]
    fn closed_form_inverses_at_mach_two() {
        let g = SpecificHeatRatio::AIR;
        let m = mach(2.0);

        assert_relative_eq!(
            upstream_mach_from_pressure_ratio(g, pressure_ratio(g, m)),
            2.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            upstream_mach_from_density_ratio(g, density_ratio(g, m)),
            2.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            upstream_mach_from_temperature_ratio(g, temperature_ratio(g, m)),
            2.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            upstream_mach_from_downstream_mach(g, downstream_mach(g, m)),
            2.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn strong_shock_limits() {
        let g = SpecificHeatRatio::AIR;
        let m = mach(1e4);

        assert_relative_eq!(
            downstream_mach(g, m),
            limiting_downstream_mach(g),
            max_relative = 1e-6
        );
        assert_relative_eq!(density_ratio(g, m), limiting_density_ratio(g), max_relative = 1e-6);
    }

    #[test]
    fn total_pressure_ratio_near_isothermal_limit() -> Result<(), FlowError> {
        // Each factor of p02/p01 leaves the range of f64 at this γ.
        let g = SpecificHeatRatio::new(1.001).unwrap();
        let shock = NormalShock::new(g, mach(3.0))?;

        assert_relative_eq!(shock.total_pressure, 0.106_360_673_5, max_relative = 1e-8);
        assert_relative_eq!(
            ln_total_pressure_ratio(1.01, 43.667_885_431_237),
            -100.0 * std::f64::consts::LN_10,
            max_relative = 1e-9
        );
        Ok(())
    }

    #[test]
    fn named_labels() -> Result<(), FlowError> {
        let shock = NormalShock::new(SpecificHeatRatio::AIR, mach(3.0))?;
        let labels: Vec<_> = shock.named().into_iter().map(|(k, _)| k).collect();
        assert_eq!(labels, ["M1", "M2", "p2/p1", "p02/p01", "p1/p02", "rho2/rho1", "T2/T1"]);
        Ok(())
    }

    proptest! {
        #[test]
        fn shock_decelerates_and_loses_total_pressure(
            gamma in 1.05_f64..1.8,
            m in 1.01_f64..8.0,
        ) {
            let g = SpecificHeatRatio::new(gamma).unwrap();
            let shock = NormalShock::new(g, mach(m)).unwrap();

            prop_assert!(*shock.downstream_mach < 1.0);
            prop_assert!(shock.total_pressure < 1.0);
            prop_assert!(shock.pressure > 1.0);
            prop_assert!(shock.temperature > 1.0);
        }
    }
}
