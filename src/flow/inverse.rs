//! Recovering the Mach number from a known flow quantity.
//!
//! [`InverseSolver::invert`] takes a [`RelationKind`], the gas's
//! [`SpecificHeatRatio`] and a value of that kind, and returns the Mach number
//! that produces it. The supplied value is checked against the kind's domain
//! before any formula is evaluated.
//!
//! | Kind | Method |
//! |---|---|
//! | stagnation `T/T0`, `p/p0`, `ρ/ρ0`; Mach angle | closed form |
//! | `p2/p1`, `ρ2/ρ1`, `T2/T1`, `M2` across a normal shock | closed form |
//! | Prandtl-Meyer angle | Newton from `M = 2`, or Hall's composite approximation |
//! | area ratio, either branch | Newton on a substituted variable |
//! | `p02/p01` across a normal shock | bisection |
//!
//! When a Newton solve fails, leaves the physical domain, or lands on the
//! wrong branch, the solver falls back to bisection on a bracket derived from
//! the relation's monotonicity. Set [`InverseConfig::fallback`] to `false` to
//! surface the Newton failure instead.
//!
//! # Example
//!
//! ```
//! use twine_gasdynamics::flow::{
//!     SpecificHeatRatio,
//!     inverse::{InverseSolver, RelationKind},
//! };
//!
//! let solver = InverseSolver::default();
//! let inversion = solver.invert(
//!     RelationKind::AreaRatioSupersonic,
//!     SpecificHeatRatio::AIR,
//!     1.6875,
//! )?;
//! assert!((*inversion.mach - 2.0).abs() < 1e-9);
//! # Ok::<(), twine_gasdynamics::flow::FlowError>(())
//! ```

mod area_ratio;
mod bracket;
mod kind;
mod method;
mod prandtl_meyer;

pub use kind::RelationKind;
pub use method::{PrandtlMeyerMethod, UnknownMethodError};

use std::f64::consts::FRAC_PI_2;

use tracing::debug;
use twine_solvers::equation::bisection;
use uom::si::{angle::radian, f64::Angle};

use crate::support::{
    constraint::{AboveOne, UnitIntervalOpen},
    newton,
};

use super::{
    FlowError, MachNumber, SpecificHeatRatio,
    error::{computed, finite},
    normal_shock,
};

use area_ratio::Regime;

/// Bisection settings for fallback and bracketed inversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the Mach number.
    pub x_abs_tol: f64,

    /// Relative tolerance on the Mach number.
    pub x_rel_tol: f64,

    /// Absolute tolerance on the relation residual.
    ///
    /// Zero by default: several relations take values many orders of
    /// magnitude below one, so only the Mach tolerances are meaningful.
    pub residual_tol: f64,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-13,
            residual_tol: 0.0,
        }
    }
}

impl BisectionConfig {
    /// Converts this configuration into a bisection solver configuration.
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.x_abs_tol,
            x_rel_tol: self.x_rel_tol,
            residual_tol: self.residual_tol,
        }
    }
}

/// Configuration of an [`InverseSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseConfig {
    pub newton: newton::Config,
    pub bisection: BisectionConfig,
    pub prandtl_meyer: PrandtlMeyerMethod,

    /// Whether a failed Newton solve falls back to bisection.
    pub fallback: bool,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            newton: newton::Config::default(),
            bisection: BisectionConfig::default(),
            prandtl_meyer: PrandtlMeyerMethod::default(),
            fallback: true,
        }
    }
}

/// How an [`Inversion`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMethod {
    ClosedForm,
    Newton,
    Composite,
    Bisection,
}

/// A recovered Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion {
    pub mach: MachNumber,
    pub method: SolveMethod,

    /// Iterations spent by the method that produced `mach`; zero for
    /// non-iterative methods.
    pub iters: usize,
}

impl Inversion {
    fn closed_form(mach: f64) -> Result<Self, FlowError> {
        Ok(Self {
            mach: admissible(mach)?,
            method: SolveMethod::ClosedForm,
            iters: 0,
        })
    }
}

/// Recovers Mach numbers from flow quantities.
///
/// The solver holds only its configuration, so a single instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InverseSolver {
    config: InverseConfig,
}

impl InverseSolver {
    #[must_use]
    pub fn new(config: InverseConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &InverseConfig {
        &self.config
    }

    /// Finds the Mach number at which `kind` takes `value`.
    ///
    /// Angles are in radians. The `Shock*` kinds return the upstream Mach
    /// number of a normal shock.
    ///
    /// # Errors
    ///
    /// - [`FlowError::InvalidInput`] if `value` lies outside the kind's
    ///   domain (see [`RelationKind::domain`]).
    /// - [`FlowError::Overflow`] if the Mach number exceeds the range of `f64`.
    /// - [`FlowError::NonConvergence`] or [`FlowError::NumericDomain`] if the
    ///   iterative methods fail.
    /// - [`FlowError::InvalidConfig`] for an unusable Newton config.
    pub fn invert(
        &self,
        kind: RelationKind,
        gamma: SpecificHeatRatio,
        value: f64,
    ) -> Result<Inversion, FlowError> {
        if !value.is_finite() {
            return Err(kind.reject(value));
        }
        let g = *gamma;

        let inversion = match kind {
            RelationKind::MachNumber => Inversion {
                mach: MachNumber::new(value).map_err(|_| kind.reject(value))?,
                method: SolveMethod::ClosedForm,
                iters: 0,
            },
            RelationKind::StagnationTemperatureRatio => {
                let r = unit_open(kind, value)?;
                stagnation(g, r.recip())?
            }
            RelationKind::StagnationPressureRatio => {
                let r = unit_open(kind, value)?;
                stagnation(g, r.powf((1.0 - g) / g))?
            }
            RelationKind::StagnationDensityRatio => {
                let r = unit_open(kind, value)?;
                stagnation(g, r.powf(1.0 - g))?
            }
            RelationKind::MachAngle => mach_from_mach_angle(value)?,
            RelationKind::PrandtlMeyerAngle => self.prandtl_meyer(gamma, value)?,
            RelationKind::AreaRatioSubsonic => self.area_ratio(gamma, value, Regime::Subsonic)?,
            RelationKind::AreaRatioSupersonic => {
                self.area_ratio(gamma, value, Regime::Supersonic)?
            }
            RelationKind::ShockStaticPressureRatio => {
                let ratio = above_one(kind, value)?;
                Inversion::closed_form(normal_shock::upstream_mach_from_pressure_ratio(
                    gamma, ratio,
                ))?
            }
            RelationKind::ShockDensityRatio => {
                let ratio = above_one(kind, value)?;
                if ratio >= normal_shock::limiting_density_ratio(gamma) {
                    return Err(kind.reject(value));
                }
                Inversion::closed_form(normal_shock::upstream_mach_from_density_ratio(
                    gamma, ratio,
                ))?
            }
            RelationKind::ShockTemperatureRatio => {
                let ratio = above_one(kind, value)?;
                Inversion::closed_form(normal_shock::upstream_mach_from_temperature_ratio(
                    gamma, ratio,
                ))?
            }
            RelationKind::ShockTotalPressureRatio => {
                // In log space, since p02/p01 underflows at high Mach for γ near one.
                let ln_ratio = unit_open(kind, value)?.ln();
                let eval = |m: f64| -> Result<f64, FlowError> {
                    Ok(normal_shock::ln_total_pressure_ratio(g, *admissible(m)?))
                };
                let hi = bracket::widen(eval, 2.0, 2.0, |ln_p| ln_p < ln_ratio)?;
                bracket::solve(eval, ln_ratio, [1.0, hi], &self.config.bisection)?
            }
            RelationKind::ShockDownstreamMach => {
                if !(value > normal_shock::limiting_downstream_mach(gamma) && value < 1.0) {
                    return Err(kind.reject(value));
                }
                Inversion::closed_form(normal_shock::upstream_mach_from_downstream_mach(
                    gamma, value,
                ))?
            }
        };

        debug!(
            %kind,
            value,
            mach = *inversion.mach,
            method = ?inversion.method,
            iters = inversion.iters,
            "inverted"
        );
        Ok(inversion)
    }

    /// Finds the supersonic Mach number with Mach angle `μ`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidInput`] unless `0 < μ < π/2`.
    pub fn from_mach_angle(mach_angle: Angle) -> Result<MachNumber, FlowError> {
        Ok(mach_from_mach_angle(mach_angle.get::<radian>())?.mach)
    }

    /// Finds the supersonic Mach number with Prandtl-Meyer angle `ν`.
    ///
    /// # Errors
    ///
    /// See [`invert`](Self::invert).
    pub fn from_prandtl_meyer_angle(
        &self,
        gamma: SpecificHeatRatio,
        prandtl_meyer_angle: Angle,
    ) -> Result<MachNumber, FlowError> {
        let inversion = self.invert(
            RelationKind::PrandtlMeyerAngle,
            gamma,
            prandtl_meyer_angle.get::<radian>(),
        )?;
        Ok(inversion.mach)
    }

    fn prandtl_meyer(&self, gamma: SpecificHeatRatio, nu: f64) -> Result<Inversion, FlowError> {
        let nu = prandtl_meyer::check(gamma, nu)?;
        match self.config.prandtl_meyer {
            PrandtlMeyerMethod::Composite => prandtl_meyer::composite(gamma, nu),
            PrandtlMeyerMethod::Newton => self.with_fallback(
                RelationKind::PrandtlMeyerAngle,
                nu,
                prandtl_meyer::newton(gamma, nu, &self.config.newton),
                |config| prandtl_meyer::bisect(gamma, nu, config),
            ),
        }
    }

    fn area_ratio(
        &self,
        gamma: SpecificHeatRatio,
        area: f64,
        regime: Regime,
    ) -> Result<Inversion, FlowError> {
        let kind = match regime {
            Regime::Subsonic => RelationKind::AreaRatioSubsonic,
            Regime::Supersonic => RelationKind::AreaRatioSupersonic,
        };
        let area = above_one(kind, area)?;
        self.with_fallback(
            kind,
            area,
            area_ratio::newton(gamma, area, regime, &self.config.newton),
            |config| area_ratio::bisect(gamma, area, regime, config),
        )
    }

    fn with_fallback(
        &self,
        kind: RelationKind,
        value: f64,
        attempt: Result<Inversion, FlowError>,
        bisect: impl FnOnce(&BisectionConfig) -> Result<Inversion, FlowError>,
    ) -> Result<Inversion, FlowError> {
        match attempt {
            Ok(inversion) => Ok(inversion),
            Err(err @ FlowError::InvalidConfig(_)) => Err(err),
            Err(err) if !self.config.fallback => Err(err),
            Err(err) => {
                debug!(%kind, value, error = %err, "newton failed, falling back to bisection");
                bisect(&self.config.bisection)
            }
        }
    }
}

/// Finds the Mach number at which `kind` takes `value`, with the default
/// [`InverseSolver`].
///
/// # Errors
///
/// See [`InverseSolver::invert`].
pub fn invert(
    kind: RelationKind,
    gamma: SpecificHeatRatio,
    value: f64,
) -> Result<MachNumber, FlowError> {
    Ok(InverseSolver::default().invert(kind, gamma, value)?.mach)
}

/// `M = 1/sin(μ)`, the same for every gas.
fn mach_from_mach_angle(mu: f64) -> Result<Inversion, FlowError> {
    if !(mu > 0.0 && mu < FRAC_PI_2) {
        return Err(RelationKind::MachAngle.reject(mu));
    }
    Inversion::closed_form(mu.sin().recip())
}

/// `M = sqrt(2/(γ−1) · (factor − 1))` for the stagnation ratios, where
/// `factor` is `T0/T` expressed through the supplied ratio.
fn stagnation(g: f64, factor: f64) -> Result<Inversion, FlowError> {
    let factor = finite(factor, "stagnation factor")?;
    Inversion::closed_form((2.0 / (g - 1.0) * (factor - 1.0)).sqrt())
}

fn unit_open(kind: RelationKind, value: f64) -> Result<f64, FlowError> {
    UnitIntervalOpen::new(value)
        .map(|ratio| ratio.into_inner())
        .map_err(|_| kind.reject(value))
}

fn above_one(kind: RelationKind, value: f64) -> Result<f64, FlowError> {
    AboveOne::new(value)
        .map(|ratio| ratio.into_inner())
        .map_err(|_| kind.reject(value))
}

/// Wraps a computed Mach number, reporting infinities as overflow.
fn admissible(mach: f64) -> Result<MachNumber, FlowError> {
    MachNumber::new(finite(mach, "M")?).map_err(computed("M"))
}
