//! Mach number from the Prandtl-Meyer angle `ν`.

use std::f64::consts::PI;

use uom::si::angle::radian;

use crate::flow::{
    FlowError, SpecificHeatRatio,
    isentropic::{prandtl_meyer, prandtl_meyer_slope},
};
use crate::support::newton;

use super::{BisectionConfig, Inversion, RelationKind, SolveMethod, admissible, bracket};

/// Newton seed. `ν(2)` sits near the middle of the useful range for
/// diatomic gases.
const INITIAL_GUESS: f64 = 2.0;

/// Rejects angles outside `0 < ν < ν_max(γ)`.
pub(super) fn check(gamma: SpecificHeatRatio, nu: f64) -> Result<f64, FlowError> {
    let limit = gamma.prandtl_meyer_limit().get::<radian>();
    if nu > 0.0 && nu < limit {
        Ok(nu)
    } else {
        Err(RelationKind::PrandtlMeyerAngle.reject(nu))
    }
}

/// Newton-Raphson on `ν(M) − ν` from [`INITIAL_GUESS`].
///
/// # Errors
///
/// Fails with [`FlowError::NumericDomain`] if an iterate drops below `M = 1`,
/// where `ν(M)` is undefined, and with [`FlowError::NonConvergence`] if the
/// iteration budget runs out.
pub(super) fn newton(
    gamma: SpecificHeatRatio,
    nu: f64,
    config: &newton::Config,
) -> Result<Inversion, FlowError> {
    let g = *gamma;
    let solution = newton::solve(
        |m| prandtl_meyer(g, m) - nu,
        |m| prandtl_meyer_slope(g, m),
        INITIAL_GUESS,
        config,
    )?;

    if !solution.is_converged() {
        return Err(FlowError::NonConvergence {
            last: solution.x,
            iters: solution.iters,
        });
    }

    Ok(Inversion {
        mach: admissible(solution.x)?,
        method: SolveMethod::Newton,
        iters: solution.iters,
    })
}

/// Hall's composite rational approximation of the inverse.
///
/// The expansion in `y = (ν/ν_max)^(2/3)` matches the small-angle series at
/// `ν → 0` and the `M → ∞` asymptote at `ν → ν_max`.
pub(super) fn composite(gamma: SpecificHeatRatio, nu: f64) -> Result<Inversion, FlowError> {
    let g = *gamma;
    let lambda = ((g - 1.0) / (g + 1.0)).sqrt();
    let k0 = 4.0 / (3.0 * PI) * (1.0 + lambda.recip());
    let eta = (3.0 * PI / (2.0 * lambda + 2.0 * lambda * lambda)).powf(2.0 / 3.0);

    let a1 = 0.5 * eta;
    let a2 = (3.0 + 8.0 * lambda.powi(2)) / 40.0 * eta.powi(2);
    let a3 = (-1.0 + 328.0 * lambda.powi(2) + 104.0 * lambda.powi(4)) / 2800.0 * eta.powi(3);

    let ratio = (a3 - k0) / (a2 - k0);
    let d1 = a1 - 1.0 - ratio;
    let d2 = a2 - a1 - (a1 - 1.0) * ratio;
    let d3 = ratio * (a1 - k0) - a2 + k0;
    let e1 = -1.0 - ratio;
    let e2 = -1.0 - e1;

    let nu_max = 0.5 * PI * (lambda.recip() - 1.0);
    let y = (nu / nu_max).powf(2.0 / 3.0);

    let mach = (1.0 + d1 * y + d2 * y.powi(2) + d3 * y.powi(3)) / (1.0 + e1 * y + e2 * y.powi(2));
    Ok(Inversion {
        mach: admissible(mach)?,
        method: SolveMethod::Composite,
        iters: 0,
    })
}

/// Bisection on `ν(M)` over `[1, M_hi]`, doubling `M_hi` from 2 until it
/// brackets the target.
pub(super) fn bisect(
    gamma: SpecificHeatRatio,
    nu: f64,
    config: &BisectionConfig,
) -> Result<Inversion, FlowError> {
    let g = *gamma;
    let eval = |m: f64| -> Result<f64, FlowError> { Ok(prandtl_meyer(g, m)) };
    let hi = bracket::widen(eval, 2.0, 2.0, |value| value > nu)?;
    bracket::solve(eval, nu, [1.0, hi], config)
}
