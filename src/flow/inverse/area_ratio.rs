//! Mach number from the area ratio `A/A*`.
//!
//! Each branch substitutes a variable `X` in which the area relation is
//! nearly linear near the root:
//!
//! ```text
//! subsonic:   X = M²,     f(X) = (P + Q·X)^E − R·X,  R = (A/A*)²,          E = 1/Q
//! supersonic: X = 1/M²,   f(X) = (P·X + Q)^E − R·X,  R = (A/A*)^(2Q/P),    E = 1/P
//! ```
//!
//! with `P = 2/(γ+1)` and `Q = 1 − P`. Both residuals have the unit-slope
//! derivative `(·)^(E−1) − R`, and both roots lie in `0 < X < 1`.

use crate::flow::{FlowError, SpecificHeatRatio, error::finite, isentropic::area_ratio_unchecked};
use crate::support::newton;

use super::{BisectionConfig, Inversion, SolveMethod, admissible, bracket};

/// Which branch of the area relation to invert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Regime {
    Subsonic,
    Supersonic,
}

/// The substituted Newton iteration for one regime.
#[derive(Debug, Clone, Copy)]
struct Iteration {
    regime: Regime,
    p: f64,
    q: f64,
    r: f64,
    e: f64,
    /// Coefficient of the seed, `P^(1/Q)` or `Q^(1/P)`.
    a: f64,
}

impl Iteration {
    fn new(gamma: SpecificHeatRatio, area: f64, regime: Regime) -> Self {
        let p = 2.0 / (*gamma + 1.0);
        let q = 1.0 - p;
        match regime {
            Regime::Subsonic => Self {
                regime,
                p,
                q,
                r: area * area,
                e: 1.0 / q,
                a: p.powf(1.0 / q),
            },
            Regime::Supersonic => Self {
                regime,
                p,
                q,
                r: area.powf(2.0 * q / p),
                e: 1.0 / p,
                a: q.powf(1.0 / p),
            },
        }
    }

    fn seed(&self) -> f64 {
        let r = (self.r - 1.0) / (2.0 * self.a);
        1.0 / ((1.0 + r) + (r * (r + 2.0)).sqrt())
    }

    fn base(&self, x: f64) -> f64 {
        match self.regime {
            Regime::Subsonic => self.p + self.q * x,
            Regime::Supersonic => self.p * x + self.q,
        }
    }

    fn residual(&self, x: f64) -> f64 {
        self.base(x).powf(self.e) - self.r * x
    }

    fn slope(&self, x: f64) -> f64 {
        self.base(x).powf(self.e - 1.0) - self.r
    }

    fn mach(&self, x: f64) -> f64 {
        match self.regime {
            Regime::Subsonic => x.sqrt(),
            Regime::Supersonic => x.sqrt().recip(),
        }
    }
}

/// Newton iteration on the substituted variable.
///
/// # Errors
///
/// Fails with [`FlowError::NonConvergence`] if the iteration budget runs
/// out, and with [`FlowError::NumericDomain`] if an iterate leaves the
/// domain or the root lands on the wrong side of `M = 1`.
pub(super) fn newton(
    gamma: SpecificHeatRatio,
    area: f64,
    regime: Regime,
    config: &newton::Config,
) -> Result<Inversion, FlowError> {
    let iteration = Iteration::new(gamma, area, regime);
    let solution = newton::solve(
        |x| iteration.residual(x),
        |x| iteration.slope(x),
        iteration.seed(),
        config,
    )?;

    if !solution.is_converged() {
        return Err(FlowError::NonConvergence {
            last: iteration.mach(solution.x),
            iters: solution.iters,
        });
    }
    if !(solution.x > 0.0 && solution.x < 1.0) {
        return Err(FlowError::domain(format!(
            "area ratio iteration left the {regime:?} branch at X = {}",
            solution.x
        )));
    }

    Ok(Inversion {
        mach: admissible(iteration.mach(solution.x))?,
        method: SolveMethod::Newton,
        iters: solution.iters,
    })
}

/// Bisection on `A/A*(M)` within the regime's side of the throat.
pub(super) fn bisect(
    gamma: SpecificHeatRatio,
    area: f64,
    regime: Regime,
    config: &BisectionConfig,
) -> Result<Inversion, FlowError> {
    let g = *gamma;
    let eval = |m: f64| finite(area_ratio_unchecked(g, m), "A/A*");

    let bracket = match regime {
        Regime::Subsonic => [bracket::widen(eval, 0.5, 0.5, |value| value > area)?, 1.0],
        Regime::Supersonic => [1.0, bracket::widen(eval, 2.0, 2.0, |value| value > area)?],
    };

    bracket::solve(eval, area, bracket, config)
}
