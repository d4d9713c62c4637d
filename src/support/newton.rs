//! Scalar Newton-Raphson root finding.
//!
//! [`solve`] drives `f(x)` toward zero from a caller-supplied initial guess
//! using an analytic derivative `f'(x)`:
//!
//! ```text
//! x ← x − f(x) / f'(x)
//! ```
//!
//! Iteration stops as soon as a step is smaller than
//! [`Config::x_abs_tol`], or after [`Config::max_iters`] steps. The returned
//! [`Solution`] always says which of the two happened, so callers never
//! mistake an exhausted iteration budget for a converged root.
//!
//! There is no bracketing and no fallback here. A zero derivative or a
//! non-finite step ends the solve with an [`Error`]; deciding what to do next
//! is up to the caller.
//!
//! # Example
//!
//! ```
//! use twine_gasdynamics::support::newton::{self, Status};
//!
//! let solution = newton::solve(|x| x * x - 2.0, |x| 2.0 * x, 1.0, &newton::Config::default())
//!     .unwrap();
//!
//! assert_eq!(solution.status, Status::Converged);
//! assert!((solution.x - 2.0_f64.sqrt()).abs() < 1e-12);
//! ```

use thiserror::Error;
use tracing::{debug, trace};

/// Newton-Raphson solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of Newton steps.
    pub max_iters: usize,

    /// Absolute step size below which the iteration is considered converged.
    pub x_abs_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-11,
        }
    }
}

impl Config {
    /// Checks that the configuration can drive a solve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `max_iters` is zero or the
    /// tolerance is not a finite positive number.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_iters == 0 {
            return Err(Error::InvalidConfig("max_iters must be at least 1"));
        }
        if !(self.x_abs_tol.is_finite() && self.x_abs_tol > 0.0) {
            return Err(Error::InvalidConfig("x_abs_tol must be finite and positive"));
        }
        Ok(())
    }
}

/// How a Newton solve terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The last step was smaller than the tolerance.
    Converged,
    /// The iteration budget ran out before a step met the tolerance.
    MaxIters,
}

/// Final state of a Newton solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub status: Status,

    /// Last iterate.
    pub x: f64,

    /// Function value at `x`.
    pub residual: f64,

    /// Number of Newton steps taken.
    pub iters: usize,
}

impl Solution {
    /// Returns `true` if the solve met its tolerance.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}

/// Errors that end a Newton solve early.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("zero derivative at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("non-finite step at x = {x} after {iters} iterations")]
    NonFinite { x: f64, iters: usize },
}

/// Finds a root of `f` starting from `x0`.
///
/// # Errors
///
/// Returns an [`Error`] if the configuration is invalid, the derivative
/// vanishes at an iterate, or an iterate produces a non-finite step (for
/// example when `f` is evaluated outside its domain and yields `NaN`).
pub fn solve(
    f: impl Fn(f64) -> f64,
    df: impl Fn(f64) -> f64,
    x0: f64,
    config: &Config,
) -> Result<Solution, Error> {
    config.validate()?;

    let mut x = x0;
    for iter in 1..=config.max_iters {
        let slope = df(x);
        if slope == 0.0 {
            return Err(Error::ZeroDerivative { x });
        }

        let step = f(x) / slope;
        if !step.is_finite() {
            return Err(Error::NonFinite { x, iters: iter - 1 });
        }

        x -= step;
        trace!(iter, x, step, "newton step");

        if step.abs() < config.x_abs_tol {
            debug!(iters = iter, x, "newton converged");
            return Ok(Solution {
                status: Status::Converged,
                x,
                residual: f(x),
                iters: iter,
            });
        }
    }

    debug!(iters = config.max_iters, x, "newton hit iteration limit");
    Ok(Solution {
        status: Status::MaxIters,
        x,
        residual: f(x),
        iters: config.max_iters,
    })
}
