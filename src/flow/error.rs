use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::{constraint::ConstraintError, newton};

/// Errors returned by compressible flow relations and their inversions.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A supplied value lies outside the domain of the selected relation.
    #[error("{quantity} = {value} is outside its valid domain: {domain}")]
    InvalidInput {
        quantity: &'static str,
        value: f64,
        domain: &'static str,
    },

    /// A formula was evaluated outside the domain of its arithmetic.
    ///
    /// For example, an angle relation called with a subsonic Mach number, or
    /// an area ratio at zero Mach number.
    #[error("numeric domain error: {context}")]
    NumericDomain { context: String },

    /// An intermediate or final value grew beyond the range of `f64`.
    #[error("input too large: {context}")]
    Overflow { context: String },

    /// An iterative solve exhausted its iteration budget.
    #[error("solver did not converge after {iters} iterations: last value {last}")]
    NonConvergence { last: f64, iters: usize },

    /// A solver was configured with unusable settings.
    #[error("invalid solver config: {0}")]
    InvalidConfig(&'static str),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),
}

impl FlowError {
    pub(crate) fn invalid(quantity: &'static str, value: f64, domain: &'static str) -> Self {
        Self::InvalidInput {
            quantity,
            value,
            domain,
        }
    }

    pub(crate) fn domain(context: impl Into<String>) -> Self {
        Self::NumericDomain {
            context: context.into(),
        }
    }
}

impl From<newton::Error> for FlowError {
    fn from(err: newton::Error) -> Self {
        match err {
            newton::Error::InvalidConfig(reason) => Self::InvalidConfig(reason),
            newton::Error::ZeroDerivative { .. } | newton::Error::NonFinite { .. } => {
                Self::domain(err.to_string())
            }
        }
    }
}

/// Rejects `NaN` as a domain error and infinities as overflow.
pub(crate) fn finite(value: f64, what: &str) -> Result<f64, FlowError> {
    if value.is_nan() {
        Err(FlowError::domain(format!("{what} is not a number")))
    } else if value.is_infinite() {
        Err(FlowError::Overflow {
            context: format!("{what} exceeds the range of f64"),
        })
    } else {
        Ok(value)
    }
}

/// Maps a constraint failure on a computed value to a domain error.
pub(crate) fn computed(what: &'static str) -> impl FnOnce(ConstraintError) -> FlowError {
    move |err| FlowError::domain(format!("computed {what}: {err}"))
}
