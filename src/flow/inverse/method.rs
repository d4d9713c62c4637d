use std::{fmt, str::FromStr};

use thiserror::Error;

/// How a Prandtl-Meyer angle is inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrandtlMeyerMethod {
    /// Newton-Raphson on `ν(M) − ν` from `M = 2`, exact to solver tolerance.
    #[default]
    Newton,
    /// Hall's composite rational approximation.
    ///
    /// Non-iterative. Within about 0.05% for air; the error grows as `γ`
    /// approaches one.
    Composite,
}

/// A method name that is neither `"newton"` nor `"composite"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown Prandtl-Meyer inversion method {0:?}, expected \"newton\" or \"composite\"")]
pub struct UnknownMethodError(pub String);

impl FromStr for PrandtlMeyerMethod {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newton" => Ok(Self::Newton),
            "composite" => Ok(Self::Composite),
            _ => Err(UnknownMethodError(s.to_owned())),
        }
    }
}

impl fmt::Display for PrandtlMeyerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Newton => "newton",
            Self::Composite => "composite",
        })
    }
}
