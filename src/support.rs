//! Supporting utilities shared across the crate.
//!
//! - [`constraint`]: Type-level numeric constraints checked at construction.
//! - [`newton`]: Scalar Newton-Raphson root finding.

pub mod constraint;
pub mod newton;
