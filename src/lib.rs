//! # Twine Gas Dynamics
//!
//! Compressible flow relations for a calorically perfect gas, with
//! [Twine](https://github.com/isentropic-dev/twine) models on top.
//!
//! ## Crate layout
//!
//! - [`flow`]: Isentropic, normal shock and oblique shock relations, and the
//!   inverse solver that recovers a Mach number from any of them.
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by the relations and models.
//!
//! ## Example
//!
//! ```
//! use twine_gasdynamics::flow::{
//!     MachNumber, SpecificHeatRatio,
//!     inverse::{self, RelationKind},
//!     isentropic,
//! };
//!
//! let gamma = SpecificHeatRatio::AIR;
//! let mach = inverse::invert(RelationKind::AreaRatioSupersonic, gamma, 1.6875)?;
//! assert!((*mach - 2.0).abs() < 1e-9);
//!
//! let p = isentropic::pressure_ratio(gamma, MachNumber::new(2.0)?);
//! assert!((p - 0.127_804_52).abs() < 1e-8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Diagnostics
//!
//! Iterative solves emit [`tracing`] events: `trace` per Newton step and
//! `debug` when a solve finishes or falls back to bisection. The crate never
//! installs a subscriber.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod flow;
pub mod models;
pub mod support;
