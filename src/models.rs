//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules. Each
//! [`twine_core::Model`] implementation is a thin adapter over the relations
//! and solvers in [`crate::flow`].

pub mod gas_dynamics;
