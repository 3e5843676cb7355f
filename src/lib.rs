//! Evolutionary dynamics of continuous traits.
//!
//! Simulates a population of individuals, each described by a fixed number
//! of real-valued traits, under repeated cycles of:
//!
//! - **Fitness evaluation**: per-trait scores against a target vector
//!   (Gaussian, linear, uniform or identity strategy), summed per individual.
//! - **Selection**: fitness-proportionate (roulette wheel) sampling of
//!   parents, with clonal reproduction.
//! - **Mutation**: independent per-entry Gaussian perturbation.
//!
//! Every generation can be snapshotted into an append-only [`sim::History`],
//! which exposes trait-major views for external plotting.
//!
//! # Architecture
//!
//! The engine is single-threaded and synchronous. Randomness comes from a
//! seedable generator owned by the engine ([`random`]), so runs are
//! reproducible from [`sim::SimConfig::seed`]. All recoverable failures are
//! reported as [`SimError`] and leave the engine state unchanged.

pub mod error;
pub mod random;
pub mod sim;

pub use error::{SimError, SimResult};
