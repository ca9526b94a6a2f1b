//! Interfacial momentum transfer for Eulerian multiphase phase systems.
//!
//! A [`PhaseSystem`] owns the phases of a simulation and a
//! [`MomentumTransfer`] aggregator built from a [`SystemConfig`]. The
//! aggregator keeps one [`ModelRegistry`] per force category, evaluates the
//! blended models of each phase pair against the current phase state, and
//! combines the results into per-phase coefficients, forces, fluxes, and
//! [`MomentumTransferMatrix`] terms for the pressure-velocity coupling.

mod cache;
mod error;
mod lazy;
mod matrix;
mod momentum_transfer;
mod phase_system;
mod registry;

pub mod config;

pub use cache::{CoefficientCache, CoefficientTable};
pub use config::{ForceCategory, ModelEntry, PhaseEntry, SystemConfig};
pub use error::{ConfigError, Error};
pub use lazy::LazyFieldList;
pub use matrix::{MomentumTransferMatrix, MomentumTransferTable};
pub use momentum_transfer::MomentumTransfer;
pub use phase_system::PhaseSystem;
pub use registry::{InterfacialModels, ModelRegistry};
