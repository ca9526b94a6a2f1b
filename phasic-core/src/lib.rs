//! Fields, meshes, and phases for the Phasic multiphase framework.
//!
//! This crate provides the collaborators that interfacial force models are
//! evaluated against:
//!
//! - [`field`]: scalar and vector fields over cells or faces
//! - [`Mesh`]: a minimal finite-volume mesh with interpolation, gradient,
//!   curl, and wall-distance operators
//! - [`Phase`] and [`PhaseSet`]: phases, their properties, and their fields
//! - [`PhasePairKey`]: the order-aware key used to look up pair models
//! - [`PhasePair`]: a dispersed/continuous view of two phases

mod fraction;
mod pair;
mod phase;

pub mod field;
pub mod mesh;

pub use fraction::{Fraction, FractionError};
pub use mesh::{Mesh, MeshError, WallPatches};
pub use pair::{PairKeyError, PhasePair, PhasePairKey};
pub use phase::{Phase, PhaseError, PhaseProperties, PhaseSet};
