//! Interfacial force models for the Phasic multiphase framework.
//!
//! Each force category has a capability trait, a set of concrete laws, and a
//! serde-deserializable `*Spec` enum that builds a boxed model from
//! configuration:
//!
//! | Category             | Trait                        | Result                 |
//! |----------------------|------------------------------|------------------------|
//! | drag                 | [`drag::DragModel`]          | coefficient `K`        |
//! | virtual mass         | [`virtual_mass::VirtualMassModel`] | coefficient `K`  |
//! | lift                 | [`lift::LiftModel`]          | force `F`              |
//! | wall lubrication     | [`wall_lubrication::WallLubricationModel`] | force `F` |
//! | turbulent dispersion | [`turbulent_dispersion::TurbulentDispersionModel`] | diffusivity `D` |
//!
//! A [`BlendedInterfacialModel`] combines up to three models of one category
//! for a pair of phases, weighted by a [`Blending`] method.

mod blended;
mod error;

pub mod blending;
pub mod drag;
pub mod lift;
pub mod turbulent_dispersion;
pub mod virtual_mass;
pub mod wall_lubrication;

pub use blended::{BlendedInterfacialModel, Regime};
pub use blending::{Blending, PairBlending};
pub use error::{ModelError, SpecError};
