//! Wall lubrication force models.

use std::fmt::Debug;

use phasic_core::{
    PhasePair,
    field::{SurfaceScalarField, VolVectorField},
};
use serde::{Deserialize, Serialize};

use crate::{ModelError, SpecError, error::finite_vector};

/// Capability of computing the force pushing dispersed elements off walls.
pub trait WallLubricationModel: Debug + Send + Sync {
    /// Returns the wall lubrication force density [N/m³] on the dispersed phase.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the force cannot be evaluated.
    fn f(&self, pair: &PhasePair<'_>) -> Result<VolVectorField, ModelError>;

    /// Returns the face flux `F_f · S_f` of the wall lubrication force.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the force cannot be evaluated.
    fn ff(&self, pair: &PhasePair<'_>) -> Result<SurfaceScalarField, ModelError> {
        Ok(pair.mesh().flux(&self.f(pair)?))
    }
}

/// The Antal et al. wall lubrication force.
///
/// ```text
/// F = α_d · ρ_c · max(0, Cw1/d + Cw2/y_w) · |U_r − (U_r·n) n|² · n
/// ```
///
/// where `n` is the wall normal and `y_w` the wall distance. `Cw1` is usually
/// negative, so the force switches off a few diameters from the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antal {
    cw1: f64,
    cw2: f64,
}

impl Antal {
    const NAME: &'static str = "Antal wall lubrication";

    /// Creates the model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if either coefficient is not finite.
    pub fn new(cw1: f64, cw2: f64) -> Result<Self, SpecError> {
        Ok(Self {
            cw1: SpecError::check_finite(Self::NAME, "cw1", cw1)?,
            cw2: SpecError::check_finite(Self::NAME, "cw2", cw2)?,
        })
    }
}

impl WallLubricationModel for Antal {
    fn f(&self, pair: &PhasePair<'_>) -> Result<VolVectorField, ModelError> {
        let mesh = pair.mesh();
        let normal = mesh.wall_normal();
        let ur = pair.relative_velocity();

        let tangential = &ur - &normal.scaled(&ur.dot(normal));
        let d = pair.dispersed().d();
        let strength = mesh
            .wall_distance()
            .map(|y| (self.cw1 / d + self.cw2 / y).max(0.0));

        let magnitude = pair.dispersed().alpha() * pair.continuous().rho()
            * &strength
            * &tangential.mag_sqr();
        finite_vector(normal.scaled(&magnitude), Self::NAME, "wall lubrication force")
    }
}

/// Configuration of a wall lubrication model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WallLubricationSpec {
    Antal { cw1: f64, cw2: f64 },
}

impl WallLubricationSpec {
    /// Instantiates the configured wall lubrication model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if a coefficient is invalid.
    pub fn build(&self) -> Result<Box<dyn WallLubricationModel>, SpecError> {
        match *self {
            Self::Antal { cw1, cw2 } => Ok(Box::new(Antal::new(cw1, cw2)?)),
        }
    }
}
