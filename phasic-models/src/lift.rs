//! Lift force models.

use std::fmt::Debug;

use phasic_core::{
    PhasePair,
    field::{SurfaceScalarField, VolVectorField},
};
use serde::{Deserialize, Serialize};

use crate::{ModelError, SpecError, error::finite_vector};

/// Capability of computing the lift force on the dispersed phase.
pub trait LiftModel: Debug + Send + Sync {
    /// Returns the lift force density [N/m³] on the dispersed phase.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the force cannot be evaluated.
    fn f(&self, pair: &PhasePair<'_>) -> Result<VolVectorField, ModelError>;

    /// Returns the face flux `F_f · S_f` of the lift force.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the force cannot be evaluated.
    fn ff(&self, pair: &PhasePair<'_>) -> Result<SurfaceScalarField, ModelError> {
        Ok(pair.mesh().flux(&self.f(pair)?))
    }
}

/// Lift with a constant coefficient: `F = −Cl · ρ_c · α_d · (U_r × ∇×U_c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLift {
    cl: f64,
}

impl ConstantLift {
    const NAME: &'static str = "constant lift";

    /// Creates the model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if `cl` is negative or not finite.
    pub fn new(cl: f64) -> Result<Self, SpecError> {
        let cl = SpecError::check_non_negative(Self::NAME, "cl", cl)?;
        Ok(Self { cl })
    }
}

impl LiftModel for ConstantLift {
    fn f(&self, pair: &PhasePair<'_>) -> Result<VolVectorField, ModelError> {
        let continuous = pair.continuous();
        let vorticity = pair.mesh().curl(continuous.velocity());
        let coefficient = pair.dispersed().alpha() * (-self.cl * continuous.rho());

        let force = pair.relative_velocity().cross(&vorticity).scaled(&coefficient);
        finite_vector(force, Self::NAME, "lift force")
    }
}

/// Configuration of a lift model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiftSpec {
    ConstantCoefficient { cl: f64 },
}

impl LiftSpec {
    /// Instantiates the configured lift model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if a coefficient is invalid.
    pub fn build(&self) -> Result<Box<dyn LiftModel>, SpecError> {
        match *self {
            Self::ConstantCoefficient { cl } => Ok(Box::new(ConstantLift::new(cl)?)),
        }
    }
}
