//! Turbulent dispersion models.
//!
//! A turbulent dispersion model supplies a diffusivity `D` [kg/m/s²]; the
//! resulting force on the dispersed phase is `−D ∇α_d`.

use std::fmt::Debug;

use phasic_core::{PhasePair, field::VolScalarField};
use serde::{Deserialize, Serialize};

use crate::{ModelError, SpecError, error::finite_scalar};

/// Capability of computing a turbulent dispersion diffusivity.
pub trait TurbulentDispersionModel: Debug + Send + Sync {
    /// Returns the diffusivity `D` in every cell.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the diffusivity cannot be evaluated.
    fn d(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError>;
}

/// Dispersion proportional to the dispersed fraction: `D = Ctd · α_d · ρ_c · k_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDispersion {
    ctd: f64,
}

impl ConstantDispersion {
    const NAME: &'static str = "constant turbulent dispersion";

    /// Creates the model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if `ctd` is negative or not finite.
    pub fn new(ctd: f64) -> Result<Self, SpecError> {
        let ctd = SpecError::check_non_negative(Self::NAME, "ctd", ctd)?;
        Ok(Self { ctd })
    }
}

impl TurbulentDispersionModel for ConstantDispersion {
    fn d(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError> {
        let continuous = pair.continuous();
        let d = pair.dispersed().alpha()
            * continuous.turbulent_kinetic_energy()
            * (self.ctd * continuous.rho());
        finite_scalar(d, Self::NAME, "turbulent diffusivity")
    }
}

/// The Lopez de Bertodano model: `D = Ctd · ρ_c · k_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LopezDeBertodano {
    ctd: f64,
}

impl LopezDeBertodano {
    const NAME: &'static str = "Lopez de Bertodano turbulent dispersion";

    /// Creates the model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if `ctd` is negative or not finite.
    pub fn new(ctd: f64) -> Result<Self, SpecError> {
        let ctd = SpecError::check_non_negative(Self::NAME, "ctd", ctd)?;
        Ok(Self { ctd })
    }
}

impl TurbulentDispersionModel for LopezDeBertodano {
    fn d(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError> {
        let continuous = pair.continuous();
        let d = continuous.turbulent_kinetic_energy() * (self.ctd * continuous.rho());
        finite_scalar(d, Self::NAME, "turbulent diffusivity")
    }
}

/// Configuration of a turbulent dispersion model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurbulentDispersionSpec {
    ConstantCoefficient { ctd: f64 },
    LopezDeBertodano { ctd: f64 },
}

impl TurbulentDispersionSpec {
    /// Instantiates the configured turbulent dispersion model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if a coefficient is invalid.
    pub fn build(&self) -> Result<Box<dyn TurbulentDispersionModel>, SpecError> {
        Ok(match *self {
            Self::ConstantCoefficient { ctd } => Box::new(ConstantDispersion::new(ctd)?),
            Self::LopezDeBertodano { ctd } => Box::new(LopezDeBertodano::new(ctd)?),
        })
    }
}
