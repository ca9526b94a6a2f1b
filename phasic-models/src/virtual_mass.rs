//! Virtual (added) mass models.

use std::fmt::Debug;

use phasic_core::{
    PhasePair,
    field::{SurfaceScalarField, VolScalarField},
};
use serde::{Deserialize, Serialize};

use crate::{ModelError, SpecError, error::finite_scalar};

/// Capability of computing a virtual mass coefficient.
///
/// The coefficient multiplies the relative acceleration of the pair, so the
/// force on the dispersed phase is `K · (DU_c/Dt − DU_d/Dt)`.
pub trait VirtualMassModel: Debug + Send + Sync {
    /// Returns the virtual mass coefficient `K` [kg/m³] in every cell.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the coefficient cannot be evaluated.
    fn k(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError>;

    /// Returns the virtual mass coefficient on faces.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the coefficient cannot be evaluated.
    fn kf(&self, pair: &PhasePair<'_>) -> Result<SurfaceScalarField, ModelError> {
        Ok(pair.mesh().interpolate(&self.k(pair)?))
    }
}

/// A constant virtual mass coefficient: `K = Cvm · α_d · ρ_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVirtualMass {
    cvm: f64,
}

impl ConstantVirtualMass {
    const NAME: &'static str = "constant virtual mass";

    /// Creates the model; spheres have `Cvm = 0.5`.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if `cvm` is negative or not finite.
    pub fn new(cvm: f64) -> Result<Self, SpecError> {
        let cvm = SpecError::check_non_negative(Self::NAME, "cvm", cvm)?;
        Ok(Self { cvm })
    }

    #[must_use]
    pub fn cvm(&self) -> f64 {
        self.cvm
    }
}

impl VirtualMassModel for ConstantVirtualMass {
    fn k(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError> {
        let k = pair.dispersed().alpha() * (self.cvm * pair.continuous().rho());
        finite_scalar(k, Self::NAME, "virtual mass coefficient")
    }
}

/// Configuration of a virtual mass model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VirtualMassSpec {
    ConstantCoefficient { cvm: f64 },
}

impl VirtualMassSpec {
    /// Instantiates the configured virtual mass model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if a coefficient is invalid.
    pub fn build(&self) -> Result<Box<dyn VirtualMassModel>, SpecError> {
        match *self {
            Self::ConstantCoefficient { cvm } => Ok(Box::new(ConstantVirtualMass::new(cvm)?)),
        }
    }
}
