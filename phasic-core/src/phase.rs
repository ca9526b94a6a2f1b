use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::f64::{DynamicViscosity, Length, MassDensity};

use crate::{
    Fraction, Mesh, PhasePair,
    field::{VolScalarField, VolVectorField},
};

/// Constant material properties of a phase.
///
/// Quantities deserialize from their SI base-unit values, so `density = 1000.0`
/// in a configuration file means 1000 kg/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseProperties {
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    /// Characteristic diameter of the phase when it is dispersed.
    pub diameter: Length,
    #[serde(default = "default_residual_alpha")]
    pub residual_alpha: Fraction,
}

fn default_residual_alpha() -> Fraction {
    Fraction::RESIDUAL
}

impl PhaseProperties {
    /// Checks that every physical property is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::InvalidProperty`] naming the first offending
    /// property of `phase`.
    pub fn validate(&self, phase: &str) -> Result<(), PhaseError> {
        let properties = [
            ("density", self.density.value),
            ("viscosity", self.viscosity.value),
            ("diameter", self.diameter.value),
        ];
        match properties
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((property, value)) => Err(PhaseError::InvalidProperty {
                phase: phase.to_owned(),
                property,
                value,
            }),
            None => Ok(()),
        }
    }
}

/// One phase of a multiphase system and the fields the force models read.
///
/// The velocity and acceleration fields are owned by the surrounding solver,
/// which updates them through the setters between outer iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    name: String,
    index: usize,
    properties: PhaseProperties,
    alpha: VolScalarField,
    velocity: VolVectorField,
    acceleration: VolVectorField,
    turbulent_kinetic_energy: VolScalarField,
}

impl Phase {
    /// Creates a phase at rest with zero volume fraction on `n_cells` cells.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        index: usize,
        properties: PhaseProperties,
        n_cells: usize,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            properties,
            alpha: VolScalarField::zeros(n_cells),
            velocity: VolVectorField::zeros(n_cells),
            acceleration: VolVectorField::zeros(n_cells),
            turbulent_kinetic_energy: VolScalarField::zeros(n_cells),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position of this phase in its [`PhaseSet`].
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn properties(&self) -> &PhaseProperties {
        &self.properties
    }

    /// Returns the volume fraction `α`.
    #[must_use]
    pub fn alpha(&self) -> &VolScalarField {
        &self.alpha
    }

    /// Returns the velocity `U`.
    #[must_use]
    pub fn velocity(&self) -> &VolVectorField {
        &self.velocity
    }

    /// Returns the material acceleration `DU/Dt`.
    #[must_use]
    pub fn acceleration(&self) -> &VolVectorField {
        &self.acceleration
    }

    /// Returns the turbulent kinetic energy `k` supplied by the turbulence model.
    #[must_use]
    pub fn turbulent_kinetic_energy(&self) -> &VolScalarField {
        &self.turbulent_kinetic_energy
    }

    /// Returns the density in kg/m³.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.properties.density.value
    }

    /// Returns the dynamic viscosity in Pa·s.
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.properties.viscosity.value
    }

    /// Returns the kinematic viscosity in m²/s.
    #[must_use]
    pub fn nu(&self) -> f64 {
        self.mu() / self.rho()
    }

    /// Returns the dispersed diameter in m.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.properties.diameter.value
    }

    #[must_use]
    pub fn residual_alpha(&self) -> f64 {
        self.properties.residual_alpha.get()
    }

    /// Replaces the material properties.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::InvalidProperty`] if a property is not finite
    /// and positive. The current properties are kept in that case.
    pub fn set_properties(&mut self, properties: PhaseProperties) -> Result<(), PhaseError> {
        properties.validate(&self.name)?;
        self.properties = properties;
        Ok(())
    }

    /// Replaces the volume fraction field.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::FieldLength`] if the field length differs from
    /// the current one.
    pub fn set_alpha(&mut self, alpha: VolScalarField) -> Result<(), PhaseError> {
        self.check_len("alpha", alpha.len())?;
        self.alpha = alpha;
        Ok(())
    }

    /// Replaces the velocity field.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::FieldLength`] if the field length differs from
    /// the current one.
    pub fn set_velocity(&mut self, velocity: VolVectorField) -> Result<(), PhaseError> {
        self.check_len("velocity", velocity.len())?;
        self.velocity = velocity;
        Ok(())
    }

    /// Replaces the material acceleration field.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::FieldLength`] if the field length differs from
    /// the current one.
    pub fn set_acceleration(&mut self, acceleration: VolVectorField) -> Result<(), PhaseError> {
        self.check_len("acceleration", acceleration.len())?;
        self.acceleration = acceleration;
        Ok(())
    }

    /// Replaces the turbulent kinetic energy field.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::FieldLength`] if the field length differs from
    /// the current one.
    pub fn set_turbulent_kinetic_energy(&mut self, k: VolScalarField) -> Result<(), PhaseError> {
        self.check_len("turbulent kinetic energy", k.len())?;
        self.turbulent_kinetic_energy = k;
        Ok(())
    }

    fn check_len(&self, field: &'static str, found: usize) -> Result<(), PhaseError> {
        let expected = self.alpha.len();
        if found == expected {
            Ok(())
        } else {
            Err(PhaseError::FieldLength {
                phase: self.name.clone(),
                field,
                expected,
                found,
            })
        }
    }
}

/// The phases of a system together with the mesh they live on.
///
/// Phase `i` in the set always reports `index() == i`, so per-phase lists can
/// be indexed by [`Phase::index`].
#[derive(Debug, Clone)]
pub struct PhaseSet {
    mesh: Mesh,
    phases: Vec<Phase>,
}

impl PhaseSet {
    /// Creates a phase set, checking names, indices, and field sizes.
    ///
    /// # Errors
    ///
    /// Returns a [`PhaseError`] if two phases share a name, if a phase's index
    /// does not match its position, if a phase's fields do not have one
    /// value per mesh cell, or if its properties are not physical.
    pub fn new(mesh: Mesh, phases: Vec<Phase>) -> Result<Self, PhaseError> {
        for (position, phase) in phases.iter().enumerate() {
            if phase.index != position {
                return Err(PhaseError::IndexMismatch {
                    phase: phase.name.clone(),
                    index: phase.index,
                    position,
                });
            }
            if phases[..position].iter().any(|p| p.name == phase.name) {
                return Err(PhaseError::DuplicateName(phase.name.clone()));
            }
            phase.check_len("alpha", mesh.n_cells())?;
            phase.properties.validate(&phase.name)?;
        }
        Ok(Self { mesh, phases })
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Returns the phases mutably so the solver can update their fields.
    pub fn phases_mut(&mut self) -> &mut [Phase] {
        &mut self.phases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.name == name)
    }

    /// Returns the pair view for `dispersed` in `continuous`, if both exist.
    #[must_use]
    pub fn pair(&self, dispersed: &str, continuous: &str) -> Option<PhasePair<'_>> {
        Some(PhasePair::new(
            self.get(dispersed)?,
            self.get(continuous)?,
            &self.mesh,
        ))
    }
}

/// Errors raised when phase data is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseError {
    #[error("phase `{0}` is defined more than once")]
    DuplicateName(String),

    #[error("phase `{phase}` has index {index} but sits at position {position}")]
    IndexMismatch {
        phase: String,
        index: usize,
        position: usize,
    },

    #[error("{field} of phase `{phase}` has {found} values, expected {expected}")]
    FieldLength {
        phase: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{property} of phase `{phase}` must be finite and positive, got {value}")]
    InvalidProperty {
        phase: String,
        property: &'static str,
        value: f64,
    },
}
