use std::{collections::HashMap, ops::AddAssign};

use phasic_core::field::{VolScalarField, VolVectorField};

/// Momentum-transfer matrices keyed by phase name.
pub type MomentumTransferTable = HashMap<String, MomentumTransferMatrix>;

/// The interfacial momentum exchange terms for one phase.
///
/// The exchange is split into an implicit part, an inertia coefficient that
/// multiplies the phase's own acceleration, and an explicit vector source:
///
/// ```text
/// M = source − inertia · DU/Dt
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumTransferMatrix {
    inertia: VolScalarField,
    source: VolVectorField,
}

impl MomentumTransferMatrix {
    /// Creates a matrix with no exchange on `n_cells` cells.
    #[must_use]
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            inertia: VolScalarField::zeros(n_cells),
            source: VolVectorField::zeros(n_cells),
        }
    }

    /// Returns the implicit coefficient of the phase's own acceleration.
    #[must_use]
    pub fn inertia(&self) -> &VolScalarField {
        &self.inertia
    }

    /// Returns the explicit force density.
    #[must_use]
    pub fn source(&self) -> &VolVectorField {
        &self.source
    }

    pub fn add_inertia(&mut self, coefficient: &VolScalarField) {
        self.inertia += coefficient;
    }

    pub fn add_source(&mut self, force: &VolVectorField) {
        self.source += force;
    }

    pub fn subtract_source(&mut self, force: &VolVectorField) {
        self.source -= force;
    }

    /// Evaluates the net force density for a given acceleration of the phase.
    ///
    /// # Panics
    ///
    /// Panics if `acceleration` has a different number of cells.
    #[must_use]
    pub fn force(&self, acceleration: &VolVectorField) -> VolVectorField {
        &self.source - &acceleration.scaled(&self.inertia)
    }
}

impl AddAssign<&MomentumTransferMatrix> for MomentumTransferMatrix {
    fn add_assign(&mut self, rhs: &MomentumTransferMatrix) {
        self.inertia += &rhs.inertia;
        self.source += &rhs.source;
    }
}
