use phasic_core::{Mesh, Phase, PhaseSet};

use crate::{ConfigError, Error, MomentumTransfer, MomentumTransferTable, SystemConfig};

/// A set of phases together with the interfacial momentum transfer between
/// them.
#[derive(Debug)]
pub struct PhaseSystem {
    phases: PhaseSet,
    momentum: MomentumTransfer,
}

impl PhaseSystem {
    /// Creates the phases and interfacial models described by `config` on
    /// `mesh`.
    ///
    /// Every phase starts at rest with zero volume fraction.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration has no phases, repeats a
    /// phase name, gives a phase non-physical properties, or describes an
    /// invalid model.
    pub fn from_config(config: &SystemConfig, mesh: Mesh) -> Result<Self, ConfigError> {
        if config.phases.is_empty() {
            return Err(ConfigError::NoPhases);
        }

        let n_cells = mesh.n_cells();
        let phases = config
            .phases
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Phase::new(entry.name.clone(), index, entry.properties.clone(), n_cells)
            })
            .collect();
        let phases = PhaseSet::new(mesh, phases)?;
        let momentum = MomentumTransfer::new(config)?;

        log::info!(
            "phase system: {} phase(s) on {} cell(s)",
            phases.len(),
            n_cells
        );
        Ok(Self { phases, momentum })
    }

    /// Parses a TOML configuration and creates the phase system on `mesh`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text cannot be parsed or describes an
    /// invalid system.
    pub fn from_toml_str(text: &str, mesh: Mesh) -> Result<Self, ConfigError> {
        Self::from_config(&SystemConfig::from_toml_str(text)?, mesh)
    }

    #[must_use]
    pub fn phases(&self) -> &PhaseSet {
        &self.phases
    }

    /// Returns the phases mutably so the solver can update their fields.
    pub fn phases_mut(&mut self) -> &mut PhaseSet {
        &mut self.phases
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        self.phases.mesh()
    }

    #[must_use]
    pub fn momentum(&self) -> &MomentumTransfer {
        &self.momentum
    }

    pub fn momentum_mut(&mut self) -> &mut MomentumTransfer {
        &mut self.momentum
    }

    /// Returns the phases and the momentum transfer aggregator together, so
    /// cached queries can be made against the current phase state.
    pub fn split_mut(&mut self) -> (&PhaseSet, &mut MomentumTransfer) {
        (&self.phases, &mut self.momentum)
    }

    /// Starts a new evaluation cycle; see [`MomentumTransfer::momentum_transfer`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a model cannot be evaluated.
    pub fn momentum_transfer(&mut self) -> Result<MomentumTransferTable, Error> {
        self.momentum.momentum_transfer(&self.phases)
    }

    /// Applies a new configuration to the phase properties and the
    /// interfacial models.
    ///
    /// The phase list must match the current one. Returns whether anything
    /// changed; a change ends the current evaluation cycle.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the phase list differs or the new
    /// configuration is invalid. Nothing is updated in that case.
    pub fn read(&mut self, config: &SystemConfig) -> Result<bool, ConfigError> {
        let expected: Vec<&str> = self.phases.phases().iter().map(Phase::name).collect();
        let found: Vec<&str> = config.phase_names().collect();
        if expected != found {
            return Err(ConfigError::PhasesChanged {
                expected: expected.into_iter().map(str::to_owned).collect(),
                found: found.into_iter().map(str::to_owned).collect(),
            });
        }

        for entry in &config.phases {
            entry.properties.validate(&entry.name)?;
        }
        let models_changed = self.momentum.read(config)?;

        let mut properties_changed = false;
        for (phase, entry) in self.phases.phases_mut().iter_mut().zip(&config.phases) {
            if *phase.properties() != entry.properties {
                log::info!("phase system: updated properties of `{}`", entry.name);
                phase.set_properties(entry.properties.clone())?;
                properties_changed = true;
            }
        }
        if properties_changed && !models_changed {
            self.momentum.invalidate();
        }

        Ok(models_changed || properties_changed)
    }
}
