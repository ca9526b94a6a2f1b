//! Per-category registries of blended interfacial models.

use std::collections::{HashMap, hash_map};

use phasic_core::PhasePairKey;
use phasic_models::{
    BlendedInterfacialModel, Blending, Regime, SpecError, drag::DragModel, lift::LiftModel,
    turbulent_dispersion::TurbulentDispersionModel, virtual_mass::VirtualMassModel,
    wall_lubrication::WallLubricationModel,
};

use crate::{ConfigError, ForceCategory, SystemConfig, config::ModelEntry};

/// The blended models of one force category, keyed by unordered phase pair.
#[derive(Debug)]
pub struct ModelRegistry<M: ?Sized> {
    category: ForceCategory,
    models: HashMap<PhasePairKey, BlendedInterfacialModel<M>>,
}

impl<M: ?Sized> ModelRegistry<M> {
    /// Creates a registry with no models.
    #[must_use]
    pub fn empty(category: ForceCategory) -> Self {
        Self {
            category,
            models: HashMap::new(),
        }
    }

    /// Builds a registry from configured entries.
    ///
    /// Entries are grouped by unordered pair. Phase 1 of a pair is the first
    /// phase named by the first entry for that pair; an `"a and b"` entry sets
    /// the mixed model and an `"a in b"` entry sets the model for `a`
    /// dispersed in `b`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an entry names an unknown phase, if two
    /// entries set the same model, if entries exist but no blending is
    /// configured, or if a model or the blending is invalid.
    pub fn build<'a, S: 'a>(
        category: ForceCategory,
        entries: impl IntoIterator<Item = &'a ModelEntry<S>>,
        blending: Option<&Blending>,
        phase_names: &[&str],
        build_model: impl Fn(&S) -> Result<Box<M>, SpecError>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::empty(category);

        for entry in entries {
            let pair = &entry.pair;
            for phase in [pair.first(), pair.second()] {
                if !phase_names.contains(&phase) {
                    return Err(ConfigError::UnknownPhase {
                        category,
                        pair: pair.clone(),
                        phase: phase.to_owned(),
                    });
                }
            }

            let blended = match registry.models.entry(pair.unordered()) {
                hash_map::Entry::Occupied(occupied) => occupied.into_mut(),
                hash_map::Entry::Vacant(vacant) => {
                    let blending = blending.ok_or(ConfigError::MissingBlending { category })?;
                    let pair_blending = blending
                        .check_phases(phase_names)
                        .and_then(|()| blending.for_pair(pair.first(), pair.second()))
                        .map_err(|source| ConfigError::Blending {
                            category,
                            pair: pair.unordered(),
                            source,
                        })?;
                    vacant.insert(BlendedInterfacialModel::new(
                        pair.first(),
                        pair.second(),
                        pair_blending,
                    ))
                }
            };

            let model = build_model(&entry.model).map_err(|source| ConfigError::Model {
                category,
                pair: pair.clone(),
                source,
            })?;
            let regime = if !pair.is_ordered() {
                Regime::Mixed
            } else if pair.first() == blended.phase1() {
                Regime::OneInTwo
            } else {
                Regime::TwoInOne
            };
            if blended.insert(regime, model).is_some() {
                return Err(ConfigError::DuplicateModel {
                    category,
                    pair: pair.clone(),
                });
            }
        }

        log::debug!(
            "{category}: registered {} phase pair(s)",
            registry.models.len()
        );
        Ok(registry)
    }

    #[must_use]
    pub fn category(&self) -> ForceCategory {
        self.category
    }

    /// Returns the blended model for a pair, ignoring the key's order.
    #[must_use]
    pub fn get(&self, key: &PhasePairKey) -> Option<&BlendedInterfacialModel<M>> {
        self.models.get(&key.unordered())
    }

    /// Iterates over every registered pair.
    pub fn iter(&self) -> impl Iterator<Item = (&PhasePairKey, &BlendedInterfacialModel<M>)> {
        self.models.iter()
    }

    /// Iterates over the registered pairs that involve `phase`.
    pub fn pairs_with<'a>(
        &'a self,
        phase: &'a str,
    ) -> impl Iterator<Item = (&'a PhasePairKey, &'a BlendedInterfacialModel<M>)> {
        self.models.iter().filter(move |(key, _)| key.contains(phase))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// The registries of all five force categories.
#[derive(Debug)]
pub struct InterfacialModels {
    pub drag: ModelRegistry<dyn DragModel>,
    pub virtual_mass: ModelRegistry<dyn VirtualMassModel>,
    pub lift: ModelRegistry<dyn LiftModel>,
    pub wall_lubrication: ModelRegistry<dyn WallLubricationModel>,
    pub turbulent_dispersion: ModelRegistry<dyn TurbulentDispersionModel>,
}

impl InterfacialModels {
    /// Builds every registry from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in any category.
    pub fn from_config(config: &SystemConfig) -> Result<Self, ConfigError> {
        let names: Vec<&str> = config.phase_names().collect();

        Ok(Self {
            drag: ModelRegistry::build(
                ForceCategory::Drag,
                &config.drag,
                config.blending_for(ForceCategory::Drag),
                &names,
                |spec| spec.build(),
            )?,
            virtual_mass: ModelRegistry::build(
                ForceCategory::VirtualMass,
                &config.virtual_mass,
                config.blending_for(ForceCategory::VirtualMass),
                &names,
                |spec| spec.build(),
            )?,
            lift: ModelRegistry::build(
                ForceCategory::Lift,
                &config.lift,
                config.blending_for(ForceCategory::Lift),
                &names,
                |spec| spec.build(),
            )?,
            wall_lubrication: ModelRegistry::build(
                ForceCategory::WallLubrication,
                &config.wall_lubrication,
                config.blending_for(ForceCategory::WallLubrication),
                &names,
                |spec| spec.build(),
            )?,
            turbulent_dispersion: ModelRegistry::build(
                ForceCategory::TurbulentDispersion,
                &config.turbulent_dispersion,
                config.blending_for(ForceCategory::TurbulentDispersion),
                &names,
                |spec| spec.build(),
            )?,
        })
    }
}
