//! Phase system configuration.
//!
//! A configuration lists the phases, the blending method for each force
//! category, and the sub-models registered for each pair:
//!
//! ```toml
//! [[phases]]
//! name = "air"
//! density = 1.2
//! viscosity = 1.8e-5
//! diameter = 3e-3
//!
//! [[phases]]
//! name = "water"
//! density = 1000.0
//! viscosity = 1e-3
//! diameter = 3e-3
//!
//! [blending.default]
//! type = "linear"
//! min_fully_continuous_alpha = { air = 0.7, water = 0.7 }
//! min_partly_continuous_alpha = { air = 0.3, water = 0.3 }
//!
//! [[drag]]
//! pair = "air in water"
//! type = "schiller_naumann"
//! ```
//!
//! Quantities are given in SI base units.

use std::{collections::BTreeMap, fmt};

use phasic_core::{PhasePairKey, PhaseProperties};
use phasic_models::{
    Blending, drag::DragSpec, lift::LiftSpec, turbulent_dispersion::TurbulentDispersionSpec,
    virtual_mass::VirtualMassSpec, wall_lubrication::WallLubricationSpec,
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The blending key used by categories without their own entry.
pub const DEFAULT_BLENDING: &str = "default";

/// The complete configuration of a phase system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub phases: Vec<PhaseEntry>,

    /// Blending methods by category name, with [`DEFAULT_BLENDING`] as the
    /// fallback.
    #[serde(default)]
    pub blending: BTreeMap<String, Blending>,

    #[serde(default)]
    pub drag: Vec<ModelEntry<DragSpec>>,

    #[serde(default)]
    pub virtual_mass: Vec<ModelEntry<VirtualMassSpec>>,

    #[serde(default)]
    pub lift: Vec<ModelEntry<LiftSpec>>,

    #[serde(default)]
    pub wall_lubrication: Vec<ModelEntry<WallLubricationSpec>>,

    #[serde(default)]
    pub turbulent_dispersion: Vec<ModelEntry<TurbulentDispersionSpec>>,
}

impl SystemConfig {
    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or does
    /// not match the configuration schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Returns the phase names in configuration order.
    pub fn phase_names(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|phase| phase.name.as_str())
    }

    /// Returns the blending method for a category, falling back to the default.
    #[must_use]
    pub fn blending_for(&self, category: ForceCategory) -> Option<&Blending> {
        self.blending
            .get(category.name())
            .or_else(|| self.blending.get(DEFAULT_BLENDING))
    }

    /// Returns whether the interfacial models of `category` would be built
    /// differently under `other`.
    #[must_use]
    pub fn category_differs(&self, other: &Self, category: ForceCategory) -> bool {
        let entries_differ = match category {
            ForceCategory::Drag => self.drag != other.drag,
            ForceCategory::VirtualMass => self.virtual_mass != other.virtual_mass,
            ForceCategory::Lift => self.lift != other.lift,
            ForceCategory::WallLubrication => self.wall_lubrication != other.wall_lubrication,
            ForceCategory::TurbulentDispersion => {
                self.turbulent_dispersion != other.turbulent_dispersion
            }
        };
        entries_differ || self.blending_for(category) != other.blending_for(category)
    }
}

/// A named phase and its material properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub name: String,
    #[serde(flatten)]
    pub properties: PhaseProperties,
}

/// A sub-model registered for a phase pair.
///
/// An unordered key (`"a and b"`) registers the mixed-regime model; an ordered
/// key (`"a in b"`) registers the model for `a` dispersed in `b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry<S> {
    pub pair: PhasePairKey,
    #[serde(flatten)]
    pub model: S,
}

/// The five interfacial force categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ForceCategory {
    Drag,
    VirtualMass,
    Lift,
    WallLubrication,
    TurbulentDispersion,
}

impl ForceCategory {
    pub const ALL: [Self; 5] = [
        Self::Drag,
        Self::VirtualMass,
        Self::Lift,
        Self::WallLubrication,
        Self::TurbulentDispersion,
    ];

    /// Returns the configuration key of the category.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::VirtualMass => "virtual_mass",
            Self::Lift => "lift",
            Self::WallLubrication => "wall_lubrication",
            Self::TurbulentDispersion => "turbulent_dispersion",
        }
    }
}

impl fmt::Display for ForceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use phasic_models::drag::SwarmCorrection;
    use uom::si::{length::millimeter, mass_density::kilogram_per_cubic_meter};

    use super::*;

    const CONFIG: &str = r#"
        [[phases]]
        name = "air"
        density = 1.2
        viscosity = 1.8e-5
        diameter = 3e-3
        residual_alpha = 1e-4

        [[phases]]
        name = "water"
        density = 1000
        viscosity = 1e-3
        diameter = 3e-3

        [blending.default]
        type = "none"
        continuous_phase = "water"

        [blending.lift]
        type = "hyperbolic"
        min_continuous_alpha = { air = 0.5, water = 0.5 }
        transition_alpha_scale = 0.3

        [[drag]]
        pair = "air in water"
        type = "schiller_naumann"
        swarm_correction = { type = "tomiyama", l = 1.0 }

        [[drag]]
        pair = "air and water"
        type = "ergun"

        [[lift]]
        pair = "air in water"
        type = "constant_coefficient"
        cl = 0.5
    "#;

    #[test]
    fn parses_phases_and_models() {
        let config = SystemConfig::from_toml_str(CONFIG).unwrap();

        assert_eq!(config.phase_names().collect::<Vec<_>>(), ["air", "water"]);
        let air = &config.phases[0].properties;
        assert_relative_eq!(air.density.get::<kilogram_per_cubic_meter>(), 1.2);
        assert_relative_eq!(air.diameter.get::<millimeter>(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(air.residual_alpha.get(), 1e-4);
        assert_relative_eq!(config.phases[1].properties.density.value, 1000.0);

        assert_eq!(config.drag.len(), 2);
        assert_eq!(config.drag[0].pair, PhasePairKey::ordered("air", "water"));
        assert_eq!(
            config.drag[0].model,
            DragSpec::SchillerNaumann {
                residual_re: 1e-3,
                swarm_correction: SwarmCorrection::Tomiyama { l: 1.0 },
            }
        );
        assert_eq!(config.drag[1].model, DragSpec::Ergun {
            swarm_correction: SwarmCorrection::None,
        });
        assert!(config.virtual_mass.is_empty());
    }

    #[test]
    fn blending_falls_back_to_default() {
        let config = SystemConfig::from_toml_str(CONFIG).unwrap();

        assert!(matches!(
            config.blending_for(ForceCategory::Lift),
            Some(Blending::Hyperbolic { .. })
        ));
        assert!(matches!(
            config.blending_for(ForceCategory::Drag),
            Some(Blending::None { .. })
        ));
    }

    #[test]
    fn detects_changes_per_category() {
        let config = SystemConfig::from_toml_str(CONFIG).unwrap();
        let mut other = config.clone();
        other.lift.clear();

        assert!(!config.category_differs(&config.clone(), ForceCategory::Lift));
        assert!(config.category_differs(&other, ForceCategory::Lift));
        assert!(!config.category_differs(&other, ForceCategory::Drag));
    }

    #[test]
    fn rejects_malformed_pairs_and_fractions() {
        let bad_pair = CONFIG.replace("air in water", "air with water");
        assert!(matches!(
            SystemConfig::from_toml_str(&bad_pair),
            Err(ConfigError::Parse(_))
        ));

        let bad_fraction = CONFIG.replace("residual_alpha = 1e-4", "residual_alpha = 1.5");
        assert!(matches!(
            SystemConfig::from_toml_str(&bad_fraction),
            Err(ConfigError::Parse(_))
        ));
    }
}
