use phasic_core::{PhaseError, PhasePairKey};
use phasic_models::{ModelError, SpecError};
use thiserror::Error;

use crate::ForceCategory;

/// Errors in a phase system configuration.
///
/// Configuration errors are detected before anything is replaced, so a failed
/// construction or [`read`](crate::MomentumTransfer::read) leaves no partial
/// state behind.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),

    #[error("configuration defines no phases")]
    NoPhases,

    #[error(transparent)]
    Phase(#[from] PhaseError),

    /// The phase list differs from the one the system was built with.
    #[error("phases cannot be added, removed, or reordered: expected {expected:?}, found {found:?}")]
    PhasesChanged {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("{category} model for `{pair}` refers to unknown phase `{phase}`")]
    UnknownPhase {
        category: ForceCategory,
        pair: PhasePairKey,
        phase: String,
    },

    #[error("{category} model for `{pair}` is defined more than once")]
    DuplicateModel {
        category: ForceCategory,
        pair: PhasePairKey,
    },

    #[error("no blending configured for {category}; set `blending.{category}` or `blending.default`")]
    MissingBlending { category: ForceCategory },

    #[error("invalid {category} blending for `{pair}`")]
    Blending {
        category: ForceCategory,
        pair: PhasePairKey,
        #[source]
        source: SpecError,
    },

    #[error("invalid {category} model for `{pair}`")]
    Model {
        category: ForceCategory,
        pair: PhasePairKey,
        #[source]
        source: SpecError,
    },
}

/// Errors raised while evaluating interfacial momentum transfer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("phase `{0}` is not part of the phase system")]
    UnknownPhase(String),

    /// A per-phase list has the wrong number of entries.
    #[error("expected one {field} per phase ({expected}), got {found}")]
    PerPhaseCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}
