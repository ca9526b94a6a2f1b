use phasic_core::field::{Location, ScalarField, VectorField};
use thiserror::Error;

/// Errors raised while evaluating an interfacial model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A pair model refers to a phase that the phase set does not contain.
    #[error("phase `{0}` is not part of the phase set")]
    UnknownPhase(String),

    /// The model produced NaN or infinity, usually from non-physical state.
    #[error("{model} produced a non-finite {quantity}")]
    NonFinite {
        model: &'static str,
        quantity: &'static str,
    },
}

/// Errors in a model or blending configuration, detected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// A model coefficient is outside its valid range.
    #[error("{model}: coefficient `{name}` is invalid ({value}); {requirement}")]
    Coefficient {
        model: &'static str,
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("blending has no thresholds for phase `{0}`")]
    MissingThreshold(String),

    #[error(
        "blending thresholds for phase `{0}` are inverted: \
         partly-continuous alpha exceeds fully-continuous alpha"
    )]
    InvertedThresholds(String),

    /// Both phases of a pair could be weighted as continuous at once, so the
    /// blending weights would not sum to one.
    #[error("blending regimes of `{first}` and `{second}` overlap")]
    OverlappingRegimes { first: String, second: String },

    #[error("blending transition alpha scale must be positive, got {0}")]
    TransitionScale(f64),

    #[error("blending continuous phase `{0}` is not a configured phase")]
    UnknownContinuousPhase(String),
}

impl SpecError {
    pub(crate) fn check_non_negative(
        model: &'static str,
        name: &'static str,
        value: f64,
    ) -> Result<f64, Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::Coefficient {
                model,
                name,
                value,
                requirement: "must be finite and non-negative",
            })
        }
    }

    pub(crate) fn check_finite(
        model: &'static str,
        name: &'static str,
        value: f64,
    ) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::Coefficient {
                model,
                name,
                value,
                requirement: "must be finite",
            })
        }
    }
}

/// Returns `field` unchanged if every value is finite.
pub(crate) fn finite_scalar<L: Location>(
    field: ScalarField<L>,
    model: &'static str,
    quantity: &'static str,
) -> Result<ScalarField<L>, ModelError> {
    if field.iter().all(f64::is_finite) {
        Ok(field)
    } else {
        Err(ModelError::NonFinite { model, quantity })
    }
}

/// Returns `field` unchanged if every component is finite.
pub(crate) fn finite_vector<L: Location>(
    field: VectorField<L>,
    model: &'static str,
    quantity: &'static str,
) -> Result<VectorField<L>, ModelError> {
    if field.values().iter().all(|v| v.is_finite()) {
        Ok(field)
    } else {
        Err(ModelError::NonFinite { model, quantity })
    }
}
