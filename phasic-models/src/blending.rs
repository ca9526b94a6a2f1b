//! Regime blending between dispersed and mixed interfacial models.
//!
//! For a pair of phases 1 and 2, a blending method produces two weights:
//!
//! - `f1`, the degree to which phase 2 is continuous, which weights the
//!   "1 in 2" model (phase 1 dispersed in phase 2);
//! - `f2`, the degree to which phase 1 is continuous, which weights the
//!   "2 in 1" model.
//!
//! The mixed-regime model, if any, receives the remainder `1 − f1 − f2`, so
//! the three weights always sum to one.

use std::collections::BTreeMap;

use phasic_core::{Fraction, Phase, field::VolScalarField};
use serde::{Deserialize, Serialize};

use crate::SpecError;

/// Keeps a zero-width linear band from dividing by zero.
const SMALL: f64 = 1e-15;

/// Tolerance when checking that two regimes never overlap.
const OVERLAP_TOLERANCE: f64 = 1e-12;

/// A configured blending method, shared by every pair in a force category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Blending {
    /// Step weights selected by which phase is continuous.
    ///
    /// Without a continuous phase both weights are zero and only the mixed
    /// model contributes.
    None {
        #[serde(default)]
        continuous_phase: Option<String>,
    },

    /// Piecewise-linear weights between per-phase thresholds.
    ///
    /// A phase is fully continuous above its `min_fully_continuous_alpha` and
    /// not continuous at all below its `min_partly_continuous_alpha`.
    Linear {
        min_fully_continuous_alpha: BTreeMap<String, Fraction>,
        min_partly_continuous_alpha: BTreeMap<String, Fraction>,
    },

    /// Smooth `tanh` weights centred on each phase's `min_continuous_alpha`.
    Hyperbolic {
        min_continuous_alpha: BTreeMap<String, Fraction>,
        transition_alpha_scale: f64,
    },
}

impl Blending {
    /// Checks that every phase this method names directly is one of
    /// `phase_names`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnknownContinuousPhase`] if the continuous phase
    /// of a `none` blending is not a configured phase.
    pub fn check_phases(&self, phase_names: &[&str]) -> Result<(), SpecError> {
        match self {
            Self::None {
                continuous_phase: Some(name),
            } if !phase_names.contains(&name.as_str()) => {
                Err(SpecError::UnknownContinuousPhase(name.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Resolves this method for a specific pair of phases.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if a phase has no thresholds, if its thresholds
    /// are inverted, if the transition scale is not positive, or if the
    /// thresholds would let both phases count as continuous at once.
    pub fn for_pair(&self, phase1: &str, phase2: &str) -> Result<PairBlending, SpecError> {
        match self {
            Self::None { continuous_phase } => {
                let step = |name: &str| {
                    if continuous_phase.as_deref() == Some(name) {
                        1.0
                    } else {
                        0.0
                    }
                };
                Ok(PairBlending::Step {
                    f1: step(phase2),
                    f2: step(phase1),
                })
            }
            Self::Linear {
                min_fully_continuous_alpha: fully,
                min_partly_continuous_alpha: partly,
            } => {
                let band = |name: &str| -> Result<LinearBand, SpecError> {
                    let full = threshold(fully, name)?;
                    let part = threshold(partly, name)?;
                    if part > full {
                        return Err(SpecError::InvertedThresholds(name.to_owned()));
                    }
                    Ok(LinearBand { full, part })
                };
                let band1 = band(phase1)?;
                let band2 = band(phase2)?;
                if max_weight_sum(band1, band2) > 1.0 + OVERLAP_TOLERANCE {
                    return Err(SpecError::OverlappingRegimes {
                        first: phase1.to_owned(),
                        second: phase2.to_owned(),
                    });
                }
                Ok(PairBlending::Linear { band1, band2 })
            }
            Self::Hyperbolic {
                min_continuous_alpha,
                transition_alpha_scale,
            } => {
                let scale = *transition_alpha_scale;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(SpecError::TransitionScale(scale));
                }
                let min1 = threshold(min_continuous_alpha, phase1)?;
                let min2 = threshold(min_continuous_alpha, phase2)?;
                // With a shared scale, f1 + f2 <= 1 holds exactly when
                // α1 + α2 <= min1 + min2.
                if min1 + min2 < 1.0 - OVERLAP_TOLERANCE {
                    return Err(SpecError::OverlappingRegimes {
                        first: phase1.to_owned(),
                        second: phase2.to_owned(),
                    });
                }
                Ok(PairBlending::Hyperbolic { min1, min2, scale })
            }
        }
    }
}

fn threshold(map: &BTreeMap<String, Fraction>, phase: &str) -> Result<f64, SpecError> {
    map.get(phase)
        .map(|f| f.get())
        .ok_or_else(|| SpecError::MissingThreshold(phase.to_owned()))
}

/// The linear ramp of one phase from "not continuous" to "fully continuous".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBand {
    pub full: f64,
    pub part: f64,
}

impl LinearBand {
    fn weight(self, alpha: f64) -> f64 {
        ((alpha - self.part) / (self.full - self.part + SMALL)).clamp(0.0, 1.0)
    }
}

/// Returns the largest `f1 + f2` reachable with `α1 + α2 ≤ 1`.
///
/// Both weights are non-decreasing, so the maximum lies on `α1 + α2 = 1`, and
/// the sum is piecewise linear there, so checking the breakpoints suffices.
fn max_weight_sum(band1: LinearBand, band2: LinearBand) -> f64 {
    [
        0.0,
        1.0,
        band1.part,
        band1.full,
        1.0 - band2.part,
        1.0 - band2.full,
    ]
    .into_iter()
    .filter(|alpha1| (0.0..=1.0).contains(alpha1))
    .map(|alpha1| band1.weight(alpha1) + band2.weight(1.0 - alpha1))
    .fold(0.0, f64::max)
}

/// A blending method resolved for one ordered pair of phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairBlending {
    Step { f1: f64, f2: f64 },
    Linear { band1: LinearBand, band2: LinearBand },
    Hyperbolic { min1: f64, min2: f64, scale: f64 },
}

impl PairBlending {
    /// Returns the weight of the "1 in 2" model, driven by phase 2's fraction.
    #[must_use]
    pub fn f1(&self, phase1: &Phase, phase2: &Phase) -> VolScalarField {
        match *self {
            Self::Step { f1, .. } => VolScalarField::uniform(phase1.alpha().len(), f1),
            Self::Linear { band2, .. } => phase2.alpha().map(|alpha| band2.weight(alpha)),
            Self::Hyperbolic { min2, scale, .. } => {
                phase2.alpha().map(|alpha| hyperbolic(alpha, min2, scale))
            }
        }
    }

    /// Returns the weight of the "2 in 1" model, driven by phase 1's fraction.
    #[must_use]
    pub fn f2(&self, phase1: &Phase, phase2: &Phase) -> VolScalarField {
        match *self {
            Self::Step { f2, .. } => VolScalarField::uniform(phase2.alpha().len(), f2),
            Self::Linear { band1, .. } => phase1.alpha().map(|alpha| band1.weight(alpha)),
            Self::Hyperbolic { min1, scale, .. } => {
                phase1.alpha().map(|alpha| hyperbolic(alpha, min1, scale))
            }
        }
    }
}

fn hyperbolic(alpha: f64, min_continuous: f64, scale: f64) -> f64 {
    0.5 * (1.0 + (4.0 / scale * (alpha - min_continuous)).tanh())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn fractions(pairs: &[(&str, f64)]) -> BTreeMap<String, Fraction> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), Fraction::new(*value).unwrap()))
            .collect()
    }

    fn linear(full: f64, part: f64) -> Blending {
        Blending::Linear {
            min_fully_continuous_alpha: fractions(&[("air", full), ("water", full)]),
            min_partly_continuous_alpha: fractions(&[("air", part), ("water", part)]),
        }
    }

    #[test]
    fn symmetric_linear_bands_are_convex() {
        let PairBlending::Linear { band1, band2 } = linear(0.7, 0.3).for_pair("air", "water").unwrap()
        else {
            panic!("expected linear blending");
        };

        for step in 0..=100 {
            let alpha_air = f64::from(step) / 100.0;
            let sum = band2.weight(1.0 - alpha_air) + band1.weight(alpha_air);
            assert!(sum <= 1.0 + 1e-12, "sum {sum} at alpha {alpha_air}");
        }
        assert_relative_eq!(band1.weight(0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_overlapping_linear_regimes() {
        // Both phases fully continuous at alpha = 0.5.
        let result = linear(0.5, 0.1).for_pair("air", "water");
        assert!(matches!(result, Err(SpecError::OverlappingRegimes { .. })));
    }

    #[test]
    fn rejects_overlapping_hyperbolic_regimes() {
        let blending = |min: f64| Blending::Hyperbolic {
            min_continuous_alpha: fractions(&[("air", min), ("water", min)]),
            transition_alpha_scale: 0.3,
        };

        // At alpha = 0.5 both weights would be about 0.995.
        assert!(matches!(
            blending(0.3).for_pair("air", "water"),
            Err(SpecError::OverlappingRegimes { .. })
        ));

        let PairBlending::Hyperbolic { min1, min2, scale } =
            blending(0.5).for_pair("air", "water").unwrap()
        else {
            panic!("expected hyperbolic blending");
        };
        for step in 0..=100 {
            let alpha_air = f64::from(step) / 100.0;
            let sum = hyperbolic(1.0 - alpha_air, min2, scale) + hyperbolic(alpha_air, min1, scale);
            assert!(sum <= 1.0 + 1e-12, "sum {sum} at alpha {alpha_air}");
        }
    }

    #[test]
    fn continuous_phase_must_be_configured() {
        let blending = Blending::None {
            continuous_phase: Some("watr".into()),
        };
        assert_eq!(
            blending.check_phases(&["air", "water"]),
            Err(SpecError::UnknownContinuousPhase("watr".into()))
        );

        let unset = Blending::None {
            continuous_phase: None,
        };
        assert_eq!(unset.check_phases(&["air", "water"]), Ok(()));
    }

    #[test]
    fn rejects_missing_and_inverted_thresholds() {
        let missing = linear(0.7, 0.3).for_pair("air", "oil");
        assert_eq!(missing, Err(SpecError::MissingThreshold("oil".into())));

        let inverted = linear(0.3, 0.7).for_pair("air", "water");
        assert_eq!(inverted, Err(SpecError::InvertedThresholds("air".into())));
    }

    #[test]
    fn step_weights_follow_the_continuous_phase() {
        let blending = Blending::None {
            continuous_phase: Some("water".into()),
        };

        assert_eq!(
            blending.for_pair("air", "water").unwrap(),
            PairBlending::Step { f1: 1.0, f2: 0.0 }
        );
        assert_eq!(
            blending.for_pair("water", "air").unwrap(),
            PairBlending::Step { f1: 0.0, f2: 1.0 }
        );
    }

    #[test]
    fn hyperbolic_is_half_at_threshold() {
        assert_relative_eq!(hyperbolic(0.5, 0.5, 0.3), 0.5);
        assert!(hyperbolic(1.0, 0.5, 0.3) > 0.99);
        assert!(hyperbolic(0.0, 0.5, 0.3) < 0.01);

        let bad_scale = Blending::Hyperbolic {
            min_continuous_alpha: fractions(&[("air", 0.5), ("water", 0.5)]),
            transition_alpha_scale: 0.0,
        };
        assert_eq!(
            bad_scale.for_pair("air", "water"),
            Err(SpecError::TransitionScale(0.0))
        );
    }
}
