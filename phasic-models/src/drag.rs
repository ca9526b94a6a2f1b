//! Drag models.
//!
//! Every drag law here is expressed through `Cd·Re`, the drag coefficient
//! times the dispersed Reynolds number. The momentum exchange coefficient is
//!
//! ```text
//! K = 0.75 · CdRe · Cs · ρ_c · ν_c / d² · max(α_d, α_residual)
//! ```
//!
//! where `Cs` is an optional swarm correction for dense dispersions.

mod ergun;
mod schiller_naumann;
mod wen_yu;

use std::fmt::Debug;

use phasic_core::{
    PhasePair,
    field::{SurfaceScalarField, VolScalarField},
};
use serde::{Deserialize, Serialize};

use crate::{ModelError, SpecError, error::finite_scalar};

pub use ergun::Ergun;
pub use schiller_naumann::SchillerNaumann;
pub use wen_yu::WenYu;

/// Capability of computing an interphase drag coefficient.
pub trait DragModel: Debug + Send + Sync {
    /// Returns the drag coefficient `K` [kg/m³/s] in every cell.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the coefficient cannot be evaluated.
    fn k(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError>;

    /// Returns the drag coefficient on faces.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the coefficient cannot be evaluated.
    fn kf(&self, pair: &PhasePair<'_>) -> Result<SurfaceScalarField, ModelError> {
        Ok(pair.mesh().interpolate(&self.k(pair)?))
    }
}

/// A drag correlation expressed as `Cd·Re`.
pub trait DragLaw: Debug + Send + Sync {
    /// The correlation name used in error reports.
    const NAME: &'static str;

    /// Returns the drag coefficient times the Reynolds number.
    fn cd_re(&self, pair: &PhasePair<'_>) -> VolScalarField;
}

/// Correction for the hindering effect of neighbouring dispersed elements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwarmCorrection {
    #[default]
    None,

    /// `Cs = max(1 − α_d, α_residual,c)^(3 − 2l)`.
    Tomiyama { l: f64 },
}

impl SwarmCorrection {
    /// Returns the correction factor `Cs` in every cell.
    #[must_use]
    pub fn cs(&self, pair: &PhasePair<'_>) -> VolScalarField {
        match *self {
            Self::None => VolScalarField::uniform(pair.dispersed().alpha().len(), 1.0),
            Self::Tomiyama { l } => {
                let residual = pair.continuous().residual_alpha();
                pair.dispersed()
                    .alpha()
                    .map(|alpha| (1.0 - alpha).max(residual).powf(3.0 - 2.0 * l))
            }
        }
    }
}

/// A drag law combined with a swarm correction.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag<L> {
    law: L,
    swarm: SwarmCorrection,
}

impl<L: DragLaw> Drag<L> {
    #[must_use]
    pub fn new(law: L, swarm: SwarmCorrection) -> Self {
        Self { law, swarm }
    }

    #[must_use]
    pub fn law(&self) -> &L {
        &self.law
    }
}

impl<L: DragLaw> DragModel for Drag<L> {
    fn k(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError> {
        let continuous = pair.continuous();
        let d = pair.dispersed().d();
        let factor = 0.75 * continuous.rho() * continuous.nu() / (d * d);

        let ki = self.law.cd_re(pair) * &self.swarm.cs(pair) * factor;
        finite_scalar(
            ki * &pair.bounded_dispersed_alpha(),
            L::NAME,
            "drag coefficient",
        )
    }
}

fn default_residual_re() -> f64 {
    1e-3
}

/// Configuration of a drag model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragSpec {
    SchillerNaumann {
        #[serde(default = "default_residual_re")]
        residual_re: f64,
        #[serde(default)]
        swarm_correction: SwarmCorrection,
    },
    Ergun {
        #[serde(default)]
        swarm_correction: SwarmCorrection,
    },
    WenYu {
        #[serde(default = "default_residual_re")]
        residual_re: f64,
        #[serde(default)]
        swarm_correction: SwarmCorrection,
    },
}

impl DragSpec {
    /// Instantiates the configured drag model.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if a coefficient is invalid.
    pub fn build(&self) -> Result<Box<dyn DragModel>, SpecError> {
        Ok(match self {
            Self::SchillerNaumann {
                residual_re,
                swarm_correction,
            } => Box::new(Drag::new(
                SchillerNaumann::new(*residual_re)?,
                check_swarm(*swarm_correction)?,
            )),
            Self::Ergun { swarm_correction } => {
                Box::new(Drag::new(Ergun, check_swarm(*swarm_correction)?))
            }
            Self::WenYu {
                residual_re,
                swarm_correction,
            } => Box::new(Drag::new(
                WenYu::new(*residual_re)?,
                check_swarm(*swarm_correction)?,
            )),
        })
    }
}

fn check_swarm(swarm: SwarmCorrection) -> Result<SwarmCorrection, SpecError> {
    if let SwarmCorrection::Tomiyama { l } = swarm {
        SpecError::check_finite("Tomiyama swarm correction", "l", l)?;
    }
    Ok(swarm)
}

/// The Schiller–Naumann sphere correlation, shared by several laws.
fn schiller_naumann_cd_re(re: f64) -> f64 {
    if re < 1000.0 {
        24.0 * (1.0 + 0.15 * re.powf(0.687))
    } else {
        0.44 * re
    }
}


#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{test_utils::bubbly_column, *};

    #[test]
    fn schiller_naumann_branches() {
        assert_relative_eq!(schiller_naumann_cd_re(0.0), 24.0);
        assert_relative_eq!(schiller_naumann_cd_re(2000.0), 880.0);
    }

    #[test]
    fn coefficient_matches_hand_calculation() {
        let phases = bubbly_column(0.1, 0.2);
        let pair = phases.pair("air", "water").unwrap();
        let model = DragSpec::SchillerNaumann {
            residual_re: 1e-3,
            swarm_correction: SwarmCorrection::None,
        }
        .build()
        .unwrap();

        // Re = 0.2 * 3e-3 / 1e-6 = 600
        let cd_re = 24.0 * (1.0 + 0.15 * 600.0_f64.powf(0.687));
        let expected = 0.75 * cd_re * 1000.0 * 1e-6 / 9e-6 * 0.1;

        let k = model.k(&pair).unwrap();
        assert_eq!(k.len(), 4);
        assert_relative_eq!(k[0], expected, max_relative = 1e-12);

        let kf = model.kf(&pair).unwrap();
        assert_eq!(kf.len(), pair.mesh().n_faces());
        assert_relative_eq!(kf[0], expected, max_relative = 1e-12);
    }

    #[test]
    fn tomiyama_correction_reduces_coefficient_for_small_l() {
        let phases = bubbly_column(0.2, 0.2);
        let pair = phases.pair("air", "water").unwrap();

        // Cs = 0.8^(3 - 2*1) = 0.8
        let cs = SwarmCorrection::Tomiyama { l: 1.0 }.cs(&pair);
        assert_relative_eq!(cs[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(SwarmCorrection::None.cs(&pair)[3], 1.0);
    }

    #[test]
    fn rejects_invalid_residual_re() {
        let spec = DragSpec::SchillerNaumann {
            residual_re: -1.0,
            swarm_correction: SwarmCorrection::None,
        };
        assert!(matches!(spec.build(), Err(SpecError::Coefficient { .. })));
    }
}
