use phasic_core::{PhasePair, field::VolScalarField};

use crate::SpecError;

use super::{DragLaw, schiller_naumann_cd_re};

/// Wen & Yu drag for fluidized particles.
///
/// Applies the sphere correlation on the voidage-scaled Reynolds number and
/// corrects for the surrounding concentration with `ε^-3.65`, where the
/// voidage `ε = max(1 − α_d, α_res,c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WenYu {
    residual_re: f64,
}

impl WenYu {
    /// Creates the correlation with the given Reynolds number floor.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if `residual_re` is negative or not finite.
    pub fn new(residual_re: f64) -> Result<Self, SpecError> {
        let residual_re = SpecError::check_non_negative(Self::NAME, "residual_re", residual_re)?;
        Ok(Self { residual_re })
    }
}

impl DragLaw for WenYu {
    const NAME: &'static str = "Wen-Yu drag";

    fn cd_re(&self, pair: &PhasePair<'_>) -> VolScalarField {
        let residual = pair.continuous().residual_alpha();
        let voidage = pair.dispersed().alpha().map(|alpha| (1.0 - alpha).max(residual));

        let sphere = voidage.zip_map(&pair.reynolds(), |alpha, re| {
            schiller_naumann_cd_re((alpha * re).max(self.residual_re))
        });
        let hindrance = voidage.zip_map(pair.continuous().alpha(), |voidage, alpha_c| {
            voidage.powf(-3.65) * alpha_c.max(residual)
        });

        sphere * &hindrance
    }
}
