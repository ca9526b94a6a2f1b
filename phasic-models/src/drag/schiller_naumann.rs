use phasic_core::{PhasePair, field::VolScalarField};

use crate::SpecError;

use super::{DragLaw, schiller_naumann_cd_re};

/// Drag on an isolated rigid sphere.
///
/// The Reynolds number is floored at `residual_re` so the coefficient stays
/// finite when the slip velocity vanishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchillerNaumann {
    residual_re: f64,
}

impl SchillerNaumann {
    /// Creates the correlation with the given Reynolds number floor.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if `residual_re` is negative or not finite.
    pub fn new(residual_re: f64) -> Result<Self, SpecError> {
        let residual_re = SpecError::check_non_negative(Self::NAME, "residual_re", residual_re)?;
        Ok(Self { residual_re })
    }

    #[must_use]
    pub fn residual_re(&self) -> f64 {
        self.residual_re
    }
}

impl DragLaw for SchillerNaumann {
    const NAME: &'static str = "Schiller-Naumann drag";

    fn cd_re(&self, pair: &PhasePair<'_>) -> VolScalarField {
        pair.reynolds()
            .map(|re| schiller_naumann_cd_re(re.max(self.residual_re)))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::drag::test_utils::bubbly_column;

    #[test]
    fn floors_reynolds_number_at_rest() {
        let phases = bubbly_column(0.1, 0.0);
        let pair = phases.pair("air", "water").unwrap();
        let law = SchillerNaumann::new(1e-3).unwrap();

        let expected = 24.0 * (1.0 + 0.15 * 1e-3_f64.powf(0.687));
        assert_relative_eq!(law.cd_re(&pair)[0], expected);
    }
}
