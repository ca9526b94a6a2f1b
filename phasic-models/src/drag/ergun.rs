use phasic_core::{PhasePair, field::VolScalarField};

use super::DragLaw;

/// Packed-bed drag, suited to dense particle beds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ergun;

impl DragLaw for Ergun {
    const NAME: &'static str = "Ergun drag";

    fn cd_re(&self, pair: &PhasePair<'_>) -> VolScalarField {
        let continuous = pair.continuous();
        let residual = continuous.residual_alpha();
        let packing = continuous.alpha().map(|alpha_c| {
            150.0 * (1.0 - alpha_c).max(residual) / alpha_c.max(residual)
        });

        (packing + pair.reynolds() * 1.75) * (4.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::drag::test_utils::bubbly_column;

    #[test]
    fn combines_viscous_and_inertial_terms() {
        let phases = bubbly_column(0.4, 0.2);
        let pair = phases.pair("air", "water").unwrap();

        // Re = 600, alpha_c = 0.6
        let expected = 4.0 / 3.0 * (150.0 * 0.4 / 0.6 + 1.75 * 600.0);
        assert_relative_eq!(Ergun.cd_re(&pair)[2], expected, max_relative = 1e-12);
    }
}
