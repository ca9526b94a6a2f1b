//! Regime-blended interfacial models.

use phasic_core::{
    Mesh, Phase, PhasePair, PhaseSet,
    field::{BlendField, Location, ScalarField, SurfaceScalarField, VolScalarField, VolVectorField},
};

use crate::{
    ModelError, PairBlending,
    drag::DragModel,
    lift::LiftModel,
    turbulent_dispersion::TurbulentDispersionModel,
    virtual_mass::VirtualMassModel,
    wall_lubrication::WallLubricationModel,
};

/// The flow regime a sub-model of a [`BlendedInterfacialModel`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Neither phase is clearly continuous (`"1 and 2"`).
    Mixed,
    /// Phase 1 dispersed in phase 2 (`"1 in 2"`).
    OneInTwo,
    /// Phase 2 dispersed in phase 1 (`"2 in 1"`).
    TwoInOne,
}

/// Up to three sub-models of one force category for a pair of phases,
/// combined by regime weights.
///
/// Results are always expressed for phase 1: coefficients are symmetric, and
/// vector forces are the force on phase 1, so the "2 in 1" force enters with
/// a negative sign.
#[derive(Debug)]
pub struct BlendedInterfacialModel<M: ?Sized> {
    phase1: String,
    phase2: String,
    blending: PairBlending,
    model: Option<Box<M>>,
    model1_in2: Option<Box<M>>,
    model2_in1: Option<Box<M>>,
}

impl<M: ?Sized> BlendedInterfacialModel<M> {
    /// Creates a blended model with no sub-models.
    #[must_use]
    pub fn new(
        phase1: impl Into<String>,
        phase2: impl Into<String>,
        blending: PairBlending,
    ) -> Self {
        Self {
            phase1: phase1.into(),
            phase2: phase2.into(),
            blending,
            model: None,
            model1_in2: None,
            model2_in1: None,
        }
    }

    #[must_use]
    pub fn phase1(&self) -> &str {
        &self.phase1
    }

    #[must_use]
    pub fn phase2(&self) -> &str {
        &self.phase2
    }

    #[must_use]
    pub fn blending(&self) -> &PairBlending {
        &self.blending
    }

    /// Sets the sub-model for a regime, returning the one it replaces.
    pub fn insert(&mut self, regime: Regime, model: Box<M>) -> Option<Box<M>> {
        self.slot_mut(regime).replace(model)
    }

    #[must_use]
    pub fn model(&self, regime: Regime) -> Option<&M> {
        match regime {
            Regime::Mixed => self.model.as_deref(),
            Regime::OneInTwo => self.model1_in2.as_deref(),
            Regime::TwoInOne => self.model2_in1.as_deref(),
        }
    }

    fn slot_mut(&mut self, regime: Regime) -> &mut Option<Box<M>> {
        match regime {
            Regime::Mixed => &mut self.model,
            Regime::OneInTwo => &mut self.model1_in2,
            Regime::TwoInOne => &mut self.model2_in1,
        }
    }

    fn phases<'a>(&self, phases: &'a PhaseSet) -> Result<(&'a Phase, &'a Phase), ModelError> {
        let find = |name: &str| {
            phases
                .get(name)
                .ok_or_else(|| ModelError::UnknownPhase(name.to_owned()))
        };
        Ok((find(&self.phase1)?, find(&self.phase2)?))
    }

    /// Evaluates every present sub-model and sums them with regime weights.
    ///
    /// `to_location` carries the cell weights to where `T` lives, and `sign2`
    /// scales the "2 in 1" contribution.
    fn blend<L, T>(
        &self,
        phases: &PhaseSet,
        to_location: fn(&Mesh, VolScalarField) -> ScalarField<L>,
        sign2: f64,
        eval: impl Fn(&M, &PhasePair<'_>) -> Result<T, ModelError>,
    ) -> Result<T, ModelError>
    where
        L: Location,
        T: BlendField<L>,
    {
        let (phase1, phase2) = self.phases(phases)?;
        let mesh = phases.mesh();
        let one_in_two = PhasePair::new(phase1, phase2, mesh);
        let two_in_one = PhasePair::new(phase2, phase1, mesh);

        let f1 = self.blending.f1(phase1, phase2);
        let f2 = self.blending.f2(phase1, phase2);
        let mixed = (&f1 + &f2).map(|sum| 1.0 - sum);

        let f1 = to_location(mesh, f1);
        let mut result = T::zeros(f1.len());

        if let Some(model) = self.model.as_deref() {
            result.add_weighted(&eval(model, &one_in_two)?, &to_location(mesh, mixed));
        }
        if let Some(model) = self.model1_in2.as_deref() {
            result.add_weighted(&eval(model, &one_in_two)?, &f1);
        }
        if let Some(model) = self.model2_in1.as_deref() {
            let f2 = to_location(mesh, f2) * sign2;
            result.add_weighted(&eval(model, &two_in_one)?, &f2);
        }

        Ok(result)
    }
}

fn on_cells(_: &Mesh, weight: VolScalarField) -> VolScalarField {
    weight
}

fn on_faces(mesh: &Mesh, weight: VolScalarField) -> SurfaceScalarField {
    mesh.interpolate(&weight)
}

impl BlendedInterfacialModel<dyn DragModel> {
    /// Returns the blended drag coefficient.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn k(&self, phases: &PhaseSet) -> Result<VolScalarField, ModelError> {
        self.blend(phases, on_cells, 1.0, |model, pair| model.k(pair))
    }

    /// Returns the blended drag coefficient on faces.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn kf(&self, phases: &PhaseSet) -> Result<SurfaceScalarField, ModelError> {
        self.blend(phases, on_faces, 1.0, |model, pair| model.kf(pair))
    }
}

impl BlendedInterfacialModel<dyn VirtualMassModel> {
    /// Returns the blended virtual mass coefficient.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn k(&self, phases: &PhaseSet) -> Result<VolScalarField, ModelError> {
        self.blend(phases, on_cells, 1.0, |model, pair| model.k(pair))
    }

    /// Returns the blended virtual mass coefficient on faces.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn kf(&self, phases: &PhaseSet) -> Result<SurfaceScalarField, ModelError> {
        self.blend(phases, on_faces, 1.0, |model, pair| model.kf(pair))
    }
}

impl BlendedInterfacialModel<dyn LiftModel> {
    /// Returns the blended lift force on phase 1.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn f(&self, phases: &PhaseSet) -> Result<VolVectorField, ModelError> {
        self.blend(phases, on_cells, -1.0, |model, pair| model.f(pair))
    }

    /// Returns the face flux of the blended lift force on phase 1.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn ff(&self, phases: &PhaseSet) -> Result<SurfaceScalarField, ModelError> {
        self.blend(phases, on_faces, -1.0, |model, pair| model.ff(pair))
    }
}

impl BlendedInterfacialModel<dyn WallLubricationModel> {
    /// Returns the blended wall lubrication force on phase 1.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn f(&self, phases: &PhaseSet) -> Result<VolVectorField, ModelError> {
        self.blend(phases, on_cells, -1.0, |model, pair| model.f(pair))
    }

    /// Returns the face flux of the blended wall lubrication force on phase 1.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn ff(&self, phases: &PhaseSet) -> Result<SurfaceScalarField, ModelError> {
        self.blend(phases, on_faces, -1.0, |model, pair| model.ff(pair))
    }
}

impl BlendedInterfacialModel<dyn TurbulentDispersionModel> {
    /// Returns the blended turbulent diffusivity.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a phase is missing or a sub-model fails.
    pub fn d(&self, phases: &PhaseSet) -> Result<VolScalarField, ModelError> {
        self.blend(phases, on_cells, 1.0, |model, pair| model.d(pair))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_relative_eq;
    use phasic_core::{Fraction, WallPatches};

    use super::*;
    use crate::{Blending, drag::test_utils::properties};

    /// A sub-model that returns the same value everywhere.
    #[derive(Debug)]
    struct Uniform(f64);

    impl DragModel for Uniform {
        fn k(&self, pair: &PhasePair<'_>) -> Result<VolScalarField, ModelError> {
            Ok(VolScalarField::uniform(pair.mesh().n_cells(), self.0))
        }
    }

    impl LiftModel for Uniform {
        fn f(&self, pair: &PhasePair<'_>) -> Result<VolVectorField, ModelError> {
            Ok(VolVectorField::uniform(pair.mesh().n_cells(), [self.0, 0.0, 0.0]))
        }
    }

    const N: usize = 201;

    /// Air fraction rising linearly from 0 to 1 across a row of cells.
    fn ramp() -> PhaseSet {
        let mesh = Mesh::cartesian([N, 1, 1], [1.0, 0.01, 0.01], WallPatches::default()).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let alpha: Vec<f64> = (0..N).map(|i| i as f64 / (N - 1) as f64).collect();

        let mut air = Phase::new("air", 0, properties(1.0, 1.8e-5, 3.0), N);
        air.set_alpha(VolScalarField::from_vec(alpha.clone())).unwrap();
        let mut water = Phase::new("water", 1, properties(1000.0, 1e-3, 3.0), N);
        water
            .set_alpha(VolScalarField::from_vec(alpha.iter().map(|a| 1.0 - a).collect()))
            .unwrap();

        PhaseSet::new(mesh, vec![air, water]).unwrap()
    }

    fn thresholds(value: f64) -> BTreeMap<String, Fraction> {
        ["air", "water"]
            .into_iter()
            .map(|name| (name.to_owned(), Fraction::new(value).unwrap()))
            .collect()
    }

    fn linear() -> PairBlending {
        Blending::Linear {
            min_fully_continuous_alpha: thresholds(0.7),
            min_partly_continuous_alpha: thresholds(0.3),
        }
        .for_pair("air", "water")
        .unwrap()
    }

    fn three_regime_drag(blending: PairBlending) -> BlendedInterfacialModel<dyn DragModel> {
        let mut drag: BlendedInterfacialModel<dyn DragModel> =
            BlendedInterfacialModel::new("air", "water", blending);
        drag.insert(Regime::Mixed, Box::new(Uniform(1.0)));
        drag.insert(Regime::OneInTwo, Box::new(Uniform(2.0)));
        drag.insert(Regime::TwoInOne, Box::new(Uniform(3.0)));
        drag
    }

    #[test]
    fn weights_are_a_partition_of_unity() {
        let phases = ramp();
        let mut drag: BlendedInterfacialModel<dyn DragModel> =
            BlendedInterfacialModel::new("air", "water", linear());
        for regime in [Regime::Mixed, Regime::OneInTwo, Regime::TwoInOne] {
            assert!(drag.insert(regime, Box::new(Uniform(4.0))).is_none());
        }

        let k = drag.k(&phases).unwrap();
        for value in k.iter() {
            assert_relative_eq!(value, 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn regimes_take_over_at_the_extremes() {
        let phases = ramp();
        let k = three_regime_drag(linear()).k(&phases).unwrap();

        // Dilute air: air dispersed in water.
        assert_relative_eq!(k[0], 2.0, epsilon = 1e-9);
        // Balanced: only the mixed model.
        assert_relative_eq!(k[N / 2], 1.0, epsilon = 1e-9);
        // Dilute water: water dispersed in air.
        assert_relative_eq!(k[N - 1], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn blended_coefficient_is_continuous_across_the_band() {
        let phases = ramp();
        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / (N - 1) as f64;

        for blending in [
            linear(),
            PairBlending::Hyperbolic {
                min1: 0.5,
                min2: 0.5,
                scale: 0.3,
            },
        ] {
            let k = three_regime_drag(blending).k(&phases).unwrap();
            // k = 1 + f1 + 2 f2, and no weight changes faster than 2/0.3 per
            // unit alpha.
            for i in 1..N {
                let jump = (k[i] - k[i - 1]).abs();
                assert!(jump < 10.0 * step, "jump {jump} at cell {i}");
            }
        }
    }

    #[test]
    fn face_values_blend_interpolated_weights() {
        let phases = ramp();
        let drag = three_regime_drag(linear());

        let k = drag.k(&phases).unwrap();
        let kf = drag.kf(&phases).unwrap();
        assert_eq!(kf.len(), phases.mesh().n_faces());
        // Weights are linear in alpha away from the band edges.
        assert_relative_eq!(kf[N / 2], 0.5 * (k[N / 2] + k[N / 2 + 1]), epsilon = 1e-9);
    }

    #[test]
    fn force_from_the_reverse_regime_acts_on_phase_two() {
        let phases = ramp();
        let step = |continuous: &str| {
            Blending::None {
                continuous_phase: Some(continuous.to_owned()),
            }
            .for_pair("air", "water")
            .unwrap()
        };

        let mut lift: BlendedInterfacialModel<dyn LiftModel> =
            BlendedInterfacialModel::new("air", "water", step("water"));
        lift.insert(Regime::OneInTwo, Box::new(Uniform(2.0)));
        lift.insert(Regime::TwoInOne, Box::new(Uniform(3.0)));
        assert_relative_eq!(lift.f(&phases).unwrap().row(0)[0], 2.0);

        let mut lift: BlendedInterfacialModel<dyn LiftModel> =
            BlendedInterfacialModel::new("air", "water", step("air"));
        lift.insert(Regime::TwoInOne, Box::new(Uniform(3.0)));
        assert_relative_eq!(lift.f(&phases).unwrap().row(0)[0], -3.0);
    }

    #[test]
    fn reports_missing_phases() {
        let phases = ramp();
        let drag: BlendedInterfacialModel<dyn DragModel> =
            BlendedInterfacialModel::new("air", "oil", linear());

        assert_eq!(
            drag.k(&phases).unwrap_err(),
            ModelError::UnknownPhase("oil".into())
        );
    }
}
