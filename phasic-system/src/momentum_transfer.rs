//! Aggregation of interfacial momentum transfer across phase pairs.

use phasic_core::{
    Mesh, Phase, PhasePairKey, PhaseSet,
    field::{Cell, Face, SurfaceScalarField, VolScalarField, VolVectorField},
};

use crate::{
    CoefficientCache, ConfigError, Error, ForceCategory, InterfacialModels, LazyFieldList,
    MomentumTransferMatrix, MomentumTransferTable, SystemConfig,
    cache::{CoefficientTable, get_or_try_insert, sum_for_phase},
};

/// Answers coefficient and force queries for every phase pair and assembles
/// the interfacial momentum transfer terms of each phase.
///
/// Drag and virtual mass coefficients are cached per evaluation cycle. A cycle
/// starts with [`momentum_transfer`](Self::momentum_transfer), which refreshes
/// every coefficient, and ends with [`invalidate`](Self::invalidate) or the
/// next call to `momentum_transfer`. Within a cycle the per-phase queries reuse
/// cached values and compute any that are missing.
///
/// Pair queries for a pair without a registered model return zero fields.
#[derive(Debug)]
pub struct MomentumTransfer {
    config: SystemConfig,
    models: InterfacialModels,
    cache: CoefficientCache,
}

impl MomentumTransfer {
    /// Builds the interfacial models described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any model or blending is invalid.
    pub fn new(config: &SystemConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.clone(),
            models: InterfacialModels::from_config(config)?,
            cache: CoefficientCache::default(),
        })
    }

    #[must_use]
    pub fn models(&self) -> &InterfacialModels {
        &self.models
    }

    /// Returns the configuration the models were built from.
    #[must_use]
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Returns the drag coefficient of a pair.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model cannot be evaluated.
    pub fn kd(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<VolScalarField, Error> {
        match self.models.drag.get(key) {
            Some(model) => Ok(model.k(phases)?),
            None => Ok(phases.mesh().zero_vol_scalar()),
        }
    }

    /// Returns the sum of the drag coefficients of every pair involving `phase`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the phase is unknown or a model cannot be
    /// evaluated.
    pub fn kd_phase(&mut self, phases: &PhaseSet, phase: &str) -> Result<VolScalarField, Error> {
        check_phase(phases, phase)?;
        for (key, model) in self.models.drag.pairs_with(phase) {
            get_or_try_insert(&mut self.cache.kds, key, || model.k(phases))?;
        }
        Ok(sum_for_phase(&self.cache.kds, phase, phases.mesh().n_cells()))
    }

    /// Returns the drag coefficient of a pair on faces.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model cannot be evaluated.
    pub fn kdf(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<SurfaceScalarField, Error> {
        match self.models.drag.get(key) {
            Some(model) => Ok(model.kf(phases)?),
            None => Ok(phases.mesh().zero_surface_scalar()),
        }
    }

    /// Returns the sum of the face drag coefficients of every pair involving
    /// `phase`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the phase is unknown or a model cannot be
    /// evaluated.
    pub fn kdf_phase(
        &mut self,
        phases: &PhaseSet,
        phase: &str,
    ) -> Result<SurfaceScalarField, Error> {
        check_phase(phases, phase)?;
        for (key, model) in self.models.drag.pairs_with(phase) {
            get_or_try_insert(&mut self.cache.kdfs, key, || model.kf(phases))?;
        }
        Ok(sum_for_phase(&self.cache.kdfs, phase, phases.mesh().n_faces()))
    }

    /// Returns the virtual mass coefficient of a pair.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model cannot be evaluated.
    pub fn vm(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<VolScalarField, Error> {
        match self.models.virtual_mass.get(key) {
            Some(model) => Ok(model.k(phases)?),
            None => Ok(phases.mesh().zero_vol_scalar()),
        }
    }

    /// Returns the virtual mass coefficient of a pair on faces.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model cannot be evaluated.
    pub fn vmf(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<SurfaceScalarField, Error> {
        match self.models.virtual_mass.get(key) {
            Some(model) => Ok(model.kf(phases)?),
            None => Ok(phases.mesh().zero_surface_scalar()),
        }
    }

    /// Returns the sum of the face virtual mass coefficients of every pair
    /// involving `phase`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the phase is unknown or a model cannot be
    /// evaluated.
    pub fn vmf_phase(
        &mut self,
        phases: &PhaseSet,
        phase: &str,
    ) -> Result<SurfaceScalarField, Error> {
        check_phase(phases, phase)?;
        for (key, model) in self.models.virtual_mass.pairs_with(phase) {
            get_or_try_insert(&mut self.cache.vmfs, key, || model.kf(phases))?;
        }
        Ok(sum_for_phase(&self.cache.vmfs, phase, phases.mesh().n_faces()))
    }

    /// Returns the drag coefficients cached in the current cycle.
    #[must_use]
    pub fn kds(&self) -> &CoefficientTable<Cell> {
        self.cache.kds()
    }

    #[must_use]
    pub fn kdfs(&self) -> &CoefficientTable<Face> {
        self.cache.kdfs()
    }

    #[must_use]
    pub fn vms(&self) -> &CoefficientTable<Cell> {
        self.cache.vms()
    }

    #[must_use]
    pub fn vmfs(&self) -> &CoefficientTable<Face> {
        self.cache.vmfs()
    }

    /// Returns the combined lift and wall lubrication force on the first phase
    /// of `key`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a model cannot be evaluated.
    pub fn f(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<VolVectorField, Error> {
        let mut force = phases.mesh().zero_vol_vector();
        if let Some(model) = self.models.lift.get(key) {
            accumulate_on_first(&mut force, &model.f(phases)?, key.first() == model.phase1());
        }
        if let Some(model) = self.models.wall_lubrication.get(key) {
            accumulate_on_first(&mut force, &model.f(phases)?, key.first() == model.phase1());
        }
        Ok(force)
    }

    /// Returns the face flux of the combined lift and wall lubrication force on
    /// the first phase of `key`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a model cannot be evaluated.
    pub fn ff(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<SurfaceScalarField, Error> {
        let mut flux = phases.mesh().zero_surface_scalar();
        if let Some(model) = self.models.lift.get(key) {
            accumulate_flux_on_first(&mut flux, &model.ff(phases)?, key.first() == model.phase1());
        }
        if let Some(model) = self.models.wall_lubrication.get(key) {
            accumulate_flux_on_first(&mut flux, &model.ff(phases)?, key.first() == model.phase1());
        }
        Ok(flux)
    }

    /// Returns the net lift and wall lubrication force on every phase.
    ///
    /// The list is indexed by phase index and holds a field for every phase.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a model cannot be evaluated.
    pub fn fs(&self, phases: &PhaseSet) -> Result<Vec<VolVectorField>, Error> {
        let mesh = phases.mesh();
        let mut fs = LazyFieldList::new(phases.len());

        let lift = self.models.lift.iter().map(|(_, model)| {
            Ok::<_, Error>((model.phase1(), model.phase2(), model.f(phases)?))
        });
        let wall = self.models.wall_lubrication.iter().map(|(_, model)| {
            Ok::<_, Error>((model.phase1(), model.phase2(), model.f(phases)?))
        });

        for pair_force in lift.chain(wall) {
            let (phase1, phase2, force) = pair_force?;
            *Self::set_f(&mut fs, mesh, index_of(phases, phase1)?) += &force;
            *Self::set_f(&mut fs, mesh, index_of(phases, phase2)?) -= &force;
        }

        Ok(fs.into_fields(|| mesh.zero_vol_vector()))
    }

    /// Returns the face flux of the net lift and wall lubrication force on
    /// every phase.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a model cannot be evaluated.
    pub fn ffs(&self, phases: &PhaseSet) -> Result<Vec<SurfaceScalarField>, Error> {
        let mesh = phases.mesh();
        let mut ffs = LazyFieldList::new(phases.len());

        let lift = self.models.lift.iter().map(|(_, model)| {
            Ok::<_, Error>((model.phase1(), model.phase2(), model.ff(phases)?))
        });
        let wall = self.models.wall_lubrication.iter().map(|(_, model)| {
            Ok::<_, Error>((model.phase1(), model.phase2(), model.ff(phases)?))
        });

        for pair_flux in lift.chain(wall) {
            let (phase1, phase2, flux) = pair_flux?;
            *Self::set_ff(&mut ffs, mesh, index_of(phases, phase1)?) += &flux;
            *Self::set_ff(&mut ffs, mesh, index_of(phases, phase2)?) -= &flux;
        }

        Ok(ffs.into_fields(|| mesh.zero_surface_scalar()))
    }

    /// Returns the turbulent dispersion flux of every phase, given the
    /// reciprocal momentum diagonal `rAU` of each phase on cells.
    ///
    /// For a pair with diffusivity `D`, phase 1 receives
    /// `interp(rAU₁ D) · snGrad(α₁) · |S_f|` and phase 2 the negative of the
    /// same expression with its own `rAU₂`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PerPhaseCount`] if `r_aus` does not hold one field per
    /// phase, or another [`Error`] if a model cannot be evaluated.
    pub fn phi_ds(
        &self,
        phases: &PhaseSet,
        r_aus: &[VolScalarField],
    ) -> Result<Vec<SurfaceScalarField>, Error> {
        check_count("rAU", phases, r_aus.len())?;
        let mesh = phases.mesh();
        let mut phi_ds = LazyFieldList::new(phases.len());

        for (_, model) in self.models.turbulent_dispersion.iter() {
            let d = model.d(phases)?;
            let index1 = index_of(phases, model.phase1())?;
            let index2 = index_of(phases, model.phase2())?;
            let alpha1 = phases.phases()[index1].alpha();
            let gradient = mesh.sn_grad(alpha1) * mesh.mag_sf();

            *Self::set_phi_d(&mut phi_ds, mesh, index1) +=
                &(mesh.interpolate(&(&r_aus[index1] * &d)) * &gradient);
            *Self::set_phi_d(&mut phi_ds, mesh, index2) -=
                &(mesh.interpolate(&(&r_aus[index2] * &d)) * &gradient);
        }

        Ok(phi_ds.into_fields(|| mesh.zero_surface_scalar()))
    }

    /// Returns the turbulent dispersion flux of every phase, given the
    /// reciprocal momentum diagonal `rAUf` of each phase on faces.
    ///
    /// Phase 1 of a pair receives `rAUf₁ · interp(D) · snGrad(α₁) · |S_f|` and
    /// phase 2 the negative with its own `rAUf₂`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PerPhaseCount`] if `r_aufs` does not hold one field per
    /// phase, or another [`Error`] if a model cannot be evaluated.
    pub fn phi_dfs(
        &self,
        phases: &PhaseSet,
        r_aufs: &[SurfaceScalarField],
    ) -> Result<Vec<SurfaceScalarField>, Error> {
        check_count("rAUf", phases, r_aufs.len())?;
        let mesh = phases.mesh();
        let mut phi_dfs = LazyFieldList::new(phases.len());

        for (_, model) in self.models.turbulent_dispersion.iter() {
            let index1 = index_of(phases, model.phase1())?;
            let index2 = index_of(phases, model.phase2())?;
            let alpha1 = phases.phases()[index1].alpha();
            let flux =
                mesh.interpolate(&model.d(phases)?) * &mesh.sn_grad(alpha1) * mesh.mag_sf();

            *Self::set_phi_d(&mut phi_dfs, mesh, index1) += &(&r_aufs[index1] * &flux);
            *Self::set_phi_d(&mut phi_dfs, mesh, index2) -= &(&r_aufs[index2] * &flux);
        }

        Ok(phi_dfs.into_fields(|| mesh.zero_surface_scalar()))
    }

    /// Returns the turbulent diffusivity of a pair.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model cannot be evaluated.
    pub fn d(&self, phases: &PhaseSet, key: &PhasePairKey) -> Result<VolScalarField, Error> {
        match self.models.turbulent_dispersion.get(key) {
            Some(model) => Ok(model.d(phases)?),
            None => Ok(phases.mesh().zero_vol_scalar()),
        }
    }

    /// Returns the force slot of a phase, allocating a zero field on first use.
    pub fn set_f<'a>(
        fs: &'a mut LazyFieldList<VolVectorField>,
        mesh: &Mesh,
        index: usize,
    ) -> &'a mut VolVectorField {
        fs.get_or_insert_with(index, || mesh.zero_vol_vector())
    }

    /// Returns the force flux slot of a phase, allocating a zero field on
    /// first use.
    pub fn set_ff<'a>(
        ffs: &'a mut LazyFieldList<SurfaceScalarField>,
        mesh: &Mesh,
        index: usize,
    ) -> &'a mut SurfaceScalarField {
        ffs.get_or_insert_with(index, || mesh.zero_surface_scalar())
    }

    /// Returns the dispersion flux slot of a phase, allocating a zero field on
    /// first use.
    pub fn set_phi_d<'a>(
        phi_ds: &'a mut LazyFieldList<SurfaceScalarField>,
        mesh: &Mesh,
        index: usize,
    ) -> &'a mut SurfaceScalarField {
        phi_ds.get_or_insert_with(index, || mesh.zero_surface_scalar())
    }

    /// Starts a new evaluation cycle and returns the momentum transfer terms
    /// of every phase.
    ///
    /// Drag and virtual mass coefficients are recomputed for every registered
    /// pair and cached. The returned matrices hold every interfacial exchange
    /// except drag, which the pressure-velocity coupling applies through
    /// [`kd_phase`](Self::kd_phase) and [`kdf_phase`](Self::kdf_phase):
    ///
    /// - virtual mass: inertia `Vm` and source `Vm · DU_other/Dt`
    /// - lift and wall lubrication: source `±F`
    /// - turbulent dispersion: source `∓D ∇α₁`
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a model cannot be evaluated. The cache is left
    /// empty in that case.
    pub fn momentum_transfer(
        &mut self,
        phases: &PhaseSet,
    ) -> Result<MomentumTransferTable, Error> {
        self.invalidate();
        let result = self.assemble(phases);
        if result.is_err() {
            self.invalidate();
        }
        result
    }

    fn assemble(&mut self, phases: &PhaseSet) -> Result<MomentumTransferTable, Error> {
        let mesh = phases.mesh();

        for (key, model) in self.models.drag.iter() {
            self.cache.kds.insert(key.clone(), model.k(phases)?);
            self.cache.kdfs.insert(key.clone(), model.kf(phases)?);
        }
        for (key, model) in self.models.virtual_mass.iter() {
            self.cache.vms.insert(key.clone(), model.k(phases)?);
            self.cache.vmfs.insert(key.clone(), model.kf(phases)?);
        }
        log::debug!(
            "momentum transfer: cached {} drag and {} virtual mass coefficient(s)",
            self.cache.kds.len(),
            self.cache.vms.len()
        );

        let mut table: MomentumTransferTable = phases
            .phases()
            .iter()
            .map(|phase| {
                (
                    phase.name().to_owned(),
                    MomentumTransferMatrix::zeros(mesh.n_cells()),
                )
            })
            .collect();
        for (key, model) in self.models.virtual_mass.iter() {
            let vm = &self.cache.vms[key];
            let phase1 = phases.get(model.phase1()).ok_or_else(|| unknown(model.phase1()))?;
            let phase2 = phases.get(model.phase2()).ok_or_else(|| unknown(model.phase2()))?;

            let m1 = matrix_mut(&mut table, phase1.name())?;
            m1.add_inertia(vm);
            m1.add_source(&phase2.acceleration().scaled(vm));
            let m2 = matrix_mut(&mut table, phase2.name())?;
            m2.add_inertia(vm);
            m2.add_source(&phase1.acceleration().scaled(vm));
        }

        for (_, model) in self.models.lift.iter() {
            let force = model.f(phases)?;
            matrix_mut(&mut table, model.phase1())?.add_source(&force);
            matrix_mut(&mut table, model.phase2())?.subtract_source(&force);
        }
        for (_, model) in self.models.wall_lubrication.iter() {
            let force = model.f(phases)?;
            matrix_mut(&mut table, model.phase1())?.add_source(&force);
            matrix_mut(&mut table, model.phase2())?.subtract_source(&force);
        }

        for (_, model) in self.models.turbulent_dispersion.iter() {
            let phase1 = phases.get(model.phase1()).ok_or_else(|| unknown(model.phase1()))?;
            let force = mesh.grad(phase1.alpha()).scaled(&model.d(phases)?);
            matrix_mut(&mut table, model.phase1())?.subtract_source(&force);
            matrix_mut(&mut table, model.phase2())?.add_source(&force);
        }

        log::trace!("momentum transfer: assembled {} phase matrices", table.len());
        Ok(table)
    }

    /// Rebuilds the interfacial models from a new configuration.
    ///
    /// Returns whether any force category or its blending changed. A change
    /// ends the current evaluation cycle.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the new configuration is invalid, in which
    /// case the current models are kept.
    pub fn read(&mut self, config: &SystemConfig) -> Result<bool, ConfigError> {
        let models = InterfacialModels::from_config(config)?;
        let changed: Vec<&str> = ForceCategory::ALL
            .into_iter()
            .filter(|&category| self.config.category_differs(config, category))
            .map(ForceCategory::name)
            .collect();
        self.config = config.clone();

        if changed.is_empty() {
            log::debug!("momentum transfer: interfacial models unchanged");
            return Ok(false);
        }

        self.models = models;
        self.invalidate();
        log::info!("momentum transfer: rebuilt {}", changed.join(", "));
        Ok(true)
    }

    /// Ends the current evaluation cycle, dropping every cached coefficient.
    pub fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            log::trace!("momentum transfer: invalidating coefficient cache");
        }
        self.cache.clear();
    }
}

fn matrix_mut<'a>(
    table: &'a mut MomentumTransferTable,
    name: &str,
) -> Result<&'a mut MomentumTransferMatrix, Error> {
    table.get_mut(name).ok_or_else(|| unknown(name))
}

fn unknown(name: &str) -> Error {
    Error::UnknownPhase(name.to_owned())
}

fn check_phase(phases: &PhaseSet, phase: &str) -> Result<(), Error> {
    phases.get(phase).map(|_| ()).ok_or_else(|| unknown(phase))
}

fn index_of(phases: &PhaseSet, name: &str) -> Result<usize, Error> {
    phases
        .get(name)
        .map(Phase::index)
        .ok_or_else(|| unknown(name))
}

fn check_count(field: &'static str, phases: &PhaseSet, found: usize) -> Result<(), Error> {
    if found == phases.len() {
        Ok(())
    } else {
        Err(Error::PerPhaseCount {
            field,
            expected: phases.len(),
            found,
        })
    }
}

fn accumulate_on_first(total: &mut VolVectorField, force: &VolVectorField, on_first: bool) {
    if on_first {
        *total += force;
    } else {
        *total -= force;
    }
}

fn accumulate_flux_on_first(
    total: &mut SurfaceScalarField,
    flux: &SurfaceScalarField,
    on_first: bool,
) {
    if on_first {
        *total += flux;
    } else {
        *total -= flux;
    }
}
