use std::collections::HashMap;

use phasic_core::{
    PhasePairKey,
    field::{Cell, Face, Location, ScalarField},
};

/// Coefficient fields keyed by unordered phase pair.
pub type CoefficientTable<L> = HashMap<PhasePairKey, ScalarField<L>>;

/// Drag and virtual mass coefficients computed during one evaluation cycle.
///
/// Entries are only ever inserted by the momentum transfer aggregator and are
/// dropped together when the cycle ends.
#[derive(Debug, Clone, Default)]
pub struct CoefficientCache {
    pub(crate) kds: CoefficientTable<Cell>,
    pub(crate) kdfs: CoefficientTable<Face>,
    pub(crate) vms: CoefficientTable<Cell>,
    pub(crate) vmfs: CoefficientTable<Face>,
}

impl CoefficientCache {
    /// Drops every cached coefficient.
    pub fn clear(&mut self) {
        self.kds.clear();
        self.kdfs.clear();
        self.vms.clear();
        self.vmfs.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kds.is_empty() && self.kdfs.is_empty() && self.vms.is_empty() && self.vmfs.is_empty()
    }

    #[must_use]
    pub fn kds(&self) -> &CoefficientTable<Cell> {
        &self.kds
    }

    #[must_use]
    pub fn kdfs(&self) -> &CoefficientTable<Face> {
        &self.kdfs
    }

    #[must_use]
    pub fn vms(&self) -> &CoefficientTable<Cell> {
        &self.vms
    }

    #[must_use]
    pub fn vmfs(&self) -> &CoefficientTable<Face> {
        &self.vmfs
    }
}

/// Returns the cached entry for `key`, computing and storing it if absent.
pub(crate) fn get_or_try_insert<'a, L: Location, E>(
    table: &'a mut CoefficientTable<L>,
    key: &PhasePairKey,
    compute: impl FnOnce() -> Result<ScalarField<L>, E>,
) -> Result<&'a ScalarField<L>, E> {
    let key = key.unordered();
    if !table.contains_key(&key) {
        let value = compute()?;
        table.insert(key.clone(), value);
    }
    Ok(&table[&key])
}

/// Sums the entries of `table` whose pair involves `phase`.
pub(crate) fn sum_for_phase<L: Location>(
    table: &CoefficientTable<L>,
    phase: &str,
    len: usize,
) -> ScalarField<L> {
    table
        .iter()
        .filter(|(key, _)| key.contains(phase))
        .fold(ScalarField::zeros(len), |mut sum, (_, value)| {
            sum += value;
            sum
        })
}
