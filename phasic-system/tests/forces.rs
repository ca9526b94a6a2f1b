mod common;

use approx::assert_relative_eq;
use phasic_core::{PhasePairKey, field::VolScalarField};
use phasic_system::{Error, LazyFieldList, MomentumTransfer};

use common::{BUBBLY_FLOW, system};

#[test]
fn force_slots_are_allocated_once() {
    let system = system(BUBBLY_FLOW);
    let mesh = system.mesh();
    let mut fs = LazyFieldList::new(system.phases().len());

    let first: *const _ = MomentumTransfer::set_f(&mut fs, mesh, 1);
    let second: *const _ = MomentumTransfer::set_f(&mut fs, mesh, 1);
    assert!(std::ptr::eq(first, second));
    assert!(fs.get(0).is_none());

    let fields = fs.into_fields(|| mesh.zero_vol_vector());
    assert_eq!(fields.len(), 3);
    assert!(fields.iter().all(|field| field.len() == mesh.n_cells()));
}

#[test]
fn pair_forces_act_equally_and_oppositely() {
    let system = system(BUBBLY_FLOW);
    let (phases, momentum) = (system.phases(), system.momentum());

    let fs = momentum.fs(phases).unwrap();
    assert_eq!(fs.len(), 3);
    assert!(fs[0].max_mag() > 0.0);
    assert_relative_eq!((&fs[0] + &fs[1]).max_mag(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(fs[2].max_mag(), 0.0);

    let on_gas = momentum
        .f(phases, &PhasePairKey::ordered("gas", "liquid"))
        .unwrap();
    let on_liquid = momentum
        .f(phases, &PhasePairKey::ordered("liquid", "gas"))
        .unwrap();
    assert_relative_eq!((&on_gas - &fs[0]).max_mag(), 0.0, epsilon = 1e-12);
    assert_relative_eq!((&on_liquid - &fs[1]).max_mag(), 0.0, epsilon = 1e-12);
}

#[test]
fn face_forces_are_fluxes_of_the_pair_force() {
    let system = system(BUBBLY_FLOW);
    let (phases, momentum) = (system.phases(), system.momentum());
    let key = PhasePairKey::ordered("gas", "liquid");

    let ffs = momentum.ffs(phases).unwrap();
    let ff = momentum.ff(phases, &key).unwrap();
    assert_eq!(ffs.len(), 3);
    assert_eq!(ff.len(), phases.mesh().n_faces());
    assert_relative_eq!((&ffs[0] - &ff).max_abs(), 0.0, epsilon = 1e-12);
    assert_relative_eq!((&ffs[0] + &ffs[1]).max_abs(), 0.0, epsilon = 1e-12);

    let expected = phases.mesh().flux(&momentum.f(phases, &key).unwrap());
    assert_relative_eq!((&ff - &expected).max_abs(), 0.0, epsilon = 1e-9);
}

#[test]
fn dispersion_fluxes_follow_the_fraction_gradient() {
    let system = system(BUBBLY_FLOW);
    let (phases, momentum) = (system.phases(), system.momentum());
    let mesh = phases.mesh();
    let r_au = VolScalarField::uniform(mesh.n_cells(), 2.0);

    let phi_ds = momentum
        .phi_ds(phases, &[r_au.clone(), r_au.clone(), r_au])
        .unwrap();
    assert!(phi_ds[0].max_abs() > 0.0);
    assert_relative_eq!((&phi_ds[0] + &phi_ds[1]).max_abs(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(phi_ds[2].max_abs(), 0.0);

    // With uniform coefficients the cell and face forms agree.
    let r_auf = mesh.interpolate(&VolScalarField::uniform(mesh.n_cells(), 2.0));
    let phi_dfs = momentum
        .phi_dfs(phases, &[r_auf.clone(), r_auf.clone(), r_auf])
        .unwrap();
    assert_relative_eq!((&phi_dfs[0] - &phi_ds[0]).max_abs(), 0.0, epsilon = 1e-9);

    // Gas fraction rises with y, so the gas flux is nowhere negative.
    let d = momentum
        .d(phases, &PhasePairKey::new("gas", "liquid"))
        .unwrap();
    assert!(d.iter().all(|value| value > 0.0));
    assert!(phi_ds[0].iter().all(|value| value >= 0.0));
}

#[test]
fn rejects_coefficient_lists_of_the_wrong_length() {
    let system = system(BUBBLY_FLOW);
    let (phases, momentum) = (system.phases(), system.momentum());
    let r_au = VolScalarField::uniform(phases.mesh().n_cells(), 1.0);

    assert!(matches!(
        momentum.phi_ds(phases, &[r_au]),
        Err(Error::PerPhaseCount {
            expected: 3,
            found: 1,
            ..
        })
    ));
}
