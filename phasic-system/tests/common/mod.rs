#![allow(dead_code)]

use phasic_core::{
    Mesh, WallPatches,
    field::{VolScalarField, VolVectorField},
};
use phasic_system::PhaseSystem;

/// Gas bubbles in a liquid, with an inert solid phase that has no models.
pub const BUBBLY_FLOW: &str = r#"
    [[phases]]
    name = "gas"
    density = 1.2
    viscosity = 1.8e-5
    diameter = 4e-3

    [[phases]]
    name = "liquid"
    density = 1000.0
    viscosity = 1e-3
    diameter = 4e-3

    [[phases]]
    name = "solid"
    density = 2500.0
    viscosity = 1e-3
    diameter = 1e-3

    [blending.default]
    type = "none"
    continuous_phase = "liquid"

    [[drag]]
    pair = "gas in liquid"
    type = "schiller_naumann"

    [[virtual_mass]]
    pair = "gas in liquid"
    type = "constant_coefficient"
    cvm = 0.5

    [[lift]]
    pair = "gas in liquid"
    type = "constant_coefficient"
    cl = 0.5

    [[wall_lubrication]]
    pair = "gas in liquid"
    type = "antal"
    cw1 = -0.01
    cw2 = 0.05

    [[turbulent_dispersion]]
    pair = "gas in liquid"
    type = "lopez_de_bertodano"
    ctd = 1.0
"#;

pub const NX: usize = 4;
pub const NY: usize = 6;

/// A plane channel with walls at `y = 0` and `y = 0.6`.
pub fn channel() -> Mesh {
    Mesh::cartesian([NX, NY, 1], [0.4, 0.6, 0.1], WallPatches {
        y: true,
        ..WallPatches::default()
    })
    .unwrap()
}

/// Builds a system from `config` and puts it in a sheared, accelerating,
/// turbulent state with gas fraction increasing away from the lower wall.
pub fn system(config: &str) -> PhaseSystem {
    let mut system = PhaseSystem::from_toml_str(config, channel()).unwrap();
    let centres = system.mesh().centres().to_vec();
    let n = centres.len();

    let alpha_gas: Vec<f64> = centres.iter().map(|c| 0.05 + 0.2 * c[1]).collect();
    let liquid_velocity: Vec<[f64; 3]> = centres.iter().map(|c| [2.0 * c[1], 0.0, 0.0]).collect();
    let gas_velocity: Vec<[f64; 3]> = liquid_velocity
        .iter()
        .map(|u| [u[0] + 0.1, 0.2, 0.0])
        .collect();

    let phases = system.phases_mut();
    let gas = phases.get_mut("gas").unwrap();
    gas.set_alpha(VolScalarField::from_vec(alpha_gas.clone()))
        .unwrap();
    gas.set_velocity(VolVectorField::from_rows(&gas_velocity))
        .unwrap();
    gas.set_acceleration(VolVectorField::uniform(n, [0.0, 1.0, 0.0]))
        .unwrap();

    let liquid = phases.get_mut("liquid").unwrap();
    liquid
        .set_alpha(VolScalarField::from_vec(
            alpha_gas.iter().map(|a| 1.0 - a).collect(),
        ))
        .unwrap();
    liquid
        .set_velocity(VolVectorField::from_rows(&liquid_velocity))
        .unwrap();
    liquid
        .set_acceleration(VolVectorField::uniform(n, [0.5, 0.0, 0.0]))
        .unwrap();
    liquid
        .set_turbulent_kinetic_energy(VolScalarField::uniform(n, 0.01))
        .unwrap();

    system
}
