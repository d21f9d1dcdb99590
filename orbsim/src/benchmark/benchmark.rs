use std::time::Instant;

use crate::simulation::integrator::StageIntegrator;
use crate::simulation::recorder::NullRecorder;
use crate::simulation::states::{Body, NVec3, OrbitalSystem, State};

/// Helper to build a manual system of size `n`
pub fn make_system(n: usize) -> OrbitalSystem {
    let mut sys = OrbitalSystem::new(format!("bench_{n}"));

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0e9,
            (i_f * 0.13).cos() * 5.0e9,
            (i_f * 0.07).sin() * 5.0e9,
        );

        let name = format!("b{i}");
        sys.bodies.insert(name.clone(), Body {
            name,
            mass: 1.0e24,
            radius: 1.0e3,
            state: State::new(x, NVec3::zeros()),
            ephemeris_id: None,
        });
    }

    sys
}

/// Time the all-pairs acceleration pass for a range of n
pub fn bench_refresh() {
    let ns = [100, 200, 400, 800, 1600];

    println!("N,refresh_ms");
    for n in ns {
        let mut sys = make_system(n);

        // Warm up
        sys.refresh_accelerations();

        let t0 = Instant::now();
        sys.refresh_accelerations();
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6}", n, ms);
    }
}

/// Per-step cost of each preset for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrators() {
    let presets = [
        ("euler", StageIntegrator::forward_euler()),
        ("ralston", StageIntegrator::ralston()),
        ("rk4", StageIntegrator::rk4()),
    ];

    println!("N,euler_ms,ralston_ms,rk4_ms");

    for n in (100..=800).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 5 } else { 1 };
        let sys_template = make_system(n);

        let mut row = vec![n.to_string()];
        for (_, integrator) in &presets {
            let mut sys = sys_template.clone();
            let mut sink = NullRecorder;

            let t0 = Instant::now();
            for _ in 0..steps {
                integrator.step(60.0, &mut sys, &mut sink);
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
            row.push(format!("{:.6}", ms));
        }

        println!("{}", row.join(","));
    }
}
