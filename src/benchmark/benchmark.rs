use std::time::Instant;

use crate::configuration::config::{Encoding, ForceLawConfig, ScenarioConfig};
use crate::simulation::integrator::{Integrator, IntegratorKind};
use crate::simulation::scenario::force_set;
use crate::simulation::states::{NVec2, Particle, ParticleSystem};
use crate::streaming::codec::FrameCodec;
use crate::visualization::renderer::FrameRenderer;

/// Helper to build a manual system of size `n`
/// deterministic positions, no rng needed
fn make_system(n: usize, mass: f64) -> ParticleSystem {
    let particles = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new((i_f * 0.37).sin() * 150.0, (i_f * 0.13).cos() * 150.0);
            Particle::at_rest(mass, x)
        })
        .collect();
    ParticleSystem::new(particles)
}

/// Time ticks for every force law / integrator pairing
pub fn bench_ticks() {
    let ns = [2, 3, 16, 64];
    let steps = 10_000;

    eprintln!("{:>4}  {:<15} {:<17} {:>12}", "N", "law", "integrator", "us/tick");

    for n in ns {
        for law in [ForceLawConfig::Softened, ForceLawConfig::InverseSquare] {
            for integrator in [IntegratorKind::Leapfrog, IntegratorKind::SymplecticEuler] {
                let mut cfg = ScenarioConfig::three_body();
                cfg.engine.force_law = law;
                let forces = force_set(&cfg);

                let mut sys = make_system(n, cfg.parameters.mass);
                integrator.prepare(&mut sys, &forces);

                let t0 = Instant::now();
                let mut done = 0;
                for _ in 0..steps {
                    match integrator.step(&sys, &forces, cfg.parameters.epoch) {
                        Ok(next) => sys = next,
                        Err(_) => break, // diverged, report what we have
                    }
                    done += 1;
                }
                let us = t0.elapsed().as_secs_f64() * 1e6 / done.max(1) as f64;

                eprintln!("{:>4}  {:<15} {:<17} {:>12.3}", n, format!("{law:?}"), integrator.name(), us);
            }
        }
    }
}

/// Time rendering plus encoding of a three-body frame for each encoding
pub fn bench_encode() {
    let frames = 100;
    let cfg = ScenarioConfig::trails();
    let sys = make_system(3, cfg.parameters.mass);

    eprintln!("{:<6} {:>12} {:>12}", "enc", "ms/frame", "bytes/frame");

    for encoding in [Encoding::Png, Encoding::Jpeg] {
        let codec = FrameCodec::new(encoding, cfg.render.jpeg_quality);
        let mut renderer = FrameRenderer::new(&cfg.render, cfg.engine.render_mode, false);

        let mut total = 0usize;
        let t0 = Instant::now();
        for _ in 0..frames {
            let frame = renderer.render(&sys);
            match codec.encode(&frame) {
                Ok(bytes) => total += bytes.len(),
                Err(e) => {
                    eprintln!("{encoding:?}: {e}");
                    break;
                }
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / frames as f64;

        eprintln!("{:<6} {:>12.3} {:>12}", format!("{encoding:?}"), ms, total / frames);
    }
}
