//! Fixed-step time integrators for the particle system
//!
//! Both schemes build a brand new particle sequence from the previous one.
//! Forces are evaluated once per tick against the pre-step configuration, so
//! no particle ever sees another particle's already-updated position within
//! the same tick.

use serde::Deserialize;

use super::forces::ForceSet;
use super::states::{NVec2, Particle, ParticleSystem};
use crate::error::{Error, Result};

/// A fixed-step integration scheme
pub trait Integrator {
    /// One-time setup before the first tick (e.g. seeding accelerations)
    fn prepare(&self, _sys: &mut ParticleSystem, _forces: &ForceSet) {}

    /// Advance a single particle given its net force `f` at the pre-step configuration
    fn advance(&self, p: &Particle, f: NVec2, dt: f64) -> Particle;

    /// Advance the whole system by one tick of length `dt`
    ///
    /// The returned system replaces `sys` wholesale. A non-finite position or
    /// velocity in the result is reported as [`Error::NonFinite`].
    fn step(&self, sys: &ParticleSystem, forces: &ForceSet, dt: f64) -> Result<ParticleSystem> {
        let net = forces.net_forces(sys);

        let particles: Vec<Particle> = sys
            .particles
            .iter()
            .zip(net)
            .map(|(p, f)| self.advance(p, f, dt))
            .collect();

        let next = ParticleSystem {
            particles,
            tick: sys.tick + 1,
        };

        if let Some(index) = next.first_non_finite() {
            return Err(Error::NonFinite { tick: next.tick, index });
        }
        Ok(next)
    }
}

/// Leapfrog: half-kick with the previous acceleration, drift, then a second
/// half-kick with the new acceleration, which is stored for the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Leapfrog;

impl Integrator for Leapfrog {
    fn prepare(&self, sys: &mut ParticleSystem, forces: &ForceSet) {
        // a_0 = F(x_0) / m, needed by the first half-kick
        let net = forces.net_forces(sys);
        for (p, f) in sys.particles.iter_mut().zip(net) {
            p.a = f / p.m;
        }
    }

    fn advance(&self, p: &Particle, f: NVec2, dt: f64) -> Particle {
        let half_dt = 0.5 * dt;
        let a_new = f / p.m;

        // Kick: v_half = v + dt/2 * a_prev
        let v_half = p.v + half_dt * p.a;

        // Drift: x' = x + dt * v_half
        let x = p.x + dt * v_half;

        // Kick: v' = v_half + dt/2 * a_new
        let v = v_half + half_dt * a_new;

        Particle { m: p.m, x, v, a: a_new }
    }
}

/// Symplectic Euler: drift with the current velocity, then kick with `f / m`.
/// The acceleration it stores is never read back; it is only there for the overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEuler;

impl Integrator for SymplecticEuler {
    fn advance(&self, p: &Particle, f: NVec2, dt: f64) -> Particle {
        let a = f / p.m;
        Particle {
            m: p.m,
            x: p.x + dt * p.v,
            v: p.v + dt * a,
            a,
        }
    }
}

/// Which integration scheme a scenario uses
/// `integrator: "leapfrog"` or `integrator: "symplectic_euler"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    #[serde(rename = "leapfrog")]
    #[default]
    Leapfrog,

    #[serde(rename = "symplectic_euler")]
    SymplecticEuler,
}

impl IntegratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::Leapfrog => "leapfrog",
            IntegratorKind::SymplecticEuler => "symplectic_euler",
        }
    }
}

impl Integrator for IntegratorKind {
    fn prepare(&self, sys: &mut ParticleSystem, forces: &ForceSet) {
        match self {
            IntegratorKind::Leapfrog => Leapfrog.prepare(sys, forces),
            IntegratorKind::SymplecticEuler => SymplecticEuler.prepare(sys, forces),
        }
    }

    fn advance(&self, p: &Particle, f: NVec2, dt: f64) -> Particle {
        match self {
            IntegratorKind::Leapfrog => Leapfrog.advance(p, f, dt),
            IntegratorKind::SymplecticEuler => SymplecticEuler.advance(p, f, dt),
        }
    }
}
