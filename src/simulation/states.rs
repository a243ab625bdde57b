//! Core state types for the 2D n-body stream.
//!
//! - `Particle` holds mass, position, velocity and the staged acceleration
//!   used by the leapfrog half-kick
//! - `ParticleSystem` is the fixed-length ordered sequence of particles plus
//!   the number of ticks advanced so far
//!
//! Particles have no identity beyond their index in the sequence.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub m: f64, // mass
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration from the previous tick (leapfrog only)
}

impl Particle {
    /// Particle at rest at `x`
    pub fn at_rest(m: f64, x: NVec2) -> Self {
        Self {
            m,
            x,
            v: NVec2::zeros(),
            a: NVec2::zeros(),
        }
    }

    /// Squared distance to `other`
    pub fn distance_squared(&self, other: &Particle) -> f64 {
        (self.x - other.x).norm_squared()
    }

    /// True when position, velocity and acceleration are all finite
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).chain(self.a.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>, // insertion order, length fixed for the run
    pub tick: u64, // ticks advanced so far
}

impl ParticleSystem {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles, tick: 0 }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Index of the first particle whose state is not finite, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.is_finite())
    }
}
