//! Pairwise force laws for the n-body stream
//!
//! A [`ForceLaw`] answers one question: what force does particle `b` exert
//! on particle `a`. [`ForceSet`] holds one or more laws and turns them into
//! the net force on every particle of a [`ParticleSystem`] by direct O(N²)
//! summation over the pre-step configuration.

use crate::simulation::states::{NVec2, Particle, ParticleSystem};

/// Strategy for the force acting on `a` due to `b`.
///
/// Implementations must return exactly zero when the two positions coincide;
/// that covers self-interaction and keeps the accumulation free of divisions
/// by zero.
pub trait ForceLaw {
    fn force(&self, a: &Particle, b: &Particle) -> NVec2;
}

/// Softened gravity: `G m_a m_b (b - a) / (|r|^3 + softening)`
///
/// The additive softening bounds the force near close approach; far away it
/// falls off like the inverse square.
#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct SoftenedGravity {
    pub G: f64, // gravitational constant
    pub softening: f64, // added to |r|^3
}

impl ForceLaw for SoftenedGravity {
    fn force(&self, a: &Particle, b: &Particle) -> NVec2 {
        let d2 = a.distance_squared(b);
        if d2 == 0.0 {
            // same particle, or two coincident ones
            return NVec2::zeros();
        }

        let c = self.G * a.m * b.m / (d2 * d2.sqrt() + self.softening);
        c * (b.x - a.x)
    }
}

/// Plain Newtonian gravity: magnitude `G m_a m_b / |r|^2` along `b - a`
#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct InverseSquareGravity {
    pub G: f64, // gravitational constant
}

impl ForceLaw for InverseSquareGravity {
    fn force(&self, a: &Particle, b: &Particle) -> NVec2 {
        let d2 = a.distance_squared(b);
        if d2 == 0.0 {
            return NVec2::zeros();
        }

        // G m_a m_b / |r|^2 * r / |r|
        let c = self.G * a.m * b.m / (d2 * d2.sqrt());
        c * (b.x - a.x)
    }
}

/// Collection of force laws whose contributions are summed per particle
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force law
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceLaw + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Force on `a` due to `b`, summed over all terms
    pub fn pair_force(&self, a: &Particle, b: &Particle) -> NVec2 {
        self.terms.iter().map(|t| t.force(a, b)).sum()
    }

    /// Net force on `p` from every particle in `sys`, itself included
    /// (which contributes zero)
    pub fn net_force(&self, p: &Particle, sys: &ParticleSystem) -> NVec2 {
        sys.particles.iter().map(|o| self.pair_force(p, o)).sum()
    }

    /// Net forces for the whole system, `out[i]` for particle `i`
    /// - every entry is computed against the same, unmodified `sys`
    pub fn net_forces(&self, sys: &ParticleSystem) -> Vec<NVec2> {
        sys.particles.iter().map(|p| self.net_force(p, sys)).collect()
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}
