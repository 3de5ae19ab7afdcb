//! Acceleration contributors for swarm mode
//!
//! Swarm mode has no target shape; particles are pushed around by a sum of
//! acceleration terms: pointer attraction, random wander and a restoring
//! force that keeps the cloud near the origin.

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::states::{FVec2, FVec3};

/// What an acceleration term may look at for one tick
pub struct ForceContext<'a> {
    pub positions: &'a [FVec3],
    pub pointer: FVec2, // pointer in world units on the z = 0 plane
}

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per particle
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// The three terms swarm mode uses, with the default constants
    pub fn swarm_default() -> Self {
        Self::new()
            .with(PointerAttraction::default())
            .with(Wander::default())
            .with(Centering::default())
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for all particles in `ctx`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, ctx: &ForceContext<'_>, rng: &mut StdRng, out: &mut [FVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = FVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(ctx, rng, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for swarm acceleration sources
/// Implementations add their contribution into `out[i]` for each particle
pub trait Acceleration {
    fn acceleration(&self, ctx: &ForceContext<'_>, rng: &mut StdRng, out: &mut [FVec3]);
}

/// Planar pull toward the pointer
/// a_xy += (pointer - p)_xy * strength / (d + softening) * scale, for d > dead_zone
pub struct PointerAttraction {
    pub strength: f32,
    pub softening: f32,
    pub scale: f32,
    pub dead_zone: f32,
}

impl Default for PointerAttraction {
    fn default() -> Self {
        Self {
            strength: 3.0,
            softening: 0.5,
            scale: 0.2,
            dead_zone: 0.1,
        }
    }
}

impl Acceleration for PointerAttraction {
    fn acceleration(&self, ctx: &ForceContext<'_>, _rng: &mut StdRng, out: &mut [FVec3]) {
        for (p, a) in ctx.positions.iter().zip(out.iter_mut()) {
            let dx = ctx.pointer.x - p.x;
            let dy = ctx.pointer.y - p.y;
            let dist = (dx * dx + dy * dy).sqrt();

            // Too close: skip, avoids a twitchy clump right under the cursor
            if dist <= self.dead_zone {
                continue;
            }

            let force = self.strength / (dist + self.softening);
            a.x += dx * force * self.scale;
            a.y += dy * force * self.scale;
        }
    }
}

/// Uniform random push on every axis, each in [-amplitude/2, amplitude/2)
pub struct Wander {
    pub amplitude: f32,
}

impl Default for Wander {
    fn default() -> Self {
        Self { amplitude: 0.05 }
    }
}

impl Acceleration for Wander {
    fn acceleration(&self, _ctx: &ForceContext<'_>, rng: &mut StdRng, out: &mut [FVec3]) {
        for a in out.iter_mut() {
            a.x += (rng.gen::<f32>() - 0.5) * self.amplitude;
            a.y += (rng.gen::<f32>() - 0.5) * self.amplitude;
            a.z += (rng.gen::<f32>() - 0.5) * self.amplitude;
        }
    }
}

/// Restoring force toward the origin, only outside `radius`
pub struct Centering {
    pub radius: f32,
    pub stiffness: f32,
}

impl Default for Centering {
    fn default() -> Self {
        Self {
            radius: 4.0,
            stiffness: 0.1,
        }
    }
}

impl Acceleration for Centering {
    fn acceleration(&self, ctx: &ForceContext<'_>, _rng: &mut StdRng, out: &mut [FVec3]) {
        for (p, a) in ctx.positions.iter().zip(out.iter_mut()) {
            if p.norm() > self.radius {
                *a -= *p * self.stiffness;
            }
        }
    }
}
