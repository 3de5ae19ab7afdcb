//! Closed-form target shapes
//!
//! Each shape maps particle `i` of `n` to one target position. Generators
//! draw from the engine rng, so a seed fixes every target buffer.

use std::f32::consts::{PI, TAU};

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::states::FVec3;
use crate::simulation::text::{text_targets, GlyphSet, TextRaster};

const SPHERE_RADIUS: f32 = 2.5;
const RING_RADIUS: f32 = 3.0;
const RING_WIDTH: f32 = 0.5;
const RING_THICKNESS: f32 = 0.5;
const EXPAND_SIZE: f32 = 15.0;
const DNA_RADIUS: f32 = 1.5;
const DNA_TURNS: f32 = 10.0; // full turns over the whole strand
const DNA_HEIGHT: f32 = 10.0;
const CUBE_HALF: f32 = 3.0;
const WAVE_SIZE: f32 = 10.0;
const WAVE_AMPLITUDE: f32 = 1.5;
const VORTEX_TURNS: f32 = 10.0;
const VORTEX_HEIGHT: f32 = 8.0;
const GALAXY_ARMS: usize = 3;
const GALAXY_RADIUS: f32 = 5.0;
const GALAXY_TWIST: f32 = 2.0; // extra radians of arm angle per unit radius
const GALAXY_THICKNESS: f32 = 0.5;

/// Named target configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Sphere,
    Ring,
    Expand,
    Text,
    Dna,
    Cube,
    Wave,
    Vortex,
    Galaxy,
}

impl Shape {
    pub const ALL: [Shape; 9] = [
        Shape::Sphere,
        Shape::Ring,
        Shape::Expand,
        Shape::Text,
        Shape::Dna,
        Shape::Cube,
        Shape::Wave,
        Shape::Vortex,
        Shape::Galaxy,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Uniform in [-0.5, 0.5)
fn centered(rng: &mut StdRng) -> f32 {
    rng.gen::<f32>() - 0.5
}

/// Points on a sphere of radius 2.5, uniform in area
pub fn sphere(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|_| {
            let theta = rng.gen::<f32>() * TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            FVec3::new(
                SPHERE_RADIUS * phi.sin() * theta.cos(),
                SPHERE_RADIUS * phi.sin() * theta.sin(),
                SPHERE_RADIUS * phi.cos(),
            )
        })
        .collect()
}

/// Flat annulus in the x/z plane with a little vertical spread
pub fn ring(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|_| {
            let r = RING_RADIUS + rng.gen::<f32>() * RING_WIDTH;
            let theta = rng.gen::<f32>() * TAU;
            let y = centered(rng) * RING_THICKNESS;
            FVec3::new(r * theta.cos(), y, r * theta.sin())
        })
        .collect()
}

/// Loose cube of side 15, reads as an explosion after the tighter shapes
pub fn expand(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|_| {
            FVec3::new(
                centered(rng) * EXPAND_SIZE,
                centered(rng) * EXPAND_SIZE,
                centered(rng) * EXPAND_SIZE,
            )
        })
        .collect()
}

/// Two helices half a turn apart; even indices on one strand, odd on the other
pub fn dna(n: usize) -> Vec<FVec3> {
    (0..n)
        .map(|i| {
            let s = i as f32 / n as f32;
            let t = s * TAU * DNA_TURNS;
            let phase = if i % 2 == 0 { 0.0 } else { PI };
            FVec3::new(
                (t + phase).cos() * DNA_RADIUS,
                s * DNA_HEIGHT - DNA_HEIGHT * 0.5,
                (t + phase).sin() * DNA_RADIUS,
            )
        })
        .collect()
}

/// Uniform fill of the cube [-3, 3]^3
pub fn cube(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|_| {
            FVec3::new(
                centered(rng) * CUBE_HALF * 2.0,
                centered(rng) * CUBE_HALF * 2.0,
                centered(rng) * CUBE_HALF * 2.0,
            )
        })
        .collect()
}

/// Height field y = 1.5 sin(x) cos(z) over a 10 x 10 square
pub fn wave(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|_| {
            let x = centered(rng) * WAVE_SIZE;
            let z = centered(rng) * WAVE_SIZE;
            FVec3::new(x, x.sin() * z.cos() * WAVE_AMPLITUDE, z)
        })
        .collect()
}

/// Tornado: height grows with index, radius grows with height
pub fn vortex(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|i| {
            let t = rng.gen::<f32>() * TAU * VORTEX_TURNS;
            let y = (i as f32 / n as f32) * VORTEX_HEIGHT - VORTEX_HEIGHT * 0.5;
            let r = (y + 5.0) * 0.5;
            FVec3::new(t.cos() * r, y, t.sin() * r)
        })
        .collect()
}

/// Three spiral arms; the arm angle winds further out with radius
pub fn galaxy(n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    (0..n)
        .map(|i| {
            let arm = (i % GALAXY_ARMS) as f32;
            let theta = rng.gen::<f32>() * TAU;
            let r = rng.gen::<f32>() * GALAXY_RADIUS;
            let spiral = theta + r * GALAXY_TWIST + arm * (TAU / GALAXY_ARMS as f32);
            let y = centered(rng) * GALAXY_THICKNESS;
            FVec3::new(spiral.cos() * r, y, spiral.sin() * r)
        })
        .collect()
}

/// One precomputed target buffer per shape, each of the same length
#[derive(Debug, Clone)]
pub struct TargetTable {
    buffers: Vec<Vec<FVec3>>, // indexed by `Shape::slot`
}

impl TargetTable {
    /// Generate every shape for `n` particles
    pub fn build(n: usize, raster: &TextRaster, glyphs: &dyn GlyphSet, rng: &mut StdRng) -> Self {
        let buffers = Shape::ALL
            .iter()
            .map(|&shape| match shape {
                Shape::Sphere => sphere(n, rng),
                Shape::Ring => ring(n, rng),
                Shape::Expand => expand(n, rng),
                Shape::Text => text_targets(&raster.bright_points(glyphs), n, rng),
                Shape::Dna => dna(n),
                Shape::Cube => cube(n, rng),
                Shape::Wave => wave(n, rng),
                Shape::Vortex => vortex(n, rng),
                Shape::Galaxy => galaxy(n, rng),
            })
            .collect();
        Self { buffers }
    }

    pub fn get(&self, shape: Shape) -> &[FVec3] {
        &self.buffers[shape.slot()]
    }

    /// Number of targets per shape
    pub fn len(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
