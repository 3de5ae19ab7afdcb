//! Core state types for the particle field.
//!
//! Defines the per-particle buffers (`ParticleSet`), the per-frame input the
//! renderer hands to the engine (`FrameInput`), and the viewport used to map
//! pointer coordinates into world space.

use nalgebra::{Vector2, Vector3};
use rand::rngs::StdRng;
use rand::Rng;

pub type FVec2 = Vector2<f32>;
pub type FVec3 = Vector3<f32>;
pub type Rgb = [f32; 3];

/// Fixed-size particle buffers
///
/// All three buffers always hold exactly `len()` entries; only positions
/// and velocities change after construction
#[derive(Debug, Clone)]
pub struct ParticleSet {
    positions: Vec<FVec3>,  // current positions (model space)
    velocities: Vec<FVec3>, // only integrated in swarm mode
    colors: Vec<Rgb>,       // fixed at construction
    pub rotation_y: f32,    // rotation of the whole cloud about +Y
    dirty: bool,            // positions changed since the last upload
}

impl ParticleSet {
    /// Seed `count` particles uniformly inside [-half_extent, half_extent]^3
    /// and draw each color uniformly from `palette`
    pub fn seeded(count: usize, half_extent: f32, palette: &[Rgb], rng: &mut StdRng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push(FVec3::new(
                (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
                (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
                (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
            ));
            let color = if palette.is_empty() {
                [1.0, 1.0, 1.0]
            } else {
                palette[rng.gen_range(0..palette.len())]
            };
            colors.push(color);
        }

        Self {
            positions,
            velocities: vec![FVec3::zeros(); count],
            colors,
            rotation_y: 0.0,
            dirty: true,
        }
    }

    /// Build a set from explicit positions, all with the same color
    pub fn from_positions(positions: Vec<FVec3>, color: Rgb) -> Self {
        let n = positions.len();
        Self {
            positions,
            velocities: vec![FVec3::zeros(); n],
            colors: vec![color; n],
            rotation_y: 0.0,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[FVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[FVec3] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Mutable position and velocity buffers, borrowed together for integration
    pub fn kinematics_mut(&mut self) -> (&mut [FVec3], &mut [FVec3]) {
        (&mut self.positions, &mut self.velocities)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Copy positions into a flat renderer buffer and clear the dirty flag
    pub fn upload_positions(&mut self, out: &mut Vec<[f32; 3]>) {
        out.clear();
        out.extend(self.positions.iter().map(|p| [p.x, p.y, p.z]));
        self.dirty = false;
    }
}

/// Visible extent of the z = 0 plane, in world units
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport of a perspective camera at `distance` from the origin
    pub fn from_camera(distance: f32, fov_degrees: f32, aspect: f32) -> Self {
        let height = 2.0 * distance * (fov_degrees.to_radians() * 0.5).tan();
        Self {
            width: height * aspect,
            height,
        }
    }

    /// Map normalized device coordinates ([-1, 1] on both axes) to world x/y
    pub fn ndc_to_world(&self, ndc: FVec2) -> FVec2 {
        FVec2::new(ndc.x * self.width * 0.5, ndc.y * self.height * 0.5)
    }
}

/// Everything the renderer supplies for one tick
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub elapsed: f32,     // seconds since start
    pub delta: f32,       // seconds since the previous tick
    pub pointer_ndc: FVec2,
    pub viewport: Viewport,
}

impl FrameInput {
    /// A tick with the pointer at the center of the screen
    pub fn centered(elapsed: f32, delta: f32, viewport: Viewport) -> Self {
        Self {
            elapsed,
            delta,
            pointer_ndc: FVec2::zeros(),
            viewport,
        }
    }

    pub fn pointer_world(&self) -> FVec2 {
        self.viewport.ndc_to_world(self.pointer_ndc)
    }
}
