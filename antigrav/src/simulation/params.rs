//! Numerical parameters for the particle field
//!
//! `Parameters` holds runtime settings:
//! - particle count, seed and spawn volume,
//! - shape blend rate, jitter width and cloud spin rate,
//! - the color palette,
//! - swarm damping

use super::states::Rgb;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub count: usize, // particle count N
    pub seed: u64, // deterministic seed
    pub spawn_half_extent: f32, // initial cube half width
    pub blend_rate: f32, // shape approach rate, factor = rate * delta
    pub jitter: f32, // full width of shape-mode jitter per axis
    pub spin_rate: f32, // rad/s about +Y
    pub damping: f32, // swarm velocity multiplier per tick
    pub palette: Vec<Rgb>, // particle colors
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            count: 6000,
            seed: 42,
            spawn_half_extent: 5.0,
            blend_rate: 2.0,
            jitter: 0.01,
            spin_rate: 0.1,
            damping: 0.95,
            palette: vec![
                [0.024, 0.714, 0.831],
                [0.545, 0.361, 0.965],
                [0.231, 0.510, 0.965],
                [1.0, 1.0, 1.0],
            ],
        }
    }
}
