//! Rotating card ring
//!
//! Cards stand on a circle facing outward; the ring turns so the active card
//! faces the camera, always along the shorter way round.

use std::f32::consts::{PI, TAU};

use crate::simulation::states::FVec3;

use super::spring::{Spring, SpringConfig};

pub const RING_RADIUS: f32 = 2.0;
pub const MIN_RING_CARDS: usize = 6;
const TURN_SMOOTHING: f32 = 0.02;

/// Repeat the list until it has at least `MIN_RING_CARDS` entries.
/// Entries are indices into the original list.
pub fn fill_ring(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut filled: Vec<usize> = (0..len).collect();
    while filled.len() < MIN_RING_CARDS {
        filled.extend(0..len);
    }
    filled
}

/// Position on the ring and the yaw that faces outward
pub fn ring_slot(index: usize, total: usize) -> (FVec3, f32) {
    let theta = index as f32 / total.max(1) as f32 * TAU;
    let x = theta.sin() * RING_RADIUS;
    let z = theta.cos() * RING_RADIUS;
    (FVec3::new(x, 0.0, z), x.atan2(z))
}

/// Move `target` by whole turns so it is within half a turn of `current`
pub fn nearest_turn(current: f32, target: f32) -> f32 {
    let mut target = target;
    while target - current > PI {
        target -= TAU;
    }
    while target - current < -PI {
        target += TAU;
    }
    target
}

#[derive(Debug, Clone)]
pub struct CardRing {
    pub items: Vec<usize>,
    pub active: usize,
    pub rotation_y: f32,
    pub scales: Vec<Spring<f32>>, // active card grows
}

impl CardRing {
    pub fn new(len: usize) -> Self {
        let items = fill_ring(len);
        let scales = (0..items.len())
            .map(|i| Spring::new(if i == 0 { 1.1 } else { 0.8 }, SpringConfig::RING))
            .collect();
        Self {
            items,
            active: 0,
            rotation_y: 0.0,
            scales,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.active = index;
        for (i, s) in self.scales.iter_mut().enumerate() {
            s.set_target(if i == index { 1.1 } else { 0.8 });
        }
    }

    /// Ring yaw that brings the active card to the front
    pub fn target_rotation(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        -(self.active as f32 / self.items.len() as f32) * TAU
    }

    pub fn update(&mut self, dt: f32) {
        let target = nearest_turn(self.rotation_y, self.target_rotation());
        self.rotation_y += (target - self.rotation_y) * TURN_SMOOTHING;
        for s in &mut self.scales {
            s.step(dt);
        }
    }
}
