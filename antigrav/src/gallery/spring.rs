//! Damped springs for card animation
//!
//! a = (-tension * (x - target) - friction * v) / mass, integrated with
//! semi-implicit Euler in fixed 1 ms substeps so the feel does not depend
//! on the frame rate.

use std::ops::{Add, Mul, Sub};

use crate::simulation::states::FVec3;

const SUBSTEP: f32 = 0.001;
const MAX_SUBSTEPS: u32 = 250; // long frames are clamped to 250 ms
const CARRY_SLACK: f32 = 1e-3; // in substeps, absorbs f32 drift in the carried time

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
}

impl SpringConfig {
    pub const DEFAULT: SpringConfig = SpringConfig { mass: 1.0, tension: 170.0, friction: 26.0 };
    /// Heavier, bouncier stack cards
    pub const STACK: SpringConfig = SpringConfig { mass: 2.0, tension: 150.0, friction: 18.0 };
    pub const RING: SpringConfig = SpringConfig { mass: 2.0, tension: 150.0, friction: 30.0 };
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Values a spring can animate
pub trait Animatable: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {
    fn magnitude(self) -> f32;
    fn zero() -> Self;
}

impl Animatable for f32 {
    fn magnitude(self) -> f32 {
        self.abs()
    }

    fn zero() -> Self {
        0.0
    }
}

impl Animatable for FVec3 {
    fn magnitude(self) -> f32 {
        self.norm()
    }

    fn zero() -> Self {
        FVec3::zeros()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Spring<V: Animatable> {
    pub value: V,
    pub velocity: V,
    pub target: V,
    pub config: SpringConfig,
    carry: f32, // frame time not yet spent on a whole substep
}

impl<V: Animatable> Spring<V> {
    /// At rest on `value`
    pub fn new(value: V, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: V::zero(),
            target: value,
            config,
            carry: 0.0,
        }
    }

    pub fn set_target(&mut self, target: V) {
        self.target = target;
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.carry += dt.max(0.0);
        let whole = (self.carry / SUBSTEP + CARRY_SLACK).floor() as u32;
        let steps = whole.min(MAX_SUBSTEPS);
        self.carry = if whole > MAX_SUBSTEPS {
            // Clamped frame: the excess is dropped, not replayed later
            0.0
        } else {
            (self.carry - steps as f32 * SUBSTEP).max(0.0)
        };

        let SpringConfig { mass, tension, friction } = self.config;

        for _ in 0..steps {
            let spring = (self.value - self.target) * -tension;
            let damping = self.velocity * -friction;
            let accel = (spring + damping) * (1.0 / mass);
            self.velocity = self.velocity + accel * SUBSTEP;
            self.value = self.value + self.velocity * SUBSTEP;
        }
    }

    /// Close enough to the target and slow enough to stop animating
    pub fn is_settled(&self, precision: f32) -> bool {
        (self.value - self.target).magnitude() < precision && self.velocity.magnitude() < precision
    }
}
