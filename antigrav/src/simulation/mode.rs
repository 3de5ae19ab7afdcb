//! Field modes and the timer that cycles through them

use std::fmt;

use serde::Deserialize;

use crate::simulation::shapes::Shape;

/// What the particle field is doing
/// Every mode except `Swarm` blends toward a precomputed shape
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Swarm,
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

impl Mode {
    /// Fixed cycling order
    pub const ALL: [Mode; 10] = [
        Mode::Swarm,
        Mode::Sphere,
        Mode::Ring,
        Mode::Expand,
        Mode::Text,
        Mode::Dna,
        Mode::Cube,
        Mode::Wave,
        Mode::Vortex,
        Mode::Galaxy,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next mode in the cycle, wrapping from the last to the first
    pub fn next(self) -> Mode {
        Mode::ALL[(self.index() + 1) % Mode::ALL.len()]
    }

    /// Target shape for this mode, `None` for swarm
    pub fn shape(self) -> Option<Shape> {
        match self {
            Mode::Swarm => None,
            Mode::Sphere => Some(Shape::Sphere),
            Mode::Ring => Some(Shape::Ring),
            Mode::Expand => Some(Shape::Expand),
            Mode::Text => Some(Shape::Text),
            Mode::Dna => Some(Shape::Dna),
            Mode::Cube => Some(Shape::Cube),
            Mode::Wave => Some(Shape::Wave),
            Mode::Vortex => Some(Shape::Vortex),
            Mode::Galaxy => Some(Shape::Galaxy),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Swarm => "swarm",
            Mode::Sphere => "sphere",
            Mode::Ring => "ring",
            Mode::Expand => "expand",
            Mode::Text => "text",
            Mode::Dna => "dna",
            Mode::Cube => "cube",
            Mode::Wave => "wave",
            Mode::Vortex => "vortex",
            Mode::Galaxy => "galaxy",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current mode plus the periodic advance timer
#[derive(Debug, Clone)]
pub struct ModeCycle {
    current: Mode,
    interval: f32,        // seconds between automatic advances
    accumulator: f32,     // seconds since the last timer advance
    reset_on_manual: bool, // manual advance restarts the timer
}

impl ModeCycle {
    pub fn new(initial: Mode, interval: f32, reset_on_manual: bool) -> Self {
        Self {
            current: initial,
            interval,
            accumulator: 0.0,
            reset_on_manual,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Seconds until the timer fires next
    pub fn remaining(&self) -> f32 {
        (self.interval - self.accumulator).max(0.0)
    }

    /// Feed frame time into the timer; returns how many times it fired
    pub fn update(&mut self, delta: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.accumulator += delta.max(0.0);
        if self.accumulator < self.interval {
            return 0;
        }

        // Closed form: repeated subtraction stalls once interval << accumulator
        let fired = (self.accumulator / self.interval).floor();
        self.accumulator = self.accumulator.rem_euclid(self.interval);
        let steps = (fired % Mode::ALL.len() as f32) as usize;
        for _ in 0..steps {
            self.current = self.current.next();
        }
        fired.min(u32::MAX as f32) as u32
    }

    /// Manual trigger: advance immediately
    pub fn advance(&mut self) -> Mode {
        self.current = self.current.next();
        if self.reset_on_manual {
            self.accumulator = 0.0;
        }
        self.current
    }
}
