//! Per-frame pose of the companion robot
//!
//! `animate` rewrites joint rotations from (time, pointer, wave state) and
//! the previous rotations, which carry the exponential smoothing.
//! `WaveState` is the only state machine: Idle -> Waving on click, back to
//! Idle once the wave duration has passed.

use std::f32::consts::PI;

use crate::configuration::config::RigConfig;
use crate::simulation::states::FVec2;

use super::skeleton::{JointName, Skeleton};

/// Runtime copy of the rig settings
#[derive(Debug, Clone)]
pub struct RigParams {
    pub wave_duration: f32,
    pub look_smoothing: f32,
    pub sway_smoothing: f32,
    pub arm_relax_smoothing: f32,
    pub dangle_frequency: f32,
    pub dangle_amplitude: f32,
    pub wave_frequency: f32,
    pub label: String,
}

impl RigParams {
    pub fn from_config(cfg: &RigConfig) -> Self {
        Self {
            wave_duration: cfg.wave_duration,
            look_smoothing: cfg.look_smoothing,
            sway_smoothing: cfg.sway_smoothing,
            arm_relax_smoothing: cfg.arm_relax_smoothing,
            dangle_frequency: cfg.dangle_frequency,
            dangle_amplitude: cfg.dangle_amplitude,
            wave_frequency: cfg.wave_frequency,
            label: cfg.label.clone(),
        }
    }
}

impl Default for RigParams {
    fn default() -> Self {
        Self::from_config(&RigConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WaveState {
    #[default]
    Idle,
    Waving { since: f32 },
}

impl WaveState {
    /// Click: start (or restart) the wave at `now`
    pub fn trigger(&mut self, now: f32) {
        *self = WaveState::Waving { since: now };
    }

    /// Drop back to Idle once `duration` has elapsed
    pub fn update(&mut self, now: f32, duration: f32) {
        if let WaveState::Waving { since } = *self {
            if now >= since + duration {
                *self = WaveState::Idle;
            }
        }
    }

    /// True on [since, since + duration)
    pub fn is_waving(&self, now: f32, duration: f32) -> bool {
        match *self {
            WaveState::Idle => false,
            WaveState::Waving { since } => now >= since && now < since + duration,
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Speech bubble text while waving
pub fn speech_label<'a>(wave: &WaveState, now: f32, params: &'a RigParams) -> Option<&'a str> {
    wave.is_waving(now, params.wave_duration)
        .then_some(params.label.as_str())
}

/// Pose every animated joint for time `t` and pointer `pointer_ndc`
pub fn animate(skeleton: &mut Skeleton, t: f32, pointer_ndc: FVec2, wave: &WaveState, params: &RigParams) {
    let (mx, my) = (pointer_ndc.x, pointer_ndc.y);

    // Look targets: +/- 0.5 rad at the screen edges
    let look_x = -my * 0.5;
    let look_y = mx * 0.5;

    // Whole-body sway toward the pointer
    if let Some(root) = skeleton.joint_mut(JointName::Root) {
        root.rotation.z = lerp(root.rotation.z, mx * 0.1, params.sway_smoothing);
        root.rotation.x = lerp(root.rotation.x, -my * 0.1, params.sway_smoothing);
    }

    if let Some(head) = skeleton.joint_mut(JointName::Head) {
        head.rotation.y = lerp(head.rotation.y, look_y * 1.2, params.look_smoothing);
        head.rotation.x = lerp(head.rotation.x, look_x * 0.8, params.look_smoothing);
    }

    let dangle = (t * params.dangle_frequency).sin() * params.dangle_amplitude;

    if let Some(arm) = skeleton.joint_mut(JointName::LeftArm) {
        arm.rotation.x = dangle;
    }

    if let Some(arm) = skeleton.joint_mut(JointName::RightArm) {
        if wave.is_waving(t, params.wave_duration) {
            // Arm up high, fast side-to-side
            arm.rotation.z = PI - 0.5 + (t * params.wave_frequency).sin() * 0.5;
            arm.rotation.x = -0.5;
        } else {
            arm.rotation.z = lerp(arm.rotation.z, 0.0, params.arm_relax_smoothing);
            arm.rotation.x = -dangle;
        }
    }

    if let Some(leg) = skeleton.joint_mut(JointName::LeftLeg) {
        leg.rotation.z = dangle * 0.5;
    }
    if let Some(leg) = skeleton.joint_mut(JointName::RightLeg) {
        leg.rotation.z = -dangle * 0.5;
    }
}

/// Robot plus its wave state, advanced together by the viewer
#[derive(Debug, Clone)]
pub struct Companion {
    pub skeleton: Skeleton,
    pub wave: WaveState,
    pub params: RigParams,
}

impl Companion {
    pub fn new(params: RigParams) -> Self {
        Self {
            skeleton: Skeleton::chrome_robot(),
            wave: WaveState::Idle,
            params,
        }
    }

    pub fn trigger_wave(&mut self, now: f32) {
        self.wave.trigger(now);
    }

    pub fn tick(&mut self, t: f32, pointer_ndc: FVec2) {
        self.wave.update(t, self.params.wave_duration);
        animate(&mut self.skeleton, t, pointer_ndc, &self.wave, &self.params);
    }

    pub fn label(&self, now: f32) -> Option<&str> {
        speech_label(&self.wave, now, &self.params)
    }
}
