//! Configuration types for loading scenes from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scene. A scenario consists of:
//!
//! - [`FieldConfig`]  – particle count, seed, spawn volume, blend/jitter/spin rates, palette
//! - [`SwarmConfig`]  – force constants for the pointer-attraction physics
//! - [`ModeConfig`]   – mode timer and starting mode
//! - [`TextConfig`]   – string and bitmap settings for the text shape
//! - [`RigConfig`]    – companion robot animation settings
//! - [`ViewerConfig`] – camera placement for the bevy viewer
//! - [`ScenarioConfig`] – top-level wrapper used to load a scene from YAML
//!
//! Every section and every field is optional; missing values fall back to
//! the defaults below, so an empty file is a valid scene.
//!
//! # YAML format
//!
//! ```yaml
//! field:
//!   count: 6000             # number of particles (fixed for the run)
//!   seed: 42                # deterministic seed
//!   palette: ["#06b6d4", "#8b5cf6", "#3b82f6", "#ffffff"]
//!
//! modes:
//!   interval_seconds: 10.0  # timer period between automatic mode changes
//!   initial: swarm          # swarm | sphere | ring | expand | text | dna | cube | wave | vortex | galaxy
//!   reset_timer_on_manual: false
//!
//! text:
//!   text: "PORTFOLIO"
//!
//! rig:
//!   wave_duration: 2.5
//! ```
//!
//! The scenario builder then maps this configuration into the runtime
//! parameter structs used by the engine and the rig.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use crate::simulation::mode::Mode;

/// Particle set and shape-blend settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,            // number of particles N
    pub seed: u64,               // rng seed, makes runs reproducible
    pub spawn_half_extent: f32,  // initial positions are uniform in [-h, h]^3
    pub blend_rate: f32,         // shape blend factor per second (factor = rate * delta)
    pub jitter: f32,             // full width of per-axis shape jitter
    pub spin_rate: f32,          // cloud rotation about the vertical axis, rad/s
    pub palette: Vec<String>,    // "#rrggbb" colors drawn uniformly per particle
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 6000,
            seed: 42,
            spawn_half_extent: 5.0,
            blend_rate: 2.0,
            jitter: 0.01,
            spin_rate: 0.1,
            palette: vec![
                "#06b6d4".to_string(),
                "#8b5cf6".to_string(),
                "#3b82f6".to_string(),
                "#ffffff".to_string(),
            ],
        }
    }
}

/// Force constants for swarm mode
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SwarmConfig {
    pub attraction: f32,          // numerator of attraction / (d + softening)
    pub softening: f32,           // keeps the attraction finite at the pointer
    pub attraction_scale: f32,    // extra scale on the attraction term
    pub dead_zone: f32,           // no attraction closer than this
    pub wander: f32,              // full width of the per-axis wander jitter
    pub centering_radius: f32,    // restoring force kicks in beyond this radius
    pub centering_stiffness: f32, // restoring acceleration = -k * position
    pub damping: f32,             // velocity multiplier applied every tick
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            attraction: 3.0,
            softening: 0.5,
            attraction_scale: 0.2,
            dead_zone: 0.1,
            wander: 0.05,
            centering_radius: 4.0,
            centering_stiffness: 0.1,
            damping: 0.95,
        }
    }
}

/// Mode selector settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ModeConfig {
    pub interval_seconds: f32,       // timer period
    pub initial: Mode,               // mode at start-up
    pub reset_timer_on_manual: bool, // manual advance restarts the timer
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 10.0,
            initial: Mode::Swarm,
            reset_timer_on_manual: false,
        }
    }
}

/// Offscreen bitmap settings for the text shape
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TextConfig {
    pub text: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_px: u32,
    pub threshold: u8, // pixels strictly brighter than this are sampled
    pub scale: f32,    // pixel -> world units
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: "PORTFOLIO".to_string(),
            canvas_width: 1000,
            canvas_height: 300,
            font_px: 200,
            threshold: 128,
            scale: 0.015,
        }
    }
}

/// Companion robot settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RigConfig {
    pub wave_duration: f32,
    pub look_smoothing: f32,  // per-frame lerp factor for the head
    pub sway_smoothing: f32,  // per-frame lerp factor for the whole body
    pub arm_relax_smoothing: f32, // per-frame lerp factor lowering the right arm after a wave
    pub dangle_frequency: f32,
    pub dangle_amplitude: f32,
    pub wave_frequency: f32,
    pub label: String,
    pub position: [f32; 3], // placement of the rig root in the viewer
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            wave_duration: 2.5,
            look_smoothing: 0.1,
            sway_smoothing: 0.05,
            arm_relax_smoothing: 0.1,
            dangle_frequency: 2.0,
            dangle_amplitude: 0.1,
            wave_frequency: 15.0,
            label: "Hi! 👋".to_string(),
            position: [3.0, -0.5, 0.0],
        }
    }
}

/// Camera placement for the viewer
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera_distance: f32,
    pub fov_degrees: f32,
    pub aspect: f32, // used for the pointer mapping until the window reports its size
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_distance: 5.5,
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub field: FieldConfig,
    pub swarm: SwarmConfig,
    pub modes: ModeConfig,
    pub text: TextConfig,
    pub rig: RigConfig,
    pub viewer: ViewerConfig,
}

impl ScenarioConfig {
    /// Read and validate a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a scenario from a YAML string
    pub fn from_yaml(src: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(src).context("failed to parse scenario")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.field.count > 0, "field.count must be at least 1");
        ensure!(!self.field.palette.is_empty(), "field.palette must not be empty");
        for hex in &self.field.palette {
            parse_hex_color(hex)?;
        }
        ensure!(
            self.modes.interval_seconds > 0.0,
            "modes.interval_seconds must be positive, got {}",
            self.modes.interval_seconds
        );
        ensure!(
            self.rig.wave_duration > 0.0,
            "rig.wave_duration must be positive, got {}",
            self.rig.wave_duration
        );
        ensure!(
            self.text.canvas_width > 0 && self.text.canvas_height > 0,
            "text canvas must be non-empty"
        );
        Ok(())
    }
}

/// Parse "#rrggbb" into RGB channels in [0, 1]
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        bail!("invalid color {hex:?}, expected #rrggbb");
    }
    let mut rgb = [0.0f32; 3];
    for (c, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[2 * c..2 * c + 2], 16)
            .with_context(|| format!("invalid color {hex:?}, expected #rrggbb"))?;
        *channel = byte as f32 / 255.0;
    }
    Ok(rgb)
}
