//! Build a fully-initialized scene from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - particle field engine (`FieldEngine`) with targets precomputed
//! - companion robot (`Companion`)
//! - the viewport used to map pointer coordinates
//!
//! The scenario is inserted into bevy as a `Resource` and consumed by the
//! update and rendering systems

use anyhow::Result;
use bevy::prelude::Resource;

use crate::configuration::config::{parse_hex_color, ScenarioConfig, ViewerConfig};
use crate::rig::pose::{Companion, RigParams};
use crate::simulation::engine::FieldEngine;
use crate::simulation::forces::{AccelSet, Centering, PointerAttraction, Wander};
use crate::simulation::mode::ModeCycle;
use crate::simulation::params::Parameters;
use crate::simulation::states::{FVec3, Viewport};
use crate::simulation::text::{BlockFont, GlyphSet, TextRaster};

/// Bevy resource representing a fully-initialized scene
#[derive(Resource)]
pub struct Scenario {
    pub field: FieldEngine,
    pub companion: Companion,
    pub companion_position: FVec3,
    pub viewer: ViewerConfig,
    pub viewport: Viewport,
}

impl Scenario {
    /// Build with the built-in block font
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        Self::build_with_glyphs(cfg, &BlockFont)
    }

    pub fn build_with_glyphs(cfg: ScenarioConfig, glyphs: &dyn GlyphSet) -> Result<Self> {
        cfg.validate()?;

        // Parameters (runtime) from FieldConfig + SwarmConfig
        let palette = cfg
            .field
            .palette
            .iter()
            .map(|hex| parse_hex_color(hex))
            .collect::<Result<Vec<_>>>()?;
        let parameters = Parameters {
            count: cfg.field.count,
            seed: cfg.field.seed,
            spawn_half_extent: cfg.field.spawn_half_extent,
            blend_rate: cfg.field.blend_rate,
            jitter: cfg.field.jitter,
            spin_rate: cfg.field.spin_rate,
            damping: cfg.swarm.damping,
            palette,
        };

        // Forces: the three swarm terms with configured constants
        let s = &cfg.swarm;
        let forces = AccelSet::new()
            .with(PointerAttraction {
                strength: s.attraction,
                softening: s.softening,
                scale: s.attraction_scale,
                dead_zone: s.dead_zone,
            })
            .with(Wander { amplitude: s.wander })
            .with(Centering {
                radius: s.centering_radius,
                stiffness: s.centering_stiffness,
            });

        let cycle = ModeCycle::new(
            cfg.modes.initial,
            cfg.modes.interval_seconds,
            cfg.modes.reset_timer_on_manual,
        );
        let raster = TextRaster::from_config(&cfg.text);
        let field = FieldEngine::new(parameters, forces, cycle, &raster, glyphs);

        let companion = Companion::new(RigParams::from_config(&cfg.rig));
        let viewport = Viewport::from_camera(
            cfg.viewer.camera_distance,
            cfg.viewer.fov_degrees,
            cfg.viewer.aspect,
        );

        Ok(Self {
            field,
            companion,
            companion_position: FVec3::from(cfg.rig.position),
            viewer: cfg.viewer,
            viewport,
        })
    }
}
