//! Particle field engine
//!
//! Owns the particle buffers, the precomputed target table, the mode cycle,
//! the swarm force set and the rng, and runs one `step_field` per tick for
//! whatever mode is current.

use bevy::log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::forces::AccelSet;
use super::integrator::step_field;
use super::mode::{Mode, ModeCycle};
use super::params::Parameters;
use super::shapes::TargetTable;
use super::states::{FVec3, FrameInput, ParticleSet};
use super::text::{GlyphSet, TextRaster};

pub struct FieldEngine {
    pub particles: ParticleSet,
    pub targets: TargetTable,
    pub cycle: ModeCycle,
    pub forces: AccelSet,
    pub parameters: Parameters,
    accel_scratch: Vec<FVec3>,
    rng: StdRng,
}

impl FieldEngine {
    /// Seed particles, draw colors and precompute every target shape
    pub fn new(
        parameters: Parameters,
        forces: AccelSet,
        cycle: ModeCycle,
        raster: &TextRaster,
        glyphs: &dyn GlyphSet,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let particles = ParticleSet::seeded(
            parameters.count,
            parameters.spawn_half_extent,
            &parameters.palette,
            &mut rng,
        );
        let targets = TargetTable::build(parameters.count, raster, glyphs, &mut rng);

        Self {
            particles,
            targets,
            cycle,
            forces,
            accel_scratch: vec![FVec3::zeros(); parameters.count],
            parameters,
            rng,
        }
    }

    pub fn mode(&self) -> Mode {
        self.cycle.current()
    }

    /// Manual trigger
    pub fn advance_mode(&mut self) -> Mode {
        let mode = self.cycle.advance();
        debug!("field mode -> {mode} (manual)");
        mode
    }

    /// Run the mode timer, then advance the field by one frame
    pub fn tick(&mut self, input: &FrameInput) {
        if self.cycle.update(input.delta) > 0 {
            debug!("field mode -> {} (timer)", self.cycle.current());
        }

        let target = self.cycle.current().shape().map(|s| self.targets.get(s));
        step_field(
            &mut self.particles,
            target,
            &self.forces,
            &mut self.accel_scratch,
            input,
            &self.parameters,
            &mut self.rng,
        );
    }
}
