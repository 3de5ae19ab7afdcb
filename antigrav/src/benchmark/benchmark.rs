use std::time::Instant;

use crate::simulation::engine::FieldEngine;
use crate::simulation::forces::AccelSet;
use crate::simulation::mode::{Mode, ModeCycle};
use crate::simulation::params::Parameters;
use crate::simulation::states::{FVec2, FrameInput, Viewport};
use crate::simulation::text::{BlockFont, TextRaster};
use crate::configuration::config::TextConfig;

/// Helper to build an engine of size `n` parked in `mode`
fn make_engine(n: usize, mode: Mode) -> FieldEngine {
    let parameters = Parameters {
        count: n,
        ..Parameters::default()
    };
    // Interval long enough that the timer never fires during a run
    let cycle = ModeCycle::new(mode, f32::MAX, false);
    let raster = TextRaster::from_config(&TextConfig::default());
    FieldEngine::new(parameters, AccelSet::swarm_default(), cycle, &raster, &BlockFont)
}

fn frame(k: u32) -> FrameInput {
    let dt = 1.0 / 60.0;
    FrameInput {
        elapsed: k as f32 * dt,
        delta: dt,
        pointer_ndc: FVec2::new(0.3, -0.2),
        viewport: Viewport::from_camera(5.5, 60.0, 16.0 / 9.0),
    }
}

/// Time engine construction (buffers + every target shape) for a range of n
pub fn bench_build() {
    let ns = [1000, 2000, 6000, 12000, 24000, 48000];

    for n in ns {
        let t0 = Instant::now();
        let engine = make_engine(n, Mode::Swarm);
        let dt_build = t0.elapsed().as_secs_f64();

        println!("N = {n:6}, build = {:8.6} s, targets = {}", dt_build, engine.targets.len());
    }
}

/// Time one tick in swarm mode and in a shape mode for a range of n
pub fn bench_tick() {
    let ns = [1000, 2000, 6000, 12000, 24000, 48000];
    let steps = 60; // one simulated second

    for n in ns {
        // Swarm physics
        let mut swarm = make_engine(n, Mode::Swarm);
        swarm.tick(&frame(0)); // warm-up

        let t0 = Instant::now();
        for k in 1..=steps {
            swarm.tick(&frame(k));
        }
        let swarm_per_tick = t0.elapsed().as_secs_f64() / steps as f64;

        // Shape blend
        let mut galaxy = make_engine(n, Mode::Galaxy);
        galaxy.tick(&frame(0));

        let t1 = Instant::now();
        for k in 1..=steps {
            galaxy.tick(&frame(k));
        }
        let blend_per_tick = t1.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:6}, swarm tick = {:8.6} s,   blend tick = {:8.6} s", n, swarm_per_tick, blend_per_tick);
    }
}

/// Tick cost as CSV for a smooth curve over n
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick_curve() {
    println!("N,swarm_ms,blend_ms");

    for n in (1000..=48000).step_by(1000) {
        // Small n: average over more ticks to smooth noise
        let steps = if n <= 8000 { 30 } else { 5 };

        let mut swarm = make_engine(n, Mode::Swarm);
        let t0 = Instant::now();
        for k in 0..steps {
            swarm.tick(&frame(k));
        }
        let ms_swarm = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut sphere = make_engine(n, Mode::Sphere);
        let t1 = Instant::now();
        for k in 0..steps {
            sphere.tick(&frame(k));
        }
        let ms_blend = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_swarm, ms_blend);
    }
}
