//! Per-tick update of the particle field
//!
//! `step_field` is the whole tick: it takes every piece of state it touches
//! as an argument, so it runs the same with or without a renderer.
//! Swarm mode integrates forces from an `AccelSet`; shape modes blend
//! toward a target buffer.

use rand::rngs::StdRng;
use rand::Rng;

use super::forces::{AccelSet, ForceContext};
use super::params::Parameters;
use super::states::{FVec3, FrameInput, ParticleSet};

/// Advance the field by one frame
/// - `target = None` runs the swarm physics
/// - `target = Some(buf)` blends each particle toward `buf[i]`
/// Afterwards the cloud spins about +Y and the buffer is marked dirty
pub fn step_field(
    particles: &mut ParticleSet,
    target: Option<&[FVec3]>,
    forces: &AccelSet,
    accel_scratch: &mut Vec<FVec3>,
    input: &FrameInput,
    params: &Parameters,
    rng: &mut StdRng,
) {
    match target {
        None => swarm_step(particles, forces, accel_scratch, input, params, rng),
        Some(buf) => blend_step(particles, buf, input.delta, params, rng),
    }

    particles.rotation_y = (particles.rotation_y + input.delta * params.spin_rate)
        .rem_euclid(std::f32::consts::TAU);
    particles.mark_dirty();
}

/// Pointer-attraction physics for one frame
/// v += a dt; v *= damping; x += v dt
pub fn swarm_step(
    particles: &mut ParticleSet,
    forces: &AccelSet,
    accel_scratch: &mut Vec<FVec3>,
    input: &FrameInput,
    params: &Parameters,
    rng: &mut StdRng,
) {
    let n = particles.len();
    if n == 0 { // no particles, return
        return;
    }
    let dt = input.delta;

    // Scratch buffer is reused across frames, only reallocated if N changes
    accel_scratch.resize(n, FVec3::zeros());

    let ctx = ForceContext {
        positions: particles.positions(),
        pointer: input.pointer_world(),
    };
    forces.accumulate_accels(&ctx, rng, accel_scratch);

    let (positions, velocities) = particles.kinematics_mut();
    for ((x, v), a) in positions.iter_mut().zip(velocities.iter_mut()).zip(accel_scratch.iter()) {
        *v += *a * dt;
        *v *= params.damping;
        *x += *v * dt;
    }
}

/// Exponential approach toward `target`, then per-axis jitter
/// x += (target - x) * rate * dt; x += U(-j/2, j/2) on each axis
pub fn blend_step(particles: &mut ParticleSet, target: &[FVec3], dt: f32, params: &Parameters, rng: &mut StdRng) {
    let factor = params.blend_rate * dt;
    let jitter = params.jitter;

    let (positions, _) = particles.kinematics_mut();
    for (x, t) in positions.iter_mut().zip(target.iter()) {
        *x += (*t - *x) * factor;
        if jitter > 0.0 {
            x.x += (rng.gen::<f32>() - 0.5) * jitter;
            x.y += (rng.gen::<f32>() - 0.5) * jitter;
            x.z += (rng.gen::<f32>() - 0.5) * jitter;
        }
    }
}
