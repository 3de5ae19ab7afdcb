use std::collections::HashSet;
use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::SeedableRng;

use antigrav::configuration::config::{parse_hex_color, ScenarioConfig, TextConfig};
use antigrav::gallery::ring::{fill_ring, nearest_turn, ring_slot, CardRing};
use antigrav::gallery::spring::{Spring, SpringConfig};
use antigrav::gallery::stack::{card_pose, visible_window, CardStack, StackHover};
use antigrav::rig::pose::{Companion, RigParams, WaveState};
use antigrav::rig::skeleton::{JointName, Skeleton};
use antigrav::simulation::engine::FieldEngine;
use antigrav::simulation::forces::{AccelSet, Acceleration, Centering, ForceContext, PointerAttraction};
use antigrav::simulation::integrator::step_field;
use antigrav::simulation::mode::{Mode, ModeCycle};
use antigrav::simulation::params::Parameters;
use antigrav::simulation::scenario::Scenario;
use antigrav::simulation::shapes::{self, Shape};
use antigrav::simulation::states::{FVec2, FVec3, FrameInput, ParticleSet, Viewport};
use antigrav::simulation::text::{text_targets, BlockFont, NoGlyphs, TextRaster};

const DT: f32 = 1.0 / 60.0;

/// Viewport of the default camera
pub fn viewport() -> Viewport {
    Viewport::from_camera(5.5, 60.0, 16.0 / 9.0)
}

/// Frame `k` at 60 fps with the pointer in the middle of the screen
pub fn frame(k: u32) -> FrameInput {
    FrameInput::centered(k as f32 * DT, DT, viewport())
}

/// Engine of `n` particles held in `mode` (timer never fires)
pub fn engine_in(n: usize, mode: Mode, jitter: f32) -> FieldEngine {
    let parameters = Parameters {
        count: n,
        jitter,
        ..Parameters::default()
    };
    let cycle = ModeCycle::new(mode, f32::MAX, false);
    let raster = TextRaster::from_config(&TextConfig::default());
    FieldEngine::new(parameters, AccelSet::swarm_default(), cycle, &raster, &BlockFont)
}

/// Raster settings for `text` at the default canvas size
pub fn raster(text: &str) -> TextRaster {
    TextRaster::from_config(&TextConfig {
        text: text.to_string(),
        ..TextConfig::default()
    })
}

// ==================================================================================
// Shape convergence tests
// ==================================================================================

#[test]
fn sphere_settles_on_radius_2_5() {
    let mut engine = engine_in(6000, Mode::Sphere, 0.01);
    for k in 0..300 {
        engine.tick(&frame(k));
    }

    assert_eq!(engine.particles.len(), 6000);
    for (i, p) in engine.particles.positions().iter().enumerate() {
        let r = p.norm();
        assert!((r - 2.5).abs() < 0.05, "particle {i} at radius {r}, expected ~2.5");
    }
}

#[test]
fn every_shape_converges_to_its_targets() {
    for shape_mode in Mode::ALL.into_iter().filter(|m| m.shape().is_some()) {
        // No jitter so convergence is exact up to float error
        let mut engine = engine_in(500, shape_mode, 0.0);
        for k in 0..600 {
            engine.tick(&frame(k));
        }

        let shape = shape_mode.shape().unwrap();
        let targets = engine.targets.get(shape);
        for (p, t) in engine.particles.positions().iter().zip(targets.iter()) {
            assert!((p - t).norm() < 1e-3, "{shape_mode}: {p:?} did not reach {t:?}");
        }
    }
}

#[test]
fn shape_jitter_stays_small() {
    let mut engine = engine_in(1000, Mode::Cube, 0.01);
    for k in 0..600 {
        engine.tick(&frame(k));
    }
    let targets = engine.targets.get(Shape::Cube);
    for (p, t) in engine.particles.positions().iter().zip(targets.iter()) {
        assert!((p - t).norm() < 0.15, "jitter drifted too far: {:?}", p - t);
    }
}

// ==================================================================================
// Invariant tests
// ==================================================================================

#[test]
fn particle_count_is_fixed_across_modes() {
    let n = 300;
    let mut engine = engine_in(n, Mode::Swarm, 0.01);
    let mut k = 0;

    for _ in 0..Mode::ALL.len() * 2 {
        for _ in 0..5 {
            engine.tick(&frame(k));
            k += 1;
        }
        assert_eq!(engine.particles.positions().len(), n);
        assert_eq!(engine.particles.velocities().len(), n);
        assert_eq!(engine.particles.colors().len(), n);
        engine.advance_mode();
    }
    for shape in Shape::ALL {
        assert_eq!(engine.targets.get(shape).len(), n);
    }
}

#[test]
fn colors_never_change() {
    let mut engine = engine_in(400, Mode::Swarm, 0.01);
    let before = engine.particles.colors().to_vec();

    let mut k = 0;
    for _ in Mode::ALL {
        for _ in 0..10 {
            engine.tick(&frame(k));
            k += 1;
        }
        engine.advance_mode();
    }

    assert_eq!(engine.particles.colors(), before.as_slice());
}

#[test]
fn colors_come_from_the_palette() {
    let engine = engine_in(500, Mode::Swarm, 0.01);
    let palette = Parameters::default().palette;
    for c in engine.particles.colors() {
        assert!(palette.contains(c), "color {c:?} not in palette");
    }
}

#[test]
fn spawn_positions_inside_cube() {
    let engine = engine_in(2000, Mode::Swarm, 0.01);
    for p in engine.particles.positions() {
        assert!(p.iter().all(|c| c.abs() <= 5.0), "spawned outside cube: {p:?}");
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = engine_in(200, Mode::Swarm, 0.01);
    let mut b = engine_in(200, Mode::Swarm, 0.01);
    for k in 0..30 {
        a.tick(&frame(k));
        b.tick(&frame(k));
    }
    assert_eq!(a.particles.positions(), b.particles.positions());
}

#[test]
fn tick_spins_cloud_and_marks_dirty() {
    let mut engine = engine_in(50, Mode::Ring, 0.01);
    let mut upload = Vec::new();
    engine.particles.upload_positions(&mut upload);
    assert!(!engine.particles.is_dirty());
    assert_eq!(upload.len(), 50);

    engine.tick(&FrameInput::centered(0.5, 0.5, viewport()));

    assert!(engine.particles.is_dirty());
    assert!((engine.particles.rotation_y - 0.05).abs() < 1e-6);
}

// ==================================================================================
// Mode cycle tests
// ==================================================================================

#[test]
fn manual_advance_visits_every_mode_once() {
    for start in Mode::ALL {
        let mut cycle = ModeCycle::new(start, 10.0, false);
        let mut seen = HashSet::new();
        for _ in 0..Mode::ALL.len() {
            seen.insert(cycle.advance());
        }
        assert_eq!(seen.len(), Mode::ALL.len(), "start {start}: not exhaustive");
        assert_eq!(cycle.current(), start, "start {start}: not circular");
    }
}

#[test]
fn timer_advances_every_interval() {
    let mut cycle = ModeCycle::new(Mode::Swarm, 10.0, false);
    for _ in 0..19 {
        cycle.update(0.5);
    }
    assert_eq!(cycle.current(), Mode::Swarm);

    assert_eq!(cycle.update(0.5), 1);
    assert_eq!(cycle.current(), Mode::Sphere);

    // A long stall fires once per elapsed interval
    assert_eq!(cycle.update(20.0), 2);
    assert_eq!(cycle.current(), Mode::Expand);
}

#[test]
fn timer_fires_in_closed_form() {
    let mut cycle = ModeCycle::new(Mode::Swarm, 0.25, false);
    assert_eq!(cycle.update(2.75), 11);
    assert_eq!(cycle.current(), Mode::Sphere);
    assert!((cycle.remaining() - 0.25).abs() < 1e-6);
}

#[test]
fn tiny_interval_does_not_stall_timer() {
    // Passes validation, and must still return promptly
    let cfg = ScenarioConfig::from_yaml("modes:\n  interval_seconds: 1.0e-9\n").unwrap();
    let interval = cfg.modes.interval_seconds;

    let mut cycle = ModeCycle::new(Mode::Swarm, interval, false);
    assert!(cycle.update(1.0) > 0);
    assert!(cycle.remaining() <= interval);

    let scenario = Scenario::build_scenario(ScenarioConfig {
        field: antigrav::FieldConfig {
            count: 100,
            ..Default::default()
        },
        ..cfg
    })
    .unwrap();
    let mut field = scenario.field;
    field.tick(&FrameInput::centered(0.5, 0.5, viewport()));
    assert_eq!(field.particles.len(), 100);
}

#[test]
fn manual_advance_keeps_timer_by_default() {
    let mut cycle = ModeCycle::new(Mode::Swarm, 10.0, false);
    cycle.update(9.5);
    assert_eq!(cycle.advance(), Mode::Sphere);
    cycle.update(0.5);
    assert_eq!(cycle.current(), Mode::Ring);
}

#[test]
fn manual_advance_can_reset_timer() {
    let mut cycle = ModeCycle::new(Mode::Swarm, 10.0, true);
    cycle.update(9.5);
    assert_eq!(cycle.advance(), Mode::Sphere);
    assert!((cycle.remaining() - 10.0).abs() < 1e-6);
    cycle.update(0.5);
    assert_eq!(cycle.current(), Mode::Sphere);
}

#[test]
fn engine_timer_switches_target() {
    let parameters = Parameters {
        count: 100,
        ..Parameters::default()
    };
    let cycle = ModeCycle::new(Mode::Swarm, 1.0, false);
    let mut engine = FieldEngine::new(
        parameters,
        AccelSet::swarm_default(),
        cycle,
        &raster("AB"),
        &BlockFont,
    );
    for k in 0..4 {
        engine.tick(&FrameInput::centered(k as f32 * 0.25, 0.25, viewport()));
    }
    assert_eq!(engine.mode(), Mode::Sphere);
}

#[test]
fn swarm_is_the_only_mode_without_shape() {
    let without: Vec<Mode> = Mode::ALL.into_iter().filter(|m| m.shape().is_none()).collect();
    assert_eq!(without, vec![Mode::Swarm]);
}

// ==================================================================================
// Swarm force tests
// ==================================================================================

#[test]
fn centering_pulls_back_only_outside_radius() {
    let positions = vec![FVec3::new(5.0, 0.0, 0.0), FVec3::new(1.0, 0.0, 0.0)];
    let ctx = ForceContext {
        positions: &positions,
        pointer: FVec2::zeros(),
    };
    let mut out = vec![FVec3::zeros(); 2];
    let mut rng = StdRng::seed_from_u64(1);

    Centering::default().acceleration(&ctx, &mut rng, &mut out);

    assert!((out[0] - FVec3::new(-0.5, 0.0, 0.0)).norm() < 1e-6);
    assert_eq!(out[1], FVec3::zeros());
}

#[test]
fn swarm_tick_turns_far_particle_inward() {
    let mut set = ParticleSet::from_positions(vec![FVec3::new(0.0, 0.0, 6.0)], [1.0, 1.0, 1.0]);
    let mut rng = StdRng::seed_from_u64(3);
    let mut scratch = Vec::new();

    step_field(
        &mut set,
        None,
        &AccelSet::swarm_default(),
        &mut scratch,
        &frame(0),
        &Parameters::default(),
        &mut rng,
    );

    let v = set.velocities()[0];
    assert!(v.z < 0.0, "expected inward velocity, got {v:?}");
    assert!(set.positions()[0].z < 6.0);
}

#[test]
fn pointer_attraction_is_planar() {
    let positions = vec![FVec3::new(1.0, 1.0, 1.0)];
    let ctx = ForceContext {
        positions: &positions,
        pointer: FVec2::zeros(),
    };
    let mut out = vec![FVec3::zeros(); 1];
    let mut rng = StdRng::seed_from_u64(1);

    PointerAttraction::default().acceleration(&ctx, &mut rng, &mut out);

    // 3 / (sqrt(2) + 0.5) * 0.2 toward the pointer on x and y
    let expected = -1.0 * 3.0 / (2.0f32.sqrt() + 0.5) * 0.2;
    assert!((out[0].x - expected).abs() < 1e-5);
    assert!((out[0].y - expected).abs() < 1e-5);
    assert_eq!(out[0].z, 0.0);
}

#[test]
fn pointer_attraction_ignores_particles_under_cursor() {
    let positions = vec![FVec3::new(0.05, 0.0, 2.0)];
    let ctx = ForceContext {
        positions: &positions,
        pointer: FVec2::zeros(),
    };
    let mut out = vec![FVec3::zeros(); 1];
    let mut rng = StdRng::seed_from_u64(1);

    PointerAttraction::default().acceleration(&ctx, &mut rng, &mut out);
    assert_eq!(out[0], FVec3::zeros());
}

#[test]
fn pointer_maps_to_viewport_edges() {
    let vp = Viewport { width: 8.0, height: 4.0 };
    let world = vp.ndc_to_world(FVec2::new(1.0, -1.0));
    assert_eq!(world, FVec2::new(4.0, -2.0));
}

// ==================================================================================
// Shape generator tests
// ==================================================================================

#[test]
fn dna_strands_are_opposite() {
    let n = 1000;
    let pts = shapes::dna(n);
    for p in &pts {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - 1.5).abs() < 1e-4);
        assert!(p.y >= -5.0 && p.y < 5.0);
    }
    // Height grows with index
    assert!(pts.windows(2).all(|w| w[1].y > w[0].y));
}

#[test]
fn ring_and_galaxy_stay_flat() {
    let mut rng = StdRng::seed_from_u64(9);
    for p in shapes::ring(2000, &mut rng) {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((3.0..=3.5 + 1e-4).contains(&r), "ring radius {r}");
        assert!(p.y.abs() <= 0.25);
    }
    for p in shapes::galaxy(2000, &mut rng) {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!(r <= 5.0 + 1e-4, "galaxy radius {r}");
        assert!(p.y.abs() <= 0.25);
    }
}

#[test]
fn wave_follows_height_field() {
    let mut rng = StdRng::seed_from_u64(11);
    for p in shapes::wave(1000, &mut rng) {
        assert!((p.y - p.x.sin() * p.z.cos() * 1.5).abs() < 1e-5);
    }
}

#[test]
fn vortex_widens_with_height() {
    let mut rng = StdRng::seed_from_u64(5);
    for p in shapes::vortex(1000, &mut rng) {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - (p.y + 5.0) * 0.5).abs() < 1e-4);
    }
}

// ==================================================================================
// Text shape tests
// ==================================================================================

#[test]
fn text_without_glyphs_falls_back_to_origin() {
    let raster = raster("AB");
    assert!(raster.bright_points(&NoGlyphs).is_empty());

    let parameters = Parameters {
        count: 6000,
        ..Parameters::default()
    };
    let cycle = ModeCycle::new(Mode::Text, f32::MAX, false);
    let engine = FieldEngine::new(parameters, AccelSet::swarm_default(), cycle, &raster, &NoGlyphs);

    let targets = engine.targets.get(Shape::Text);
    assert_eq!(targets.len(), 6000);
    assert!(targets.iter().all(|t| *t == FVec3::zeros()));
}

#[test]
fn empty_string_falls_back_to_origin() {
    let mut rng = StdRng::seed_from_u64(1);
    let points = raster("").bright_points(&BlockFont);
    let targets = text_targets(&points, 10, &mut rng);
    assert_eq!(targets, vec![FVec3::zeros(); 10]);
}

#[test]
fn glyph_pixels_are_counted_exactly() {
    // "I" lights 11 cells; each cell is a 20 x 20 block at font size 200
    let points = raster("I").bright_points(&BlockFont);
    assert_eq!(points.len(), 11 * 20 * 20);
}

#[test]
fn text_targets_lie_on_canvas_plane() {
    let mut rng = StdRng::seed_from_u64(2);
    let points = raster("PORTFOLIO").bright_points(&BlockFont);
    assert!(!points.is_empty());

    let targets = text_targets(&points, 3000, &mut rng);
    for t in &targets {
        assert_eq!(t.z, 0.0);
        assert!(t.x.abs() <= 7.5 && t.y.abs() <= 2.25, "outside canvas: {t:?}");
    }
}

#[test]
fn lowercase_matches_uppercase() {
    let upper = raster("AB").bright_points(&BlockFont);
    let lower = raster("ab").bright_points(&BlockFont);
    assert_eq!(upper, lower);
}

// ==================================================================================
// Rig tests
// ==================================================================================

#[test]
fn wave_lasts_exactly_its_duration() {
    let mut wave = WaveState::Idle;
    wave.trigger(3.0);

    for t in [3.0, 4.0, 5.49] {
        assert!(wave.is_waving(t, 2.5), "should wave at t={t}");
    }
    assert!(!wave.is_waving(5.5, 2.5));

    wave.update(5.5, 2.5);
    assert_eq!(wave, WaveState::Idle);
    wave.update(100.0, 2.5);
    assert_eq!(wave, WaveState::Idle);
}

#[test]
fn retrigger_restarts_wave() {
    let mut wave = WaveState::Idle;
    wave.trigger(0.0);
    wave.trigger(2.0);
    assert!(wave.is_waving(4.0, 2.5));
    assert!(!wave.is_waving(4.5, 2.5));
}

#[test]
fn speech_label_only_while_waving() {
    let mut robot = Companion::new(RigParams::default());
    assert!(robot.label(0.0).is_none());

    robot.trigger_wave(1.0);
    robot.tick(1.5, FVec2::zeros());
    assert_eq!(robot.label(1.5), Some("Hi! 👋"));

    robot.tick(3.5, FVec2::zeros());
    assert!(robot.label(3.5).is_none());
    assert_eq!(robot.wave, WaveState::Idle);
}

#[test]
fn right_arm_raises_then_relaxes() {
    let mut robot = Companion::new(RigParams::default());
    robot.trigger_wave(0.0);

    robot.tick(1.0, FVec2::zeros());
    let z = robot.skeleton.rotation(JointName::RightArm).z;
    assert!((z - (PI - 0.5)).abs() <= 0.5 + 1e-5, "arm not raised: {z}");
    assert!((robot.skeleton.rotation(JointName::RightArm).x + 0.5).abs() < 1e-6);

    let mut t = 3.0;
    for _ in 0..100 {
        robot.tick(t, FVec2::zeros());
        t += DT;
    }
    assert!(robot.skeleton.rotation(JointName::RightArm).z.abs() < 0.01);
}

#[test]
fn head_follows_pointer() {
    let mut robot = Companion::new(RigParams::default());
    let pointer = FVec2::new(1.0, -1.0);
    for k in 0..200 {
        robot.tick(k as f32 * DT, pointer);
    }

    let head = robot.skeleton.rotation(JointName::Head);
    assert!((head.y - 0.6).abs() < 1e-3, "head yaw {}", head.y);
    assert!((head.x - 0.4).abs() < 1e-3, "head pitch {}", head.x);

    let root = robot.skeleton.rotation(JointName::Root);
    assert!((root.z - 0.1).abs() < 1e-3);
    assert!((root.x - 0.1).abs() < 1e-3);
}

#[test]
fn arm_relax_has_its_own_smoothing() {
    let params = RigParams {
        look_smoothing: 1.0,
        ..RigParams::default()
    };
    let mut robot = Companion::new(params);
    robot.trigger_wave(0.0);

    robot.tick(1.0, FVec2::zeros());
    let raised = robot.skeleton.rotation(JointName::RightArm).z;
    robot.tick(3.0, FVec2::zeros());
    let lowered = robot.skeleton.rotation(JointName::RightArm).z;

    assert!((lowered - raised * 0.9).abs() < 1e-5, "raised {raised}, lowered {lowered}");
}

#[test]
fn legs_dangle_in_opposition() {
    let mut robot = Companion::new(RigParams::default());
    robot.tick(0.7, FVec2::zeros());
    let left = robot.skeleton.rotation(JointName::LeftLeg).z;
    let right = robot.skeleton.rotation(JointName::RightLeg).z;
    assert!((left + right).abs() < 1e-6);
    assert!((left - (1.4f32).sin() * 0.05).abs() < 1e-6);
}

#[test]
fn skeleton_has_every_named_joint() {
    let skeleton = Skeleton::chrome_robot();
    assert_eq!(skeleton.joint_count(), 7);
    for name in [
        JointName::Root,
        JointName::Body,
        JointName::Head,
        JointName::LeftArm,
        JointName::RightArm,
        JointName::LeftLeg,
        JointName::RightLeg,
    ] {
        assert!(skeleton.joint(name).is_some(), "missing {name:?}");
    }
    // Arms mirror each other
    let l = skeleton.joint(JointName::LeftArm).unwrap().offset;
    let r = skeleton.joint(JointName::RightArm).unwrap().offset;
    assert_eq!(l.x, -r.x);
}

// ==================================================================================
// Gallery tests
// ==================================================================================

#[test]
fn spring_settles_on_target() {
    let mut s = Spring::new(0.0f32, SpringConfig::DEFAULT);
    s.set_target(1.0);
    for _ in 0..120 {
        s.step(DT);
    }
    assert!(s.is_settled(1e-3), "value {} velocity {}", s.value, s.velocity);
}

#[test]
fn short_frames_still_move_spring() {
    let mut fine = Spring::new(0.0f32, SpringConfig::DEFAULT);
    fine.set_target(1.0);
    let mut coarse = fine;

    for _ in 0..10 {
        fine.step(0.0004);
    }
    coarse.step(0.004);

    assert!(coarse.value > 0.0);
    assert!((fine.value - coarse.value).abs() < 1e-7, "{} vs {}", fine.value, coarse.value);
}

#[test]
fn spring_motion_independent_of_frame_rate() {
    let mut at_60 = Spring::new(0.0f32, SpringConfig::STACK);
    at_60.set_target(1.0);
    let mut at_1000 = at_60;

    for _ in 0..15 {
        at_60.step(1.0 / 60.0);
    }
    for _ in 0..250 {
        at_1000.step(0.001);
    }

    assert!((at_60.value - at_1000.value).abs() < 1e-3, "{} vs {}", at_60.value, at_1000.value);
}

#[test]
fn vector_spring_settles_on_target() {
    let mut s = Spring::new(FVec3::zeros(), SpringConfig::STACK);
    s.set_target(FVec3::new(1.0, -2.0, 0.5));
    for _ in 0..600 {
        s.step(DT);
    }
    assert!(s.is_settled(1e-3));
}

#[test]
fn stack_window_follows_active_card() {
    assert_eq!(visible_window(0, 20), 0..8);
    assert_eq!(visible_window(10, 20), 7..15);
    assert_eq!(visible_window(19, 20), 16..20);
    assert_eq!(visible_window(2, 3), 0..3);
    assert_eq!(visible_window(0, 0), 0..0);
}

#[test]
fn stack_fans_out_on_hover() {
    let hover = StackHover {
        stack: true,
        card: Some(2),
    };
    let hovered = card_pose(2, 8, hover, false);
    assert!((hovered.position - FVec3::new(1.4, -0.4, -2.1)).norm() < 1e-5);
    assert!((hovered.rotation_y - (-7.5f32).to_radians()).abs() < 1e-6);
    assert_eq!(hovered.scale, 1.1);
    assert_eq!(hovered.opacity, 1.0);

    let other = card_pose(3, 8, hover, true);
    assert_eq!(other.opacity, 0.4);
    assert_eq!(other.scale, 1.05);
}

#[test]
fn stack_rests_as_pile() {
    let rest = card_pose(2, 8, StackHover::default(), false);
    assert!((rest.position - FVec3::new(0.0, 0.0, -0.6)).norm() < 1e-6);
    assert_eq!(rest.rotation_y, 0.0);
    assert_eq!(rest.opacity, 0.8);

    let selected = card_pose(0, 8, StackHover::default(), true);
    assert_eq!(selected.opacity, 1.0);
}

#[test]
fn stack_springs_reach_hover_poses() {
    let mut stack = CardStack::new(10, 0);
    let hover = StackHover {
        stack: true,
        card: Some(1),
    };
    stack.set_hover(hover);
    assert!(stack.is_paused());

    for _ in 0..300 {
        stack.update(DT, FVec2::new(0.5, 0.5), viewport());
    }

    let total = stack.cards.len();
    assert_eq!(total, 8);
    for (i, card) in stack.cards.iter().enumerate() {
        let pose = card_pose(i, total, hover, card.item == 0);
        assert!((card.position.value - pose.position).norm() < 1e-3);
        assert!((card.opacity.value - pose.opacity).abs() < 1e-3);
    }

    let vp = viewport();
    let follow = FVec2::new(0.5 * vp.width / 10.0, 0.5 * vp.height / 10.0);
    assert!((stack.group_position - follow).norm() < 1e-3);
}

#[test]
fn stack_selection_moves_window() {
    let mut stack = CardStack::new(20, 0);
    stack.select(12);
    assert_eq!(stack.cards.first().map(|c| c.item), Some(9));
    assert_eq!(stack.cards.len(), 8);

    // Out of range is ignored
    stack.select(99);
    assert_eq!(stack.active, 12);
}

#[test]
fn ring_is_padded_to_six() {
    assert_eq!(fill_ring(2), vec![0, 1, 0, 1, 0, 1]);
    assert_eq!(fill_ring(4).len(), 8);
    assert_eq!(fill_ring(7).len(), 7);
    assert!(fill_ring(0).is_empty());
}

#[test]
fn ring_slot_faces_outward() {
    let (p, yaw) = ring_slot(0, 6);
    assert!((p - FVec3::new(0.0, 0.0, 2.0)).norm() < 1e-6);
    assert_eq!(yaw, 0.0);

    let (p, yaw) = ring_slot(3, 6);
    assert!((p - FVec3::new(0.0, 0.0, -2.0)).norm() < 1e-5);
    assert!((yaw.abs() - PI).abs() < 1e-5);
}

#[test]
fn ring_turns_the_short_way() {
    let t = nearest_turn(0.1, -6.0);
    assert!((t - 0.1).abs() <= PI);
    assert!((t - (-6.0 + 2.0 * PI)).abs() < 1e-5);
}

#[test]
fn ring_brings_active_card_forward() {
    let mut ring = CardRing::new(6);
    ring.select(3);
    for _ in 0..2000 {
        ring.update(DT);
    }
    assert!((ring.rotation_y + PI).abs() < 1e-3, "rotation {}", ring.rotation_y);
    assert!((ring.scales[3].value - 1.1).abs() < 1e-3);
    assert!((ring.scales[0].value - 0.8).abs() < 1e-3);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn empty_scenario_uses_defaults() {
    let cfg = ScenarioConfig::from_yaml("{}").unwrap();
    assert_eq!(cfg.field.count, 6000);
    assert_eq!(cfg.field.palette.len(), 4);
    assert_eq!(cfg.modes.initial, Mode::Swarm);
    assert_eq!(cfg.modes.interval_seconds, 10.0);
    assert_eq!(cfg.text.text, "PORTFOLIO");
    assert_eq!(cfg.rig.wave_duration, 2.5);
}

#[test]
fn partial_scenario_keeps_other_defaults() {
    let cfg = ScenarioConfig::from_yaml("field:\n  count: 100\nmodes:\n  initial: galaxy\n").unwrap();
    assert_eq!(cfg.field.count, 100);
    assert_eq!(cfg.field.seed, 42);
    assert_eq!(cfg.modes.initial, Mode::Galaxy);
    assert!(!cfg.modes.reset_timer_on_manual);
}

#[test]
fn invalid_scenarios_are_rejected() {
    assert!(ScenarioConfig::from_yaml("field:\n  count: 0\n").is_err());
    assert!(ScenarioConfig::from_yaml("field:\n  palette: []\n").is_err());
    assert!(ScenarioConfig::from_yaml("field:\n  palette: [\"#zzzzzz\"]\n").is_err());
    assert!(ScenarioConfig::from_yaml("modes:\n  interval_seconds: 0.0\n").is_err());
    assert!(ScenarioConfig::from_yaml("modes:\n  initial: spiral\n").is_err());
}

#[test]
fn hex_colors_parse() {
    assert_eq!(parse_hex_color("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
    assert_eq!(parse_hex_color("#000000").unwrap(), [0.0, 0.0, 0.0]);
    let c = parse_hex_color("#06b6d4").unwrap();
    assert!((c[0] - 6.0 / 255.0).abs() < 1e-6);
    assert!(parse_hex_color("#fff").is_err());
}

#[test]
fn scenario_builds_from_config() {
    let cfg = ScenarioConfig::from_yaml("field:\n  count: 250\nmodes:\n  initial: dna\ntext:\n  text: \"HI\"\n").unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.field.particles.len(), 250);
    assert_eq!(scenario.field.mode(), Mode::Dna);
    assert_eq!(scenario.field.forces.len(), 3);
    assert!(scenario.field.targets.get(Shape::Text).iter().any(|t| *t != FVec3::zeros()));
    assert_eq!(scenario.companion.params.wave_duration, 2.5);
    assert!(scenario.viewport.height > 0.0);
}
