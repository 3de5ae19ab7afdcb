pub mod simulation;
pub mod configuration;
pub mod rig;
pub mod gallery;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{ParticleSet, FrameInput, Viewport, FVec2, FVec3, Rgb};
pub use simulation::forces::{Acceleration, AccelSet, PointerAttraction, Wander, Centering};
pub use simulation::integrator::step_field;
pub use simulation::engine::FieldEngine;
pub use simulation::mode::{Mode, ModeCycle};
pub use simulation::shapes::{Shape, TargetTable};
pub use simulation::text::{GlyphSet, BlockFont, NoGlyphs, TextRaster};
pub use simulation::scenario::Scenario;

pub use rig::skeleton::{Skeleton, Joint, JointName};
pub use rig::pose::{animate, Companion, RigParams, WaveState};

pub use gallery::spring::{Spring, SpringConfig};
pub use gallery::stack::{CardStack, CardPose, StackHover};
pub use gallery::ring::CardRing;

pub use configuration::config::{ScenarioConfig, FieldConfig, SwarmConfig, ModeConfig, TextConfig, RigConfig, ViewerConfig};

pub use visualization::field_vis::run;

pub use benchmark::benchmark::{bench_build, bench_tick, bench_tick_curve};
