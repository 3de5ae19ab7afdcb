//! Fanned card stack
//!
//! Cards sit in a shallow pile along -Z; hovering the stack fans them out
//! and turns them, hovering one card pulls it forward. Each card chases its
//! pose through springs, and the whole stack drifts after the pointer.

use std::ops::Range;

use crate::simulation::states::{FVec2, FVec3, Viewport};

use super::spring::{Spring, SpringConfig};

pub const WINDOW_BEFORE: usize = 3; // cards shown before the active one
pub const WINDOW_LEN: usize = 8;
const FOLLOW_SMOOTHING: f32 = 0.06;

/// Cards in view: up to `WINDOW_LEN` starting `WINDOW_BEFORE` before `active`
pub fn visible_window(active: usize, len: usize) -> Range<usize> {
    let start = active.saturating_sub(WINDOW_BEFORE).min(len);
    let end = (start + WINDOW_LEN).min(len);
    start..end
}

/// Hover state of the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackHover {
    pub stack: bool,           // pointer is over the stack
    pub card: Option<usize>,   // window index of the hovered card
}

/// Where one card wants to be
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub position: FVec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Target pose of card `index` (window-relative) out of `total`
pub fn card_pose(index: usize, total: usize, hover: StackHover, selected: bool) -> CardPose {
    let i = index as f32;
    let this_hovered = hover.card == Some(index);

    let mut z = if hover.stack { -i * 1.8 } else { -i * 0.3 };
    if this_hovered {
        z += 1.5;
    }
    let (x, y) = if hover.stack { (i * 0.7, -i * 0.2) } else { (0.0, 0.0) };

    let rotation_y = if hover.stack && total > 0 {
        (-15.0 + (i / total as f32) * 30.0).to_radians()
    } else {
        0.0
    };

    let scale = if this_hovered {
        1.1
    } else if selected {
        1.05
    } else {
        1.0
    };

    let opacity = match (hover.stack, this_hovered, selected) {
        (true, true, _) => 1.0,
        (true, false, _) => 0.4,
        (false, _, true) => 1.0,
        (false, _, false) => 0.8,
    };

    CardPose {
        position: FVec3::new(x, y, z),
        rotation_y,
        scale,
        opacity,
    }
}

/// Spring state for one visible card
#[derive(Debug, Clone)]
pub struct CardMotion {
    pub item: usize, // index into the full project list
    pub position: Spring<FVec3>,
    pub rotation_y: Spring<f32>,
    pub scale: Spring<f32>,
    pub opacity: Spring<f32>,
}

impl CardMotion {
    fn at(item: usize, pose: CardPose) -> Self {
        let cfg = SpringConfig::STACK;
        Self {
            item,
            position: Spring::new(pose.position, cfg),
            rotation_y: Spring::new(pose.rotation_y, cfg),
            scale: Spring::new(pose.scale, cfg),
            opacity: Spring::new(pose.opacity, cfg),
        }
    }

    fn retarget(&mut self, pose: CardPose) {
        self.position.set_target(pose.position);
        self.rotation_y.set_target(pose.rotation_y);
        self.scale.set_target(pose.scale);
        self.opacity.set_target(pose.opacity);
    }

    fn step(&mut self, dt: f32) {
        self.position.step(dt);
        self.rotation_y.step(dt);
        self.scale.step(dt);
        self.opacity.step(dt);
    }
}

/// Animated stack over a list of `len` projects
#[derive(Debug, Clone)]
pub struct CardStack {
    pub len: usize,
    pub active: usize,
    pub hover: StackHover,
    pub cards: Vec<CardMotion>,
    pub group_position: FVec2, // drift toward the pointer
    pub group_rotation: FVec2, // (x, y) tilt toward the pointer
}

impl CardStack {
    pub fn new(len: usize, active: usize) -> Self {
        let mut stack = Self {
            len,
            active: active.min(len.saturating_sub(1)),
            hover: StackHover::default(),
            cards: Vec::new(),
            group_position: FVec2::zeros(),
            group_rotation: FVec2::zeros(),
        };
        stack.rebuild();
        stack
    }

    /// Recreate springs for the current window, cards start at rest on their pose
    fn rebuild(&mut self) {
        let window = visible_window(self.active, self.len);
        let total = window.len();
        self.cards = window
            .clone()
            .enumerate()
            .map(|(i, item)| CardMotion::at(item, card_pose(i, total, self.hover, item == self.active)))
            .collect();
    }

    fn retarget(&mut self) {
        let total = self.cards.len();
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.retarget(card_pose(i, total, self.hover, card.item == self.active));
        }
    }

    /// Select a project; the window moves with it
    pub fn select(&mut self, item: usize) {
        if item >= self.len {
            return;
        }
        let old = visible_window(self.active, self.len);
        self.active = item;
        if visible_window(self.active, self.len) == old {
            self.retarget();
        } else {
            self.rebuild();
        }
    }

    pub fn set_hover(&mut self, hover: StackHover) {
        self.hover = hover;
        self.retarget();
    }

    /// Pointer is over the stack; carousels elsewhere pause while this is true
    pub fn is_paused(&self) -> bool {
        self.hover.stack
    }

    /// Advance springs and the pointer drift
    pub fn update(&mut self, dt: f32, pointer_ndc: FVec2, viewport: Viewport) {
        for card in &mut self.cards {
            card.step(dt);
        }

        let follow = FVec2::new(
            pointer_ndc.x * viewport.width / 10.0,
            pointer_ndc.y * viewport.height / 10.0,
        );
        self.group_position += (follow - self.group_position) * FOLLOW_SMOOTHING;

        // rotation.x follows -y, rotation.y follows x
        let tilt = FVec2::new(-pointer_ndc.y * 0.1, pointer_ndc.x * 0.1);
        self.group_rotation += (tilt - self.group_rotation) * FOLLOW_SMOOTHING;
    }
}
