//! Scene graph for the companion robot
//!
//! The robot is an owned tree of named joints. Each joint carries an offset
//! from its parent, an XYZ Euler rotation that the animation rewrites every
//! frame, and the primitive parts rigidly attached to it.

use crate::simulation::states::FVec3;

/// Joints the animation addresses by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointName {
    Root,
    Body,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// Primitive geometry, dimensions in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    Capsule { radius: f32, length: f32 },
    Cuboid { x: f32, y: f32, z: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Chrome,
    DarkChrome,
    GlossBlack,
    White,
    Steel,
}

/// A rigid mesh attached to a joint
#[derive(Debug, Clone)]
pub struct Part {
    pub primitive: Primitive,
    pub offset: FVec3,
    pub rotation: FVec3, // fixed XYZ Euler tilt
    pub finish: Finish,
}

impl Part {
    fn new(primitive: Primitive, offset: [f32; 3], finish: Finish) -> Self {
        Self {
            primitive,
            offset: FVec3::from(offset),
            rotation: FVec3::zeros(),
            finish,
        }
    }

    fn tilted(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = FVec3::from(rotation);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Joint {
    pub name: JointName,
    pub offset: FVec3,   // relative to the parent joint
    pub rotation: FVec3, // XYZ Euler, animated
    pub parts: Vec<Part>,
    pub children: Vec<Joint>,
}

impl Joint {
    fn new(name: JointName, offset: [f32; 3]) -> Self {
        Self {
            name,
            offset: FVec3::from(offset),
            rotation: FVec3::zeros(),
            parts: Vec::new(),
            children: Vec::new(),
        }
    }

    fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    fn child(mut self, joint: Joint) -> Self {
        self.children.push(joint);
        self
    }

    /// Depth-first search by name
    pub fn find(&self, name: JointName) -> Option<&Joint> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: JointName) -> Option<&mut Joint> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// Visit every joint, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Joint)) {
        visit(self);
        for c in &self.children {
            c.walk(visit);
        }
    }
}

/// The whole robot
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub root: Joint,
}

impl Skeleton {
    /// Chrome robot: round head with big eyes, tapered torso with a
    /// backpack, capsule limbs with ball shoulders and boxy boots
    pub fn chrome_robot() -> Self {
        use Finish::*;
        use Primitive::*;

        let eye = |x: f32| Part::new(Sphere { radius: 0.14 }, [x, 0.05, 0.38], GlossBlack).tilted([0.1, 0.0, 0.0]);
        let glint = |x: f32| Part::new(Sphere { radius: 0.03 }, [x, 0.1, 0.48], White);

        let head = Joint::new(JointName::Head, [0.0, 1.4, 0.0])
            .part(Part::new(Sphere { radius: 0.45 }, [0.0, 0.0, 0.0], Chrome))
            .part(eye(-0.15))
            .part(eye(0.15))
            .part(glint(-0.18))
            .part(glint(0.12));

        // side = -1 for left, +1 for right
        let arm = |name, side: f32| {
            Joint::new(name, [0.35 * side, 0.7, 0.0])
                .part(Part::new(Sphere { radius: 0.18 }, [0.0, 0.0, 0.0], Chrome))
                .part(
                    Part::new(Capsule { radius: 0.12, length: 0.6 }, [0.1 * side, -0.4, 0.0], Chrome)
                        .tilted([0.0, 0.0, -0.2 * side]),
                )
                .part(Part::new(Sphere { radius: 0.15 }, [0.2 * side, -0.8, 0.0], Chrome))
        };

        let leg = |name, side: f32| {
            Joint::new(name, [0.2 * side, 0.0, 0.0])
                .part(Part::new(Capsule { radius: 0.13, length: 0.7 }, [0.0, -0.4, 0.0], Chrome))
                .part(Part::new(Cuboid { x: 0.25, y: 0.3, z: 0.4 }, [0.0, -0.9, 0.1], DarkChrome))
        };

        let body = Joint::new(JointName::Body, [0.0, 0.0, 0.0])
            .part(Part::new(Cylinder { radius_top: 0.1, radius_bottom: 0.1, height: 0.2 }, [0.0, 0.95, 0.0], DarkChrome))
            .part(Part::new(Cylinder { radius_top: 0.3, radius_bottom: 0.25, height: 0.8 }, [0.0, 0.4, 0.0], Chrome))
            .part(Part::new(Cuboid { x: 0.4, y: 0.5, z: 0.2 }, [0.0, 0.5, -0.25], DarkChrome))
            .part(
                Part::new(Cylinder { radius_top: 0.03, radius_bottom: 0.03, height: 0.8 }, [0.2, 0.6, -0.35], Steel)
                    .tilted([0.0, 0.0, -0.5]),
            )
            .child(head)
            .child(arm(JointName::LeftArm, -1.0))
            .child(arm(JointName::RightArm, 1.0))
            .child(leg(JointName::LeftLeg, -1.0))
            .child(leg(JointName::RightLeg, 1.0));

        Self {
            root: Joint::new(JointName::Root, [0.0, 0.0, 0.0]).child(body),
        }
    }

    pub fn joint(&self, name: JointName) -> Option<&Joint> {
        self.root.find(name)
    }

    pub fn joint_mut(&mut self, name: JointName) -> Option<&mut Joint> {
        self.root.find_mut(name)
    }

    /// Rotation of a joint, zero if the skeleton has no such joint
    pub fn rotation(&self, name: JointName) -> FVec3 {
        self.joint(name).map_or_else(FVec3::zeros, |j| j.rotation)
    }

    pub fn joint_count(&self) -> usize {
        let mut n = 0;
        self.root.walk(&mut |_| n += 1);
        n
    }
}
