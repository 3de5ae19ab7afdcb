//! Project card layouts (fanned stack, rotating ring)
//!
//! Library-only: the bevy viewer shows the particle field and the robot,
//! and does not spawn any cards. A host page drives `CardStack` or
//! `CardRing` with its own frame time and pointer.

pub mod spring;
pub mod stack;
pub mod ring;
