pub mod field_vis;
pub mod rig_vis;
