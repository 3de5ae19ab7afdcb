pub mod skeleton;
pub mod pose;
