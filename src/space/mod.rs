//! State space for the planning problem
//!
//! Poses live in SE(3): a bounded position in R^3 plus an orientation.

pub mod bounds;
pub mod pose;
pub mod se3;

pub use bounds::Bounds;
pub use pose::Pose;
pub use se3::Se3Space;
