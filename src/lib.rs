//! Narrow-passage motion planning demo
//!
//! Plans a path for a free-flying rigid body in a bounded SE(3) space whose
//! only way across a blocking slab is a small window. A probabilistic roadmap
//! (PRM) planner solves the query; the planner's roadmap is then extracted,
//! written to a text interchange file, analyzed (degree/weight statistics,
//! connected components, shortest start-goal path) and rendered to a PNG.
//!
//! Analysis and rendering sit behind the `graph-analysis` feature. Without it
//! only the planning result is reported.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod config;
pub mod demo;
pub mod error;
pub mod interchange;
pub mod planning;
pub mod space;
pub mod validity;

#[cfg(feature = "graph-analysis")]
pub mod analysis;

// Re-export commonly used items for easier access
pub use config::{DemoConfig, PassageConfig, PlannerConfig};
pub use demo::{Capabilities, DemoOutcome, PlanningDemo};
pub use error::{DemoError, Result};
pub use planning::{PathGeometric, PlannerData, PlannerStatus, Prm, SimpleSetup, VertexRole};
pub use space::{Bounds, Pose, Se3Space};
pub use validity::{NarrowPassage, StateValidityChecker};
