//! Motion planning for the demo
//!
//! This module holds the planning query, the motion validator, the PRM
//! planner and the problem setup that ties them together, plus the planner
//! graph snapshot extracted after a solve.

pub mod motion;
pub mod nearest;
pub mod path;
pub mod planner_data;
pub mod prm;
pub mod problem;
pub mod setup;
pub mod space_information;

pub use motion::DiscreteMotionValidator;
pub use nearest::NearestNeighborsLinear;
pub use path::PathGeometric;
pub use planner_data::{PlannerData, PlannerEdge, PlannerVertex, VertexRole};
pub use prm::Prm;
pub use problem::{Planner, PlannerResult, PlannerStatus, ProblemDefinition};
pub use setup::{MIN_MOTION_RESOLUTION, SimpleSetup};
pub use space_information::SpaceInformation;
