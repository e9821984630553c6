// src/planning/problem.rs
// The planning query (start, goal, tolerance), planner outcomes, and the
// `Planner` trait every planning strategy implements.

use super::{PathGeometric, PlannerData, SpaceInformation};
use crate::space::Pose;
use std::fmt;
use std::time::Instant;

/// Start state, goal state and the distance within which the goal counts as reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemDefinition {
    start: Pose,
    goal: Pose,
    tolerance: f64,
}

impl ProblemDefinition {
    /// Query from `start` to `goal`. Negative tolerances become zero.
    pub fn new(start: Pose, goal: Pose, tolerance: f64) -> Self {
        ProblemDefinition {
            start,
            goal,
            tolerance: tolerance.max(0.0),
        }
    }

    /// Start state.
    pub fn start(&self) -> &Pose {
        &self.start
    }

    /// Goal state.
    pub fn goal(&self) -> &Pose {
        &self.goal
    }

    /// Goal tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// A state satisfies the goal when it lies within the tolerance of it.
    pub fn is_satisfied(&self, si: &SpaceInformation, state: &Pose) -> bool {
        si.distance(state, &self.goal) <= self.tolerance
    }
}

/// Outcome of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStatus {
    /// A path from start to goal was found
    ExactSolution,
    /// The time budget ran out first
    Timeout,
    /// The start state is out of bounds or in collision
    InvalidStart,
    /// The goal state is out of bounds or in collision
    InvalidGoal,
}

impl PlannerStatus {
    /// Whether a path was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, PlannerStatus::ExactSolution)
    }
}

impl fmt::Display for PlannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            PlannerStatus::ExactSolution => "Exact solution",
            PlannerStatus::Timeout => "Timeout",
            PlannerStatus::InvalidStart => "Invalid start state",
            PlannerStatus::InvalidGoal => "Invalid goal state",
        };
        f.write_str(text)
    }
}

/// Status plus the solution path when there is one.
#[derive(Debug, Clone)]
pub struct PlannerResult {
    /// How the attempt ended
    pub status: PlannerStatus,
    /// Solution, present only on success
    pub path: Option<PathGeometric>,
}

impl PlannerResult {
    /// Result without a path.
    pub fn failed(status: PlannerStatus) -> Self {
        PlannerResult { status, path: None }
    }

    /// Exact solution along `path`.
    pub fn solved(path: PathGeometric) -> Self {
        PlannerResult {
            status: PlannerStatus::ExactSolution,
            path: Some(path),
        }
    }
}

/// A planning strategy.
pub trait Planner {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Plans until a solution is found or `deadline` passes. Work done by
    /// earlier calls is kept and reused.
    fn solve(
        &mut self,
        si: &SpaceInformation,
        pdef: &ProblemDefinition,
        deadline: Instant,
    ) -> PlannerResult;

    /// Appends the planner's exploration graph to `data`.
    fn planner_data(&self, data: &mut PlannerData);

    /// Discards all accumulated planning work.
    fn clear(&mut self);
}
