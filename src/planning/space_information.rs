// src/planning/space_information.rs
// Bundles the state space, the validity checker and the motion validator so
// planners have a single handle for sampling and collision queries.

use super::motion::DiscreteMotionValidator;
use crate::space::{Pose, Se3Space};
use crate::validity::StateValidityChecker;
use rand::Rng;
use std::sync::Arc;

/// Everything a planner needs to know about the space it plans in.
#[derive(Clone)]
pub struct SpaceInformation {
    space: Se3Space,
    checker: Arc<dyn StateValidityChecker>,
    motion_validator: DiscreteMotionValidator,
}

impl SpaceInformation {
    /// `resolution` is the motion checking step as a fraction of the space extent.
    pub fn new(space: Se3Space, checker: Arc<dyn StateValidityChecker>, resolution: f64) -> Self {
        let motion_validator = DiscreteMotionValidator::new(&space, resolution);
        SpaceInformation {
            space,
            checker,
            motion_validator,
        }
    }

    /// The state space.
    pub fn space(&self) -> &Se3Space {
        &self.space
    }

    /// The state validity checker.
    pub fn checker(&self) -> &dyn StateValidityChecker {
        self.checker.as_ref()
    }

    /// In bounds and accepted by the validity checker.
    pub fn is_valid(&self, state: &Pose) -> bool {
        self.space.satisfies_bounds(state) && self.checker.is_valid(state)
    }

    /// State-space distance between `a` and `b`.
    pub fn distance(&self, a: &Pose, b: &Pose) -> f64 {
        self.space.distance(a, b)
    }

    /// Whether the straight motion from `a` to `b` is collision free.
    pub fn check_motion(&self, a: &Pose, b: &Pose) -> bool {
        self.motion_validator
            .check_motion(&self.space, self.checker(), a, b)
    }

    /// Last valid state on the motion from `a` to `b` and the fraction travelled.
    pub fn last_valid_motion_state(&self, a: &Pose, b: &Pose) -> (Pose, f64) {
        self.motion_validator
            .last_valid(&self.space, self.checker(), a, b)
    }

    /// Draws uniform samples until one is valid, giving up after `attempts`.
    pub fn sample_valid<R: Rng + ?Sized>(&self, rng: &mut R, attempts: usize) -> Option<Pose> {
        (0..attempts)
            .map(|_| self.space.sample_uniform(rng))
            .find(|state| self.is_valid(state))
    }
}

impl std::fmt::Debug for SpaceInformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpaceInformation")
            .field("space", &self.space)
            .field("motion_validator", &self.motion_validator)
            .finish_non_exhaustive()
    }
}
