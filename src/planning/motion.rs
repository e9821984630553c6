// src/planning/motion.rs
// Discrete motion checking: a straight-line motion between two states is valid
// when every interpolated state at the configured resolution is valid.

use crate::space::{Pose, Se3Space};
use crate::validity::StateValidityChecker;
use std::collections::VecDeque;

/// Checks motions by sampling them at a fixed resolution.
#[derive(Debug, Clone, Copy)]
pub struct DiscreteMotionValidator {
    longest_valid_segment: f64,
}

impl DiscreteMotionValidator {
    /// `fraction` is the resolution relative to the space's maximum extent.
    pub fn new(space: &Se3Space, fraction: f64) -> Self {
        DiscreteMotionValidator {
            longest_valid_segment: space.maximum_extent() * fraction,
        }
    }

    fn segment_count(&self, space: &Se3Space, a: &Pose, b: &Pose) -> usize {
        (space.distance(a, b) / self.longest_valid_segment).ceil().max(1.0) as usize
    }

    /// The start state is assumed valid. The end state is checked first, then
    /// intermediate states in bisection order so collisions in the middle of a
    /// motion are found early.
    pub fn check_motion(
        &self,
        space: &Se3Space,
        checker: &dyn StateValidityChecker,
        a: &Pose,
        b: &Pose,
    ) -> bool {
        if !space.satisfies_bounds(b) || !checker.is_valid(b) {
            return false;
        }
        let nd = self.segment_count(space, a, b);
        if nd < 2 {
            return true;
        }

        let mut pending = VecDeque::new();
        pending.push_back((1usize, nd - 1));
        while let Some((lo, hi)) = pending.pop_front() {
            let mid = (lo + hi) / 2;
            let state = space.interpolate(a, b, mid as f64 / nd as f64);
            if !space.satisfies_bounds(&state) || !checker.is_valid(&state) {
                return false;
            }
            if lo < mid {
                pending.push_back((lo, mid - 1));
            }
            if mid < hi {
                pending.push_back((mid + 1, hi));
            }
        }
        true
    }

    /// Walks from `a` towards `b` and returns the last valid state together
    /// with the fraction of the motion covered. Returns `(a, 0.0)` when the
    /// first step is already invalid.
    pub fn last_valid(
        &self,
        space: &Se3Space,
        checker: &dyn StateValidityChecker,
        a: &Pose,
        b: &Pose,
    ) -> (Pose, f64) {
        let nd = self.segment_count(space, a, b);
        let mut last = (*a, 0.0);
        for j in 1..=nd {
            let t = j as f64 / nd as f64;
            let state = space.interpolate(a, b, t);
            if !space.satisfies_bounds(&state) || !checker.is_valid(&state) {
                break;
            }
            last = (state, t);
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Bounds;
    use crate::validity::{MockStateValidityChecker, NarrowPassage};

    fn setup() -> (Se3Space, DiscreteMotionValidator) {
        let space = Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap());
        let validator = DiscreteMotionValidator::new(&space, 0.01);
        (space, validator)
    }

    #[test]
    fn resolution_is_fraction_of_extent() {
        let (space, validator) = setup();
        assert!((validator.longest_valid_segment - space.maximum_extent() * 0.01).abs() < 1e-12);
    }

    #[test]
    fn checks_endpoint_and_each_interior_state() {
        let (space, validator) = setup();
        // distance 1.0 over segments of ~0.362 gives 3 segments: the endpoint
        // plus two interior states
        let mut checker = MockStateValidityChecker::new();
        checker.expect_is_valid().times(3).returning(|_| true);
        let a = Pose::from_xyz(0.0, 0.0, 0.0);
        let b = Pose::from_xyz(1.0, 0.0, 0.0);
        assert!(validator.check_motion(&space, &checker, &a, &b));
    }

    #[test]
    fn invalid_endpoint_short_circuits() {
        let (space, validator) = setup();
        let mut checker = MockStateValidityChecker::new();
        checker.expect_is_valid().times(1).returning(|_| false);
        let a = Pose::from_xyz(0.0, 0.0, 0.0);
        let b = Pose::from_xyz(5.0, 0.0, 0.0);
        assert!(!validator.check_motion(&space, &checker, &a, &b));
    }

    #[test]
    fn motion_through_the_wall_is_rejected() {
        let (space, validator) = setup();
        let checker = NarrowPassage::default();
        let below = Pose::from_xyz(-9.0, -9.0, -9.0);
        let above = Pose::from_xyz(-9.0, 9.0, -9.0);
        assert!(!validator.check_motion(&space, &checker, &below, &above));

        let through_window_a = Pose::from_xyz(0.0, -6.0, 0.0);
        let through_window_b = Pose::from_xyz(0.0, 6.0, 0.0);
        assert!(validator.check_motion(&space, &checker, &through_window_a, &through_window_b));
    }

    #[test]
    fn last_valid_stops_before_the_wall() {
        let (space, validator) = setup();
        let checker = NarrowPassage::default();
        let a = Pose::from_xyz(-9.0, -9.0, -9.0);
        let b = Pose::from_xyz(-9.0, 9.0, -9.0);
        let (state, fraction) = validator.last_valid(&space, &checker, &a, &b);
        assert!(fraction > 0.0 && fraction < 1.0);
        assert!(state.y() < -3.0);
        assert!(checker.is_valid(&state));
    }
}
