// src/validity.rs
// State validity checking. The planner only sees the `StateValidityChecker`
// trait; `NarrowPassage` is the obstacle layout used by the demo.

use crate::config::PassageConfig;
use crate::space::Pose;

/// Decides whether a state is free of obstacles.
/// Called many thousands of times per solve; implementations must be pure.
#[cfg_attr(test, mockall::automock)]
pub trait StateValidityChecker: Send + Sync {
    /// Returns `true` when `state` is collision free.
    fn is_valid(&self, state: &Pose) -> bool;
}

impl<F> StateValidityChecker for F
where
    F: Fn(&Pose) -> bool + Send + Sync,
{
    fn is_valid(&self, state: &Pose) -> bool {
        self(state)
    }
}

/// A slab across the y axis, blocked except for a square window.
///
/// States with y inside the band are valid only when x and z both lie in the
/// window; states outside the band are always valid. All limits are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NarrowPassage {
    config: PassageConfig,
}

impl NarrowPassage {
    /// Passage with the given band and window limits.
    pub fn new(config: PassageConfig) -> Self {
        NarrowPassage { config }
    }

    fn in_band(&self, y: f64) -> bool {
        y >= self.config.band_min && y <= self.config.band_max
    }

    fn in_window(&self, v: f64) -> bool {
        v >= self.config.window_min && v <= self.config.window_max
    }
}

impl StateValidityChecker for NarrowPassage {
    fn is_valid(&self, state: &Pose) -> bool {
        if self.in_band(state.y()) {
            return self.in_window(state.x()) && self.in_window(state.z());
        }
        true
    }
}
