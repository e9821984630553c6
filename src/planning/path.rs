// src/planning/path.rs
// Geometric solution path: the ordered states a planner returns.

use crate::space::{Pose, Se3Space};
use std::fmt;

/// Sequence of states connected by straight-line motions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGeometric {
    states: Vec<Pose>,
}

impl PathGeometric {
    /// Path through `states` in order.
    pub fn new(states: Vec<Pose>) -> Self {
        PathGeometric { states }
    }

    /// States from start to goal.
    pub fn states(&self) -> &[Pose] {
        &self.states
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the path has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Sum of state-space distances between consecutive states.
    pub fn length(&self, space: &Se3Space) -> f64 {
        self.states
            .windows(2)
            .map(|pair| space.distance(&pair[0], &pair[1]))
            .sum()
    }
}

impl fmt::Display for PathGeometric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Geometric path with {} states", self.states.len())?;
        for state in &self.states {
            writeln!(f, "  {}", state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Bounds;

    #[test]
    fn length_sums_segments() {
        let space = Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap());
        let path = PathGeometric::new(vec![
            Pose::from_xyz(0.0, 0.0, 0.0),
            Pose::from_xyz(0.0, 2.0, 0.0),
            Pose::from_xyz(0.0, 2.0, 3.0),
        ]);
        assert_eq!(path.len(), 3);
        assert!((path.length(&space) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn display_lists_every_state() {
        let path = PathGeometric::new(vec![Pose::from_xyz(1.0, 2.0, 3.0)]);
        let text = path.to_string();
        assert!(text.starts_with("Geometric path with 1 states"));
        assert!(text.contains("position [1.0000 2.0000 3.0000]"));
    }
}
