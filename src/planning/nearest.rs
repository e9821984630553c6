// src/planning/nearest.rs
// Brute-force nearest-neighbor structure over poses.

use crate::space::{Pose, Se3Space};
use std::cmp::Ordering;

/// Linear-scan k-nearest-neighbor index. Each entry pairs a key (e.g. a
/// roadmap node) with its pose.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborsLinear<K> {
    entries: Vec<(K, Pose)>,
}

impl<K: Copy> NearestNeighborsLinear<K> {
    /// Empty index.
    pub fn new() -> Self {
        NearestNeighborsLinear { entries: Vec::new() }
    }

    /// Inserts `key` at `pose`.
    pub fn add(&mut self, key: K, pose: Pose) {
        self.entries.push((key, pose));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Up to `k` entries closest to `query`, nearest first.
    pub fn nearest_k(&self, space: &Se3Space, query: &Pose, k: usize) -> Vec<(K, f64)> {
        if k == 0 {
            return Vec::new();
        }
        let mut scored: Vec<(K, f64)> = self
            .entries
            .iter()
            .map(|(key, pose)| (*key, space.distance(pose, query)))
            .collect();
        let by_distance = |a: &(K, f64), b: &(K, f64)| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
        if scored.len() > k {
            scored.select_nth_unstable_by(k - 1, by_distance);
            scored.truncate(k);
        }
        scored.sort_by(by_distance);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Bounds;

    fn space() -> Se3Space {
        Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap())
    }

    #[test]
    fn returns_k_closest_in_order() {
        let space = space();
        let mut nn = NearestNeighborsLinear::new();
        for (i, x) in [5.0, -1.0, 3.0, 0.5, 9.0].iter().enumerate() {
            nn.add(i, Pose::from_xyz(*x, 0.0, 0.0));
        }
        let found = nn.nearest_k(&space, &Pose::from_xyz(0.0, 0.0, 0.0), 3);
        let keys: Vec<usize> = found.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3, 1, 2]);
        assert!((found[0].1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fewer_entries_than_k() {
        let space = space();
        let mut nn = NearestNeighborsLinear::new();
        nn.add('a', Pose::from_xyz(1.0, 1.0, 1.0));
        assert_eq!(nn.nearest_k(&space, &Pose::from_xyz(0.0, 0.0, 0.0), 10).len(), 1);
        assert!(nn.nearest_k(&space, &Pose::from_xyz(0.0, 0.0, 0.0), 0).is_empty());
    }

    #[test]
    fn empty_index() {
        let nn: NearestNeighborsLinear<u32> = NearestNeighborsLinear::new();
        assert!(nn.is_empty());
        assert!(nn.nearest_k(&space(), &Pose::from_xyz(0.0, 0.0, 0.0), 3).is_empty());
    }
}
