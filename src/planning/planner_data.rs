// src/planning/planner_data.rs
// Snapshot of a planner's exploration graph: sampled states as vertices tagged
// start/goal/other, and directed edges carrying a scalar weight.

use crate::space::{Pose, Se3Space};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role of a vertex in the planning query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexRole {
    /// Start state of the query
    Start,
    /// Goal state of the query
    Goal,
    /// Any other sampled state
    Other,
}

/// A sampled state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerVertex {
    /// Sampled state
    pub state: Pose,
    /// Role in the query
    pub role: VertexRole,
}

/// A directed connection between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerEdge {
    /// Index of the source vertex
    pub source: usize,
    /// Index of the target vertex
    pub target: usize,
    /// Edge cost
    pub weight: f64,
}

/// Planner graph extracted after a solve attempt.
#[derive(Debug, Clone, Default)]
pub struct PlannerData {
    vertices: Vec<PlannerVertex>,
    edges: Vec<PlannerEdge>,
    edge_set: HashSet<(usize, usize)>,
}

impl PlannerData {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, state: Pose, role: VertexRole) -> usize {
        self.vertices.push(PlannerVertex { state, role });
        self.vertices.len() - 1
    }

    /// Adds a start vertex and returns its index.
    pub fn add_start_vertex(&mut self, state: Pose) -> usize {
        self.add_vertex(state, VertexRole::Start)
    }

    /// Adds a goal vertex and returns its index.
    pub fn add_goal_vertex(&mut self, state: Pose) -> usize {
        self.add_vertex(state, VertexRole::Goal)
    }

    /// Adds a directed edge. Returns `false` for self loops, duplicate edges
    /// and unknown vertices.
    pub fn add_weighted_edge(&mut self, source: usize, target: usize, weight: f64) -> bool {
        if source == target || source >= self.vertices.len() || target >= self.vertices.len() {
            return false;
        }
        if !self.edge_set.insert((source, target)) {
            return false;
        }
        self.edges.push(PlannerEdge { source, target, weight });
        true
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[PlannerVertex] {
        &self.vertices
    }

    /// All directed edges in insertion order.
    pub fn edges(&self) -> &[PlannerEdge] {
        &self.edges
    }

    /// Vertex at `index`, if any.
    pub fn vertex(&self, index: usize) -> Option<&PlannerVertex> {
        self.vertices.get(index)
    }

    /// Whether `index` is a start vertex.
    pub fn is_start_vertex(&self, index: usize) -> bool {
        self.vertex(index).is_some_and(|v| v.role == VertexRole::Start)
    }

    /// Whether `index` is a goal vertex.
    pub fn is_goal_vertex(&self, index: usize) -> bool {
        self.vertex(index).is_some_and(|v| v.role == VertexRole::Goal)
    }

    /// Indices of all start vertices.
    pub fn start_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertices.len()).filter(|&i| self.is_start_vertex(i))
    }

    /// Indices of all goal vertices.
    pub fn goal_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertices.len()).filter(|&i| self.is_goal_vertex(i))
    }

    /// Sets every edge weight to the state-space distance between its endpoints.
    pub fn compute_edge_weights(&mut self, space: &Se3Space) {
        for edge in &mut self.edges {
            edge.weight = space.distance(
                &self.vertices[edge.source].state,
                &self.vertices[edge.target].state,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Bounds;

    fn triangle() -> PlannerData {
        let mut data = PlannerData::new();
        let s = data.add_start_vertex(Pose::from_xyz(0.0, 0.0, 0.0));
        let g = data.add_goal_vertex(Pose::from_xyz(3.0, 4.0, 0.0));
        let o = data.add_vertex(Pose::from_xyz(0.0, 4.0, 0.0), VertexRole::Other);
        assert!(data.add_weighted_edge(s, o, 1.0));
        assert!(data.add_weighted_edge(o, g, 1.0));
        assert!(data.add_weighted_edge(s, g, 1.0));
        data
    }

    #[test]
    fn roles_are_queryable() {
        let data = triangle();
        assert!(data.is_start_vertex(0));
        assert!(data.is_goal_vertex(1));
        assert!(!data.is_start_vertex(2) && !data.is_goal_vertex(2));
        assert!(!data.is_start_vertex(99));
        assert_eq!(data.start_vertices().collect::<Vec<_>>(), vec![0]);
        assert_eq!(data.goal_vertices().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn rejects_duplicates_loops_and_unknown_vertices() {
        let mut data = triangle();
        assert!(!data.add_weighted_edge(0, 2, 1.0));
        assert!(!data.add_weighted_edge(1, 1, 1.0));
        assert!(!data.add_weighted_edge(0, 7, 1.0));
        assert!(data.add_weighted_edge(2, 0, 1.0));
        assert_eq!(data.num_edges(), 4);
    }

    #[test]
    fn edge_weights_use_state_distance() {
        let mut data = triangle();
        assert!(data.edges().iter().all(|e| e.weight == 1.0));
        let space = Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap());
        data.compute_edge_weights(&space);
        let weights: Vec<f64> = data.edges().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![4.0, 3.0, 5.0]);
    }
}
