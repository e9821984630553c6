// src/planning/prm.rs
// Probabilistic roadmap planner.
//
// The roadmap is built by alternating two phases:
// - growth: draw uniform valid samples and connect each to its k nearest
//   milestones through valid straight-line motions;
// - expansion: pick milestones that struggle to connect and extend them with
//   short random bounce walks, which helps in narrow passages.
// Work is done in fixed-size batches and the start/goal connectivity is checked
// between batches, so a fixed seed gives a reproducible roadmap unless the time
// budget interrupts a batch.

use super::{
    NearestNeighborsLinear, PathGeometric, Planner, PlannerData, PlannerResult, PlannerStatus,
    ProblemDefinition, SpaceInformation, VertexRole,
};
use crate::config::PlannerConfig;
use crate::space::Pose;
use log::{debug, info, warn};
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Roadmap vertex with its connection bookkeeping.
#[derive(Debug, Clone, Copy)]
struct Milestone {
    state: Pose,
    connection_attempts: u32,
    successful_connections: u32,
}

impl Milestone {
    fn new(state: Pose) -> Self {
        Milestone {
            state,
            connection_attempts: 0,
            successful_connections: 0,
        }
    }

    // poorly connected milestones are favoured for expansion
    fn expansion_weight(&self) -> f64 {
        (self.connection_attempts as f64 + 1.0) / (self.successful_connections as f64 + 1.0)
    }
}

/// PRM planner
pub struct Prm {
    config: PlannerConfig,
    rng: StdRng,
    roadmap: UnGraph<Milestone, f64>,
    nn: NearestNeighborsLinear<NodeIndex>,
    query: Option<ProblemDefinition>,
    start_milestones: Vec<NodeIndex>,
    goal_milestones: Vec<NodeIndex>,
    grow_next: bool,
}

impl Prm {
    /// Creates a planner. Without a configured seed one is drawn and logged
    /// so the run can be reproduced.
    pub fn new(config: PlannerConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!("PRM random seed: {}", seed);
        Prm {
            config,
            rng: StdRng::seed_from_u64(seed),
            roadmap: UnGraph::default(),
            nn: NearestNeighborsLinear::new(),
            query: None,
            start_milestones: Vec::new(),
            goal_milestones: Vec::new(),
            grow_next: true,
        }
    }

    /// Number of roadmap milestones.
    pub fn milestone_count(&self) -> usize {
        self.roadmap.node_count()
    }

    /// Number of undirected roadmap edges.
    pub fn edge_count(&self) -> usize {
        self.roadmap.edge_count()
    }

    /// Adds `state` to the roadmap and connects it to its nearest milestones.
    fn add_milestone(&mut self, si: &SpaceInformation, state: Pose) -> NodeIndex {
        let neighbors = self
            .nn
            .nearest_k(si.space(), &state, self.config.max_nearest_neighbors);
        let m = self.roadmap.add_node(Milestone::new(state));
        for (n, distance) in neighbors {
            self.roadmap[m].connection_attempts += 1;
            self.roadmap[n].connection_attempts += 1;
            let other = self.roadmap[n].state;
            if si.check_motion(&other, &state) {
                self.roadmap[m].successful_connections += 1;
                self.roadmap[n].successful_connections += 1;
                self.roadmap.add_edge(n, m, distance);
            }
        }
        self.nn.add(m, state);
        m
    }

    fn grow_roadmap(&mut self, si: &SpaceInformation, deadline: Instant, samples: usize) {
        for _ in 0..samples {
            if Instant::now() >= deadline {
                break;
            }
            if let Some(state) = si.sample_valid(&mut self.rng, self.config.valid_sample_attempts) {
                self.add_milestone(si, state);
            }
        }
    }

    fn expand_roadmap(&mut self, si: &SpaceInformation, deadline: Instant, walks: usize) {
        for _ in 0..walks {
            if Instant::now() >= deadline {
                break;
            }
            let Some(origin) = self.pick_expansion_milestone() else {
                break;
            };
            let walk = self.random_bounce_walk(si, self.roadmap[origin].state);
            let Some((&last, intermediate)) = walk.split_last() else {
                continue;
            };

            // intermediate states are chained without extra connections;
            // only the end of the walk becomes a fully connected milestone
            let mut previous = origin;
            for &state in intermediate {
                let node = self.roadmap.add_node(Milestone::new(state));
                self.nn.add(node, state);
                let weight = si.distance(&self.roadmap[previous].state, &state);
                self.roadmap.add_edge(previous, node, weight);
                previous = node;
            }
            let end = self.add_milestone(si, last);
            if self.roadmap.find_edge(previous, end).is_none() {
                let weight = si.distance(&self.roadmap[previous].state, &last);
                self.roadmap.add_edge(previous, end, weight);
            }
        }
    }

    /// Roulette selection over expansion weights.
    fn pick_expansion_milestone(&mut self) -> Option<NodeIndex> {
        let total: f64 = self
            .roadmap
            .node_weights()
            .map(Milestone::expansion_weight)
            .sum();
        if total <= 0.0 {
            return None;
        }
        let mut target = self.rng.random_range(0.0..total);
        for n in self.roadmap.node_indices() {
            let weight = self.roadmap[n].expansion_weight();
            if target < weight {
                return Some(n);
            }
            target -= weight;
        }
        self.roadmap.node_indices().last()
    }

    /// Moves from `from` towards random targets, stopping each leg at the
    /// last valid state. Returns the states where legs ended.
    fn random_bounce_walk(&mut self, si: &SpaceInformation, from: Pose) -> Vec<Pose> {
        let mut states = Vec::with_capacity(self.config.max_bounce_steps);
        let mut current = from;
        for _ in 0..self.config.max_bounce_steps {
            let target = si.space().sample_uniform(&mut self.rng);
            let (reached, fraction) = si.last_valid_motion_state(&current, &target);
            if fraction > 0.0 && si.distance(&current, &reached) > f64::EPSILON {
                states.push(reached);
                current = reached;
            }
        }
        states
    }

    fn ensure_query_milestones(&mut self, si: &SpaceInformation, pdef: &ProblemDefinition) {
        if self.query.as_ref() != Some(pdef) {
            self.start_milestones.clear();
            self.goal_milestones.clear();
            self.query = Some(*pdef);
        }
        if self.start_milestones.is_empty() {
            let m = self.add_milestone(si, *pdef.start());
            self.start_milestones.push(m);
        }
        if self.goal_milestones.is_empty() {
            let m = self.add_milestone(si, *pdef.goal());
            self.goal_milestones.push(m);
        }
    }

    /// Shortest roadmap path between any start and any goal milestone.
    fn construct_solution(
        &self,
        si: &SpaceInformation,
        pdef: &ProblemDefinition,
    ) -> Option<PathGeometric> {
        for &start in &self.start_milestones {
            for &goal in &self.goal_milestones {
                let goal_state = self.roadmap[goal].state;
                if !pdef.is_satisfied(si, &goal_state) {
                    continue;
                }
                let found = astar(
                    &self.roadmap,
                    start,
                    |n| n == goal,
                    |e| *e.weight(),
                    |n| si.distance(&self.roadmap[n].state, &goal_state),
                );
                if let Some((cost, nodes)) = found {
                    debug!("Roadmap path with {} milestones, cost {:.4}", nodes.len(), cost);
                    let states = nodes.iter().map(|&n| self.roadmap[n].state).collect();
                    return Some(PathGeometric::new(states));
                }
            }
        }
        None
    }
}

impl Planner for Prm {
    fn name(&self) -> &str {
        "PRM"
    }

    fn solve(
        &mut self,
        si: &SpaceInformation,
        pdef: &ProblemDefinition,
        deadline: Instant,
    ) -> PlannerResult {
        if !si.is_valid(pdef.start()) {
            warn!("{}: start state is invalid: {}", self.name(), pdef.start());
            return PlannerResult::failed(PlannerStatus::InvalidStart);
        }
        if !si.is_valid(pdef.goal()) {
            warn!("{}: goal state is invalid: {}", self.name(), pdef.goal());
            return PlannerResult::failed(PlannerStatus::InvalidGoal);
        }

        self.ensure_query_milestones(si, pdef);
        info!(
            "{}: starting planning with {} states already in datastructure",
            self.name(),
            self.milestone_count()
        );

        let expand_walks = (self.config.batch_size / 2).max(1);
        loop {
            if let Some(path) = self.construct_solution(si, pdef) {
                info!(
                    "{}: created {} states, {} edges",
                    self.name(),
                    self.milestone_count(),
                    self.edge_count()
                );
                return PlannerResult::solved(path);
            }
            if Instant::now() >= deadline {
                info!(
                    "{}: no solution with {} states, {} edges",
                    self.name(),
                    self.milestone_count(),
                    self.edge_count()
                );
                return PlannerResult::failed(PlannerStatus::Timeout);
            }
            if self.grow_next {
                self.grow_roadmap(si, deadline, self.config.batch_size);
            } else {
                self.expand_roadmap(si, deadline, expand_walks);
            }
            self.grow_next = !self.grow_next;
        }
    }

    /// The roadmap is undirected, so every edge is exported in both directions.
    fn planner_data(&self, data: &mut PlannerData) {
        let offset = data.num_vertices();
        for n in self.roadmap.node_indices() {
            let role = if self.start_milestones.contains(&n) {
                VertexRole::Start
            } else if self.goal_milestones.contains(&n) {
                VertexRole::Goal
            } else {
                VertexRole::Other
            };
            data.add_vertex(self.roadmap[n].state, role);
        }
        for edge in self.roadmap.edge_references() {
            let a = offset + edge.source().index();
            let b = offset + edge.target().index();
            data.add_weighted_edge(a, b, *edge.weight());
            data.add_weighted_edge(b, a, *edge.weight());
        }
    }

    fn clear(&mut self) {
        self.roadmap.clear();
        self.nn.clear();
        self.query = None;
        self.start_milestones.clear();
        self.goal_milestones.clear();
        self.grow_next = true;
    }
}
