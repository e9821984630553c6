//! Planner graph analysis and rendering
//!
//! Consumes the interchange file written after a successful solve and
//! produces:
//! - degree and edge-weight statistics,
//! - strongly/weakly connected component counts,
//! - the shortest start-to-goal path (A* over the undirected projection),
//! - a PNG rendering with the shortest path highlighted.

pub mod render;
pub mod stats;
pub mod style;

pub use render::{RenderConfig, StyledEdge};
pub use stats::{GraphStatistics, Summary};
pub use style::{Color, EdgeStyle, VertexStyle};

use crate::error::Result;
use crate::interchange::{self, GraphDocument};
use crate::planning::VertexRole;
use log::{debug, info};
use nalgebra::Vector3;
use petgraph::algo::{astar, connected_components, kosaraju_scc};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Shortest start-goal path through the planner graph
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Vertex ids from start to goal
    pub vertices: Vec<usize>,
    /// Sum of edge weights along the path
    pub cost: f64,
}

/// Result of analyzing and rendering one planner graph
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Degree, weight and component statistics
    pub statistics: GraphStatistics,
    /// `None` when the graph lacks a start or goal vertex, or they are disconnected
    pub shortest_path: Option<ShortestPath>,
    /// Edges dropped when projecting to an undirected simple graph
    pub parallel_edges_removed: usize,
    /// Where the rendering was written
    pub image_path: PathBuf,
}

/// Undirected simple graph derived from the directed planner graph.
pub struct UndirectedProjection {
    /// Simple undirected graph
    pub graph: UnGraph<(), f64>,
    /// Parallel edges dropped
    pub removed: usize,
}

/// A loaded planner graph ready for analysis.
pub struct GraphAnalysis {
    document: GraphDocument,
    directed: DiGraph<(), f64>,
    positions: Vec<Vector3<f64>>,
}

impl GraphAnalysis {
    /// Validates `document` and builds the directed graph.
    pub fn new(document: GraphDocument) -> Result<Self> {
        document.validate()?;
        let mut directed = DiGraph::with_capacity(document.vertices.len(), document.edges.len());
        for _ in &document.vertices {
            directed.add_node(());
        }
        for edge in &document.edges {
            let (a, b) = (NodeIndex::new(edge.source), NodeIndex::new(edge.target));
            directed.add_edge(a, b, edge.weight);
            if !document.directed {
                directed.add_edge(b, a, edge.weight);
            }
        }
        let positions = document
            .vertices
            .iter()
            .map(|v| Vector3::from(v.position))
            .collect();
        Ok(GraphAnalysis {
            document,
            directed,
            positions,
        })
    }

    /// Parses an interchange file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::new(interchange::read_graph(path)?)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.directed.node_count()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.directed.edge_count()
    }

    fn vertex_with_role(&self, role: VertexRole) -> Option<usize> {
        self.document.vertices.iter().position(|v| v.role == role)
    }

    /// First start vertex, if any.
    pub fn start_vertex(&self) -> Option<usize> {
        self.vertex_with_role(VertexRole::Start)
    }

    /// First goal vertex, if any.
    pub fn goal_vertex(&self) -> Option<usize> {
        self.vertex_with_role(VertexRole::Goal)
    }

    /// Degree, edge weight and component statistics.
    pub fn statistics(&self) -> GraphStatistics {
        let mut degree = vec![0usize; self.num_vertices()];
        for edge in self.directed.edge_references() {
            degree[edge.source().index()] += 1;
            degree[edge.target().index()] += 1;
        }
        GraphStatistics {
            num_vertices: self.num_vertices(),
            num_edges: self.num_edges(),
            degree: Summary::of(degree.into_iter().map(|d| d as f64)),
            edge_weight: Summary::of(self.directed.edge_weights().copied()),
            strong_components: kosaraju_scc(&self.directed).len(),
            // on a directed graph this counts weak components
            weak_components: connected_components(&self.directed),
        }
    }

    /// Drops edge direction and keeps one edge per vertex pair.
    pub fn undirected_projection(&self) -> UndirectedProjection {
        let mut graph = UnGraph::with_capacity(self.num_vertices(), self.num_edges());
        for _ in 0..self.num_vertices() {
            graph.add_node(());
        }
        let mut seen = HashSet::new();
        let mut removed = 0;
        for edge in self.directed.edge_references() {
            let (a, b) = (edge.source(), edge.target());
            let key = if a <= b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                graph.add_edge(a, b, *edge.weight());
            } else {
                removed += 1;
            }
        }
        UndirectedProjection { graph, removed }
    }

    /// A* from the start to the goal vertex with edge weights as cost and the
    /// straight-line position distance as heuristic.
    pub fn shortest_path(&self, projection: &UndirectedProjection) -> Option<ShortestPath> {
        let (start, goal) = (self.start_vertex()?, self.goal_vertex()?);
        let goal_position = self.positions[goal];
        let (cost, nodes) = astar(
            &projection.graph,
            NodeIndex::new(start),
            |n| n.index() == goal,
            |e| *e.weight(),
            |n| (self.positions[n.index()] - goal_position).norm(),
        )?;
        Some(ShortestPath {
            vertices: nodes.into_iter().map(NodeIndex::index).collect(),
            cost,
        })
    }

    /// Renders the projection, highlighting `path` when given.
    pub fn render(
        &self,
        projection: &UndirectedProjection,
        path: Option<&ShortestPath>,
        config: &RenderConfig,
        output: &Path,
    ) -> Result<()> {
        let on_path: HashSet<(usize, usize)> = path
            .map(|p| {
                p.vertices
                    .windows(2)
                    .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
                    .collect()
            })
            .unwrap_or_default();

        let edges: Vec<StyledEdge> = projection
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                let style = if on_path.contains(&(a.min(b), a.max(b))) {
                    EdgeStyle::SHORTEST_PATH
                } else {
                    EdgeStyle::DEFAULT
                };
                StyledEdge { source: a, target: b, style }
            })
            .collect();
        let vertex_styles: Vec<VertexStyle> = self
            .document
            .vertices
            .iter()
            .map(|v| VertexStyle::for_role(v.role))
            .collect();

        render::render_to_file(&self.positions, &vertex_styles, &edges, config, output)
    }
}

/// Loads the interchange file at `graph_path`, analyzes it, and renders it to
/// `image_path`.
pub fn analyze(graph_path: &Path, image_path: &Path, config: &RenderConfig) -> Result<AnalysisReport> {
    let analysis = GraphAnalysis::load(graph_path)?;
    let statistics = analysis.statistics();
    info!(
        "Analyzed planner graph: {} vertices, {} edges",
        statistics.num_vertices, statistics.num_edges
    );

    let projection = analysis.undirected_projection();
    debug!("Removed {} parallel edges", projection.removed);

    let shortest_path = analysis.shortest_path(&projection);
    match &shortest_path {
        Some(path) => debug!(
            "Shortest start-goal path: {} vertices, cost {:.4}",
            path.vertices.len(),
            path.cost
        ),
        None => info!("Start or goal vertex not reachable in the graph; no path highlighted"),
    }

    analysis.render(&projection, shortest_path.as_ref(), config, image_path)?;
    info!("Rendered planner graph to {}", image_path.display());

    Ok(AnalysisReport {
        statistics,
        shortest_path,
        parallel_edges_removed: projection.removed,
        image_path: image_path.to_path_buf(),
    })
}
