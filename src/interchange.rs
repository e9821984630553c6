// src/interchange.rs
// Text interchange format for planner graphs. The planner data is written to a
// YAML document, closed, and re-read by the analysis stage.

use crate::error::{DemoError, Result};
use crate::planning::{PlannerData, VertexRole};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serialized planner graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Edges are directed
    pub directed: bool,
    /// Vertices, ids matching their position
    pub vertices: Vec<VertexRecord>,
    /// Weighted edges
    pub edges: Vec<EdgeRecord>,
}

/// One vertex: its id, role in the query and state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    /// Vertex index
    pub id: usize,
    /// Start, goal or other
    pub role: VertexRole,
    /// x, y, z
    pub position: [f64; 3],
    /// Quaternion as x, y, z, w
    pub orientation: [f64; 4],
}

/// One directed, weighted edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source vertex id
    pub source: usize,
    /// Target vertex id
    pub target: usize,
    /// Edge cost
    pub weight: f64,
}

impl From<&PlannerData> for GraphDocument {
    fn from(data: &PlannerData) -> Self {
        let vertices = data
            .vertices()
            .iter()
            .enumerate()
            .map(|(id, v)| VertexRecord {
                id,
                role: v.role,
                position: [v.state.x(), v.state.y(), v.state.z()],
                orientation: v.state.orientation_xyzw(),
            })
            .collect();
        let edges = data
            .edges()
            .iter()
            .map(|e| EdgeRecord {
                source: e.source,
                target: e.target,
                weight: e.weight,
            })
            .collect();
        GraphDocument {
            directed: true,
            vertices,
            edges,
        }
    }
}

impl GraphDocument {
    /// Vertex ids must be 0..n in order and every edge must reference them.
    pub fn validate(&self) -> Result<()> {
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.id != index {
                return Err(DemoError::Graph(format!(
                    "vertex at position {} has id {}",
                    index, vertex.id
                )));
            }
        }
        let n = self.vertices.len();
        for edge in &self.edges {
            if edge.source >= n || edge.target >= n {
                return Err(DemoError::Graph(format!(
                    "edge {} -> {} references a missing vertex ({} vertices)",
                    edge.source, edge.target, n
                )));
            }
        }
        Ok(())
    }
}

/// Writes the planner data to `path`. The file is flushed and closed on return.
pub fn write_graph(data: &PlannerData, path: &Path) -> Result<()> {
    let document = GraphDocument::from(data);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, &document)?;
    writer.flush()?;
    debug!(
        "Wrote {} vertices and {} edges to {}",
        document.vertices.len(),
        document.edges.len(),
        path.display()
    );
    Ok(())
}

/// Reads and validates a graph written by [`write_graph`].
pub fn read_graph(path: &Path) -> Result<GraphDocument> {
    let reader = BufReader::new(File::open(path)?);
    let document: GraphDocument = serde_yaml::from_reader(reader)?;
    document.validate()?;
    Ok(document)
}
