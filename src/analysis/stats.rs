// src/analysis/stats.rs
// Summary statistics over the planner graph.

use std::fmt;

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl Summary {
    /// Both values are zero for an empty sample.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Summary::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Summary {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Everything reported about a planner graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatistics {
    /// Vertex count
    pub num_vertices: usize,
    /// Directed edge count
    pub num_edges: usize,
    /// Total (in + out) vertex degree
    pub degree: Summary,
    /// Edge weights
    pub edge_weight: Summary,
    /// Strongly connected components
    pub strong_components: usize,
    /// Weakly connected components
    pub weak_components: usize,
}

impl fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "---- PLANNER DATA STATISTICS ----")?;
        writeln!(f, "{} vertices and {} edges", self.num_vertices, self.num_edges)?;
        writeln!(
            f,
            "Average vertex degree (in+out) = {}  St. Dev = {}",
            self.degree.mean, self.degree.std_dev
        )?;
        writeln!(
            f,
            "Average edge weight = {}  St. Dev = {}",
            self.edge_weight.mean, self.edge_weight.std_dev
        )?;
        writeln!(f, "Strongly connected components: {}", self.strong_components)?;
        write!(f, "Weakly connected components: {}", self.weak_components)
    }
}
