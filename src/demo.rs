// src/demo.rs
// Runs the demo end to end: problem setup, solve, graph extraction, then
// analysis and rendering when that capability is present.

use crate::config::DemoConfig;
use crate::error::Result;
use crate::planning::{PathGeometric, PlannerData, PlannerStatus, Prm, SimpleSetup};
use crate::space::{Bounds, Se3Space};
use crate::validity::NarrowPassage;
use log::info;
use std::time::Duration;

#[cfg(feature = "graph-analysis")]
use crate::analysis::{self, AnalysisReport, RenderConfig};
#[cfg(feature = "graph-analysis")]
use crate::interchange;

/// Optional capabilities, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Graph analysis and rendering are available
    pub graph_analysis: bool,
}

impl Capabilities {
    /// What this build supports.
    pub fn detect() -> Self {
        Capabilities {
            graph_analysis: cfg!(feature = "graph-analysis"),
        }
    }

    /// Planning only; the analysis stage is skipped.
    pub fn planning_only() -> Self {
        Capabilities {
            graph_analysis: false,
        }
    }
}

/// What a demo run produced.
#[derive(Debug)]
pub struct DemoOutcome {
    /// How the solve attempt ended
    pub status: PlannerStatus,
    /// Present when a solution was found
    pub solution: Option<PathGeometric>,
    /// State-space length of the solution
    pub solution_length: Option<f64>,
    /// Wall-clock time spent in the planner
    pub solve_time: Duration,
    /// Weighted planner graph, present when a solution was found
    pub planner_data: Option<PlannerData>,
    /// Present when the solve succeeded and analysis is available
    #[cfg(feature = "graph-analysis")]
    pub analysis: Option<AnalysisReport>,
}

impl DemoOutcome {
    /// Whether the planner found a path.
    pub fn is_solved(&self) -> bool {
        self.status.is_solved()
    }
}

/// The narrow-passage planning demo.
pub struct PlanningDemo {
    config: DemoConfig,
    capabilities: Capabilities,
}

impl PlanningDemo {
    /// Creates a demo from a validated configuration.
    pub fn new(config: DemoConfig, capabilities: Capabilities) -> Self {
        PlanningDemo {
            config,
            capabilities,
        }
    }

    /// Bounded SE(3) space, narrow-passage checker, start/goal and a PRM planner.
    pub fn build_setup(&self) -> Result<SimpleSetup> {
        let config = &self.config;
        let bounds = Bounds::uniform(config.space.low, config.space.high)?;
        let mut ss = SimpleSetup::new(Se3Space::new(bounds));
        ss.set_state_validity_checker(NarrowPassage::new(config.passage));
        ss.set_motion_resolution(config.space.motion_resolution);
        ss.set_start_and_goal_states(
            config.problem.start.to_pose(),
            config.problem.goal.to_pose(),
            config.problem.goal_tolerance,
        );
        ss.set_planner(Box::new(Prm::new(config.planner.clone())));
        ss.setup()?;
        Ok(ss)
    }

    /// One full run. A missing solution is reported in the outcome, not as an error.
    pub fn run(&self) -> Result<DemoOutcome> {
        let mut ss = self.build_setup()?;
        let status = ss.solve(self.config.problem.solve_time()?)?;

        if !status.is_solved() {
            info!("Planner did not find a solution: {}", status);
            return Ok(DemoOutcome {
                status,
                solution: None,
                solution_length: None,
                solve_time: ss.last_solve_time(),
                planner_data: None,
                #[cfg(feature = "graph-analysis")]
                analysis: None,
            });
        }

        let mut data = ss.planner_data()?;
        data.compute_edge_weights(ss.space());
        info!(
            "Extracted planner data: {} vertices, {} edges",
            data.num_vertices(),
            data.num_edges()
        );

        #[cfg(feature = "graph-analysis")]
        let analysis = self.analyze(&data)?;

        let solution = ss.solution_path().cloned();
        let solution_length = solution.as_ref().map(|path| path.length(ss.space()));
        Ok(DemoOutcome {
            status,
            solution,
            solution_length,
            solve_time: ss.last_solve_time(),
            planner_data: Some(data),
            #[cfg(feature = "graph-analysis")]
            analysis,
        })
    }

    #[cfg(feature = "graph-analysis")]
    fn analyze(&self, data: &PlannerData) -> Result<Option<AnalysisReport>> {
        if !self.capabilities.graph_analysis {
            return Ok(None);
        }
        let output = &self.config.output;
        interchange::write_graph(data, &output.graph_path)?;
        let render = RenderConfig {
            size: output.image_size,
            ..RenderConfig::default()
        };
        let report = analysis::analyze(&output.graph_path, &output.image_path, &render)?;
        Ok(Some(report))
    }
}
