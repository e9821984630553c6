// src/config.rs
// Configuration for the planning demo. Every constant of the scenario (bounds,
// start/goal, passage geometry, planner and output settings) lives here with a
// default reproducing the stock narrow-passage run.

use crate::error::{DemoError, Result};
use crate::planning::MIN_MOTION_RESOLUTION;
use crate::space::Pose;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// State space settings
    pub space: SpaceConfig,
    /// Start, goal and solve budget
    pub problem: ProblemConfig,
    /// Geometry of the forbidden slab and its window
    pub passage: PassageConfig,
    /// Roadmap planner tuning
    pub planner: PlannerConfig,
    /// Output file locations
    pub output: OutputConfig,
}

/// SE(3) state space settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Lower position limit on every axis
    pub low: f64,
    /// Upper position limit on every axis
    pub high: f64,
    /// Motion checking resolution as a fraction of the space's maximum extent
    pub motion_resolution: f64,
}

/// A pose in configuration form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoseConfig {
    /// x, y, z
    pub position: [f64; 3],
    /// Quaternion as x, y, z, w
    #[serde(default = "identity_orientation")]
    pub orientation: [f64; 4],
}

/// The planning query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Start pose
    pub start: PoseConfig,
    /// Goal pose
    pub goal: PoseConfig,
    /// Distance within which a state satisfies the goal
    pub goal_tolerance: f64,
    /// Wall-clock budget for a solve attempt, in seconds
    pub solve_time_secs: f64,
}

/// Narrow passage geometry: a slab across the y axis that is blocked except
/// for a square window on x and z.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PassageConfig {
    /// Lower y limit of the slab
    pub band_min: f64,
    /// Upper y limit of the slab
    pub band_max: f64,
    /// Lower x/z limit of the window
    pub window_min: f64,
    /// Upper x/z limit of the window
    pub window_max: f64,
}

/// PRM tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Milestones each new milestone tries to connect to
    pub max_nearest_neighbors: usize,
    /// Samples per roadmap growth batch; expansion uses half as many walks
    pub batch_size: usize,
    /// Steps in one random bounce walk during expansion
    pub max_bounce_steps: usize,
    /// Attempts to draw a valid sample before giving up on it
    pub valid_sample_attempts: usize,
    /// Fixed seed for reproducible runs; drawn at random when absent
    pub seed: Option<u64>,
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Intermediate graph interchange file
    pub graph_path: PathBuf,
    /// Rendered roadmap image
    pub image_path: PathBuf,
    /// Image side length in pixels
    pub image_size: u32,
}

fn identity_orientation() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl Default for SpaceConfig {
    fn default() -> Self {
        SpaceConfig {
            low: -10.0,
            high: 10.0,
            motion_resolution: 0.01,
        }
    }
}

impl Default for ProblemConfig {
    fn default() -> Self {
        ProblemConfig {
            start: PoseConfig::at(-9.0, -9.0, -9.0),
            goal: PoseConfig::at(-9.0, 9.0, -9.0),
            goal_tolerance: 0.05,
            solve_time_secs: 20.0,
        }
    }
}

impl Default for PassageConfig {
    fn default() -> Self {
        PassageConfig {
            band_min: -3.0,
            band_max: 3.0,
            window_min: -3.0,
            window_max: 3.0,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            max_nearest_neighbors: 10,
            batch_size: 50,
            max_bounce_steps: 5,
            valid_sample_attempts: 100,
            seed: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            graph_path: PathBuf::from("graph.yaml"),
            image_path: PathBuf::from("graph.png"),
            image_size: 600,
        }
    }
}

impl PoseConfig {
    /// Position with identity orientation
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        PoseConfig {
            position: [x, y, z],
            orientation: identity_orientation(),
        }
    }

    /// Converts to a pose; a zero quaternion becomes the identity.
    pub fn to_pose(&self) -> Pose {
        Pose::from_parts(self.position, self.orientation)
    }
}

impl ProblemConfig {
    /// Solve budget as a `Duration`. Fails for negative, non-finite or
    /// unrepresentably large values.
    pub fn solve_time(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.solve_time_secs).map_err(|e| {
            DemoError::Config(format!(
                "solve_time_secs {} is not a valid duration: {}",
                self.solve_time_secs, e
            ))
        })
    }
}

impl DemoConfig {
    /// Loads configuration from a YAML file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: DemoConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Rejects values the planner cannot work with.
    pub fn validate(&self) -> Result<()> {
        let problem = &self.problem;
        if !(problem.goal_tolerance.is_finite() && problem.goal_tolerance >= 0.0) {
            return Err(DemoError::Config(format!(
                "goal_tolerance must be non-negative, got {}",
                problem.goal_tolerance
            )));
        }
        if !(problem.solve_time_secs.is_finite() && problem.solve_time_secs > 0.0) {
            return Err(DemoError::Config(format!(
                "solve_time_secs must be positive, got {}",
                problem.solve_time_secs
            )));
        }
        problem.solve_time()?;
        let resolution = self.space.motion_resolution;
        if !(MIN_MOTION_RESOLUTION..=1.0).contains(&resolution) {
            return Err(DemoError::Config(format!(
                "motion_resolution must be in [{}, 1], got {}",
                MIN_MOTION_RESOLUTION, resolution
            )));
        }
        if self.planner.max_nearest_neighbors == 0 || self.planner.batch_size == 0 {
            return Err(DemoError::Config(
                "max_nearest_neighbors and batch_size must be at least 1".to_string(),
            ));
        }
        if self.passage.band_min > self.passage.band_max
            || self.passage.window_min > self.passage.window_max
        {
            return Err(DemoError::Config(format!(
                "passage limits are inverted: {:?}",
                self.passage
            )));
        }
        if self.output.image_size < 16 {
            return Err(DemoError::Config(format!(
                "image_size must be at least 16 pixels, got {}",
                self.output.image_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_stock_scenario() {
        let config = DemoConfig::default();
        assert_eq!(config.space.low, -10.0);
        assert_eq!(config.space.high, 10.0);
        assert_eq!(config.problem.start.position, [-9.0, -9.0, -9.0]);
        assert_eq!(config.problem.goal.position, [-9.0, 9.0, -9.0]);
        assert_eq!(config.problem.goal_tolerance, 0.05);
        assert_eq!(config.problem.solve_time().unwrap(), Duration::from_secs(20));
        assert_eq!(config.planner.max_nearest_neighbors, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "planner:\n  seed: 42\nproblem:\n  solve_time_secs: 5.0\n";
        let config: DemoConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.planner.seed, Some(42));
        assert_eq!(config.planner.batch_size, 50);
        assert_eq!(config.problem.solve_time_secs, 5.0);
        assert_eq!(config.problem.goal.position, [-9.0, 9.0, -9.0]);
        assert_eq!(config.passage, PassageConfig::default());
    }

    #[test]
    fn pose_orientation_defaults_to_identity() {
        let yaml = "problem:\n  start:\n    position: [1.0, 2.0, 3.0]\n";
        let config: DemoConfig = serde_yaml::from_str(yaml).unwrap();
        let start = config.problem.start.to_pose();
        assert_eq!(start.orientation_xyzw(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(start.z(), 3.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = DemoConfig::default();
        config.problem.solve_time_secs = 0.0;
        assert!(matches!(config.validate(), Err(DemoError::Config(_))));

        let mut config = DemoConfig::default();
        config.problem.solve_time_secs = 1.0e20;
        assert!(matches!(config.validate(), Err(DemoError::Config(_))));
        assert!(config.problem.solve_time().is_err());

        let mut config = DemoConfig::default();
        config.space.motion_resolution = 1.5;
        assert!(config.validate().is_err());

        let mut config = DemoConfig::default();
        config.space.motion_resolution = 1e-12;
        assert!(matches!(config.validate(), Err(DemoError::Config(_))));

        let mut config = DemoConfig::default();
        config.passage.band_min = 4.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_budget_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prm_demo.yaml");
        std::fs::write(&path, "problem:\n  solve_time_secs: 1.0e20\n").unwrap();
        assert!(matches!(DemoConfig::load_or_default(&path), Err(DemoError::Config(_))));
    }

    #[test]
    fn load_or_default_without_file() {
        let config = DemoConfig::load_or_default(Path::new("does/not/exist.yaml")).unwrap();
        assert_eq!(config.output.image_path, PathBuf::from("graph.png"));
    }
}
