// src/planning/setup.rs
// One-stop problem setup: wires the state space, validity checker, planning
// query and planner together and exposes solve / solution / planner data.

use super::{
    PathGeometric, Planner, PlannerData, PlannerStatus, Prm, ProblemDefinition, SpaceInformation,
};
use crate::config::PlannerConfig;
use crate::error::{DemoError, Result};
use crate::space::{Pose, Se3Space};
use crate::validity::StateValidityChecker;
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default motion checking resolution, 1% of the space extent.
pub const DEFAULT_MOTION_RESOLUTION: f64 = 0.01;

/// Finest accepted motion checking resolution.
pub const MIN_MOTION_RESOLUTION: f64 = 1e-6;

/// Stand-in deadline when `now + budget` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Problem setup and solve entry point.
pub struct SimpleSetup {
    space: Se3Space,
    checker: Option<Arc<dyn StateValidityChecker>>,
    motion_resolution: f64,
    si: Option<SpaceInformation>,
    pdef: Option<ProblemDefinition>,
    planner: Option<Box<dyn Planner>>,
    solution: Option<PathGeometric>,
    last_solve_time: Duration,
}

impl SimpleSetup {
    /// Setup over `space` with nothing else configured.
    pub fn new(space: Se3Space) -> Self {
        SimpleSetup {
            space,
            checker: None,
            motion_resolution: DEFAULT_MOTION_RESOLUTION,
            si: None,
            pdef: None,
            planner: None,
            solution: None,
            last_solve_time: Duration::ZERO,
        }
    }

    /// Sets the collision checker used for states and motions.
    pub fn set_state_validity_checker<C>(&mut self, checker: C)
    where
        C: StateValidityChecker + 'static,
    {
        self.checker = Some(Arc::new(checker));
        self.si = None;
    }

    /// Motion checking resolution as a fraction of the space extent.
    pub fn set_motion_resolution(&mut self, fraction: f64) {
        self.motion_resolution = fraction;
        self.si = None;
    }

    /// Sets the planning query.
    pub fn set_start_and_goal_states(&mut self, start: Pose, goal: Pose, tolerance: f64) {
        self.pdef = Some(ProblemDefinition::new(start, goal, tolerance));
        self.solution = None;
    }

    /// Replaces the planner.
    pub fn set_planner(&mut self, planner: Box<dyn Planner>) {
        self.planner = Some(planner);
    }

    /// Finalizes the configuration. Falls back to an always-valid checker and
    /// to PRM when none were given; fails without a start/goal pair.
    pub fn setup(&mut self) -> Result<()> {
        if self.pdef.is_none() {
            return Err(DemoError::Setup(
                "start and goal states must be set before setup".to_string(),
            ));
        }
        if !(MIN_MOTION_RESOLUTION..=1.0).contains(&self.motion_resolution) {
            return Err(DemoError::Setup(format!(
                "motion resolution must be in [{}, 1], got {}",
                MIN_MOTION_RESOLUTION, self.motion_resolution
            )));
        }
        if self.si.is_none() {
            let checker = match &self.checker {
                Some(checker) => Arc::clone(checker),
                None => {
                    warn!("No state validity checker set; all states are considered valid");
                    let always_valid: Arc<dyn StateValidityChecker> = Arc::new(|_: &Pose| true);
                    always_valid
                }
            };
            self.si = Some(SpaceInformation::new(
                self.space.clone(),
                checker,
                self.motion_resolution,
            ));
        }
        if self.planner.is_none() {
            self.planner = Some(Box::new(Prm::new(PlannerConfig::default())));
        }
        Ok(())
    }

    /// Runs the planner for at most `budget`. Single attempt, no retries.
    pub fn solve(&mut self, budget: Duration) -> Result<PlannerStatus> {
        self.setup()?;
        let (Some(si), Some(pdef), Some(planner)) =
            (self.si.as_ref(), self.pdef.as_ref(), self.planner.as_mut())
        else {
            return Err(DemoError::Setup("setup is incomplete".to_string()));
        };

        let started = Instant::now();
        let result = planner.solve(si, pdef, deadline_after(started, budget));
        self.last_solve_time = started.elapsed();

        match &result.path {
            Some(path) => info!(
                "Solution found in {:.6} seconds ({} states)",
                self.last_solve_time.as_secs_f64(),
                path.len()
            ),
            None => info!(
                "No solution found after {:.6} seconds: {}",
                self.last_solve_time.as_secs_f64(),
                result.status
            ),
        }
        self.solution = result.path;
        Ok(result.status)
    }

    /// Path from the latest successful solve.
    pub fn solution_path(&self) -> Option<&PathGeometric> {
        self.solution.as_ref()
    }

    /// Wall-clock time of the latest solve.
    pub fn last_solve_time(&self) -> Duration {
        self.last_solve_time
    }

    /// The state space.
    pub fn space(&self) -> &Se3Space {
        &self.space
    }

    /// Available once `setup` has run.
    pub fn space_information(&self) -> Option<&SpaceInformation> {
        self.si.as_ref()
    }

    /// The planning query, if set.
    pub fn problem_definition(&self) -> Option<&ProblemDefinition> {
        self.pdef.as_ref()
    }

    /// Snapshot of the planner's exploration graph from the latest solve.
    pub fn planner_data(&self) -> Result<PlannerData> {
        let planner = self
            .planner
            .as_ref()
            .ok_or_else(|| DemoError::Setup("no planner has been set".to_string()))?;
        let mut data = PlannerData::new();
        planner.planner_data(&mut data);
        Ok(data)
    }

    /// Forgets the solution and all planner progress.
    pub fn clear(&mut self) {
        if let Some(planner) = self.planner.as_mut() {
            planner.clear();
        }
        self.solution = None;
    }
}

fn deadline_after(started: Instant, budget: Duration) -> Instant {
    started
        .checked_add(budget)
        .or_else(|| started.checked_add(FAR_FUTURE))
        .unwrap_or(started)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Bounds;
    use crate::validity::NarrowPassage;

    fn space() -> Se3Space {
        Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap())
    }

    #[test]
    fn setup_requires_start_and_goal() {
        let mut ss = SimpleSetup::new(space());
        assert!(matches!(ss.setup(), Err(DemoError::Setup(_))));
        assert!(ss.planner_data().is_err());
    }

    #[test]
    fn solve_stores_solution_and_status() {
        let mut ss = SimpleSetup::new(space());
        ss.set_state_validity_checker(|_: &Pose| true);
        ss.set_start_and_goal_states(Pose::from_xyz(1.0, 1.0, 1.0), Pose::from_xyz(2.0, 2.0, 2.0), 0.05);
        ss.set_planner(Box::new(Prm::new(PlannerConfig {
            seed: Some(9),
            ..PlannerConfig::default()
        })));
        let status = ss.solve(Duration::from_secs(5)).unwrap();
        assert!(status.is_solved());
        assert_eq!(status, PlannerStatus::ExactSolution);
        assert!(ss.last_solve_time() > Duration::ZERO);
        assert_eq!(ss.solution_path().map(PathGeometric::len), Some(2));

        ss.clear();
        assert!(ss.solution_path().is_none());
        assert_eq!(ss.planner_data().unwrap().num_vertices(), 0);
    }

    #[test]
    fn oversized_budget_does_not_overflow_the_deadline() {
        let now = Instant::now();
        assert!(deadline_after(now, Duration::MAX) > now + Duration::from_secs(3600));
        assert_eq!(deadline_after(now, Duration::from_secs(2)), now + Duration::from_secs(2));
    }

    #[test]
    fn resolution_outside_range_is_rejected() {
        let mut ss = SimpleSetup::new(space());
        ss.set_start_and_goal_states(Pose::from_xyz(1.0, 1.0, 1.0), Pose::from_xyz(2.0, 2.0, 2.0), 0.05);
        ss.set_motion_resolution(1e-12);
        assert!(matches!(ss.solve(Duration::from_millis(500)), Err(DemoError::Setup(_))));
        ss.set_motion_resolution(MIN_MOTION_RESOLUTION);
        assert!(ss.setup().is_ok());
    }

    #[test]
    fn invalid_start_is_not_an_error() {
        let mut ss = SimpleSetup::new(space());
        ss.set_state_validity_checker(NarrowPassage::default());
        ss.set_start_and_goal_states(Pose::from_xyz(-5.0, 0.0, 0.0), Pose::from_xyz(-9.0, 9.0, -9.0), 0.05);
        let status = ss.solve(Duration::from_millis(100)).unwrap();
        assert_eq!(status, PlannerStatus::InvalidStart);
        assert!(ss.solution_path().is_none());
    }
}
