// tests/planning_tests.rs
// PRM against the narrow passage, driven through SimpleSetup.

use prm_demo::{
    Bounds, NarrowPassage, PlannerConfig, PlannerStatus, Pose, Prm, Se3Space, SimpleSetup,
    StateValidityChecker,
};
use rstest::{fixture, rstest};
use std::time::Duration;

const BUDGET: Duration = Duration::from_secs(60);

fn narrow_passage_setup(seed: u64) -> SimpleSetup {
    let space = Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap());
    let mut ss = SimpleSetup::new(space);
    ss.set_state_validity_checker(NarrowPassage::default());
    ss.set_start_and_goal_states(
        Pose::from_xyz(-9.0, -9.0, -9.0),
        Pose::from_xyz(-9.0, 9.0, -9.0),
        0.05,
    );
    ss.set_planner(Box::new(Prm::new(PlannerConfig {
        seed: Some(seed),
        ..PlannerConfig::default()
    })));
    ss
}

#[fixture]
fn solved() -> SimpleSetup {
    let mut ss = narrow_passage_setup(42);
    let status = ss.solve(BUDGET).unwrap();
    assert_eq!(status, PlannerStatus::ExactSolution);
    ss
}

#[rstest]
fn solution_runs_from_start_to_goal(solved: SimpleSetup) {
    let path = solved.solution_path().unwrap();
    let states = path.states();
    assert!(states.len() >= 3, "the wall forces at least one intermediate state");
    assert_eq!(states.first().unwrap().position(), Pose::from_xyz(-9.0, -9.0, -9.0).position());
    assert_eq!(states.last().unwrap().position(), Pose::from_xyz(-9.0, 9.0, -9.0).position());
}

#[rstest]
fn solution_stays_valid_through_the_window(solved: SimpleSetup) {
    let si = solved.space_information().unwrap();
    let states = solved.solution_path().unwrap().states();
    assert!(states.iter().all(|s| si.is_valid(s)));
    assert!(states.windows(2).all(|pair| si.check_motion(&pair[0], &pair[1])));

    let checker = NarrowPassage::default();
    let in_band: Vec<&Pose> = states.iter().filter(|s| s.y().abs() <= 3.0).collect();
    assert!(in_band.iter().all(|s| checker.is_valid(s)));
}

#[rstest]
fn planner_data_marks_one_start_and_one_goal(solved: SimpleSetup) {
    let mut data = solved.planner_data().unwrap();
    data.compute_edge_weights(solved.space());

    assert_eq!(data.start_vertices().count(), 1);
    assert_eq!(data.goal_vertices().count(), 1);
    assert!(data.num_vertices() > 2);
    // undirected roadmap exported both ways
    assert_eq!(data.num_edges() % 2, 0);
    assert!(data.edges().iter().all(|e| e.weight > 0.0));
}

#[test]
fn fixed_seed_is_reproducible() {
    let mut first = narrow_passage_setup(7);
    let mut second = narrow_passage_setup(7);
    assert!(first.solve(BUDGET).unwrap().is_solved());
    assert!(second.solve(BUDGET).unwrap().is_solved());

    assert_eq!(first.solution_path(), second.solution_path());

    let (a, b) = (first.planner_data().unwrap(), second.planner_data().unwrap());
    assert_eq!(a.num_vertices(), b.num_vertices());
    assert_eq!(a.num_edges(), b.num_edges());
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.edges(), b.edges());
}

#[test]
fn start_inside_the_wall_is_rejected() {
    let space = Se3Space::new(Bounds::uniform(-10.0, 10.0).unwrap());
    let mut ss = SimpleSetup::new(space);
    ss.set_state_validity_checker(NarrowPassage::default());
    ss.set_start_and_goal_states(
        Pose::from_xyz(-5.0, 0.0, 0.0),
        Pose::from_xyz(-9.0, 9.0, -9.0),
        0.05,
    );
    assert_eq!(ss.solve(Duration::from_secs(1)).unwrap(), PlannerStatus::InvalidStart);
    assert!(ss.solution_path().is_none());
}
