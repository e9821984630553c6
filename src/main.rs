// src/main.rs
// Entry point for the narrow-passage planning demo. Takes no arguments; an
// optional prm_demo.yaml in the working directory overrides the defaults.

use log::{info, warn};
use prm_demo::{Capabilities, DemoConfig, PlanningDemo};
use std::error::Error;
use std::path::Path;

const CONFIG_FILE: &str = "prm_demo.yaml";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting narrow-passage planning demo...");

    // Resolved once and passed down explicitly
    let capabilities = Capabilities::detect();
    if !capabilities.graph_analysis {
        warn!("Graph analysis support is not available");
        println!("Graph analysis is unavailable. Planner data will not be analyzed or plotted");
    }

    let config = DemoConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let demo = PlanningDemo::new(config, capabilities);
    let outcome = demo.run()?;

    match (&outcome.solution, outcome.solution_length) {
        (Some(path), Some(length)) => println!(
            "Found solution in {:.3} seconds (length {:.3}):\n{}",
            outcome.solve_time.as_secs_f64(),
            length,
            path
        ),
        _ => println!(
            "No solution found after {:.3} seconds: {}",
            outcome.solve_time.as_secs_f64(),
            outcome.status
        ),
    }

    #[cfg(feature = "graph-analysis")]
    {
        if let Some(report) = &outcome.analysis {
            println!("{}", report.statistics);
            println!("\nGraph written to {}", report.image_path.display());
        }
    }

    info!("Demo completed");
    Ok(())
}
