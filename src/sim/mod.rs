//! Running leagues.
//!
//! - `Simulation`: owns the registry and rules engine for one run
//! - `Outcome`: what a finished run produced
//! - `ScenarioBuilder`: seeded random scripts for fuzzing

mod driver;
mod scenario;

pub use driver::{report_script, run_script, Outcome, Simulation};
pub use scenario::ScenarioBuilder;
