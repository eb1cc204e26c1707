//! # wizard-league
//!
//! A turn-based simulation of a wizard league: teams of players with power
//! and visibility, a fixed vocabulary of actions, and a verdict naming the
//! leader of the strongest team.
//!
//! ## Design Principles
//!
//! 1. **Check, then mutate**: every action handler validates fully before
//!    touching state. A refused action leaves the registry unchanged.
//!
//! 2. **Owned state**: the registry owns every player. Handles are arena
//!    indices, so identity comparison is handle equality.
//!
//! 3. **Two kinds of failure**: rule violations are statuses and the run
//!    continues; structural input errors are `GameError`s and the run is
//!    aborted.
//!
//! ## Modules
//!
//! - `core`: Players, teams, actions, limits, errors, RNG
//! - `registry`: Name-ordered player tree
//! - `rules`: RulesEngine trait and the action state machine
//! - `scoring`: Per-team power totals and the verdict
//! - `script`: Script parsing and report rendering
//! - `sim`: Simulation driver and scenario generation

pub mod core;
pub mod registry;
pub mod rules;
pub mod scoring;
pub mod script;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, ActionStatus,
    GameError, GameRng, Limits, Player, TeamId, TeamMap,
};

pub use crate::registry::{PlayerHandle, PlayerRegistry};

pub use crate::rules::{ActionMachine, GameResult, RulesEngine};

pub use crate::scoring::{Standings, TeamPower};

pub use crate::script::{parse_script, Report, Script, Verdict};

pub use crate::sim::{report_script, run_script, Outcome, ScenarioBuilder, Simulation};
