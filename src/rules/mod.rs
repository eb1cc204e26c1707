//! Rules: the action state machine and the verdict.
//!
//! `RulesEngine` is the seam between the simulation driver and the game
//! rules. `ActionMachine` is the league's implementation: a closed dispatch
//! over the four action kinds plus the run-scoped super-name counter.

pub mod actions;
pub mod engine;

pub use actions::{ActionMachine, SuperNames};
pub use engine::{GameResult, RulesEngine};
