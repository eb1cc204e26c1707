//! Rules engine trait.
//!
//! A rules engine decides:
//! - How an action changes the registry, and what status it reports
//! - Which team wins once the actions are exhausted

use crate::core::{Action, ActionStatus, TeamId};
use crate::registry::PlayerRegistry;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameResult {
    /// One team finished strictly ahead.
    Winner(TeamId),
    /// Two or more teams share the top score.
    Tie,
}

impl GameResult {
    /// The winning team, if any.
    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        match self {
            GameResult::Winner(t) => Some(*t),
            GameResult::Tie => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_action` must leave the registry untouched for every status
///   other than `ActionStatus::Ok`
/// - `result` only reads the registry
pub trait RulesEngine {
    /// Apply one action to the registry.
    fn apply_action(&mut self, registry: &mut PlayerRegistry, action: &Action) -> ActionStatus;

    /// Decide the outcome for a league of `team_count` teams.
    fn result(&self, registry: &PlayerRegistry, team_count: usize) -> GameResult;
}
