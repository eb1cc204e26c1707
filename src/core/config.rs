//! Run limits.
//!
//! `Limits` carries every numeric bound the simulation enforces. The defaults
//! are the rules of the league; the CLI overrides the action budget through
//! `with_max_actions`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Hard ceiling on a player's power.
pub const MAX_POWER: u16 = 1000;

/// Default number of actions processed per run.
pub const MAX_ACTIONS: usize = 1000;

/// Numeric bounds for one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum number of teams (minimum is always 1).
    pub max_teams: usize,

    /// Maximum roster size. The minimum is the team count.
    pub max_players: usize,

    /// Number of action lines processed before trailing input becomes an error.
    pub max_actions: usize,

    /// Power ceiling for roster entries.
    pub max_power: u16,

    /// Allowed name length in characters.
    pub name_len: RangeInclusive<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_teams: 10,
            max_players: 100,
            max_actions: MAX_ACTIONS,
            max_power: MAX_POWER,
            name_len: 2..=20,
        }
    }
}

impl Limits {
    /// Override the action budget.
    #[must_use]
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }

    /// Check a name against the league naming rule.
    ///
    /// Names are ASCII letters only, start with an uppercase letter and
    /// continue in lowercase.
    ///
    /// ```
    /// use wizard_league::core::Limits;
    ///
    /// let limits = Limits::default();
    /// assert!(limits.is_valid_name("Gandalf"));
    /// assert!(!limits.is_valid_name("gandalf"));
    /// assert!(!limits.is_valid_name("GandAlf"));
    /// assert!(!limits.is_valid_name("G"));
    /// ```
    #[must_use]
    pub fn is_valid_name(&self, name: &str) -> bool {
        if !self.name_len.contains(&name.len()) {
            return false;
        }

        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {}
            _ => return false,
        }

        chars.all(|c| c.is_ascii_lowercase())
    }
}
