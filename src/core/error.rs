//! Error type shared by roster setup, script parsing and the simulation driver.
//!
//! Every variant is a structural input error: the run is aborted and the
//! report collapses to a single generic line. Rule violations (frozen or
//! invisible actors, cross-team pairs, self-targeting) are not errors, they
//! are `ActionStatus` values and the run continues.

use thiserror::Error;

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum GameError {
    /// Team count outside `1..=max_teams`.
    #[error("team count {count} outside 1..={max}")]
    TeamCount { count: usize, max: usize },

    /// Player count outside `team_count..=max_players`.
    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    /// Name does not follow the capitalised-letters rule.
    #[error("invalid name {0:?}")]
    InvalidName(String),

    /// Two team leaders share a name.
    #[error("duplicate team leader {0:?}")]
    DuplicateLeader(String),

    /// Two roster players share a name.
    #[error("duplicate player {0:?}")]
    DuplicatePlayer(String),

    /// Team index not below the team count.
    #[error("team {team} out of range for {team_count} teams")]
    TeamOutOfRange { team: usize, team_count: usize },

    /// Power above the configured ceiling.
    #[error("power {power} above maximum {max}")]
    PowerOutOfRange { power: u32, max: u16 },

    /// Visibility token other than `True` / `False`.
    #[error("invalid visibility {0:?}")]
    InvalidVisibility(String),

    /// A numeric line could not be parsed.
    #[error("line {line}: expected a number, found {text:?}")]
    InvalidNumber { line: usize, text: String },

    /// Input ended before the roster was complete.
    #[error("unexpected end of input at line {line}")]
    UnexpectedEof { line: usize },

    /// Action line with the wrong shape (token count, spacing, blank).
    #[error("line {line}: malformed action {text:?}")]
    MalformedAction { line: usize, text: String },

    /// Action keyword outside the fixed vocabulary.
    #[error("line {line}: unknown action {keyword:?}")]
    UnknownAction { line: usize, keyword: String },

    /// An action named a player that is not in the registry.
    #[error("line {line}: action rejected as invalid input")]
    ActionRejected { line: usize },

    /// More than `max_actions` action lines.
    #[error("more than {max} actions")]
    TooManyActions { max: usize },

    /// Reading the script failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
