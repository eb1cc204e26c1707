//! Core types: players, teams, actions, limits, errors, RNG.
//!
//! Everything else in the crate is built from these. Nothing here knows
//! about the registry tree or the rules.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod team;

pub use action::{Action, ActionKind, ActionRecord, ActionStatus};
pub use config::{Limits, MAX_ACTIONS, MAX_POWER};
pub use error::GameError;
pub use player::{parse_visibility, Player, INVISIBLE_TOKEN, VISIBLE_TOKEN};
pub use rng::GameRng;
pub use team::{TeamId, TeamMap};
