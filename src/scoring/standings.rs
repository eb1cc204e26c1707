//! Team standings.
//!
//! Standings are derived, never stored: every call to `Standings::aggregate`
//! walks the whole registry, sums power per team and ranks the teams by
//! accumulated power, highest first. Equal totals keep team order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{TeamId, TeamMap};
use crate::registry::PlayerRegistry;
use crate::rules::GameResult;

/// Accumulated power of one team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPower {
    /// The team.
    pub team: TeamId,
    /// Sum of the power of its surviving players.
    pub power: u32,
}

/// Teams ranked by accumulated power, descending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    ranked: Vec<TeamPower>,
}

impl Standings {
    /// Sum power per team over the whole registry and rank the teams.
    #[must_use]
    pub fn aggregate(registry: &PlayerRegistry, team_count: usize) -> Self {
        let mut totals = TeamMap::with_default(team_count);
        registry.collect_power(&mut totals);
        Self::from_totals(&totals)
    }

    /// Rank precomputed per-team totals.
    #[must_use]
    pub fn from_totals(totals: &TeamMap<u32>) -> Self {
        let mut ranked: Vec<TeamPower> = totals
            .iter()
            .map(|(team, &power)| TeamPower { team, power })
            .collect();

        // Stable: equal totals stay in team order.
        ranked.sort_by(|a, b| b.power.cmp(&a.power));

        Self { ranked }
    }

    /// All teams, strongest first.
    #[must_use]
    pub fn ranked(&self) -> &[TeamPower] {
        &self.ranked
    }

    /// The top-ranked team.
    #[must_use]
    pub fn leader(&self) -> Option<&TeamPower> {
        self.ranked.first()
    }

    /// Accumulated power of a given team.
    #[must_use]
    pub fn power_of(&self, team: TeamId) -> Option<u32> {
        self.ranked.iter().find(|t| t.team == team).map(|t| t.power)
    }

    /// Whether the top score is shared.
    #[must_use]
    pub fn is_tied(&self) -> bool {
        matches!(self.ranked.as_slice(), [first, second, ..] if first.power == second.power)
    }

    /// Outcome implied by the ranking.
    ///
    /// A lone team always wins. Otherwise the leader wins unless the
    /// runner-up has the same total.
    #[must_use]
    pub fn result(&self) -> GameResult {
        match self.leader() {
            Some(leader) if !self.is_tied() => GameResult::Winner(leader.team),
            _ => GameResult::Tie,
        }
    }
}

/// Decide the game for `team_count` teams.
///
/// A single team wins without touching the registry.
#[must_use]
pub fn decide(registry: &PlayerRegistry, team_count: usize) -> GameResult {
    if team_count == 1 {
        return GameResult::Winner(TeamId::new(0));
    }

    let standings = Standings::aggregate(registry, team_count);
    debug!(?standings, "team standings");
    standings.result()
}
