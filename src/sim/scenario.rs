//! Random scenario scripts.
//!
//! `ScenarioBuilder` produces well-formed scripts from a seed. Actions are
//! generated against a live shadow simulation, so every name an action uses
//! resolves at the moment it runs (super players included) and a generated
//! script never aborts.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::{Action, ActionKind, GameError, GameRng, Limits, Player, TeamId, MAX_POWER};
use crate::script::{Script, ScriptAction};

use super::driver::Simulation;

/// Relative frequency of each action kind, in `ActionKind::ALL` order.
const KIND_WEIGHTS: [f32; 4] = [0.4, 0.2, 0.25, 0.15];

/// Share of generated players that start visible.
const VISIBLE_RATE: f64 = 0.75;

/// Builder for seeded random scripts.
///
/// ```
/// use wizard_league::sim::ScenarioBuilder;
///
/// let script = ScenarioBuilder::new(7).teams(3).players(9).actions(40).build().unwrap();
/// assert_eq!(script.leaders.len(), 3);
/// assert_eq!(script.roster.len(), 9);
/// assert_eq!(script.actions.len(), 40);
///
/// let again = ScenarioBuilder::new(7).teams(3).players(9).actions(40).build().unwrap();
/// assert_eq!(script, again);
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    seed: u64,
    teams: usize,
    players: usize,
    actions: usize,
    limits: Limits,
}

impl ScenarioBuilder {
    /// Two teams, eight players, fifty actions.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            teams: 2,
            players: 8,
            actions: 50,
            limits: Limits::default(),
        }
    }

    #[must_use]
    pub fn teams(mut self, teams: usize) -> Self {
        self.teams = teams;
        self
    }

    #[must_use]
    pub fn players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: usize) -> Self {
        self.actions = actions;
        self
    }

    /// Generate the script.
    ///
    /// Fails when the requested sizes fall outside the default limits.
    pub fn build(&self) -> Result<Script, GameError> {
        let limits = &self.limits;
        if self.teams == 0 || self.teams > limits.max_teams {
            return Err(GameError::TeamCount { count: self.teams, max: limits.max_teams });
        }
        if self.players < self.teams || self.players > limits.max_players {
            return Err(GameError::PlayerCount {
                count: self.players,
                min: self.teams,
                max: limits.max_players,
            });
        }
        if self.actions > limits.max_actions {
            return Err(GameError::TooManyActions { max: limits.max_actions });
        }

        let root = GameRng::new(self.seed);
        let mut roster_rng = root.for_context("roster");
        let mut action_rng = root.for_context("actions");

        let leaders = self.generate_leaders(&mut roster_rng);
        let roster = self.generate_roster(&mut roster_rng);

        let mut sim = Simulation::new(leaders.clone(), limits.clone())?;
        for player in &roster {
            sim.add_player(player.clone())?;
        }

        // Header: team count, leaders, player count, four lines per player.
        let first_line = 2 + self.teams + 4 * self.players + 1;
        let mut actions = Vec::with_capacity(self.actions);

        for i in 0..self.actions {
            let live: Vec<String> = sim.registry().iter().map(|p| p.name().to_string()).collect();
            let kind = action_rng
                .choose_weighted(&KIND_WEIGHTS)
                .map_or(ActionKind::Attack, |k| ActionKind::ALL[k]);

            let mut names = Vec::with_capacity(kind.arity());
            for _ in 0..kind.arity() {
                match action_rng.choose(&live) {
                    Some(name) => names.push(name.as_str()),
                    None => break,
                }
            }
            if names.len() != kind.arity() {
                break;
            }

            let action = Action::new(kind, &names);
            let line = first_line + i;
            sim.step(line, &action)?;
            actions.push(ScriptAction { line, action });
        }

        debug!(seed = self.seed, actions = actions.len(), "scenario generated");
        Ok(Script { leaders, roster, actions })
    }

    fn generate_leaders(&self, rng: &mut GameRng) -> Vec<String> {
        let mut taken = FxHashSet::default();
        (0..self.teams).map(|_| unique_name(rng, &self.limits, &mut taken)).collect()
    }

    fn generate_roster(&self, rng: &mut GameRng) -> Vec<Player> {
        let mut taken = FxHashSet::default();
        (0..self.players)
            .map(|i| {
                let name = unique_name(rng, &self.limits, &mut taken);
                // The first player of each team guarantees no team is empty.
                let team = if i < self.teams { i } else { rng.gen_range_usize(0..self.teams) };
                let power = rng.gen_range(0..u32::from(self.limits.max_power.min(MAX_POWER)) + 1) as u16;
                let visible = rng.gen_bool(VISIBLE_RATE);
                Player::new(name, TeamId::new(team as u8), power, visible)
            })
            .collect()
    }
}

/// Draw a valid name not yet in `taken`.
fn unique_name(rng: &mut GameRng, limits: &Limits, taken: &mut FxHashSet<String>) -> String {
    let shortest = (*limits.name_len.start()).max(2);
    let longest = (*limits.name_len.end()).min(8).max(shortest);

    loop {
        let len = rng.gen_range_usize(shortest..longest + 1);
        let mut name = String::with_capacity(len);
        name.push(char::from(b'A' + rng.gen_range(0..26) as u8));
        for _ in 1..len {
            name.push(char::from(b'a' + rng.gen_range(0..26) as u8));
        }

        if taken.insert(name.clone()) {
            return name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    #[test]
    fn test_sizes_checked() {
        assert!(matches!(
            ScenarioBuilder::new(1).teams(0).build(),
            Err(GameError::TeamCount { .. })
        ));
        assert!(matches!(
            ScenarioBuilder::new(1).teams(4).players(3).build(),
            Err(GameError::PlayerCount { .. })
        ));
        assert!(matches!(
            ScenarioBuilder::new(1).actions(1001).build(),
            Err(GameError::TooManyActions { max: 1000 })
        ));
    }

    #[test]
    fn test_every_team_has_a_player() {
        let script = ScenarioBuilder::new(3).teams(5).players(5).actions(0).build().unwrap();
        let mut teams: Vec<_> = script.roster.iter().map(|p| p.team().0).collect();
        teams.sort_unstable();
        assert_eq!(teams, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_generated_names_valid() {
        let limits = Limits::default();
        let script = ScenarioBuilder::new(11).teams(10).players(100).actions(0).build().unwrap();

        assert!(script.leaders.iter().all(|n| limits.is_valid_name(n)));
        assert!(script.roster.iter().all(|p| limits.is_valid_name(p.name())));

        let unique: FxHashSet<_> = script.roster.iter().map(Player::name).collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn test_script_text_parses_back() {
        let script = ScenarioBuilder::new(5).teams(3).players(12).actions(200).build().unwrap();
        let parsed = parse_script(&script.to_text(), &Limits::default()).unwrap();
        assert_eq!(parsed, script);
    }

    #[test]
    fn test_seeds_differ() {
        let a = ScenarioBuilder::new(1).build().unwrap();
        let b = ScenarioBuilder::new(2).build().unwrap();
        assert_ne!(a, b);
    }
}
