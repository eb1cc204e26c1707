//! Simulation driver.
//!
//! A `Simulation` owns the registry and a rules engine. It loads the roster,
//! feeds actions through the engine one at a time, records every status and
//! turns an `InputError` into a `GameError` tagged with the script line.

use tracing::{info, warn};

use crate::core::{Action, ActionRecord, ActionStatus, GameError, Limits, Player};
use crate::registry::{PlayerHandle, PlayerRegistry};
use crate::rules::{ActionMachine, GameResult, RulesEngine};
use crate::scoring::Standings;
use crate::script::{parse_script, Report, Script, ScriptAction, Verdict};

/// A league run in progress.
pub struct Simulation<E: RulesEngine = ActionMachine> {
    registry: PlayerRegistry,
    engine: E,
    leaders: Vec<String>,
    limits: Limits,
    history: Vec<ActionRecord>,
}

impl Simulation<ActionMachine> {
    /// Create an empty league with the standard rules.
    pub fn new(leaders: Vec<String>, limits: Limits) -> Result<Self, GameError> {
        Self::with_engine(leaders, limits, ActionMachine::new())
    }

    /// Build a league from a parsed script, inserting its whole roster.
    ///
    /// The script's actions are not applied; pass them to `run`.
    pub fn from_script(script: &Script, limits: Limits) -> Result<Self, GameError> {
        let mut sim = Self::new(script.leaders.clone(), limits)?;
        for player in &script.roster {
            sim.add_player(player.clone())?;
        }

        info!(
            teams = sim.team_count(),
            players = sim.registry.len(),
            actions = script.actions.len(),
            "roster loaded"
        );
        sim.registry.trace_structure();

        Ok(sim)
    }
}

impl<E: RulesEngine> Simulation<E> {
    /// Create an empty league driven by `engine`.
    pub fn with_engine(leaders: Vec<String>, limits: Limits, engine: E) -> Result<Self, GameError> {
        if leaders.is_empty() || leaders.len() > limits.max_teams {
            return Err(GameError::TeamCount { count: leaders.len(), max: limits.max_teams });
        }

        Ok(Self {
            registry: PlayerRegistry::new(),
            engine,
            leaders,
            limits,
            history: Vec::new(),
        })
    }

    /// Add a roster player. Names must be unique.
    pub fn add_player(&mut self, player: Player) -> Result<PlayerHandle, GameError> {
        self.registry
            .insert(player)
            .map_err(|existing| GameError::DuplicatePlayer(existing.name().to_string()))
    }

    // === Accessors ===

    /// The player registry.
    #[must_use]
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.leaders.len()
    }

    // === Running ===

    /// Apply one action read from script line `line`.
    ///
    /// Rule violations come back as `Ok` with the refusing status. A name
    /// that does not resolve aborts the run with `ActionRejected`.
    pub fn step(&mut self, line: usize, action: &Action) -> Result<ActionStatus, GameError> {
        if self.history.len() >= self.limits.max_actions {
            return Err(GameError::TooManyActions { max: self.limits.max_actions });
        }

        let status = self.engine.apply_action(&mut self.registry, action);
        self.history.push(ActionRecord::new(line, action.clone(), status));

        if status == ActionStatus::InputError {
            return Err(GameError::ActionRejected { line });
        }
        Ok(status)
    }

    /// Apply every action, then decide the game.
    pub fn run<'a, I>(mut self, actions: I) -> Result<Outcome, GameError>
    where
        I: IntoIterator<Item = &'a ScriptAction>,
    {
        for entry in actions {
            self.step(entry.line, &entry.action)?;
        }
        Ok(self.finish())
    }

    /// Decide the game with the actions applied so far.
    ///
    /// Team totals are only summed when two or more teams compete.
    #[must_use]
    pub fn finish(self) -> Outcome {
        let team_count = self.team_count();
        let result = self.engine.result(&self.registry, team_count);
        let standings = (team_count > 1).then(|| Standings::aggregate(&self.registry, team_count));
        let roster = self.registry.iter().cloned().collect();

        let outcome = Outcome {
            leaders: self.leaders,
            history: self.history,
            result,
            standings,
            roster,
        };
        info!(verdict = %outcome.verdict(), actions = outcome.history.len(), "game finished");
        outcome
    }
}

/// A finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Team leaders, indexed by team.
    pub leaders: Vec<String>,
    /// Every applied action with its status.
    pub history: Vec<ActionRecord>,
    /// Who won.
    pub result: GameResult,
    /// Final team totals. `None` when a single team played.
    pub standings: Option<Standings>,
    /// Surviving players in name order.
    pub roster: Vec<Player>,
}

impl Outcome {
    /// Diagnostic lines for refused actions, in action order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.history.iter().filter_map(|record| record.status.message())
    }

    /// Name of the winning team's leader.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        let team = self.result.winner()?;
        self.leaders.get(team.index()).map(String::as_str)
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self.winner_name() {
            Some(leader) => Verdict::Chosen(leader.to_string()),
            None => Verdict::Tie,
        }
    }

    /// Build the renderable report.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::completed(
            self.diagnostics().map(str::to_string).collect(),
            self.verdict(),
            self.standings.as_ref().map(|s| s.ranked().to_vec()).unwrap_or_default(),
            self.roster.clone(),
        )
    }
}

/// Parse and run a whole script.
///
/// ```
/// use wizard_league::core::Limits;
/// use wizard_league::sim::run_script;
///
/// let text = "2\nMerlin\nMorgana\n2\nArt\n0\n500\nTrue\nMord\n1\n300\nTrue\nattack Art Mord\n";
/// let outcome = run_script(text, &Limits::default()).unwrap();
///
/// assert_eq!(outcome.winner_name(), Some("Merlin"));
/// assert_eq!(outcome.roster[0].power(), 700);
/// ```
pub fn run_script(text: &str, limits: &Limits) -> Result<Outcome, GameError> {
    let script = parse_script(text, limits)?;
    Simulation::from_script(&script, limits.clone())?.run(&script.actions)
}

/// Parse and run a whole script, folding any structural error into the
/// `Invalid inputs` report.
#[must_use]
pub fn report_script(text: &str, limits: &Limits) -> Report {
    match run_script(text, limits) {
        Ok(outcome) => outcome.report(),
        Err(err) => {
            warn!(error = %err, "run aborted");
            Report::invalid(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TeamId;

    fn league() -> Simulation {
        let mut sim = Simulation::new(vec!["Merlin".into(), "Morgana".into()], Limits::default()).unwrap();
        sim.add_player(Player::new("Art", TeamId::new(0), 500, true)).unwrap();
        sim.add_player(Player::new("Gwen", TeamId::new(0), 9, true)).unwrap();
        sim.add_player(Player::new("Mord", TeamId::new(1), 300, true)).unwrap();
        sim
    }

    #[test]
    fn test_team_count_checked() {
        assert!(matches!(
            Simulation::new(Vec::new(), Limits::default()),
            Err(GameError::TeamCount { count: 0, .. })
        ));
        let many = (0..11).map(|i| format!("Lead{}", i)).collect();
        assert!(matches!(
            Simulation::new(many, Limits::default()),
            Err(GameError::TeamCount { count: 11, max: 10 })
        ));
    }

    #[test]
    fn test_duplicate_player() {
        let mut sim = league();
        let err = sim.add_player(Player::new("Art", TeamId::new(1), 1, true)).unwrap_err();
        assert!(matches!(err, GameError::DuplicatePlayer(name) if name == "Art"));
        assert_eq!(sim.registry().len(), 3);
    }

    #[test]
    fn test_step_records_history() {
        let mut sim = league();

        let status = sim.step(20, &Action::heal("Art", "Mord")).unwrap();
        assert_eq!(status, ActionStatus::WrongTeam);

        let status = sim.step(21, &Action::attack("Art", "Mord")).unwrap();
        assert_eq!(status, ActionStatus::Ok);

        assert_eq!(sim.registry().get_by_name("Art").unwrap().power(), 700);

        let outcome = sim.finish();
        assert_eq!(outcome.history.len(), 2);
        assert_eq!(outcome.history[0].line, 20);
    }

    #[test]
    fn test_unknown_name_aborts() {
        let mut sim = league();
        let err = sim.step(33, &Action::attack("Art", "Nobody")).unwrap_err();
        assert!(matches!(err, GameError::ActionRejected { line: 33 }));
    }

    #[test]
    fn test_step_budget() {
        let mut sim = Simulation::new(vec!["Merlin".into()], Limits::default().with_max_actions(1)).unwrap();
        sim.add_player(Player::new("Art", TeamId::new(0), 5, true)).unwrap();

        sim.step(1, &Action::flip_visibility("Art")).unwrap();
        assert!(matches!(
            sim.step(2, &Action::flip_visibility("Art")),
            Err(GameError::TooManyActions { max: 1 })
        ));
    }

    #[test]
    fn test_finish_outcome() {
        let mut sim = league();
        sim.step(1, &Action::flip_visibility("Gwen")).unwrap();
        sim.step(2, &Action::attack("Gwen", "Mord")).unwrap();

        let outcome = sim.finish();
        assert_eq!(outcome.result, GameResult::Winner(TeamId::new(0)));
        assert_eq!(outcome.winner_name(), Some("Merlin"));
        assert_eq!(outcome.diagnostics().collect::<Vec<_>>(), vec!["This player can't play"]);

        let names: Vec<_> = outcome.roster.iter().map(Player::name).collect();
        assert_eq!(names, vec!["Art", "Gwen", "Mord"]);
        let standings = outcome.standings.as_ref().unwrap();
        assert_eq!(standings.power_of(TeamId::new(0)), Some(509));
    }

    #[test]
    fn test_single_team_skips_standings() {
        let mut sim = Simulation::new(vec!["Merlin".into()], Limits::default()).unwrap();
        sim.add_player(Player::new("Art", TeamId::new(0), 40, true)).unwrap();
        sim.add_player(Player::new("Bors", TeamId::new(0), 0, true)).unwrap();
        sim.step(1, &Action::heal("Art", "Bors")).unwrap();

        let outcome = sim.finish();
        assert_eq!(outcome.result, GameResult::Winner(TeamId::new(0)));
        assert!(outcome.standings.is_none());
        assert!(outcome.report().standings.is_empty());
    }

    #[test]
    fn test_report_script_invalid() {
        let report = report_script("3\nMerlin\n", &Limits::default());
        assert_eq!(report.to_text(), "Invalid inputs\n");
    }
}
