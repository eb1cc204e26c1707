//! Action representation: kind + player names.
//!
//! Actions are compositional: a kind (the "verb") plus one or two player
//! names (the "nouns"). For example:
//! - `flip_visibility Merlin` = kind + 1 name
//! - `attack Merlin Morgana` = kind + 2 names
//!
//! The vocabulary is closed. Each kind maps to exactly one handler in the
//! rules engine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The four action kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Two players fight; the stronger absorbs the difference.
    Attack,
    /// Toggle one player's visibility.
    FlipVisibility,
    /// Give half of one's power to a teammate.
    Heal,
    /// Merge two teammates into a new super player.
    Super,
}

impl ActionKind {
    /// All kinds, in keyword order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Attack,
        ActionKind::FlipVisibility,
        ActionKind::Heal,
        ActionKind::Super,
    ];

    /// Script keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::FlipVisibility => "flip_visibility",
            ActionKind::Heal => "heal",
            ActionKind::Super => "super",
        }
    }

    /// Look up a kind by its script keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }

    /// Number of player names the action takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            ActionKind::FlipVisibility => 1,
            ActionKind::Attack | ActionKind::Heal | ActionKind::Super => 2,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A complete action.
///
/// ## Example
///
/// ```
/// use wizard_league::core::{Action, ActionKind};
///
/// let attack = Action::attack("Merlin", "Morgana");
/// assert_eq!(attack.kind, ActionKind::Attack);
/// assert_eq!(attack.first(), "Merlin");
/// assert_eq!(attack.second(), Some("Morgana"));
///
/// let flip = Action::flip_visibility("Merlin");
/// assert_eq!(flip.second(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The action kind.
    pub kind: ActionKind,

    /// Player names, initiator first.
    /// SmallVec holds the one or two names without heap allocation.
    pub names: SmallVec<[String; 2]>,
}

impl Action {
    /// Create an action from a kind and its names.
    ///
    /// Panics if the name count does not match the kind's arity.
    #[must_use]
    pub fn new(kind: ActionKind, names: &[&str]) -> Self {
        assert_eq!(
            names.len(),
            kind.arity(),
            "{} takes {} name(s)",
            kind,
            kind.arity()
        );
        Self {
            kind,
            names: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }

    /// `attack <attacker> <target>`
    #[must_use]
    pub fn attack(attacker: &str, target: &str) -> Self {
        Self::new(ActionKind::Attack, &[attacker, target])
    }

    /// `flip_visibility <player>`
    #[must_use]
    pub fn flip_visibility(player: &str) -> Self {
        Self::new(ActionKind::FlipVisibility, &[player])
    }

    /// `heal <healer> <target>`
    #[must_use]
    pub fn heal(healer: &str, target: &str) -> Self {
        Self::new(ActionKind::Heal, &[healer, target])
    }

    /// `super <first> <second>`
    #[must_use]
    pub fn super_merge(first: &str, second: &str) -> Self {
        Self::new(ActionKind::Super, &[first, second])
    }

    /// The initiating player's name.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.names[0]
    }

    /// The second player's name, for two-player actions.
    #[must_use]
    pub fn second(&self) -> Option<&str> {
        self.names.get(1).map(String::as_str)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for name in &self.names {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}

/// Result of applying one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    /// A named player does not exist. Aborts the run.
    InputError,
    /// The initiator is invisible.
    PlayerInvisible,
    /// The initiator is frozen.
    PlayerFrozen,
    /// Heal or super across teams.
    WrongTeam,
    /// A player tried to heal itself.
    HealSelf,
    /// A player tried to merge with itself.
    SuperSelf,
    /// The action was applied.
    Ok,
}

impl ActionStatus {
    /// Diagnostic line for a rule violation.
    ///
    /// `None` for `Ok` (silent) and `InputError` (aborts instead).
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            ActionStatus::PlayerInvisible => Some("This player can't play"),
            ActionStatus::PlayerFrozen => Some("This player is frozen"),
            ActionStatus::WrongTeam => Some("Both players should be from the same team"),
            ActionStatus::HealSelf => Some("The player cannot heal itself"),
            ActionStatus::SuperSelf => Some("The player cannot do super action with itself"),
            ActionStatus::InputError | ActionStatus::Ok => None,
        }
    }

    /// Whether the action changed game state.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, ActionStatus::Ok)
    }
}

/// An applied action with its outcome, for the run history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// 1-based line number in the script.
    pub line: usize,

    /// The action taken.
    pub action: Action,

    /// What happened.
    pub status: ActionStatus,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(line: usize, action: Action, status: ActionStatus) -> Self {
        Self { line, action, status }
    }
}
