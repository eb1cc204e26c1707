//! The league's action handlers.
//!
//! `ActionMachine` dispatches each action kind to its handler. Handlers
//! look players up by name, run every check first and only then mutate, so
//! a non-`Ok` status always means the registry is unchanged.
//!
//! Two-player actions (attack, heal, super) share a precheck: both names
//! must resolve, and the first player must be visible and not frozen. The
//! second player's state is left to each handler.

use tracing::{debug, trace, warn};

use crate::core::{Action, ActionKind, ActionStatus, Player, MAX_POWER};
use crate::registry::{PlayerHandle, PlayerRegistry};
use crate::scoring;

use super::engine::{GameResult, RulesEngine};

type Step<T> = Result<T, ActionStatus>;

/// Generator for super player names (`S_0`, `S_1`, ...).
///
/// The counter lives for a whole run so names are never reused, even after
/// the super player that carried one has itself been merged away.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuperNames {
    next: u64,
}

impl SuperNames {
    /// Prefix of every generated name.
    pub const PREFIX: &'static str = "S_";

    /// Start counting from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next
    }

    /// Take the next name not already present in the registry.
    pub fn next_name(&mut self, registry: &PlayerRegistry) -> String {
        loop {
            let name = format!("{}{}", Self::PREFIX, self.next);
            self.next += 1;
            if !registry.contains(&name) {
                return name;
            }
        }
    }
}

/// Rules engine for the wizard league.
#[derive(Clone, Debug, Default)]
pub struct ActionMachine {
    super_names: SuperNames,
}

impl ActionMachine {
    /// Create a machine with a fresh super-name counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The super-name counter.
    #[must_use]
    pub fn super_names(&self) -> &SuperNames {
        &self.super_names
    }

    fn dispatch(&mut self, registry: &mut PlayerRegistry, action: &Action) -> Step<()> {
        if action.names.len() != action.kind.arity() {
            return Err(ActionStatus::InputError);
        }

        match action.kind {
            ActionKind::Attack => attack(registry, action),
            ActionKind::FlipVisibility => flip_visibility(registry, action),
            ActionKind::Heal => heal(registry, action),
            ActionKind::Super => self.super_merge(registry, action),
        }
    }

    /// `super p1 p2`: replace two teammates with one merged player.
    fn super_merge(&mut self, registry: &mut PlayerRegistry, action: &Action) -> Step<()> {
        let (h1, h2) = resolve_pair(registry, action)?;
        let p1 = player(registry, h1)?;
        let p2 = player(registry, h2)?;

        if p1.team() != p2.team() {
            return Err(ActionStatus::WrongTeam);
        }
        if h1 == h2 {
            return Err(ActionStatus::SuperSelf);
        }

        let team = p1.team();
        let power = p1.power().saturating_add(p2.power()).min(MAX_POWER);
        let absorbed = [p1.name().to_string(), p2.name().to_string()];

        let name = self.super_names.next_name(registry);
        let merged = Player::new(name, team, power, true);
        debug!(merged = %merged, first = %absorbed[0], second = %absorbed[1], "super player created");

        if let Err(clash) = registry.insert(merged) {
            warn!(name = clash.name(), "super player name already taken");
            return Err(ActionStatus::InputError);
        }
        for name in &absorbed {
            registry.remove(name);
        }

        registry.trace_structure();
        Ok(())
    }
}

impl RulesEngine for ActionMachine {
    fn apply_action(&mut self, registry: &mut PlayerRegistry, action: &Action) -> ActionStatus {
        let status = match self.dispatch(registry, action) {
            Ok(()) => ActionStatus::Ok,
            Err(status) => status,
        };

        match status {
            ActionStatus::Ok => debug!(%action, "action applied"),
            ActionStatus::InputError => warn!(%action, "action rejected as invalid input"),
            other => debug!(%action, status = ?other, "action refused"),
        }

        status
    }

    fn result(&self, registry: &PlayerRegistry, team_count: usize) -> GameResult {
        scoring::decide(registry, team_count)
    }
}

// === Handlers ===

/// `attack p1 p2`
///
/// An attack on an invisible target freezes the attacker. Otherwise the
/// stronger side gains the power difference and the weaker side is frozen;
/// equal power freezes both.
fn attack(registry: &mut PlayerRegistry, action: &Action) -> Step<()> {
    let (h1, h2) = resolve_pair(registry, action)?;
    let power1 = player(registry, h1)?.power();
    let target = player(registry, h2)?;

    if !target.is_visible() {
        trace!("attack on invisible target");
        player_mut(registry, h1)?.freeze();
        return Ok(());
    }

    let power2 = target.power();
    match power1.cmp(&power2) {
        std::cmp::Ordering::Greater => {
            player_mut(registry, h1)?.increase_power(power1 - power2);
            player_mut(registry, h2)?.freeze();
        }
        std::cmp::Ordering::Less => {
            player_mut(registry, h2)?.increase_power(power2 - power1);
            player_mut(registry, h1)?.freeze();
        }
        std::cmp::Ordering::Equal => {
            player_mut(registry, h1)?.freeze();
            player_mut(registry, h2)?.freeze();
        }
    }

    Ok(())
}

/// `flip_visibility p`
///
/// Only frozen players are refused; an invisible player may flip back.
fn flip_visibility(registry: &mut PlayerRegistry, action: &Action) -> Step<()> {
    let handle = registry.find(action.first()).ok_or(ActionStatus::InputError)?;
    let target = player_mut(registry, handle)?;

    if target.is_frozen() {
        return Err(ActionStatus::PlayerFrozen);
    }

    target.flip_visibility();
    Ok(())
}

/// `heal p1 p2`
///
/// The healer keeps the larger half of its power and gives the smaller half
/// to a teammate.
fn heal(registry: &mut PlayerRegistry, action: &Action) -> Step<()> {
    let (h1, h2) = resolve_pair(registry, action)?;

    if player(registry, h1)?.team() != player(registry, h2)?.team() {
        return Err(ActionStatus::WrongTeam);
    }
    if h1 == h2 {
        return Err(ActionStatus::HealSelf);
    }

    let given = player_mut(registry, h1)?.split_power();
    player_mut(registry, h2)?.increase_power(given);
    Ok(())
}

// === Lookups ===

/// Resolve both names and check that the first player can act.
fn resolve_pair(registry: &PlayerRegistry, action: &Action) -> Step<(PlayerHandle, PlayerHandle)> {
    let second = action.second().ok_or(ActionStatus::InputError)?;
    let h1 = registry.find(action.first()).ok_or(ActionStatus::InputError)?;
    let h2 = registry.find(second).ok_or(ActionStatus::InputError)?;

    let initiator = player(registry, h1)?;
    if !initiator.is_visible() {
        return Err(ActionStatus::PlayerInvisible);
    }
    if initiator.is_frozen() {
        return Err(ActionStatus::PlayerFrozen);
    }

    Ok((h1, h2))
}

fn player(registry: &PlayerRegistry, handle: PlayerHandle) -> Step<&Player> {
    registry.get(handle).ok_or(ActionStatus::InputError)
}

fn player_mut(registry: &mut PlayerRegistry, handle: PlayerHandle) -> Step<&mut Player> {
    registry.get_mut(handle).ok_or(ActionStatus::InputError)
}
