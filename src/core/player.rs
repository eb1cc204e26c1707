//! Player records.
//!
//! A `Player` is the unit of state the simulation mutates. Name and team are
//! fixed at construction; power and visibility change through the methods
//! below, which keep power inside `0..=MAX_POWER`.

use serde::{Deserialize, Serialize};

use super::config::{Limits, MAX_POWER};
use super::error::GameError;
use super::team::TeamId;

/// Script token for a visible player.
pub const VISIBLE_TOKEN: &str = "True";

/// Script token for an invisible player.
pub const INVISIBLE_TOKEN: &str = "False";

/// A single roster entry.
///
/// A player with zero power is frozen: it cannot start an attack, heal,
/// super or flip action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    power: u16,
    team: TeamId,
    visible: bool,
}

impl Player {
    /// Create a player without validation.
    ///
    /// Power above `MAX_POWER` is clamped.
    #[must_use]
    pub fn new(name: impl Into<String>, team: TeamId, power: u16, visible: bool) -> Self {
        Self {
            name: name.into(),
            power: power.min(MAX_POWER),
            team,
            visible,
        }
    }

    /// Create a roster player from script fields, checking every bound.
    ///
    /// ```
    /// use wizard_league::core::{Limits, Player, TeamId};
    ///
    /// let limits = Limits::default();
    /// let p = Player::checked("Merlin", 1, 420, "True", 2, &limits).unwrap();
    /// assert_eq!(p.team(), TeamId::new(1));
    /// assert!(p.is_visible());
    ///
    /// assert!(Player::checked("Merlin", 2, 420, "True", 2, &limits).is_err());
    /// ```
    pub fn checked(
        name: &str,
        team: usize,
        power: u32,
        visibility: &str,
        team_count: usize,
        limits: &Limits,
    ) -> Result<Self, GameError> {
        if !limits.is_valid_name(name) {
            return Err(GameError::InvalidName(name.to_string()));
        }

        let team_id = match u8::try_from(team) {
            Ok(id) if team < team_count => TeamId::new(id),
            _ => return Err(GameError::TeamOutOfRange { team, team_count }),
        };

        if power > u32::from(limits.max_power) {
            return Err(GameError::PowerOutOfRange { power, max: limits.max_power });
        }

        let visible = parse_visibility(visibility)?;

        // power <= max_power, so it fits.
        Ok(Self::new(name, team_id, power as u16, visible))
    }

    /// Player name (registry key).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current power.
    #[must_use]
    pub fn power(&self) -> u16 {
        self.power
    }

    /// Team this player belongs to.
    #[must_use]
    pub fn team(&self) -> TeamId {
        self.team
    }

    /// Whether the player can be seen by attackers.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the player has no power left.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.power == 0
    }

    /// Set power to zero.
    pub fn freeze(&mut self) {
        self.power = 0;
    }

    /// Add power, saturating at `MAX_POWER`.
    pub fn increase_power(&mut self, amount: u16) {
        self.power = self.power.saturating_add(amount).min(MAX_POWER);
    }

    /// Split power in two for healing.
    ///
    /// The player keeps the larger half (odd totals round toward the
    /// player) and the smaller half is returned for transfer.
    pub fn split_power(&mut self) -> u16 {
        let kept = (self.power + 1) / 2;
        let given = self.power - kept;
        self.power = kept;
        given
    }

    /// Toggle visibility.
    pub fn flip_visibility(&mut self) {
        self.visible = !self.visible;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, power {}, {})",
            self.name,
            self.team,
            self.power,
            if self.visible { "visible" } else { "hidden" }
        )
    }
}

/// Parse a visibility token.
pub fn parse_visibility(token: &str) -> Result<bool, GameError> {
    match token {
        VISIBLE_TOKEN => Ok(true),
        INVISIBLE_TOKEN => Ok(false),
        other => Err(GameError::InvalidVisibility(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits::default()
    }

    #[test]
    fn test_new_clamps_power() {
        let p = Player::new("Zed", TeamId::new(0), 5000, true);
        assert_eq!(p.power(), MAX_POWER);
    }

    #[test]
    fn test_checked_rejects_bad_fields() {
        let l = limits();
        assert!(matches!(
            Player::checked("zed", 0, 1, "True", 1, &l),
            Err(GameError::InvalidName(_))
        ));
        assert!(matches!(
            Player::checked("Zed", 3, 1, "True", 3, &l),
            Err(GameError::TeamOutOfRange { team: 3, team_count: 3 })
        ));
        assert!(matches!(
            Player::checked("Zed", 0, 1001, "True", 1, &l),
            Err(GameError::PowerOutOfRange { power: 1001, .. })
        ));
        assert!(matches!(
            Player::checked("Zed", 0, 1, "true", 1, &l),
            Err(GameError::InvalidVisibility(_))
        ));
    }

    #[test]
    fn test_checked_rejects_team_beyond_id_range() {
        let mut wide = limits();
        wide.max_teams = 300;
        assert!(matches!(
            Player::checked("Zed", 256, 1, "True", 300, &wide),
            Err(GameError::TeamOutOfRange { team: 256, team_count: 300 })
        ));
        let p = Player::checked("Zed", 255, 1, "True", 300, &wide).unwrap();
        assert_eq!(p.team(), TeamId::new(255));
    }

    #[test]
    fn test_checked_accepts_bounds() {
        let l = limits();
        let p = Player::checked("Zed", 0, 1000, "False", 1, &l).unwrap();
        assert_eq!(p.power(), 1000);
        assert!(!p.is_visible());

        let frozen = Player::checked("Ice", 0, 0, "True", 1, &l).unwrap();
        assert!(frozen.is_frozen());
    }

    #[test]
    fn test_freeze_and_increase() {
        let mut p = Player::new("Zed", TeamId::new(0), 900, true);
        p.increase_power(50);
        assert_eq!(p.power(), 950);
        p.increase_power(500);
        assert_eq!(p.power(), 1000);
        p.freeze();
        assert!(p.is_frozen());
    }

    #[test]
    fn test_split_power() {
        let mut odd = Player::new("Odd", TeamId::new(0), 9, true);
        assert_eq!(odd.split_power(), 4);
        assert_eq!(odd.power(), 5);

        let mut even = Player::new("Even", TeamId::new(0), 10, true);
        assert_eq!(even.split_power(), 5);
        assert_eq!(even.power(), 5);

        let mut one = Player::new("One", TeamId::new(0), 1, true);
        assert_eq!(one.split_power(), 0);
        assert_eq!(one.power(), 1);
    }

    #[test]
    fn test_flip_visibility() {
        let mut p = Player::new("Zed", TeamId::new(0), 1, true);
        p.flip_visibility();
        assert!(!p.is_visible());
        p.flip_visibility();
        assert!(p.is_visible());
    }

    #[test]
    fn test_display() {
        let p = Player::new("Zed", TeamId::new(2), 40, false);
        assert_eq!(p.to_string(), "Zed (Team 2, power 40, hidden)");
    }
}
