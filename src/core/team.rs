//! Team identification and per-team storage.
//!
//! ## TeamId
//!
//! Type-safe team index. Teams are numbered `0..team_count` in the order
//! their leaders appear in the script.
//!
//! ## TeamMap
//!
//! Per-team data backed by a `Vec` for O(1) access, indexed by `TeamId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Team identifier.
///
/// Team indices are 0-based: the first team is `TeamId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Per-team data storage with O(1) access.
///
/// ```
/// use wizard_league::core::{TeamId, TeamMap};
///
/// let mut power: TeamMap<u32> = TeamMap::with_default(2);
/// power[TeamId::new(1)] += 300;
/// assert_eq!(power[TeamId::new(0)], 0);
/// assert_eq!(power[TeamId::new(1)], 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: Vec<T>,
}

impl<T> TeamMap<T> {
    /// Create a new TeamMap with values from a factory function.
    pub fn new(team_count: usize, factory: impl Fn(TeamId) -> T) -> Self {
        assert!(team_count > 0, "Must have at least 1 team");
        assert!(team_count <= 255, "At most 255 teams supported");

        let data = (0..team_count as u8).map(|i| factory(TeamId(i))).collect();

        Self { data }
    }

    /// Create a new TeamMap with default values.
    pub fn with_default(team_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(team_count, |_| T::default())
    }

    /// Get the number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.data.len()
    }

    /// Get a team's entry, or `None` if the team is out of range.
    #[must_use]
    pub fn get(&self, team: TeamId) -> Option<&T> {
        self.data.get(team.index())
    }

    /// Get a mutable team entry, or `None` if the team is out of range.
    pub fn get_mut(&mut self, team: TeamId) -> Option<&mut T> {
        self.data.get_mut(team.index())
    }

    /// Iterate over (TeamId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (TeamId(i as u8), v))
    }
}

impl<T> Index<TeamId> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: TeamId) -> &Self::Output {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<TeamId> for TeamMap<T> {
    fn index_mut(&mut self, team: TeamId) -> &mut Self::Output {
        &mut self.data[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_basics() {
        let t0 = TeamId::new(0);
        let t3 = TeamId::new(3);

        assert_eq!(t0.index(), 0);
        assert_eq!(t3.index(), 3);
        assert_eq!(format!("{}", t3), "Team 3");
        assert!(t0 < t3);
    }

    #[test]
    fn test_team_map_new() {
        let map: TeamMap<u32> = TeamMap::new(3, |t| t.index() as u32 * 100);

        assert_eq!(map.team_count(), 3);
        assert_eq!(map[TeamId::new(0)], 0);
        assert_eq!(map[TeamId::new(2)], 200);
    }

    #[test]
    fn test_team_map_get_out_of_range() {
        let mut map: TeamMap<u32> = TeamMap::with_default(2);

        assert!(map.get(TeamId::new(2)).is_none());
        assert!(map.get_mut(TeamId::new(5)).is_none());
        assert_eq!(map.get(TeamId::new(1)), Some(&0));
    }

    #[test]
    fn test_team_map_iter() {
        let map: TeamMap<u32> = TeamMap::new(3, |t| t.index() as u32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(TeamId(0), &0), (TeamId(1), &1), (TeamId(2), &2)]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 team")]
    fn test_team_map_zero_teams() {
        let _: TeamMap<u32> = TeamMap::with_default(0);
    }
}
