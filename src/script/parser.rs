//! Script parsing.
//!
//! ## Format
//!
//! ```text
//! <team count>
//! <leader name>            (one line per team)
//! <player count>
//! <name>                   (four lines per player)
//! <team index>
//! <power>
//! <True|False>
//! <action line>            (zero or more, at most `max_actions`)
//! ```
//!
//! Action lines are `<keyword> <name>` or `<keyword> <name> <name>`,
//! separated by exactly one space. Any deviation is a structural error.

use std::io::Read;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{Action, ActionKind, GameError, Limits, Player, INVISIBLE_TOKEN, VISIBLE_TOKEN};

/// An action together with the script line it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptAction {
    /// 1-based line number.
    pub line: usize,
    /// The parsed action.
    pub action: Action,
}

/// A fully parsed script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    /// Team leaders; leader `i` represents team `i`.
    pub leaders: Vec<String>,
    /// Roster in script order.
    pub roster: Vec<Player>,
    /// Actions in script order.
    pub actions: Vec<ScriptAction>,
}

impl Script {
    /// Number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.leaders.len()
    }

    /// Render the script back into its text form.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", self.leaders.len()));
        for leader in &self.leaders {
            out.push_str(leader);
            out.push('\n');
        }

        out.push_str(&format!("{}\n", self.roster.len()));
        for player in &self.roster {
            let visibility = if player.is_visible() { VISIBLE_TOKEN } else { INVISIBLE_TOKEN };
            out.push_str(&format!(
                "{}\n{}\n{}\n{}\n",
                player.name(),
                player.team().0,
                player.power(),
                visibility
            ));
        }

        for entry in &self.actions {
            out.push_str(&entry.action.to_string());
            out.push('\n');
        }

        out
    }
}

/// Line cursor that tracks 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate().peekable(),
            last: 0,
        }
    }

    /// Next line with any trailing `\r` removed.
    fn next_line(&mut self) -> Result<(usize, &'a str), GameError> {
        match self.inner.next() {
            Some((i, text)) => {
                self.last = i + 1;
                Ok((i + 1, text.strip_suffix('\r').unwrap_or(text)))
            }
            None => Err(GameError::UnexpectedEof { line: self.last + 1 }),
        }
    }

    fn is_done(&mut self) -> bool {
        self.inner.peek().is_none()
    }

    fn next_number(&mut self) -> Result<u32, GameError> {
        let (line, text) = self.next_line()?;
        parse_number(line, text)
    }

    fn next_name(&mut self, limits: &Limits) -> Result<&'a str, GameError> {
        let (_, text) = self.next_line()?;
        if limits.is_valid_name(text) {
            Ok(text)
        } else {
            Err(GameError::InvalidName(text.to_string()))
        }
    }
}

/// A numeric line is decimal digits and nothing else, not even spaces.
fn parse_number(line: usize, text: &str) -> Result<u32, GameError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidNumber { line, text: text.to_string() });
    }
    text.parse().map_err(|_| GameError::InvalidNumber { line, text: text.to_string() })
}

/// Parse a whole script.
///
/// ```
/// use wizard_league::core::Limits;
/// use wizard_league::script::parse_script;
///
/// let text = "1\nMerlin\n1\nAlda\n0\n10\nTrue\nflip_visibility Alda\n";
/// let script = parse_script(text, &Limits::default()).unwrap();
///
/// assert_eq!(script.leaders, vec!["Merlin"]);
/// assert_eq!(script.roster.len(), 1);
/// assert_eq!(script.actions.len(), 1);
/// ```
pub fn parse_script(text: &str, limits: &Limits) -> Result<Script, GameError> {
    let mut lines = Lines::new(text);

    let team_count = lines.next_number()? as usize;
    if team_count == 0 || team_count > limits.max_teams {
        return Err(GameError::TeamCount { count: team_count, max: limits.max_teams });
    }

    let mut seen = FxHashSet::default();
    let mut leaders = Vec::with_capacity(team_count);
    for _ in 0..team_count {
        let name = lines.next_name(limits)?;
        if !seen.insert(name) {
            return Err(GameError::DuplicateLeader(name.to_string()));
        }
        leaders.push(name.to_string());
    }

    let player_count = lines.next_number()? as usize;
    if player_count < team_count || player_count > limits.max_players {
        return Err(GameError::PlayerCount {
            count: player_count,
            min: team_count,
            max: limits.max_players,
        });
    }

    let mut roster = Vec::with_capacity(player_count);
    for _ in 0..player_count {
        let name = lines.next_name(limits)?;
        let team = lines.next_number()? as usize;
        let power = lines.next_number()?;
        let (_, visibility) = lines.next_line()?;

        roster.push(Player::checked(name, team, power, visibility, team_count, limits)?);
    }

    let mut actions = Vec::new();
    while !lines.is_done() {
        if actions.len() == limits.max_actions {
            return Err(GameError::TooManyActions { max: limits.max_actions });
        }
        let (line, text) = lines.next_line()?;
        actions.push(ScriptAction { line, action: parse_action(line, text)? });
    }

    Ok(Script { leaders, roster, actions })
}

/// Read a script from `reader` and parse it.
///
/// Bytes that are not UTF-8 are replaced, so they surface as invalid names
/// or unknown players rather than as I/O errors.
pub fn parse_reader<R: Read>(mut reader: R, limits: &Limits) -> Result<Script, GameError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_script(&String::from_utf8_lossy(&bytes), limits)
}

/// Parse one action line.
///
/// ```
/// use wizard_league::core::{Action, GameError};
/// use wizard_league::script::parse_action;
///
/// assert_eq!(parse_action(1, "heal Ab Cd").unwrap(), Action::heal("Ab", "Cd"));
/// assert!(matches!(parse_action(1, "heal  Ab Cd"), Err(GameError::MalformedAction { .. })));
/// assert!(matches!(parse_action(1, "dance Ab"), Err(GameError::UnknownAction { .. })));
/// ```
pub fn parse_action(line: usize, text: &str) -> Result<Action, GameError> {
    let malformed = || GameError::MalformedAction { line, text: text.to_string() };

    let tokens: SmallVec<[&str; 3]> = text.split(' ').collect();
    if tokens
        .iter()
        .any(|t| t.is_empty() || t.chars().any(char::is_whitespace))
    {
        return Err(malformed());
    }

    let kind = ActionKind::from_keyword(tokens[0]).ok_or_else(|| GameError::UnknownAction {
        line,
        keyword: tokens[0].to_string(),
    })?;

    if tokens.len() != kind.arity() + 1 {
        return Err(malformed());
    }

    Ok(Action::new(kind, &tokens[1..]))
}
