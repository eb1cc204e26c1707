//! Run reports.
//!
//! The text form is the league's output contract: one diagnostic line per
//! refused action, then the verdict. A structural error collapses the whole
//! report to `Invalid inputs`. The JSON form carries the same outcome plus
//! final standings and the surviving roster.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Player};
use crate::scoring::TeamPower;

/// Text report for any structural input error.
pub const INVALID_INPUTS: &str = "Invalid inputs";

/// Final verdict line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "leader", rename_all = "snake_case")]
pub enum Verdict {
    /// Leader of the winning team.
    Chosen(String),
    /// The top score is shared.
    Tie,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Chosen(leader) => write!(f, "The chosen wizard is {}", leader),
            Verdict::Tie => f.write_str("It's a tie"),
        }
    }
}

/// Everything a run produces, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Diagnostic lines in action order.
    pub diagnostics: Vec<String>,

    /// `None` when the run was aborted.
    pub verdict: Option<Verdict>,

    /// Teams ranked by final power. Empty for aborted or single-team runs.
    pub standings: Vec<TeamPower>,

    /// Surviving players in name order.
    pub roster: Vec<Player>,

    /// Why the run was aborted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Report for a completed run.
    #[must_use]
    pub fn completed(
        diagnostics: Vec<String>,
        verdict: Verdict,
        standings: Vec<TeamPower>,
        roster: Vec<Player>,
    ) -> Self {
        Self {
            diagnostics,
            verdict: Some(verdict),
            standings,
            roster,
            error: None,
        }
    }

    /// Report for an aborted run.
    #[must_use]
    pub fn invalid(error: &GameError) -> Self {
        Self {
            diagnostics: Vec::new(),
            verdict: None,
            standings: Vec::new(),
            roster: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Render the text report, newline-terminated.
    #[must_use]
    pub fn to_text(&self) -> String {
        let Some(verdict) = &self.verdict else {
            return format!("{}\n", INVALID_INPUTS);
        };

        let mut out = String::new();
        for line in &self.diagnostics {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&verdict.to_string());
        out.push('\n');
        out
    }

    /// Render the JSON report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
