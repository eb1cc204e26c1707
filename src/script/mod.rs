//! Script input and report output.
//!
//! `parse_script` turns the line-oriented league script into a `Script`;
//! `Report` renders what a run produced.

mod parser;
mod report;

pub use parser::{parse_action, parse_reader, parse_script, Script, ScriptAction};
pub use report::{Report, Verdict, INVALID_INPUTS};
