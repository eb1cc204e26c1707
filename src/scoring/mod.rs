//! Team aggregation: per-team power totals and the final verdict.

mod standings;

pub use standings::{decide, Standings, TeamPower};
