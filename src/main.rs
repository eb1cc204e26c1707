//! Wizard league runner
//!
//! Reads a league script, runs it and writes the report. Also generates
//! seeded random scripts for fuzzing.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use wizard_league::{report_script, Limits, ScenarioBuilder};

/// Wizard league simulation
#[derive(Parser, Debug)]
#[command(name = "wizard-league")]
#[command(about = "Run wizard league scripts and report the chosen wizard")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script and write its report
    Run {
        /// Script to read (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report destination (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Action lines processed before trailing input is rejected
        #[arg(long, default_value_t = wizard_league::core::MAX_ACTIONS)]
        max_actions: usize,
    },

    /// Print a random well-formed script
    Generate {
        /// Random seed; the same seed always yields the same script
        #[arg(long)]
        seed: u64,

        /// Number of teams
        #[arg(long, default_value_t = 2)]
        teams: usize,

        /// Number of players
        #[arg(long, default_value_t = 8)]
        players: usize,

        /// Number of actions
        #[arg(long, default_value_t = 50)]
        actions: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wizard_league=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Run { input, output, format, max_actions } => {
            let text = read_input(input.as_ref())?;
            let limits = Limits::default().with_max_actions(max_actions);
            let report = report_script(&text, &limits);

            let rendered = match format {
                Format::Text => report.to_text(),
                Format::Json => {
                    let mut json = report.to_json().context("failed to serialize report")?;
                    json.push('\n');
                    json
                }
            };
            write_output(output.as_ref(), &rendered)
        }
        Command::Generate { seed, teams, players, actions } => {
            let script = ScenarioBuilder::new(seed)
                .teams(teams)
                .players(players)
                .actions(actions)
                .build()
                .context("cannot generate scenario")?;
            write_output(None, &script.to_text())
        }
    }
}

/// Read the script. Bytes that are not UTF-8 become replacement characters,
/// which no valid name or keyword contains.
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read script {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).context("failed to read script from stdin")?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_output(path: Option<&PathBuf>, text: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write report {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}
