//! CLI command definitions for the `credpts` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod badge;
pub mod catalog;
pub mod chat;

use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Work out certification credit points from badges or certification names.
#[derive(Parser)]
#[command(name = "credpts", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question, e.g. a badge URL or "if I clear <cert>...".
    Ask {
        /// The question. Quoting is optional.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Start an interactive conversation with a running points total.
    Chat,

    /// Inspect the tier catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Fetch a badge page and show what was read from it.
    Badge {
        /// Badge URL or bare badge identifier.
        url: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List tier rules in match order.
    #[command(alias = "ls")]
    List,

    /// Show the tier and points a certification name resolves to.
    Lookup {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

/// Steady-ticking spinner on stderr. Hidden in JSON mode.
pub fn spinner(message: &str, hidden: bool) -> anyhow::Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}
