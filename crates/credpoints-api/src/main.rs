//! credpoints CLI entry point.
//!
//! Binary name: `credpts`
//!
//! Parses CLI arguments, sets up tracing, opens the catalog database and
//! wires the assistant, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use credpoints_observe::tracing_setup::{default_filter, init_tracing, shutdown_tracing};

use cli::{CatalogCommand, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(default_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "credpts", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;
    let outcome = dispatch(&state, cli).await;

    shutdown_tracing();
    outcome
}

async fn dispatch(state: &AppState, cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Ask { query } => cli::ask::ask(state, &query.join(" "), cli.json).await,

        Commands::Chat => cli::chat::loop_runner::run_chat_loop(state).await,

        Commands::Catalog { action } => match action {
            CatalogCommand::List => cli::catalog::list_tiers(state, cli.json).await,
            CatalogCommand::Lookup { name } => {
                cli::catalog::lookup(state, &name.join(" "), cli.json).await
            }
        },

        Commands::Badge { url } => cli::badge::show_badge(state, &url, cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
