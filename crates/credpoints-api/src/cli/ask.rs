//! One-shot question: `credpts ask <question>`.

use anyhow::Result;
use console::style;

use credpoints_types::session::ConversationState;

use crate::state::AppState;

/// Answer a single question in a throwaway conversation.
pub async fn ask(state: &AppState, query: &str, json: bool) -> Result<()> {
    let spinner = super::spinner("working it out...", json)?;
    let mut conversation = ConversationState::new();
    let reply = state.orchestrator.handle_turn(&mut conversation, query).await;
    spinner.finish_and_clear();

    if json {
        let results = conversation
            .turns()
            .last()
            .map(|turn| turn.results.clone())
            .unwrap_or_default();
        let output = serde_json::json!({
            "query": query,
            "reply": reply,
            "results": results,
            "total_points": conversation.cumulative_points(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style(">").cyan().bold(), reply);
    println!();
    Ok(())
}
