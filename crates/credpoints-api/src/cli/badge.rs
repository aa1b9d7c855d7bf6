//! `credpts badge <url>`: fetch one badge page and show what was read.

use anyhow::Result;
use chrono::Local;
use console::style;

use credpoints_core::badge::BadgeFetcher;
use credpoints_core::catalog::PointCatalog;
use credpoints_core::engine::resolve_badge;

use crate::state::AppState;

pub async fn show_badge(state: &AppState, badge_url_or_id: &str, json: bool) -> Result<()> {
    let engine = state.orchestrator.engine();

    let spinner = super::spinner("fetching badge...", json)?;
    let fetched = engine.fetcher().fetch(badge_url_or_id).await;
    spinner.finish_and_clear();
    let snapshot = fetched?;

    let record = engine.catalog().lookup(&snapshot.cert_name).await;
    let result = resolve_badge(&snapshot, &record, Local::now().date_naive());

    if json {
        let output = serde_json::json!({ "badge": snapshot, "result": result });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let expires = snapshot
        .expires_on
        .map_or_else(|| "never".to_string(), |d| d.to_string());
    let status = if result.is_expired() {
        style("expired").red().bold()
    } else {
        style("valid").green().bold()
    };

    println!();
    println!("  {}  {}", style("Certification:").bold(), style(&snapshot.cert_name).cyan());
    println!("  {}  {}", style("Badge:").bold(), style(&snapshot.badge_id).dim());
    println!("  {}  {}", style("Issued:").bold(), snapshot.issued_on);
    println!("  {}  {}", style("Expires:").bold(), expires);
    println!("  {}  {}", style("Status:").bold(), status);
    println!("  {}  {}", style("Tier:").bold(), record.tier_label);
    println!("  {}  {} credit points", style("Points:").bold(), result.points);
    println!();
    Ok(())
}
