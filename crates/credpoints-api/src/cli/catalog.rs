//! Tier catalog commands: list, lookup.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use credpoints_core::catalog::{PointCatalog, TierPolicy};
use credpoints_types::catalog::TierRule;

use crate::state::AppState;

/// Show the tier rules currently in effect, in match order.
pub async fn list_tiers(state: &AppState, json: bool) -> Result<()> {
    let policy = state.orchestrator.engine().catalog().policy().await;

    if json {
        let rules: Vec<&TierRule> = policy.rules().iter().chain([policy.fallback()]).collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!();
    println!("{}", tier_table(&policy));
    println!();
    println!(
        "  Names are matched case-insensitively against the keywords, top to bottom. {}",
        style("The last row catches everything else.").dim()
    );
    println!();
    Ok(())
}

/// Resolve a certification name against the catalog.
pub async fn lookup(state: &AppState, name: &str, json: bool) -> Result<()> {
    let record = state.orchestrator.engine().catalog().lookup(name).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Certification:").bold(), style(&record.name).cyan());
    println!("  {}  {} ({})", style("Tier:").bold(), record.tier_label, record.category);
    println!(
        "  {}  {}",
        style("Points:").bold(),
        style(format!("{} credit points", record.points)).green().bold()
    );
    println!();
    Ok(())
}

fn tier_table(policy: &TierPolicy) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Priority").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Tier").fg(Color::White),
        Cell::new("Points").fg(Color::White),
        Cell::new("Keywords").fg(Color::White),
    ]);

    for rule in policy.rules() {
        table.add_row(vec![
            Cell::new(rule.priority).fg(Color::DarkGrey),
            Cell::new(rule.category).fg(Color::Cyan),
            Cell::new(&rule.label),
            Cell::new(rule.points).fg(Color::Green),
            Cell::new(rule.keywords.join(", ")),
        ]);
    }

    let fallback = policy.fallback();
    table.add_row(vec![
        Cell::new("-").fg(Color::DarkGrey),
        Cell::new(fallback.category).fg(Color::Cyan),
        Cell::new(&fallback.label),
        Cell::new(fallback.points).fg(Color::Green),
        Cell::new("(anything else)").fg(Color::DarkGrey),
    ]);
    table
}
