//! Main chat loop.
//!
//! Reads lines, handles slash commands locally and sends everything else
//! through the session orchestrator. The conversation lives only as long
//! as the loop.

use std::io::{self, Write};

use console::style;
use tracing::info;

use credpoints_types::query::QueryResult;
use credpoints_types::session::ConversationState;

use crate::state::AppState;

use super::banner::write_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

const QUERY_PREVIEW_CHARS: usize = 72;

/// Run an interactive session until `/exit` or Ctrl+D.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut conversation = ConversationState::new();
    let session_id = conversation.id.to_string();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, mut out) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    write_welcome_banner(
        &mut out,
        state.llm_label.as_deref(),
        &state.config.fetcher.base_url,
        &session_id,
    )?;
    info!(session_id = %session_id, "chat session started");

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                writeln!(out, "\n  {}", style("Session ended.").dim())?;
                break;
            }
            InputEvent::Interrupted => {
                writeln!(out, "\n  {}", style("Press Ctrl+D to exit, or keep asking.").dim())?;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::write_help(&mut out)?,
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            writeln!(out, "\n  {}", style("Session ended.").dim())?;
                            break;
                        }
                        ChatCommand::History => write_history(&mut out, &conversation)?,
                        ChatCommand::Total => write_total(&mut out, &conversation)?,
                        ChatCommand::Reset => {
                            conversation.reset();
                            writeln!(
                                out,
                                "\n  {} Cleared. The total starts again from 0.\n",
                                style("*").cyan().bold()
                            )?;
                        }
                        ChatCommand::Unknown(name) => {
                            writeln!(
                                out,
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            )?;
                        }
                    }
                    continue;
                }

                let spinner = crate::cli::spinner("thinking...", false)?;
                let reply = state.orchestrator.handle_turn(&mut conversation, &text).await;
                spinner.finish_and_clear();

                writeln!(out, "\n  {} {}\n", style("Assistant >").cyan().bold(), reply)?;
            }
        }
    }

    chat_input.flush();
    info!(
        session_id = %session_id,
        turns = conversation.turns().len(),
        total_points = %conversation.cumulative_points(),
        "chat session ended"
    );
    Ok(())
}

fn describe(result: &QueryResult) -> String {
    let note = if result.is_expired() {
        " (expired)"
    } else if result.is_hypothetical() {
        " (once earned)"
    } else {
        ""
    };
    format!("{}: {} credit points{}", result.cert_name, result.points, note)
}

fn preview(query: &str) -> String {
    if query.chars().count() > QUERY_PREVIEW_CHARS {
        let head: String = query.chars().take(QUERY_PREVIEW_CHARS - 3).collect();
        format!("{head}...")
    } else {
        query.to_string()
    }
}

fn write_history(out: &mut impl Write, conversation: &ConversationState) -> io::Result<()> {
    writeln!(out)?;
    if conversation.turns().is_empty() {
        writeln!(out, "  {}", style("Nothing asked yet.").dim())?;
        return writeln!(out);
    }

    for (i, turn) in conversation.turns().iter().enumerate() {
        writeln!(out, "  {} {}", style(format!("{}.", i + 1)).bold(), preview(&turn.query))?;
        if turn.results.is_empty() {
            writeln!(out, "       {}", style("no new points").dim())?;
        }
        for result in &turn.results {
            writeln!(out, "       {}", describe(result))?;
        }
    }
    writeln!(out)
}

fn write_total(out: &mut impl Write, conversation: &ConversationState) -> io::Result<()> {
    let results = conversation.all_results();
    writeln!(out)?;
    if results.is_empty() {
        writeln!(out, "  {}", style("No credit points recorded yet.").dim())?;
        return writeln!(out);
    }

    for result in results {
        writeln!(out, "    {} {}", style("-").dim(), describe(result))?;
    }
    writeln!(
        out,
        "  {} {} credit points",
        style("Running total:").bold(),
        style(conversation.cumulative_points()).green().bold()
    )?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use credpoints_types::catalog::{Category, Points};
    use credpoints_types::query::QuerySource;
    use credpoints_types::session::Turn;

    fn result(name: &str, points: Points, is_valid: Option<bool>) -> QueryResult {
        QueryResult {
            cert_name: name.to_string(),
            category: Category::Associate,
            points: if is_valid == Some(false) { Points::ZERO } else { points },
            nominal_points: points,
            is_valid,
            rationale: String::new(),
            source: match is_valid {
                Some(_) => QuerySource::Badge {
                    badge_id: "abc-123".to_string(),
                },
                None => QuerySource::Hypothetical,
            },
        }
    }

    fn conversation() -> ConversationState {
        let mut state = ConversationState::new();
        state.record(Turn {
            query: "https://www.credly.com/badges/abc-123".to_string(),
            results: vec![result("Terraform Associate", Points::whole(5), Some(false))],
            reply: String::new(),
            at: Utc::now(),
        });
        state.record(Turn {
            query: "If I clear CKA?".to_string(),
            results: vec![result("CKA", Points::from_halves(5), None)],
            reply: String::new(),
            at: Utc::now(),
        });
        state.record(Turn {
            query: "what is the total?".to_string(),
            results: vec![],
            reply: String::new(),
            at: Utc::now(),
        });
        state
    }

    fn render(f: impl Fn(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_history_lists_turns_and_results() {
        let state = conversation();
        let text = render(|out| write_history(out, &state));

        assert!(text.contains("https://www.credly.com/badges/abc-123"));
        assert!(text.contains("Terraform Associate: 0 credit points (expired)"));
        assert!(text.contains("CKA: 2.5 credit points (once earned)"));
        assert!(text.contains("no new points"));
    }

    #[test]
    fn test_history_empty() {
        let text = render(|out| write_history(out, &ConversationState::new()));
        assert!(text.contains("Nothing asked yet."));
    }

    #[test]
    fn test_total_sums_results() {
        let state = conversation();
        let text = render(|out| write_total(out, &state));

        assert!(text.contains("Terraform Associate: 0 credit points (expired)"));
        assert!(text.contains("CKA: 2.5 credit points"));
        assert!(text.contains("Running total:"));
        assert!(text.contains("2.5"));
    }

    #[test]
    fn test_total_before_any_points() {
        let text = render(|out| write_total(out, &ConversationState::new()));
        assert!(text.contains("No credit points recorded yet."));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(100);
        let short = preview(&long);
        assert_eq!(short.chars().count(), QUERY_PREVIEW_CHARS);
        assert!(short.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
