//! Welcome banner shown when a chat session starts.

use std::io::{self, Write};

use console::style;

/// Print the welcome banner: how replies are phrased, the badge source,
/// the session id and a hint about slash commands.
pub fn write_welcome_banner(
    out: &mut impl Write,
    llm_label: Option<&str>,
    badge_source: &str,
    session_id: &str,
) -> io::Result<()> {
    let replies = match llm_label {
        Some(label) => format!("phrased by {label}"),
        None => "templated (no LLM configured)".to_string(),
    };

    writeln!(out)?;
    writeln!(out, "  {}", style("Certification credit points").cyan().bold())?;
    writeln!(
        out,
        "  {}",
        style("Paste a badge link or ask about a certification you plan to earn.").dim()
    )?;
    writeln!(out)?;
    writeln!(out, "  {}  {}", style("Replies:").bold(), style(replies).dim())?;
    writeln!(out, "  {}   {}", style("Badges:").bold(), style(badge_source).dim())?;
    writeln!(
        out,
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    )?;
    writeln!(out)?;
    writeln!(out, "  {}", style("Type /help for commands, Ctrl+D to exit").dim())?;
    writeln!(out, "  {}", style("---").dim())?;
    writeln!(out)
}
