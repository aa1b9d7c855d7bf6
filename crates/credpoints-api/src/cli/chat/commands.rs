//! Slash commands for the chat loop.
//!
//! Commands start with `/` and never reach the orchestrator.

use std::io::{self, Write};

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Clear the terminal screen.
    Clear,
    Exit,
    /// List the turns of this session.
    History,
    /// Show the running credit point total.
    Total,
    /// Forget every turn and start the total over.
    Reset,
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    Some(match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/history" => ChatCommand::History,
        "/total" | "/points" => ChatCommand::Total,
        "/reset" | "/new" => ChatCommand::Reset,
        other => ChatCommand::Unknown(other.to_string()),
    })
}

pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    let rows = [
        ("/help", "Show this help"),
        ("/history", "List this session's questions and their points"),
        ("/total", "Show the running credit point total"),
        ("/reset", "Forget this session's questions and start over"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the session (or press Ctrl+D)"),
    ];

    writeln!(out)?;
    writeln!(out, "  {}", style("Commands").bold())?;
    for (cmd, desc) in rows {
        writeln!(out, "    {} {}", style(format!("{cmd:<10}")).cyan(), desc)?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", style("Anything else is a question, for example:").dim())?;
    writeln!(out, "    https://www.credly.com/badges/<badge-id>")?;
    writeln!(out, "    If I clear Terraform Associate how many points will I get?")?;
    writeln!(out, "    What is the total for both?")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("how many points for CKA?"), None);
        assert_eq!(parse("https://www.credly.com/badges/abc"), None);
    }

    #[test]
    fn test_known_commands_and_aliases() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
        assert_eq!(parse("/cls"), Some(ChatCommand::Clear));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/history"), Some(ChatCommand::History));
        assert_eq!(parse("/points"), Some(ChatCommand::Total));
        assert_eq!(parse("/new"), Some(ChatCommand::Reset));
    }

    #[test]
    fn test_commands_are_case_insensitive_and_trimmed() {
        assert_eq!(parse("  /TOTAL  "), Some(ChatCommand::Total));
        assert_eq!(parse("/reset now"), Some(ChatCommand::Reset));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse("/remember x"), Some(ChatCommand::Unknown("/remember".to_string())));
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut out = Vec::new();
        write_help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for cmd in ["/help", "/history", "/total", "/reset", "/clear", "/exit"] {
            assert!(text.contains(cmd), "{cmd}");
        }
    }
}
