//! Console view modes and slash commands.

use std::fmt;
use std::str::FromStr;

/// Which panel the console is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Read-only metric cards and charts.
    Dashboard,
    /// Conversation with the assistant.
    Chat,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Dashboard => f.write_str("dashboard"),
            View::Chat => f.write_str("chat"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(View::Dashboard),
            "chat" => Ok(View::Chat),
            other => Err(format!("unknown view '{other}' (expected 'dashboard' or 'chat')")),
        }
    }
}

/// A `/command` typed at the console prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(View),
    History,
    Export,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// `None` when `line` is not a command and should be treated as chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('/')?;
        let name = rest.split_whitespace().next().unwrap_or_default().to_ascii_lowercase();
        let cmd = match name.as_str() {
            "dashboard" | "d" => Command::Show(View::Dashboard),
            "chat" | "c" => Command::Show(View::Chat),
            "history" => Command::History,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(name),
        };
        Some(cmd)
    }
}

pub const HELP: &str = "\
Commands:
  /dashboard   show the analytics dashboard (read-only)
  /chat        switch to the assistant
  /history     print the conversation so far
  /export      print the conversation as JSON
  /help        this list
  /quit        leave
In chat view, type a question and press Enter.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_parses_case_insensitively() {
        assert_eq!("Chat".parse::<View>().unwrap(), View::Chat);
        assert_eq!(" dashboard ".parse::<View>().unwrap(), View::Dashboard);
        assert!("charts".parse::<View>().is_err());
    }

    #[test]
    fn view_display_round_trips() {
        for v in [View::Dashboard, View::Chat] {
            assert_eq!(v.to_string().parse::<View>().unwrap(), v);
        }
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse("what about revenue?"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn commands_parse() {
        assert_eq!(Command::parse("/chat"), Some(Command::Show(View::Chat)));
        assert_eq!(Command::parse("  /DASHBOARD "), Some(Command::Show(View::Dashboard)));
        assert_eq!(Command::parse("/export now"), Some(Command::Export));
        assert_eq!(Command::parse("/q"), Some(Command::Quit));
        assert_eq!(Command::parse("/nope"), Some(Command::Unknown("nope".into())));
        assert_eq!(Command::parse("/"), Some(Command::Unknown(String::new())));
    }
}
