//! Line parsing for the interactive `record` session.
//!
//! Lines starting with `:` are commands; any other non-empty line becomes
//! a note. Parsing is pure so the loop in the binary stays thin.

/// A parsed line from the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start the timer.
    Start,
    /// Stop the timer.
    Stop,
    /// Show the current timer and note log state.
    Status,
    /// Stage a stream name for the next save.
    Name(String),
    /// Save the current state as an archived stream; with a name, stages
    /// it first.
    Save(Option<String>),
    /// Export the working note log.
    Export,
    /// Show available commands.
    Help,
    /// Leave the session.
    Quit,
    /// Add the line as a note.
    Note(String),
    /// A `:` command that matched nothing.
    Unknown(String),
}

/// Parse one input line. Returns `None` for blank lines.
#[must_use]
pub fn parse_line(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(SessionCommand::Note(line.to_string()));
    };

    let (verb, rest) = match command.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (command, ""),
    };

    let parsed = match verb {
        "start" => SessionCommand::Start,
        "stop" => SessionCommand::Stop,
        "status" => SessionCommand::Status,
        "name" => SessionCommand::Name(rest.to_string()),
        "save" => {
            if rest.is_empty() {
                SessionCommand::Save(None)
            } else {
                SessionCommand::Save(Some(rest.to_string()))
            }
        }
        "export" => SessionCommand::Export,
        "help" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => SessionCommand::Unknown(other.to_string()),
    };
    Some(parsed)
}

/// Help text for the interactive session.
pub const HELP_TEXT: &str = "\
Commands (any other line is added as a note):
  :start            start the timer
  :stop             stop the timer
  :status           show timer, staged name, and note count
  :name <name>      stage a stream name for the next save
  :save [<name>]    archive the current notes and reset
  :export           export the working note log
  :help             show this help
  :quit             leave the session";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn test_plain_text_is_a_note() {
        assert_eq!(
            parse_line("chat went wild"),
            Some(SessionCommand::Note("chat went wild".to_string()))
        );
    }

    #[test]
    fn test_note_text_is_trimmed() {
        assert_eq!(
            parse_line("  boss fight  "),
            Some(SessionCommand::Note("boss fight".to_string()))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line(":start"), Some(SessionCommand::Start));
        assert_eq!(parse_line(":stop"), Some(SessionCommand::Stop));
        assert_eq!(parse_line(":status"), Some(SessionCommand::Status));
        assert_eq!(parse_line(":export"), Some(SessionCommand::Export));
        assert_eq!(parse_line(":help"), Some(SessionCommand::Help));
    }

    #[test]
    fn test_quit_aliases() {
        assert_eq!(parse_line(":quit"), Some(SessionCommand::Quit));
        assert_eq!(parse_line(":exit"), Some(SessionCommand::Quit));
        assert_eq!(parse_line(":q"), Some(SessionCommand::Quit));
    }

    #[test]
    fn test_save_without_name() {
        assert_eq!(parse_line(":save"), Some(SessionCommand::Save(None)));
    }

    #[test]
    fn test_save_with_multi_word_name() {
        assert_eq!(
            parse_line(":save Friday Night VOD"),
            Some(SessionCommand::Save(Some("Friday Night VOD".to_string())))
        );
    }

    #[test]
    fn test_name_command() {
        assert_eq!(
            parse_line(":name Speedrun attempt"),
            Some(SessionCommand::Name("Speedrun attempt".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_line(":frobnicate now"),
            Some(SessionCommand::Unknown("frobnicate".to_string()))
        );
    }
}
