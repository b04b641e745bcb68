/// Help text printed for `/help`
pub const HELP: &str = "\
Commands:
  /expand   show or hide node outputs in the workflow panel
  /clear    reset the workflow panel
  /history  print the conversation so far
  /help     show this message
  /quit     leave (also /exit or Ctrl-D)";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text to send to the assistant, exactly as typed
    Prompt(String),
    Expand,
    Clear,
    History,
    Help,
    Quit,
    Unknown(String),
    /// Nothing but whitespace
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        if !trimmed.starts_with('/') {
            return Self::Prompt(line.to_string());
        }

        let name = trimmed.split_whitespace().next().unwrap_or(trimmed);
        match name.to_ascii_lowercase().as_str() {
            "/expand" => Self::Expand,
            "/clear" => Self::Clear,
            "/history" => Self::History,
            "/help" | "/?" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        }
    }
}
