use flowchat_llm::{Conversation, Role};
use flowchat_workflow::{TurnObserver, WorkflowView};
use std::io::{self, Write};

const USER_PROMPT: &str = "you> ";
const ASSISTANT_PREFIX: &str = "assistant> ";
const PANEL_RULE: &str = "────────────────────────────────────────";

/// Line-oriented terminal front end
///
/// Prints the workflow panel whenever its rendering changes and streams the
/// answer by writing only the part of the text not yet on screen. A panel
/// printed in the middle of an answer interrupts it; the next answer update
/// then starts a fresh line with the full text so far.
pub struct Terminal<W: Write> {
    out: W,
    last_panel: Option<String>,
    /// Bytes of the current answer already written
    shown: usize,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_panel: None,
            shown: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}", USER_PROMPT)?;
        self.out.flush()
    }

    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn show_error(&mut self, error: &anyhow::Error) -> io::Result<()> {
        writeln!(self.out, "error: {:#}", error)?;
        self.out.flush()
    }

    /// Print the panel even if it is unchanged
    pub fn show_panel(&mut self, view: &WorkflowView) -> io::Result<()> {
        let panel = view.to_string();
        self.write_panel(&panel)?;
        self.last_panel = Some(panel);
        Ok(())
    }

    pub fn show_history(&mut self, conversation: &Conversation) -> io::Result<()> {
        if conversation.is_empty() {
            return self.notice("(no messages yet)");
        }
        for message in conversation.messages() {
            let prefix = match message.role {
                Role::User => USER_PROMPT,
                Role::Assistant => ASSISTANT_PREFIX,
            };
            writeln!(self.out, "{}{}", prefix, message.content)?;
        }
        self.out.flush()
    }

    pub fn begin_turn(&mut self) {
        self.shown = 0;
    }

    /// Close the answer line, if one was started
    pub fn end_turn(&mut self) -> io::Result<()> {
        if self.shown > 0 {
            writeln!(self.out)?;
            self.shown = 0;
        }
        self.out.flush()
    }

    fn write_panel(&mut self, panel: &str) -> io::Result<()> {
        if self.shown > 0 {
            writeln!(self.out)?;
            self.shown = 0;
        }
        writeln!(self.out, "{}", PANEL_RULE)?;
        writeln!(self.out, "{}", panel)?;
        writeln!(self.out, "{}", PANEL_RULE)?;
        self.out.flush()
    }

    fn write_answer(&mut self, text: &str) -> io::Result<()> {
        match text.get(self.shown..) {
            Some(rest) if self.shown > 0 => write!(self.out, "{}", rest)?,
            _ => write!(self.out, "{}{}", ASSISTANT_PREFIX, text)?,
        }
        self.shown = text.len();
        self.out.flush()
    }
}

impl<W: Write> TurnObserver for Terminal<W> {
    fn workflow_updated(&mut self, view: &WorkflowView) {
        let panel = view.to_string();
        if self.last_panel.as_deref() == Some(panel.as_str()) {
            return;
        }
        if let Err(e) = self.write_panel(&panel) {
            tracing::warn!(error = %e, "Failed to draw workflow panel");
        }
        self.last_panel = Some(panel);
    }

    fn answer_updated(&mut self, text: &str) {
        if let Err(e) = self.write_answer(text) {
            tracing::warn!(error = %e, "Failed to write answer");
        }
    }
}
