use crate::commands::{Command, HELP};
use crate::error::CliError;
use crate::terminal::Terminal;
use flowchat_workflow::ChatSession;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Read commands and prompts until `/quit` or end of input
///
/// A failed turn is reported on the terminal and the loop keeps going;
/// only terminal and input I/O errors end the session early.
pub async fn run<R, W>(
    session: &mut ChatSession,
    input: R,
    terminal: &mut Terminal<W>,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    terminal.show_panel(&session.render())?;

    loop {
        terminal.prompt()?;
        let Some(line) = lines.next_line().await? else {
            terminal.notice("")?;
            break;
        };

        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => terminal.notice(HELP)?,
            Command::History => terminal.show_history(session.conversation())?,
            Command::Unknown(name) => {
                terminal.notice(&format!("Unknown command {}, try /help", name))?
            }
            Command::Clear => {
                session.clear_workflow();
                terminal.show_panel(&session.render())?;
            }
            Command::Expand => {
                let expanded = session.toggle_outputs();
                tracing::debug!(expanded, "Toggled node outputs");
                terminal.show_panel(&session.render())?;
            }
            Command::Prompt(text) => {
                terminal.begin_turn();
                let result = session.submit(&text, terminal).await;
                terminal.end_turn()?;

                match result {
                    Ok(Some(outcome)) => {
                        if outcome.answer.is_empty() {
                            terminal.notice("(empty answer)")?;
                        }
                        tracing::debug!(
                            turn_id = %outcome.turn_id,
                            frames = outcome.frames,
                            malformed_frames = outcome.malformed_frames,
                            dropped_lines = outcome.dropped_lines,
                            "Turn summary"
                        );
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(error = %format!("{:#}", e), "Turn failed");
                        terminal.show_error(&e)?;
                    }
                }
            }
        }
    }

    Ok(())
}
