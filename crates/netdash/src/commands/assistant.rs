//! Assistant command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use netdash_core::{Action, ActionResult, ChatMessage, Session};

use crate::cli::{AssistantArgs, AssistantCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Message")]
    content: String,
}

impl From<&ChatMessage> for MessageRow {
    fn from(m: &ChatMessage) -> Self {
        Self {
            role: m.role.to_string(),
            content: m.content.clone(),
        }
    }
}

fn thinking_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner().with_message("Assistant is typing...");
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub async fn handle(
    session: &Session,
    args: AssistantArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AssistantCommand::Ask { message } => {
            let text = message.join(" ");
            let ActionResult::ReplyPending(pending) =
                util::execute(session, Action::SendMessage { text }).await?
            else {
                return Err(CliError::Internal {
                    message: "assistant accepted no message".into(),
                });
            };

            let spinner = thinking_spinner(global.quiet);
            let reply = pending.wait().await;
            spinner.finish_and_clear();

            let reply = reply.ok_or_else(|| CliError::Internal {
                message: "session closed before the assistant replied".into(),
            })?;
            let out = output::render_single(&global.output, &reply, |m| m.content.clone(), |m| {
                m.content.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AssistantCommand::Transcript => {
            let transcript = session.transcript().await;
            let out = output::render_list(
                &global.output,
                &transcript,
                |m| MessageRow::from(m),
                |m| format!("{}: {}", m.role, m.content),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AssistantCommand::Voice => {
            if let ActionResult::VoiceToggled { listening } =
                util::execute(session, Action::ToggleVoice).await?
            {
                let state = if listening { "on" } else { "off" };
                output::notice(&format!("Voice input {state}"), global.quiet);
            }
            Ok(())
        }
    }
}
