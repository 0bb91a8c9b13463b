//! Command composition: templates, history and send.

use serde::Serialize;
use tabled::Tabled;

use netdash_core::{Action, ActionResult, CommandOutput, Session};

use crate::cli::{GlobalOpts, SendArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct Indexed<'a> {
    index: usize,
    command: &'a str,
}

#[derive(Tabled)]
struct CommandRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Command")]
    command: String,
}

impl From<&Indexed<'_>> for CommandRow {
    fn from(entry: &Indexed<'_>) -> Self {
        Self {
            index: entry.index,
            command: entry.command.to_owned(),
        }
    }
}

fn render_commands(global: &GlobalOpts, commands: &[String]) {
    let entries: Vec<Indexed<'_>> = commands
        .iter()
        .enumerate()
        .map(|(index, command)| Indexed { index, command })
        .collect();
    let out = output::render_list(&global.output, &entries, |e| CommandRow::from(e), |e| {
        e.command.to_owned()
    });
    output::print_output(&out, global.quiet);
}

/// Detail view shared with `outputs show`.
pub fn output_detail(o: &CommandOutput) -> String {
    [
        format!("ID:      {}", o.id),
        format!("Command: {}", o.command),
        format!("Device:  {}", o.device),
        format!("Status:  {}", o.status),
        format!("Time:    {}", util::short_time(o.timestamp)),
        String::new(),
        o.output.clone(),
    ]
    .join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn templates(session: &Session, global: &GlobalOpts) {
    render_commands(global, session.catalog().list_command_templates());
}

pub async fn history(session: &Session, global: &GlobalOpts) {
    render_commands(global, &session.history().await);
}

pub async fn send(session: &Session, args: SendArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref device) = args.device {
        util::select_device(session, device).await?;
    }

    if let Some(index) = args.recall {
        util::execute(session, Action::SelectFromHistory { index }).await?;
    } else if !args.command.is_empty() {
        let text = args.command.join(" ");
        let action = if session.catalog().is_template(&text) {
            Action::SelectTemplate { command: text }
        } else {
            Action::EditCustom { text }
        };
        util::execute(session, action).await?;
    }

    let ActionResult::Sent(sent) = util::execute(session, Action::Send).await? else {
        return Err(CliError::Internal {
            message: "send returned no output".into(),
        });
    };

    let out = output::render_single(&global.output, &sent, output_detail, |o| o.id.to_string());
    output::print_output(&out, global.quiet);
    Ok(())
}
