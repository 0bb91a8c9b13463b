//! Output ledger command handlers.

use tabled::Tabled;

use netdash_core::{Action, ActionResult, CommandOutput, EntityId, OutputStats, Session};

use crate::cli::{GlobalOpts, OutputsArgs, OutputsCommand};
use crate::error::CliError;
use crate::output;

use super::compose::output_detail;
use super::util;

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "")]
    selected: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl OutputRow {
    fn new(o: &CommandOutput, selected: Option<&EntityId>, color: bool) -> Self {
        Self {
            selected: if selected == Some(&o.id) { "*" } else { "" },
            id: o.id.to_string(),
            command: o.command.clone(),
            device: o.device_name().to_owned(),
            status: output::output_status(o.status, color),
            time: util::short_time(o.timestamp),
        }
    }
}

fn stats_detail(s: &OutputStats) -> String {
    [
        format!("Total:   {}", s.total),
        format!("Success: {}", s.success),
        format!("Error:   {}", s.error),
        format!("Pending: {}", s.pending),
    ]
    .join("\n")
}

fn not_found(id: &str) -> CliError {
    CliError::NotFound {
        resource_type: "output".into(),
        identifier: id.into(),
        list_command: "outputs list".into(),
    }
}

#[allow(clippy::too_many_lines)]
pub async fn handle(
    session: &Session,
    args: OutputsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        OutputsCommand::List => {
            let outputs = session.outputs().await;
            let selected = session.selected_output().await.map(|o| o.id);
            let out = output::render_list(
                &global.output,
                &outputs,
                |o| OutputRow::new(o, selected.as_ref(), color),
                |o| o.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OutputsCommand::Show { id } => {
            let found = match id {
                Some(ref raw) => session
                    .output(&util::entity_id(raw))
                    .await
                    .ok_or_else(|| not_found(raw))?,
                None => session
                    .selected_output()
                    .await
                    .ok_or_else(|| CliError::Validation {
                        field: "id".into(),
                        reason: "no output selected; pass an ID".into(),
                    })?,
            };
            let out = output::render_single(&global.output, &found, output_detail, |o| {
                o.output.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OutputsCommand::Select { id } => {
            let found = session
                .select_output(&util::entity_id(&id))
                .await
                .ok_or_else(|| not_found(&id))?;
            output::notice(
                &format!("Selected output {} ({})", found.id, found.command),
                global.quiet,
            );
            Ok(())
        }

        OutputsCommand::Stats => {
            let stats = session.output_stats().await;
            let out = output::render_single(&global.output, &stats, stats_detail, |s| {
                s.total.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OutputsCommand::Delete { id } => {
            let action = Action::DeleteOutput {
                id: util::entity_id(&id),
            };
            if let ActionResult::Deleted(removed) = util::execute(session, action).await? {
                output::notice(&format!("Deleted output {}", removed.id), global.quiet);
            }
            Ok(())
        }

        OutputsCommand::Clear => {
            if !util::confirm("Delete every output?", "outputs clear", global.yes)? {
                return Ok(());
            }
            if let ActionResult::Cleared { removed } =
                util::execute(session, Action::ClearOutputs).await?
            {
                output::notice(&format!("Removed {removed} outputs"), global.quiet);
            }
            Ok(())
        }

        OutputsCommand::Copy { id } => {
            let action = Action::CopyOutput {
                id: util::entity_id(&id),
            };
            if let ActionResult::Copied { delivered: false } =
                util::execute(session, action).await?
            {
                output::notice("Could not write the output text", global.quiet);
            }
            Ok(())
        }

        OutputsCommand::Save { id, format } => {
            let action = Action::ExportOutput {
                id: util::entity_id(&id),
                format,
            };
            util::execute(session, action).await?;
            Ok(())
        }
    }
}
