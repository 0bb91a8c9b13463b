//! Bulk export handler.

use chrono::Utc;
use serde::Serialize;

use netdash_core::{Action, ActionResult, ExportRequest, Session};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct ExportSummary {
    filename: String,
    mime_type: &'static str,
    size: usize,
}

fn summary_detail(s: &ExportSummary) -> String {
    [
        format!("File: {}", s.filename),
        format!("Type: {}", s.mime_type),
        format!("Size: {} bytes", s.size),
    ]
    .join("\n")
}

/// Build the request the dashboard form would submit.
pub fn build_request(args: ExportArgs) -> ExportRequest {
    let mut request = ExportRequest::new(Utc::now()).with_format(args.format);
    request.export_type = args.r#type;
    request.date_range = args.range;
    request.include_device_info = !args.no_device_info;
    request.include_commands = !args.no_commands;
    request.include_outputs = !args.no_outputs;
    request.include_errors = args.include_errors;
    request.custom_file_name = args.file_name.filter(|name| !name.trim().is_empty());
    request
}

pub async fn handle(
    session: &Session,
    args: ExportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let request = build_request(args);

    if let ActionResult::Exported {
        filename,
        mime_type,
        size,
    } = util::execute(session, Action::Export(request)).await?
    {
        let summary = ExportSummary {
            filename,
            mime_type,
            size,
        };
        let out = output::render_single(&global.output, &summary, summary_detail, |s| {
            s.filename.clone()
        });
        output::print_output(&out, global.quiet);
    }
    Ok(())
}
