//! AI alert and scan command handlers.

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use netdash_core::{
    Action, ActionResult, AiAlert, AlertCounts, AlertFilter, ScanHandle, ScanStatus, Session,
};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl AlertRow {
    fn new(a: &AiAlert, color: bool) -> Self {
        Self {
            id: a.id.to_string(),
            severity: output::severity(a.severity, color),
            device: a.device.clone(),
            issue: a.issue.clone(),
            status: output::alert_status(a.status, color),
            time: util::short_time(a.timestamp),
        }
    }
}

fn detail(a: &AiAlert) -> String {
    [
        format!("ID:         {}", a.id),
        format!("Device:     {}", a.device),
        format!("Severity:   {}", a.severity),
        format!("Status:     {}", a.status),
        format!("Time:       {}", util::short_time(a.timestamp)),
        format!("Issue:      {}", a.issue),
        format!("Suggestion: {}", a.suggestion),
    ]
    .join("\n")
}

fn counts_detail(c: &AlertCounts) -> String {
    format!("Active:   {}\nResolved: {}", c.active, c.resolved)
}

// ── Scan progress ───────────────────────────────────────────────────

fn scan_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{spinner} Scanning network [{bar:40}] {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(100).with_style(style)
}

/// Follow a running scan to the end and report the new alert.
async fn follow_scan(
    session: &Session,
    handle: ScanHandle,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bar = scan_bar(global.quiet);
    let mut updates = handle.subscribe();

    loop {
        let status = updates.borrow_and_update().clone();
        let ScanStatus::Running { progress } = status else {
            break;
        };
        bar.set_position(u64::from(progress));
        if updates.changed().await.is_err() {
            break;
        }
    }

    match handle.wait().await {
        ScanStatus::Completed { alert_id } => {
            bar.finish_and_clear();
            let alerts = session.alerts(AlertFilter::All).await;
            let found = alerts
                .iter()
                .find(|a| a.id == alert_id)
                .ok_or_else(|| CliError::Internal {
                    message: format!("scan alert {alert_id} vanished"),
                })?;
            let out = output::render_single(&global.output, found, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ScanStatus::Cancelled { progress } => {
            bar.abandon();
            output::notice(&format!("Scan cancelled at {progress}%"), global.quiet);
            Ok(())
        }
        ScanStatus::Idle | ScanStatus::Running { .. } => {
            bar.abandon();
            Err(CliError::Internal {
                message: "scan stopped without finishing".into(),
            })
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        AlertsCommand::List { status } => {
            let alerts = session.alerts(status).await;
            let out = output::render_list(
                &global.output,
                &alerts,
                |a| AlertRow::new(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Stats => {
            let counts = session.alert_counts().await;
            let out = output::render_single(&global.output, &counts, counts_detail, |c| {
                c.active.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Resolve { id } => {
            let alert_id = util::entity_id(&id);
            let result = util::execute(
                session,
                Action::ResolveAlert {
                    id: alert_id.clone(),
                },
            )
            .await?;
            if let ActionResult::AlertResolved { changed } = result {
                if changed {
                    output::notice(&format!("Resolved alert {alert_id}"), global.quiet);
                } else if session
                    .alerts(AlertFilter::Resolved)
                    .await
                    .iter()
                    .any(|a| a.id == alert_id)
                {
                    output::notice(&format!("Alert {alert_id} was already resolved"), global.quiet);
                } else {
                    return Err(CliError::NotFound {
                        resource_type: "alert".into(),
                        identifier: id,
                        list_command: "alerts list".into(),
                    });
                }
            }
            Ok(())
        }

        AlertsCommand::Scan { detach } => {
            let ActionResult::ScanStarted(handle) =
                util::execute(session, Action::RunScan).await?
            else {
                return Err(CliError::Internal {
                    message: "scan did not start".into(),
                });
            };
            if detach {
                output::notice("Scan started in the background", global.quiet);
                return Ok(());
            }
            follow_scan(session, handle, global).await
        }

        AlertsCommand::Cancel => {
            if let ActionResult::ScanCancelled { progress } =
                util::execute(session, Action::CancelScan).await?
            {
                let message = progress.map_or_else(
                    || "No scan is running".to_owned(),
                    |p| format!("Scan cancelled at {p}%"),
                );
                output::notice(&message, global.quiet);
            }
            Ok(())
        }
    }
}
