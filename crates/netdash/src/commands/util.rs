//! Shared helpers for command handlers.

use std::io::IsTerminal;

use netdash_core::{Action, ActionResult, DeviceType, EntityId, Session};

use crate::error::CliError;

/// Run a gated action, turning a denial into [`CliError::Denied`].
///
/// The session has already fired its notifier by the time this returns.
pub async fn execute(session: &Session, action: Action) -> Result<ActionResult, CliError> {
    let name = action.name().replace('_', " ");
    match session.execute(action).await? {
        ActionResult::Denied => Err(CliError::Denied { action: name }),
        other => Ok(other),
    }
}

/// Make `device` the session's command target, selecting its category first.
pub async fn select_device(session: &Session, device: &str) -> Result<(), CliError> {
    let category = lookup_category(session, device)?;
    execute(session, Action::SelectCategory(category)).await?;
    execute(
        session,
        Action::SelectDevice {
            id: device.to_owned(),
        },
    )
    .await?;
    Ok(())
}

fn lookup_category(session: &Session, device: &str) -> Result<DeviceType, CliError> {
    session
        .catalog()
        .find_device(device)
        .map(|d| d.device_type)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "device".into(),
            identifier: device.into(),
            list_command: "devices list".into(),
        })
}

pub fn entity_id(raw: &str) -> EntityId {
    EntityId::from(raw.trim())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(CliError::prompt)
}

/// Compact local timestamp for tables.
pub fn short_time(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
