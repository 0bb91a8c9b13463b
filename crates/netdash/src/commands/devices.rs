//! Device command handlers.

use tabled::Tabled;

use netdash_core::{
    Action, ActionResult, ConnectionPlan, HealthSummary, NetworkDevice, Session,
};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl DeviceRow {
    fn new(d: &NetworkDevice, color: bool) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            ip: d.ip.to_string(),
            dtype: d.device_type.to_string(),
            status: output::device_status(d.status, color),
            location: d
                .location
                .as_deref()
                .or(d.department.as_deref())
                .unwrap_or("-")
                .to_owned(),
        }
    }
}

fn detail(d: &NetworkDevice) -> String {
    let mut lines = vec![
        format!("ID:         {}", d.id),
        format!("Name:       {}", d.name),
        format!("IP:         {}", d.ip),
        format!("Type:       {}", d.device_type),
        format!("Status:     {}", d.status),
    ];
    if let Some(ref location) = d.location {
        lines.push(format!("Location:   {location}"));
    }
    if let Some(ref department) = d.department {
        lines.push(format!("Department: {department}"));
    }
    lines.join("\n")
}

fn health_detail(h: &HealthSummary) -> String {
    [
        format!("Total:   {}", h.total),
        format!("Online:  {} ({}%)", h.online, h.online_pct()),
        format!("Warning: {}", h.warning),
        format!("Offline: {}", h.offline),
    ]
    .join("\n")
}

fn plan_detail(p: &ConnectionPlan) -> String {
    [
        format!("Device:   {}", p.device.label()),
        format!("Method:   {}", p.method),
        format!("Port:     {}", p.port),
        format!("Username: {}", p.username),
        format!(
            "Password: {}",
            if p.has_password() { "****" } else { "(empty)" }
        ),
        "No connection is opened; this plan is informational.".to_owned(),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        DevicesCommand::List { r#type } => {
            let catalog = session.catalog();
            let devices: Vec<NetworkDevice> = match r#type {
                Some(category) => catalog
                    .list_devices(category)
                    .into_iter()
                    .cloned()
                    .collect(),
                None => catalog.all_devices().to_vec(),
            };
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = session
                .catalog()
                .find_device(&device)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "device".into(),
                    identifier: device.clone(),
                    list_command: "devices list".into(),
                })?;
            let out = output::render_single(&global.output, found, detail, |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Health => {
            let health = session.catalog().health();
            let out = output::render_single(&global.output, &health, health_detail, |h| {
                format!("{}/{}", h.online, h.total)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Select { device } => {
            util::select_device(session, &device).await?;
            output::notice(&format!("Selected {device}"), global.quiet);
            Ok(())
        }

        DevicesCommand::Connect { device, method } => {
            if let Some(ref device) = device {
                util::select_device(session, device).await?;
            }
            util::execute(session, Action::SetConnectionMethod(method)).await?;

            let ActionResult::Connected(plan) = util::execute(session, Action::Connect).await?
            else {
                return Err(CliError::Internal {
                    message: "connect returned no plan".into(),
                });
            };
            let out = output::render_single(&global.output, &plan, plan_detail, |p| {
                format!("{}:{}", p.device.ip, p.port)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
