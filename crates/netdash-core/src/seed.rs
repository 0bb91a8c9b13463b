// ── Sample session data ──
//
// What a fresh dashboard shows before anyone has done anything.
// Timestamps are relative to session start.

use chrono::{DateTime, Duration, Utc};

use crate::model::{AiAlert, AlertSeverity, AlertStatus, CommandOutput, EntityId, OutputStatus};
use crate::responder::{SHOW_INTERFACES_STATUS, SHOW_VERSION, TIMEOUT_OUTPUT};

pub(crate) const SAMPLE_HISTORY: [&str; 3] =
    ["show version", "show interfaces status", "show vlan"];

const CORE_SWITCH: &str = "Core Switch (10.19.10.2)";
const ROUTER_2: &str = "Router-2 (10.19.10.4)";

fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}

/// Newest first; the first entry starts out selected.
pub(crate) fn sample_outputs(now: DateTime<Utc>) -> Vec<CommandOutput> {
    vec![
        CommandOutput {
            id: EntityId::from("1"),
            command: "show version".into(),
            output: SHOW_VERSION.into(),
            timestamp: minutes_ago(now, 5),
            device: CORE_SWITCH.into(),
            status: OutputStatus::Success,
        },
        CommandOutput {
            id: EntityId::from("2"),
            command: "show interfaces status".into(),
            output: SHOW_INTERFACES_STATUS.into(),
            timestamp: minutes_ago(now, 10),
            device: CORE_SWITCH.into(),
            status: OutputStatus::Success,
        },
        CommandOutput {
            id: EntityId::from("3"),
            command: "show vlan".into(),
            output: TIMEOUT_OUTPUT.into(),
            timestamp: minutes_ago(now, 15),
            device: ROUTER_2.into(),
            status: OutputStatus::Error,
        },
    ]
}

pub(crate) fn sample_alerts(now: DateTime<Utc>) -> Vec<AiAlert> {
    vec![
        AiAlert {
            id: EntityId::from("1"),
            device: ROUTER_2.into(),
            severity: AlertSeverity::High,
            issue: "Device offline - Connection timeout".into(),
            suggestion: "Check physical connections and power status. Verify network cables."
                .into(),
            timestamp: minutes_ago(now, 5),
            status: AlertStatus::Active,
        },
        AiAlert {
            id: EntityId::from("2"),
            device: "AP-04 (10.19.10.54)".into(),
            severity: AlertSeverity::Medium,
            issue: "High packet loss detected (15%)".into(),
            suggestion: "Check wireless interference. Consider channel optimization.".into(),
            timestamp: minutes_ago(now, 10),
            status: AlertStatus::Active,
        },
        AiAlert {
            id: EntityId::from("3"),
            device: CORE_SWITCH.into(),
            severity: AlertSeverity::Low,
            issue: "CPU utilization above 80%".into(),
            suggestion: "Monitor traffic patterns. Consider load balancing.".into(),
            timestamp: minutes_ago(now, 15),
            status: AlertStatus::Resolved,
        },
    ]
}
