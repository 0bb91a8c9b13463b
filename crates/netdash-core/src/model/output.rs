// ── Command output domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::entity_id::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputStatus {
    Success,
    Error,
    /// Reserved for a delivery path that completes later.
    Pending,
}

/// The recorded result of one sent command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub id: EntityId,
    pub command: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
    /// Free-text device reference, not a catalog key.
    pub device: String,
    pub status: OutputStatus,
}

impl CommandOutput {
    /// Everything before the first `(` of the device reference, trimmed.
    pub fn device_name(&self) -> &str {
        self.device
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Per-status tally of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputStats {
    pub total: usize,
    pub success: usize,
    pub error: usize,
    pub pending: usize,
}
