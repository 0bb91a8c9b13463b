// ── AI alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// Alert lifecycle. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AlertFilter {
    Active,
    Resolved,
    #[default]
    All,
}

impl AlertFilter {
    pub fn matches(self, status: AlertStatus) -> bool {
        match self {
            Self::Active => status == AlertStatus::Active,
            Self::Resolved => status == AlertStatus::Resolved,
            Self::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAlert {
    pub id: EntityId,
    /// Free-text device reference, not a catalog key.
    pub device: String,
    pub severity: AlertSeverity,
    pub issue: String,
    pub suggestion: String,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCounts {
    pub active: usize,
    pub resolved: usize,
}
