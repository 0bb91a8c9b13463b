// ── Domain model ──
//
// Canonical types shared by every session component. Catalog types are
// immutable after load; outputs, alerts and chat messages are owned by
// their respective stores inside the session.

pub mod alert;
pub mod chat;
pub mod device;
pub mod entity_id;
pub mod output;
pub mod vlan;

pub use alert::{AiAlert, AlertCounts, AlertFilter, AlertSeverity, AlertStatus};
pub use chat::{ChatMessage, ChatRole};
pub use device::{DeviceStatus, DeviceType, HealthSummary, NetworkDevice};
pub use entity_id::EntityId;
pub use output::{CommandOutput, OutputStats, OutputStatus};
pub use vlan::VlanConfig;
