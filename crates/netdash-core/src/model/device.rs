// ── Device domain types ──

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use strum::{Display, EnumIter, EnumString};

/// Device role in the campus hierarchy. Doubles as the catalog's
/// category filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DeviceType {
    Core,
    AccessController,
    AccessPoint,
    Distribution,
}

/// Last known reachability. Seeded; nothing in a session changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
}

impl DeviceStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    /// Whether a simulated command against this device should fail.
    pub fn is_unreachable(self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// A managed device from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDevice {
    pub id: String,
    pub name: String,
    pub ip: Ipv4Addr,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: DeviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl NetworkDevice {
    /// Denormalized reference used by outputs and alerts, e.g.
    /// `"Core Switch (10.19.10.2)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.ip)
    }
}

/// Online / warning / offline tally over a device set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total: u32,
    pub online: u32,
    pub warning: u32,
    pub offline: u32,
}

impl HealthSummary {
    pub fn from_devices<'a>(devices: impl IntoIterator<Item = &'a NetworkDevice>) -> Self {
        devices
            .into_iter()
            .fold(Self::default(), |mut acc, d| {
                acc.total += 1;
                match d.status {
                    DeviceStatus::Online => acc.online += 1,
                    DeviceStatus::Warning => acc.warning += 1,
                    DeviceStatus::Offline => acc.offline += 1,
                }
                acc
            })
    }

    /// Share of online devices, rounded to the nearest percent.
    pub fn online_pct(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.online * 100 + self.total / 2) / self.total
    }
}
