// ── VLAN domain type ──

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};

/// A VLAN and the address pool routed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanConfig {
    pub id: u16,
    pub network: String,
    pub description: String,
}

impl VlanConfig {
    /// Parsed pool, `None` if the catalog entry is not valid CIDR.
    pub fn subnet(&self) -> Option<Ipv4Network> {
        self.network.parse().ok()
    }
}
