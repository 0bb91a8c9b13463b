// ── Domain catalog ──
//
// Static device, VLAN and command-template registry for the campus
// management network (10.19.10.0/24). Built once and shared read-only.

use std::net::Ipv4Addr;

use crate::model::{DeviceStatus, DeviceType, HealthSummary, NetworkDevice, VlanConfig};

/// Commands supported on the CBS350 24P series.
pub const COMMAND_TEMPLATES: [&str; 14] = [
    "show version",
    "show running-config",
    "show interfaces status",
    "show vlan",
    "show mac address-table",
    "show ip route",
    "show spanning-tree",
    "show port-security",
    "show system",
    "show users",
    "show log",
    "show environment",
    "ping",
    "traceroute",
];

const ACCESS_POINT_LOCATIONS: [&str; 29] = [
    "MIS GF",
    "ACRC GF-1",
    "ACRC GF-2",
    "ACRC FF-1",
    "ACRC FF-2",
    "Admin GF",
    "New Accounts",
    "APC&IC",
    "CDLE",
    "EMTL",
    "FBRC GF-1",
    "FBRC GF-2",
    "FBRC FF-1",
    "FBRC FF-2",
    "GCRC",
    "Old Guest House",
    "New Guest House",
    "ILO",
    "Old DG Office",
    "Library",
    "MPRC",
    "Old Accounts",
    "New DG Office GF",
    "New DG Office FF",
    "P&D",
    "Pitmaen GF",
    "Pitmaen FF",
    "ESC",
    "UMW",
];

/// `(switch number, last octet, location)`. Numbers 24-28 are not deployed.
const DISTRIBUTION_SWITCHES: [(u8, u8, &str); 26] = [
    (1, 151, "ACRC-SW-GF"),
    (2, 152, "ACRC-SW-FF"),
    (3, 153, "Admin-SW-1"),
    (4, 154, "New Accounts"),
    (5, 155, "APC&IC-SW-1"),
    (6, 156, "APC&IC-SW-2"),
    (7, 157, "CDLE-SW-01"),
    (8, 158, "DEP-SW-01"),
    (9, 159, "EMTL"),
    (10, 160, "FBRC-GF"),
    (11, 161, "FBRC-FF"),
    (12, 162, "GCRC"),
    (13, 163, "Guest House"),
    (14, 164, "ILO"),
    (15, 165, "Library"),
    (16, 166, "DG Office"),
    (17, 167, "MIS-SW-01"),
    (18, 168, "MIS-SW-02"),
    (19, 169, "MPRC"),
    (20, 170, "Old Accounts"),
    (21, 171, "P&D"),
    (22, 172, "Pitmaen"),
    (23, 173, "UMW-SW"),
    (29, 181, "PSTC-L Academic Block SW-1"),
    (30, 182, "PSTC-L Academic Block SW-2"),
    (31, 183, "PSTC-L Workshop"),
];

const VLANS: [(u16, &str, &str); 32] = [
    (1910, "10.19.10.0/24", "Devices Management IP Pool"),
    (1912, "172.19.12.0/24", "Administration Wing LAN Pool"),
    (1913, "172.19.13.0/24", "APC & IC LAN Pool"),
    (1914, "172.19.14.0/24", "Bio-Metric LAN Pool"),
    (1915, "172.19.15.0/24", "CDLE LAN Pool"),
    (1916, "172.19.16.0/24", "FBRC LAN Pool"),
    (1917, "172.19.17.0/24", "DG Office LAN Pool"),
    (1918, "172.19.18.0/24", "EMTL LAN Pool"),
    (1919, "172.19.19.0/24", "DAP LAN"),
    (1920, "172.19.20.0/24", "GCRC LAN Pool"),
    (1921, "172.19.21.0/24", "MPRC LAN Pool"),
    (1922, "172.19.22.0/24", "ESC LAN Pool"),
    (1923, "172.19.23.0/24", "Pitmaen LAN Pool"),
    (1924, "172.19.24.0/24", "Security LAN Pool"),
    (1925, "172.19.25.0/24", "Store LAN Pool"),
    (1926, "172.19.26.0/24", "Old Accounts LAN Pool"),
    (1927, "172.19.27.0/24", "Guest House LAN Pool"),
    (1928, "172.19.28.0/24", "New Accounts LAN Pool"),
    (1929, "172.19.29.0/24", "Purchase LAN Pool"),
    (1930, "172.19.30.0/24", "P&D LAN Pool"),
    (1931, "172.19.31.0/24", "ACRC LAN Pool"),
    (1932, "172.19.32.0/24", "MIS LAN Pool"),
    (1933, "172.19.33.0/24", "Library LAN Pool"),
    (1934, "172.19.34.0/24", "UMW LAN Pool"),
    (1935, "172.19.35.0/24", "PSTC-L Pool"),
    (1936, "172.19.36.0/24", "ILO"),
    (1937, "172.19.37.0/24", "Wireless LAN Pool"),
    (1938, "172.19.38.0/24", "Camera Pool"),
    (1939, "172.19.39.0/24", "IP Phone"),
    (1940, "172.19.40.0/24", "DTSA LAN"),
    (1941, "172.19.41.0/24", "Exchange ROOM"),
    (1942, "172.19.42.0/24", "CEPS"),
];

fn mgmt(last_octet: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 19, 10, last_octet)
}

fn device(
    id: String,
    name: String,
    last_octet: u8,
    device_type: DeviceType,
    location: Option<&str>,
    status: DeviceStatus,
) -> NetworkDevice {
    NetworkDevice {
        id,
        name,
        ip: mgmt(last_octet),
        device_type,
        location: location.map(str::to_owned),
        status,
        department: None,
    }
}

// ── Seed builders ────────────────────────────────────────────────

/// Firewall, core switch and routers 1-48 (10.19.10.1-50).
fn core_devices() -> Vec<NetworkDevice> {
    let fixed = [
        ("fw-01", "Firewall", 1, DeviceStatus::Online),
        ("cs-01", "Core Switch", 2, DeviceStatus::Online),
        ("r-01", "Router-1", 3, DeviceStatus::Online),
        ("r-02", "Router-2", 4, DeviceStatus::Offline),
        ("r-03", "Router-3", 5, DeviceStatus::Offline),
    ];

    let mut devices: Vec<_> = fixed
        .into_iter()
        .map(|(id, name, octet, status)| {
            device(id.into(), name.into(), octet, DeviceType::Core, None, status)
        })
        .collect();

    // Reserved routers, provisioned but not yet deployed.
    devices.extend((4u8..=48).map(|n| {
        device(
            format!("r-{n:02}"),
            format!("Router-{n}"),
            n + 2,
            DeviceType::Core,
            None,
            DeviceStatus::Offline,
        )
    }));
    devices
}

/// Wireless controller plus 29 access points (10.19.10.51-80).
fn access_points() -> Vec<NetworkDevice> {
    let controller = device(
        "ap-01".into(),
        "AP-01 (Controller)".into(),
        51,
        DeviceType::AccessController,
        Some("MIS FF"),
        DeviceStatus::Online,
    );

    std::iter::once(controller)
        .chain(ACCESS_POINT_LOCATIONS.iter().zip(2u8..).map(|(location, n)| {
            let status = if n == 4 {
                DeviceStatus::Warning
            } else {
                DeviceStatus::Online
            };
            device(
                format!("ap-{n:02}"),
                format!("AP-{n:02}"),
                50 + n,
                DeviceType::AccessPoint,
                Some(location),
                status,
            )
        }))
        .collect()
}

fn distribution_devices() -> Vec<NetworkDevice> {
    DISTRIBUTION_SWITCHES
        .iter()
        .map(|&(n, octet, location)| {
            device(
                format!("sw-{n:02}"),
                format!("Access Switch-{n}"),
                octet,
                DeviceType::Distribution,
                Some(location),
                DeviceStatus::Online,
            )
        })
        .collect()
}

// ── Catalog ──────────────────────────────────────────────────────

/// Read-only registry of devices, VLANs and command templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    devices: Vec<NetworkDevice>,
    vlans: Vec<VlanConfig>,
    templates: Vec<String>,
}

impl Catalog {
    /// The built-in campus inventory.
    pub fn builtin() -> Self {
        let mut devices = core_devices();
        devices.extend(access_points());
        devices.extend(distribution_devices());

        let vlans = VLANS
            .iter()
            .map(|&(id, network, description)| VlanConfig {
                id,
                network: network.to_owned(),
                description: description.to_owned(),
            })
            .collect();

        Self {
            devices,
            vlans,
            templates: COMMAND_TEMPLATES.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    /// Build a catalog from explicit parts.
    pub fn new(
        devices: Vec<NetworkDevice>,
        vlans: Vec<VlanConfig>,
        templates: Vec<String>,
    ) -> Self {
        Self {
            devices,
            vlans,
            templates,
        }
    }

    /// Devices selectable under `category`. Offline core devices are
    /// hidden from selection.
    pub fn list_devices(&self, category: DeviceType) -> Vec<&NetworkDevice> {
        self.devices
            .iter()
            .filter(|d| d.device_type == category)
            .filter(|d| category != DeviceType::Core || d.status.is_online())
            .collect()
    }

    pub fn all_devices(&self) -> &[NetworkDevice] {
        &self.devices
    }

    pub fn find_device(&self, id: &str) -> Option<&NetworkDevice> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Look up by the `"Name (ip)"` label carried on outputs and alerts.
    pub fn find_by_label(&self, label: &str) -> Option<&NetworkDevice> {
        self.devices.iter().find(|d| d.label() == label)
    }

    pub fn list_vlans(&self) -> &[VlanConfig] {
        &self.vlans
    }

    pub fn find_vlan(&self, id: u16) -> Option<&VlanConfig> {
        self.vlans.iter().find(|v| v.id == id)
    }

    pub fn list_command_templates(&self) -> &[String] {
        &self.templates
    }

    pub fn is_template(&self, command: &str) -> bool {
        self.templates.iter().any(|t| t == command)
    }

    pub fn health(&self) -> HealthSummary {
        HealthSummary::from_devices(&self.devices)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_inventory_sizes() {
        let catalog = Catalog::builtin();
        let count = |t| {
            catalog
                .all_devices()
                .iter()
                .filter(|d| d.device_type == t)
                .count()
        };
        assert_eq!(count(DeviceType::Core), 50);
        assert_eq!(count(DeviceType::AccessController), 1);
        assert_eq!(count(DeviceType::AccessPoint), 29);
        assert_eq!(count(DeviceType::Distribution), 26);
        assert_eq!(catalog.list_vlans().len(), 32);
        assert_eq!(catalog.list_command_templates().len(), 14);
    }

    #[test]
    fn device_ids_and_addresses_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<_> = catalog.all_devices().iter().map(|d| &d.id).collect();
        let ips: HashSet<_> = catalog.all_devices().iter().map(|d| d.ip).collect();
        assert_eq!(ids.len(), catalog.all_devices().len());
        assert_eq!(ips.len(), catalog.all_devices().len());
    }

    #[test]
    fn reserved_routers_follow_addressing_plan() {
        let catalog = Catalog::builtin();
        let r04 = catalog.find_device("r-04").unwrap();
        assert_eq!(r04.ip, Ipv4Addr::new(10, 19, 10, 6));
        let r48 = catalog.find_device("r-48").unwrap();
        assert_eq!(r48.name, "Router-48");
        assert_eq!(r48.ip, Ipv4Addr::new(10, 19, 10, 50));
        assert_eq!(r48.status, DeviceStatus::Offline);
    }

    #[test]
    fn core_listing_hides_offline_devices() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog
            .list_devices(DeviceType::Core)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["fw-01", "cs-01", "r-01"]);
    }

    #[test]
    fn access_point_listing_keeps_warning_devices() {
        let catalog = Catalog::builtin();
        let aps = catalog.list_devices(DeviceType::AccessPoint);
        assert_eq!(aps.len(), 29);
        let ap04 = aps.iter().find(|d| d.id == "ap-04").unwrap();
        assert_eq!(ap04.status, DeviceStatus::Warning);
        assert_eq!(ap04.location.as_deref(), Some("ACRC GF-2"));
        let ap15 = catalog.find_device("ap-15").unwrap();
        assert_eq!(ap15.label(), "AP-15 (10.19.10.65)");
    }

    #[test]
    fn distribution_numbering_skips_undeployed_switches() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_device("sw-24").is_none());
        let sw29 = catalog.find_device("sw-29").unwrap();
        assert_eq!(sw29.ip, Ipv4Addr::new(10, 19, 10, 181));
    }

    #[test]
    fn every_vlan_subnet_parses() {
        let catalog = Catalog::builtin();
        assert!(catalog.list_vlans().iter().all(|v| v.subnet().is_some()));
        assert_eq!(catalog.find_vlan(1937).unwrap().description, "Wireless LAN Pool");
        assert!(catalog.find_vlan(1911).is_none());
    }

    #[test]
    fn health_counts_whole_inventory() {
        let health = Catalog::builtin().health();
        assert_eq!(health.total, 106);
        assert_eq!(health.warning, 1);
        assert_eq!(health.offline, 47);
        assert_eq!(health.online, 58);
        assert_eq!(health.online_pct(), 55);
    }
}
