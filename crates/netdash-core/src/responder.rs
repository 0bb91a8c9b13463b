// ── Simulated device responses ──
//
// No command ever reaches a device. Output text comes from a canned
// table keyed by template; reachability comes from catalog status.

use crate::model::{NetworkDevice, OutputStatus};

/// Device reference recorded when no device is selected.
pub const UNASSIGNED_DEVICE: &str = "unassigned";

pub(crate) const TIMEOUT_OUTPUT: &str = "Error: Connection timeout";

pub(crate) const SHOW_VERSION: &str = "\
Cisco IOS Software, CBS350 Software (CBS350-UNIVERSALK9-M), Version 2.5.5.69, RELEASE SOFTWARE (fc1)
Technical Support: http://www.cisco.com/techsupport
Copyright (c) 1986-2021 by Cisco Systems, Inc.
Compiled Wed 21-Apr-21 02:15 by prod_rel_team

System Bootstrap Version: 1.0.3.0

Hardware Version: 1.0
System Serial Number: FCW2303D0GZ
System Description: CBS350-24P-4G

Configuration register is 0x1";

pub(crate) const SHOW_INTERFACES_STATUS: &str = "\
Port      Name               Status       Vlan       Duplex  Speed Type
Gi1/0/1                      connected    1          a-full  a-1000 1000BaseT
Gi1/0/2                      connected    1          a-full  a-1000 1000BaseT
Gi1/0/3                      notconnect   1            auto   auto 1000BaseT
Gi1/0/4                      notconnect   1            auto   auto 1000BaseT
Gi1/0/5                      connected    1          a-full  a-1000 1000BaseT";

const SHOW_VLAN: &str = "\
VLAN Name                             Status    Ports
---- -------------------------------- --------- -------------------------------
1    default                          active    Gi1/0/3, Gi1/0/4
1910 MGMT                             active    Gi1/0/1, Gi1/0/2
1937 WIRELESS                         active    Gi1/0/5";

const SHOW_IP_ROUTE: &str = "\
Codes: C - connected, S - static

Gateway of last resort is 10.19.10.1 to network 0.0.0.0

S*    0.0.0.0/0 [1/0] via 10.19.10.1
C     10.19.10.0/24 is directly connected, vlan 1910";

const SHOW_SYSTEM: &str = "\
System Description:       CBS350-24P-4G 24-Port Gigabit PoE Managed Switch
System Up Time (days,hour:min:sec): 41,07:12:55
System Contact:
System Name:              switch
System Location:";

const SHOW_RUNNING_CONFIG: &str = "\
Building configuration...

hostname switch
!
interface vlan 1910
 ip address dhcp
!
end";

const SHOW_MAC_ADDRESS_TABLE: &str = "\
Aging time is 300 sec

  Vlan        Mac Address         Port       Type
-------- --------------------- ---------- ----------
  1910     00:1b:54:c2:10:02     gi1/0/1    dynamic";

const SHOW_SPANNING_TREE: &str = "\
Spanning tree enabled mode RSTP
Default port cost method:  long

  Root ID    Priority    32768
             This switch is the root";

const SHOW_PORT_SECURITY: &str = "\
Port     Status    Learning   Action   Maximum  Trap
-------- --------- ---------- -------- -------- ------
gi1/0/1  Disabled  Lock       -        1        Disabled";

const SHOW_USERS: &str = "\
Username   Protocol   Location
---------- ---------- ----------------
admin      SSH        10.19.10.2";

const PING: &str = "\
Pinging 10.19.10.1 with 18 bytes of data:

4 packets transmitted, 4 packets received, 0% packet loss";

const TRACEROUTE: &str = "\
Tracing the route to 10.19.10.1

 1 10.19.10.1   <1 ms  <1 ms  <1 ms";

/// Canned output for a known template, `None` for anything else.
fn canned(command: &str) -> Option<&'static str> {
    let text = match command {
        "show version" => SHOW_VERSION,
        "show interfaces status" => SHOW_INTERFACES_STATUS,
        "show vlan" => SHOW_VLAN,
        "show ip route" => SHOW_IP_ROUTE,
        "show system" => SHOW_SYSTEM,
        "show running-config" => SHOW_RUNNING_CONFIG,
        "show mac address-table" => SHOW_MAC_ADDRESS_TABLE,
        "show spanning-tree" => SHOW_SPANNING_TREE,
        "show port-security" => SHOW_PORT_SECURITY,
        "show users" => SHOW_USERS,
        "show log" => "Buffered log is empty",
        "show environment" => "Fan is OK\nTemperature is OK (36C)\nPower supply is OK",
        "ping" => PING,
        "traceroute" => TRACEROUTE,
        _ => return None,
    };
    Some(text)
}

/// Output text and status for `command` sent to `target`.
pub(crate) fn respond(command: &str, target: Option<&NetworkDevice>) -> (String, OutputStatus) {
    if target.is_some_and(|d| d.status.is_unreachable()) {
        return (TIMEOUT_OUTPUT.to_owned(), OutputStatus::Error);
    }

    let text = canned(command).map_or_else(
        || format!("Command accepted: {command}"),
        str::to_owned,
    );
    (text, OutputStatus::Success)
}

pub(crate) fn device_label(target: Option<&NetworkDevice>) -> String {
    target.map_or_else(|| UNASSIGNED_DEVICE.to_owned(), NetworkDevice::label)
}
