// ── Authorization oracle ──
//
// Pure allow-list matching. Prefix entries use numeric containment via
// `ipnetwork`, so `192.168.1.5` never matches `192.168.10.5/24`.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// One allow-list entry: a single address or a CIDR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowEntry {
    Exact(Ipv4Addr),
    Prefix(Ipv4Network),
}

impl AllowEntry {
    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        match self {
            Self::Exact(allowed) => *allowed == addr,
            Self::Prefix(net) => net.contains(addr),
        }
    }
}

impl FromStr for AllowEntry {
    type Err = CoreError;

    /// Accepts `a.b.c.d` or `a.b.c.d/n` with `n` in `0..=32`. Host bits in
    /// a prefix base are allowed and ignored for matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::validation(format!("invalid allow-list entry: {s:?}"));

        match s.split_once('/') {
            None => s.parse().map(Self::Exact).map_err(|_| invalid()),
            Some((addr, len)) => {
                let addr: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
                let len: u8 = len.parse().map_err(|_| invalid())?;
                Ipv4Network::new(addr, len)
                    .map(Self::Prefix)
                    .map_err(|_| invalid())
            }
        }
    }
}

impl fmt::Display for AllowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(addr) => write!(f, "{addr}"),
            Self::Prefix(net) => write!(f, "{}/{}", net.ip(), net.prefix()),
        }
    }
}

impl Serialize for AllowEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AllowEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether `caller_ip` is allowed by any entry. Malformed input is
/// never authorized.
pub fn is_authorized(caller_ip: &str, allow_list: &[AllowEntry]) -> bool {
    caller_ip
        .parse::<Ipv4Addr>()
        .is_ok_and(|addr| allow_list.iter().any(|entry| entry.matches(addr)))
}

/// Verdict computed once at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Granted { caller: Ipv4Addr },
    /// Caller resolved but not on the allow-list.
    Refused { caller: Ipv4Addr },
    /// Caller could not be resolved; fails closed.
    Unresolved { reason: String },
}

impl Authorization {
    pub fn evaluate(caller_ip: &str, allow_list: &[AllowEntry]) -> Self {
        match caller_ip.parse::<Ipv4Addr>() {
            Ok(caller) if is_authorized(caller_ip, allow_list) => Self::Granted { caller },
            Ok(caller) => Self::Refused { caller },
            Err(_) => Self::Unresolved {
                reason: format!("caller address is not IPv4: {caller_ip:?}"),
            },
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    pub fn caller(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Granted { caller } | Self::Refused { caller } => Some(*caller),
            Self::Unresolved { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> Vec<AllowEntry> {
        entries.iter().map(|e| e.parse().unwrap()).collect()
    }

    #[test]
    fn prefix_uses_numeric_containment() {
        let allow = list(&["192.168.10.5/24"]);
        assert!(is_authorized("192.168.10.200", &allow));
        assert!(is_authorized("192.168.10.5", &allow));
        assert!(!is_authorized("192.168.11.5", &allow));
        assert!(!is_authorized("192.168.1.5", &allow));
    }

    #[test]
    fn exact_entry_matches_only_itself() {
        let allow = list(&["39.46.240.230"]);
        assert!(is_authorized("39.46.240.230", &allow));
        assert!(!is_authorized("39.46.240.23", &allow));
        assert!(!is_authorized("39.46.240.2300", &allow));
    }

    #[test]
    fn malformed_caller_fails_closed() {
        let allow = list(&["0.0.0.0/0"]);
        assert!(!is_authorized("", &allow));
        assert!(!is_authorized("not-an-ip", &allow));
        assert!(!is_authorized("2001:db8::1", &allow));
        assert!(!is_authorized(" 10.0.0.1", &allow));
    }

    #[test]
    fn empty_list_authorizes_nobody() {
        assert!(!is_authorized("10.19.10.1", &[]));
    }

    #[test]
    fn malformed_entries_are_rejected() {
        for bad in ["10.19.10", "10.19.10.0/33", "10.19.10.0/", "host/24", ""] {
            assert!(bad.parse::<AllowEntry>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn entries_display_as_configured() {
        for raw in ["10.19.10.0", "192.168.10.5/24"] {
            assert_eq!(raw.parse::<AllowEntry>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn verdict_distinguishes_refused_from_unresolved() {
        let allow = list(&["10.19.10.0/24"]);
        assert!(Authorization::evaluate("10.19.10.9", &allow).is_granted());
        assert_eq!(
            Authorization::evaluate("10.19.11.9", &allow),
            Authorization::Refused {
                caller: Ipv4Addr::new(10, 19, 11, 9)
            }
        );
        assert!(matches!(
            Authorization::evaluate("bogus", &allow),
            Authorization::Unresolved { .. }
        ));
    }
}
