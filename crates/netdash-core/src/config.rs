// ── Runtime session configuration ──
//
// Everything a `Session` needs from the outside world, already
// validated. Built by the CLI from `netdash-config`; core never reads
// config files or environment variables itself.

use std::time::Duration;

use secrecy::SecretString;

use crate::auth::AllowEntry;

/// Default number of retained history entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
/// Default filename prefix for bulk exports.
pub const DEFAULT_FILE_PREFIX: &str = "network_export";

/// Progress machine tuning for the simulated scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Percentage points added per tick. Must divide 100 evenly.
    pub step: u8,
    pub tick: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            step: 5,
            tick: Duration::from_millis(100),
        }
    }
}

/// Device login used to build a connection plan. Never defaulted.
#[derive(Debug, Clone)]
pub struct DeviceCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Configuration for one dashboard session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub allow_list: Vec<AllowEntry>,
    pub credentials: Option<DeviceCredentials>,
    pub history_limit: usize,
    /// Start with the sample history, outputs and alerts.
    pub seed_sample_data: bool,
    pub scan: ScanSettings,
    pub assistant_delay: Duration,
    pub file_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            allow_list: Vec::new(),
            credentials: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            seed_sample_data: true,
            scan: ScanSettings::default(),
            assistant_delay: Duration::from_secs(1),
            file_prefix: DEFAULT_FILE_PREFIX.to_owned(),
        }
    }
}
