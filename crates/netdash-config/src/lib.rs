//! Configuration for the netdash CLI.
//!
//! TOML file + `NETDASH_` environment layering, device credential
//! resolution (env + keyring + plaintext), and translation to
//! `netdash_core::SessionConfig`. Nothing here is compiled-in policy:
//! the default allow-list is empty and no credentials ship by default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use netdash_core::config::{DEFAULT_FILE_PREFIX, DEFAULT_HISTORY_LIMIT};
use netdash_core::{AllowEntry, DeviceCredentials, ScanSettings, SessionConfig};

/// Keyring service name for stored device passwords.
pub const KEYRING_SERVICE: &str = "netdash";
/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "NETDASH_CONFIG";
/// Device password, checked before the keyring.
pub const PASSWORD_ENV: &str = "NETDASH_DEVICE_PASSWORD";
/// Device username, used when the config file has none.
pub const USERNAME_ENV: &str = "NETDASH_DEVICE_USERNAME";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no device password configured for user '{username}'")]
    NoCredentials { username: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub authorization: AuthorizationSection,

    #[serde(default)]
    pub credentials: CredentialsSection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub export: ExportSection,
}

/// Output and network defaults for the CLI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Caller-resolution timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthorizationSection {
    /// Exact addresses (`a.b.c.d`) or CIDR blocks (`a.b.c.d/n`).
    #[serde(default)]
    pub allow_list: Vec<String>,

    /// Echo endpoint answering `{"ip": "..."}`.
    #[serde(default = "default_resolver_url")]
    pub resolver_url: String,
}

impl Default for AuthorizationSection {
    fn default() -> Self {
        Self {
            allow_list: Vec::new(),
            resolver_url: default_resolver_url(),
        }
    }
}

fn default_resolver_url() -> String {
    netdash_api::DEFAULT_ECHO_URL.into()
}

/// Device login. The password is best kept in the keyring.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CredentialsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Plaintext password (prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SessionSection {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_true")]
    pub seed_sample_data: bool,

    #[serde(default = "default_scan_step")]
    pub scan_step: u8,

    #[serde(default = "default_scan_tick_ms")]
    pub scan_tick_ms: u64,

    #[serde(default = "default_assistant_delay_ms")]
    pub assistant_delay_ms: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            seed_sample_data: true,
            scan_step: default_scan_step(),
            scan_tick_ms: default_scan_tick_ms(),
            assistant_delay_ms: default_assistant_delay_ms(),
        }
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
fn default_true() -> bool {
    true
}
fn default_scan_step() -> u8 {
    ScanSettings::default().step
}
fn default_scan_tick_ms() -> u64 {
    100
}
fn default_assistant_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExportSection {
    /// Where exports are written. Defaults to the current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `NETDASH_CONFIG`, then platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "netdash", "netdash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netdash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, still layering `NETDASH_*` env vars.
///
/// Nested keys use a double underscore: `NETDASH_SESSION__HISTORY_LIMIT=20`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETDASH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_key(username: &str) -> String {
    format!("{username}/password")
}

/// Store a device password in the system keyring.
pub fn store_password(username: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(username))?;
    entry.set_password(password)?;
    Ok(())
}

fn keyring_password(username: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_key(username))
        .and_then(|entry| entry.get_password())
        .ok()
}

/// Resolve device credentials: env var, then keyring, then plaintext.
///
/// `Ok(None)` when no username is configured at all; a username without
/// any password source is [`ConfigError::NoCredentials`].
pub fn resolve_credentials(
    section: &CredentialsSection,
) -> Result<Option<DeviceCredentials>, ConfigError> {
    resolve_credentials_with(section, |name| std::env::var(name).ok(), keyring_password)
}

fn resolve_credentials_with(
    section: &CredentialsSection,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<Option<DeviceCredentials>, ConfigError> {
    let Some(username) = section.username.clone().or_else(|| env(USERNAME_ENV)) else {
        return Ok(None);
    };

    let password = section
        .password_env
        .as_deref()
        .and_then(&env)
        .or_else(|| env(PASSWORD_ENV))
        .or_else(|| keyring(&username))
        .or_else(|| section.password.clone())
        .ok_or_else(|| ConfigError::NoCredentials {
            username: username.clone(),
        })?;

    Ok(Some(DeviceCredentials {
        username,
        password: SecretString::from(password),
    }))
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Parsed allow-list. Any malformed entry rejects the whole list.
    pub fn allow_list(&self) -> Result<Vec<AllowEntry>, ConfigError> {
        self.authorization
            .allow_list
            .iter()
            .map(|raw| {
                raw.trim()
                    .parse::<AllowEntry>()
                    .map_err(|e| ConfigError::validation("authorization.allow_list", e.to_string()))
            })
            .collect()
    }

    pub fn resolver_url(&self) -> Result<url::Url, ConfigError> {
        self.authorization.resolver_url.parse().map_err(|_| {
            ConfigError::validation(
                "authorization.resolver_url",
                format!("invalid URL: {}", self.authorization.resolver_url),
            )
        })
    }

    /// Directory exports are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Build a validated `SessionConfig`, resolving credentials.
    pub fn to_session_config(&self) -> Result<SessionConfig, ConfigError> {
        let credentials = resolve_credentials(&self.credentials)?;
        self.session_config_with(credentials)
    }

    fn session_config_with(
        &self,
        credentials: Option<DeviceCredentials>,
    ) -> Result<SessionConfig, ConfigError> {
        let session = &self.session;

        if session.history_limit == 0 {
            return Err(ConfigError::validation(
                "session.history_limit",
                "must be at least 1",
            ));
        }
        if session.scan_step == 0 || session.scan_step > 100 || 100 % session.scan_step != 0 {
            return Err(ConfigError::validation(
                "session.scan_step",
                format!("must divide 100 evenly, got {}", session.scan_step),
            ));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(ConfigError::validation(
                "export.file_prefix",
                "cannot be empty",
            ));
        }

        Ok(SessionConfig {
            allow_list: self.allow_list()?,
            credentials,
            history_limit: session.history_limit,
            seed_sample_data: session.seed_sample_data,
            scan: ScanSettings {
                step: session.scan_step,
                tick: Duration::from_millis(session.scan_tick_ms),
            },
            assistant_delay: Duration::from_millis(session.assistant_delay_ms),
            file_prefix: self.export.file_prefix.clone(),
        })
    }
}
