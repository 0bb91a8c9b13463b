//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use netdash_config::ConfigError;
use netdash_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authorization ────────────────────────────────────────────────
    #[error("Not authorized to {action}")]
    #[diagnostic(
        code(netdash::denied),
        help(
            "Mutating commands need the caller address on the allow-list.\n\
             Check the verdict with: netdash auth\n\
             Then add the address to [authorization].allow_list in the config file."
        )
    )]
    Denied { action: String },

    #[error("Could not resolve the caller address: {message}")]
    #[diagnostic(
        code(netdash::resolution_failed),
        help(
            "Check network access to the echo service, raise --timeout,\n\
             or pin the address with --caller-ip."
        )
    )]
    Resolution { message: String },

    #[error("No device password configured for user '{username}'")]
    #[diagnostic(
        code(netdash::no_credentials),
        help(
            "Store one with: netdash config set-password\n\
             Or set NETDASH_DEVICE_PASSWORD."
        )
    )]
    NoCredentials { username: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(netdash::not_found),
        help("Run: netdash {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("A scan is already running ({progress}%)")]
    #[diagnostic(
        code(netdash::scan_in_progress),
        help("Wait for it to finish or stop it with: alerts cancel")
    )]
    ScanInProgress { progress: u8 },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netdash::validation))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(netdash::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Side effects ─────────────────────────────────────────────────
    #[error("Could not write export: {message}")]
    #[diagnostic(
        code(netdash::export),
        help("Check that [export].directory exists and is writable.")
    )]
    Export { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(netdash::internal))]
    Internal { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(netdash::config),
        help("Inspect the file with: netdash config show")
    )]
    Config(Box<ConfigError>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Denied { .. } => exit_code::PERMISSION,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Resolution { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ScanInProgress { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn prompt(err: impl std::fmt::Display) -> Self {
        Self::Validation {
            field: "interactive".into(),
            reason: format!("prompt failed: {err}"),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { username } => Self::NoCredentials { username },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                let list_command = match entity_type.as_str() {
                    "output" => "outputs list",
                    "alert" => "alerts list",
                    "vlan" => "vlans list",
                    _ => "devices list",
                };
                CliError::NotFound {
                    list_command: list_command.into(),
                    resource_type: entity_type,
                    identifier,
                }
            }

            CoreError::ScanInProgress { progress } => CliError::ScanInProgress { progress },

            CoreError::Resolution { message } => CliError::Resolution { message },

            CoreError::Download { message } | CoreError::Export { message } => {
                CliError::Export { message }
            }

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Clipboard { message } | CoreError::Internal(message) => {
                CliError::Internal { message }
            }
        }
    }
}
