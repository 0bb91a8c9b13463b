// ── Core error types ──
//
// User-facing errors from netdash-core. An unauthorized attempt is NOT
// an error: the gate answers it with `ActionResult::Denied` and a
// notifier call. Everything here leaves session state unchanged.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("A scan is already in progress ({progress}%)")]
    ScanInProgress { progress: u8 },

    #[error("Caller address resolution failed: {message}")]
    Resolution { message: String },

    #[error("Clipboard write failed: {message}")]
    Clipboard { message: String },

    #[error("Download failed: {message}")]
    Download { message: String },

    #[error("Export serialization failed: {message}")]
    Export { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn not_found(entity_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netdash_api::Error> for CoreError {
    fn from(err: netdash_api::Error) -> Self {
        match err {
            netdash_api::Error::MalformedAddress { raw } => CoreError::Resolution {
                message: format!("echo service returned a non-IPv4 value: {raw:?}"),
            },
            netdash_api::Error::Timeout { timeout_secs } => CoreError::Resolution {
                message: format!("echo service timed out after {timeout_secs}s"),
            },
            other => CoreError::Resolution {
                message: other.to_string(),
            },
        }
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Export {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Export {
            message: err.to_string(),
        }
    }
}
