use thiserror::Error;

/// Top-level error type for the `netdash-api` crate.
///
/// Covers every failure mode of the echo lookup: transport, HTTP status,
/// body decoding, and a body that decodes but does not carry a usable
/// IPv4 address. `netdash-core` folds all of these into a resolution
/// failure, which the session treats as "unauthorized".
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Non-success HTTP status from the echo service.
    #[error("Echo service returned HTTP {status}")]
    Status { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The service answered, but not with a dotted-quad IPv4 address.
    #[error("Malformed caller address: {raw:?}")]
    MalformedAddress { raw: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth reporting as
    /// "service unreachable" rather than "service misbehaving".
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Status { status } => *status >= 500,
            _ => false,
        }
    }
}
