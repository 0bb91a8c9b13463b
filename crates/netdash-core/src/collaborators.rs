// ── External collaborators ──
//
// The session talks to the outside world only through these traits.
// Implementations live in the binary (or in tests).

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::error::CoreError;
use crate::export::ExportDocument;

/// Told once per denied gated action.
pub trait UnauthorizedNotifier: Send + Sync {
    fn notify(&self);
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), CoreError>;
}

/// Persists a finished export somewhere the user can reach it.
pub trait Downloader: Send + Sync {
    fn save(&self, document: &ExportDocument) -> Result<(), CoreError>;
}

/// Finds the caller's public address. Called once per session start;
/// the returned string is validated by the session.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self) -> BoxFuture<'_, Result<String, CoreError>>;
}

impl CallerResolver for netdash_api::IpEchoClient {
    fn resolve(&self) -> BoxFuture<'_, Result<String, CoreError>> {
        async move {
            let ip = self.fetch_caller_ip().await?;
            Ok(ip.to_string())
        }
        .boxed()
    }
}

/// A caller address pinned up front, e.g. from `--caller-ip`.
#[derive(Debug, Clone)]
pub struct FixedCaller(pub String);

impl CallerResolver for FixedCaller {
    fn resolve(&self) -> BoxFuture<'_, Result<String, CoreError>> {
        let addr = self.0.clone();
        async move { Ok(addr) }.boxed()
    }
}
