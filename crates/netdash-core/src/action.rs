// ── Action API ──
//
// Every state change flows through a unified `Action` enum. The
// session checks authorization once, up front, for every variant.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::export::{ExportFormat, ExportRequest};
use crate::model::{ChatMessage, CommandOutput, DeviceType, EntityId, NetworkDevice};
use crate::selection::{ConnectionMethod, ConnectionPlan};

/// All gated operations on a session.
#[derive(Debug, Clone, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    // ── Device selection ─────────────────────────────────────────────
    SelectCategory(DeviceType),
    SelectDevice {
        id: String,
    },
    SetConnectionMethod(ConnectionMethod),
    Connect,

    // ── Commands ─────────────────────────────────────────────────────
    SelectTemplate {
        command: String,
    },
    EditCustom {
        text: String,
    },
    SelectFromHistory {
        index: usize,
    },
    Send,

    // ── Outputs ──────────────────────────────────────────────────────
    DeleteOutput {
        id: EntityId,
    },
    ClearOutputs,
    CopyOutput {
        id: EntityId,
    },
    ExportOutput {
        id: EntityId,
        format: ExportFormat,
    },

    // ── Alerts ───────────────────────────────────────────────────────
    ResolveAlert {
        id: EntityId,
    },
    RunScan,
    CancelScan,

    // ── Assistant ────────────────────────────────────────────────────
    SendMessage {
        text: String,
    },
    ToggleVoice,

    // ── Export ───────────────────────────────────────────────────────
    Export(ExportRequest),
}

impl Action {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Published on the session's scan channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanStatus {
    #[default]
    Idle,
    Running {
        progress: u8,
    },
    Completed {
        alert_id: EntityId,
    },
    Cancelled {
        progress: u8,
    },
}

impl ScanStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Handle to an in-flight scan.
#[derive(Debug)]
pub struct ScanHandle {
    pub(crate) status: watch::Receiver<ScanStatus>,
    pub(crate) task: JoinHandle<()>,
}

impl ScanHandle {
    /// Progress updates, starting from the current status.
    pub fn subscribe(&self) -> watch::Receiver<ScanStatus> {
        self.status.clone()
    }

    /// Wait for the driver to stop and return where it ended.
    pub async fn wait(self) -> ScanStatus {
        if let Err(e) = self.task.await {
            warn!(error = %e, "scan driver task failed");
        }
        self.status.borrow().clone()
    }
}

/// Handle to a pending assistant reply.
#[derive(Debug)]
pub struct ReplyHandle {
    pub(crate) task: JoinHandle<Option<ChatMessage>>,
}

impl ReplyHandle {
    /// The delivered reply, `None` if the session shut down first.
    pub async fn wait(self) -> Option<ChatMessage> {
        match self.task.await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "assistant reply task failed");
                None
            }
        }
    }
}

/// Outcome of an [`Action`].
#[derive(Debug)]
pub enum ActionResult {
    Ok,
    /// Caller is not authorized. Nothing changed.
    Denied,
    DeviceSelected(NetworkDevice),
    Connected(ConnectionPlan),
    Sent(CommandOutput),
    Deleted(CommandOutput),
    Cleared {
        removed: usize,
    },
    /// `delivered` is false when the clipboard refused the text.
    Copied {
        delivered: bool,
    },
    Exported {
        filename: String,
        mime_type: &'static str,
        size: usize,
    },
    AlertResolved {
        changed: bool,
    },
    ScanStarted(ScanHandle),
    /// `progress` is `None` when no scan was running.
    ScanCancelled {
        progress: Option<u8>,
    },
    ReplyPending(ReplyHandle),
    VoiceToggled {
        listening: bool,
    },
}

impl ActionResult {
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }
}
