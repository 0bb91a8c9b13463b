// ── Session facade ──
//
// Owns all dashboard state for one caller. Reads hand out cloned
// snapshots; writes go through `execute`, which applies the
// authorization gate before anything else.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::{Action, ActionResult, ReplyHandle, ScanHandle, ScanStatus};
use crate::alerts::{AlertRegistry, ScanTick};
use crate::assistant::Assistant;
use crate::auth::Authorization;
use crate::catalog::Catalog;
use crate::collaborators::{CallerResolver, Clipboard, Downloader, UnauthorizedNotifier};
use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::export::{self, ExportContext, ExportDocument};
use crate::history::{CommandStore, Composition};
use crate::ledger::OutputLedger;
use crate::model::{
    AiAlert, AlertCounts, AlertFilter, ChatMessage, CommandOutput, DeviceType, EntityId,
    NetworkDevice, OutputStats, VlanConfig,
};
use crate::responder;
use crate::scheduler::Scheduler;
use crate::seed;
use crate::selection::DeviceSelection;

/// Side-effect endpoints a session is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub notifier: Arc<dyn UnauthorizedNotifier>,
    pub clipboard: Arc<dyn Clipboard>,
    pub downloader: Arc<dyn Downloader>,
    pub scheduler: Arc<dyn Scheduler>,
}

/// Mutable per-session state, guarded by one FIFO mutex.
struct SessionState {
    selection: DeviceSelection,
    commands: CommandStore,
    ledger: OutputLedger,
    alerts: AlertRegistry,
    assistant: Assistant,
    selected_vlan: Option<u16>,
    scan_cancel: Option<CancellationToken>,
}

impl SessionState {
    fn new(config: &SessionConfig) -> Self {
        let now = Utc::now();
        let (commands, ledger, alerts) = if config.seed_sample_data {
            let mut ledger = OutputLedger::new();
            for output in seed::sample_outputs(now).into_iter().rev() {
                ledger.record(output);
            }
            ledger.select(&EntityId::from("1"));
            (
                CommandStore::with_history(config.history_limit, seed::SAMPLE_HISTORY),
                ledger,
                AlertRegistry::with_alerts(seed::sample_alerts(now)),
            )
        } else {
            (
                CommandStore::new(config.history_limit),
                OutputLedger::new(),
                AlertRegistry::new(),
            )
        };

        Self {
            selection: DeviceSelection::default(),
            commands,
            ledger,
            alerts,
            assistant: Assistant::new(),
            selected_vlan: None,
            scan_cancel: None,
        }
    }
}

struct SessionInner {
    config: SessionConfig,
    catalog: Arc<Catalog>,
    authorization: Authorization,
    collaborators: Collaborators,
    state: Mutex<SessionState>,
    scan_status: watch::Sender<ScanStatus>,
    cancel: CancellationToken,
}

/// One dashboard session.
///
/// Cheaply cloneable via `Arc<SessionInner>`. The authorization verdict
/// is fixed at construction; every [`Action`] is checked against it.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Build a session with an already-computed verdict.
    pub fn new(
        config: SessionConfig,
        catalog: Arc<Catalog>,
        collaborators: Collaborators,
        authorization: Authorization,
    ) -> Self {
        let state = SessionState::new(&config);
        let (scan_status, _) = watch::channel(ScanStatus::Idle);

        Self {
            inner: Arc::new(SessionInner {
                config,
                catalog,
                authorization,
                collaborators,
                state: Mutex::new(state),
                scan_status,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Resolve the caller once and start a session. Resolution failure
    /// leaves the session unauthorized; it is never an error.
    pub async fn start(
        config: SessionConfig,
        catalog: Arc<Catalog>,
        collaborators: Collaborators,
        resolver: &dyn CallerResolver,
    ) -> Self {
        let authorization = match resolver.resolve().await {
            Ok(caller) => Authorization::evaluate(&caller, &config.allow_list),
            Err(e) => {
                warn!(error = %e, "caller resolution failed; session is read-only");
                Authorization::Unresolved {
                    reason: e.to_string(),
                }
            }
        };

        match &authorization {
            Authorization::Granted { caller } => info!(%caller, "session started (authorized)"),
            Authorization::Refused { caller } => {
                info!(%caller, "session started (caller not on allow-list)");
            }
            Authorization::Unresolved { reason } => {
                warn!(%reason, "session started without a caller address");
            }
        }

        Self::new(config, catalog, collaborators, authorization)
    }

    /// Stop background timers. Pending scans and replies are dropped.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    // ── Gate ─────────────────────────────────────────────────────

    /// Apply an action if the caller is authorized.
    ///
    /// An unauthorized attempt fires the notifier exactly once and
    /// returns [`ActionResult::Denied`]. A rejected action (`Err`) leaves
    /// state unchanged.
    pub async fn execute(&self, action: Action) -> Result<ActionResult, CoreError> {
        let name = action.name();
        if !self.inner.authorization.is_granted() {
            debug!(action = name, "denied: caller not authorized");
            self.inner.collaborators.notifier.notify();
            return Ok(ActionResult::Denied);
        }

        let result = self.apply(action).await;
        match &result {
            Ok(_) => debug!(action = name, "applied"),
            Err(e) => debug!(action = name, error = %e, "rejected"),
        }
        result
    }

    #[allow(clippy::too_many_lines)]
    async fn apply(&self, action: Action) -> Result<ActionResult, CoreError> {
        let inner = &self.inner;
        let catalog = inner.catalog.as_ref();
        let mut state = inner.state.lock().await;

        match action {
            // ── Device selection ─────────────────────────────────
            Action::SelectCategory(category) => {
                state.selection.select_category(category);
                Ok(ActionResult::Ok)
            }
            Action::SelectDevice { id } => {
                let device = state.selection.select_device(catalog, &id)?;
                Ok(ActionResult::DeviceSelected(device.clone()))
            }
            Action::SetConnectionMethod(method) => {
                state.selection.set_method(method);
                Ok(ActionResult::Ok)
            }
            Action::Connect => {
                let plan = state.selection.connect(inner.config.credentials.as_ref())?;
                info!(
                    device = %plan.device.label(),
                    method = %plan.method,
                    port = plan.port,
                    "connection plan prepared (simulated)"
                );
                Ok(ActionResult::Connected(plan))
            }

            // ── Commands ─────────────────────────────────────────
            Action::SelectTemplate { command } => {
                state.commands.select_template(catalog, &command)?;
                Ok(ActionResult::Ok)
            }
            Action::EditCustom { text } => {
                state.commands.edit_custom(text);
                Ok(ActionResult::Ok)
            }
            Action::SelectFromHistory { index } => {
                state.commands.select_from_history(index)?;
                Ok(ActionResult::Ok)
            }
            Action::Send => {
                let (command, mode) = state.commands.send()?;
                let target = state.selection.device().cloned();
                let (text, status) = responder::respond(&command, target.as_ref());
                let output = CommandOutput {
                    id: EntityId::generate(),
                    command,
                    output: text,
                    timestamp: Utc::now(),
                    device: responder::device_label(target.as_ref()),
                    status,
                };
                debug!(command = %output.command, %mode, %status, "command recorded");
                state.ledger.record(output.clone());
                Ok(ActionResult::Sent(output))
            }

            // ── Outputs ──────────────────────────────────────────
            Action::DeleteOutput { id } => Ok(ActionResult::Deleted(state.ledger.delete(&id)?)),
            Action::ClearOutputs => Ok(ActionResult::Cleared {
                removed: state.ledger.clear_all(),
            }),
            Action::CopyOutput { id } => {
                let output = state
                    .ledger
                    .get(&id)
                    .ok_or_else(|| CoreError::not_found("output", id.to_string()))?;
                let delivered = match inner.collaborators.clipboard.write_text(&output.output) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(output_id = %id, error = %e, "clipboard write failed");
                        false
                    }
                };
                Ok(ActionResult::Copied { delivered })
            }
            Action::ExportOutput { id, format } => {
                let output = state
                    .ledger
                    .get(&id)
                    .ok_or_else(|| CoreError::not_found("output", id.to_string()))?;
                let doc = export::serialize_output(output, format, Utc::now())?;
                drop(state);
                self.download(doc)
            }

            // ── Alerts ───────────────────────────────────────────
            Action::ResolveAlert { id } => Ok(ActionResult::AlertResolved {
                changed: state.alerts.resolve(&id),
            }),
            Action::RunScan => {
                state.alerts.begin_scan(inner.config.scan)?;
                let token = inner.cancel.child_token();
                state.scan_cancel = Some(token.clone());
                inner
                    .scan_status
                    .send_replace(ScanStatus::Running { progress: 0 });
                info!("AI scan started");

                let task = tokio::spawn(drive_scan(Arc::clone(inner), token));
                Ok(ActionResult::ScanStarted(ScanHandle {
                    status: inner.scan_status.subscribe(),
                    task,
                }))
            }
            Action::CancelScan => {
                let progress = state.alerts.cancel_scan();
                if let Some(token) = state.scan_cancel.take() {
                    token.cancel();
                }
                if let Some(progress) = progress {
                    info!(progress, "AI scan cancelled");
                    inner
                        .scan_status
                        .send_replace(ScanStatus::Cancelled { progress });
                }
                Ok(ActionResult::ScanCancelled { progress })
            }

            // ── Assistant ────────────────────────────────────────
            Action::SendMessage { text } => {
                state.assistant.post_user(&text)?;
                let task = tokio::spawn(deliver_reply(Arc::clone(inner)));
                Ok(ActionResult::ReplyPending(ReplyHandle { task }))
            }
            Action::ToggleVoice => Ok(ActionResult::VoiceToggled {
                listening: state.assistant.toggle_voice(),
            }),

            // ── Export ───────────────────────────────────────────
            Action::Export(request) => {
                let history: Vec<String> = state.commands.history().map(str::to_owned).collect();
                let outputs: Vec<CommandOutput> = state.ledger.list().cloned().collect();
                let alerts: Vec<AiAlert> = state.alerts.list(AlertFilter::All).cloned().collect();
                drop(state);

                let ctx = ExportContext {
                    devices: catalog.all_devices(),
                    vlans: catalog.list_vlans(),
                    history: &history,
                    outputs: &outputs,
                    alerts: &alerts,
                    file_prefix: &inner.config.file_prefix,
                };
                let doc = export::serialize(&ctx, &request)?;
                self.download(doc)
            }
        }
    }

    fn download(&self, doc: ExportDocument) -> Result<ActionResult, CoreError> {
        self.inner.collaborators.downloader.save(&doc)?;
        info!(filename = %doc.filename, size = doc.bytes.len(), "export saved");
        Ok(ActionResult::Exported {
            size: doc.bytes.len(),
            filename: doc.filename,
            mime_type: doc.mime_type,
        })
    }

    // ── Ungated UI selections ────────────────────────────────────

    /// Point the output selection at `id`; unknown ids clear it.
    pub async fn select_output(&self, id: &EntityId) -> Option<CommandOutput> {
        self.inner.state.lock().await.ledger.select(id).cloned()
    }

    pub async fn select_vlan(&self, id: u16) -> Result<VlanConfig, CoreError> {
        let vlan = self
            .inner
            .catalog
            .find_vlan(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("vlan", id.to_string()))?;
        self.inner.state.lock().await.selected_vlan = Some(id);
        Ok(vlan)
    }

    // ── Snapshots ────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn authorization(&self) -> &Authorization {
        &self.inner.authorization
    }

    pub fn is_authorized(&self) -> bool {
        self.inner.authorization.is_granted()
    }

    pub async fn history(&self) -> Vec<String> {
        let state = self.inner.state.lock().await;
        state.commands.history().map(str::to_owned).collect()
    }

    pub async fn composition(&self) -> Composition {
        self.inner.state.lock().await.commands.composition().clone()
    }

    pub async fn outputs(&self) -> Vec<CommandOutput> {
        self.inner.state.lock().await.ledger.list().cloned().collect()
    }

    pub async fn output(&self, id: &EntityId) -> Option<CommandOutput> {
        self.inner.state.lock().await.ledger.get(id).cloned()
    }

    pub async fn selected_output(&self) -> Option<CommandOutput> {
        self.inner.state.lock().await.ledger.selected().cloned()
    }

    pub async fn output_stats(&self) -> OutputStats {
        self.inner.state.lock().await.ledger.stats()
    }

    pub async fn alerts(&self, filter: AlertFilter) -> Vec<AiAlert> {
        let state = self.inner.state.lock().await;
        state.alerts.list(filter).cloned().collect()
    }

    pub async fn alert_counts(&self) -> AlertCounts {
        self.inner.state.lock().await.alerts.counts()
    }

    /// Subscribe to scan progress.
    pub fn scan_status(&self) -> watch::Receiver<ScanStatus> {
        self.inner.scan_status.subscribe()
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.inner.state.lock().await.assistant.transcript().to_vec()
    }

    pub async fn is_listening(&self) -> bool {
        self.inner.state.lock().await.assistant.is_listening()
    }

    pub async fn selected_category(&self) -> Option<DeviceType> {
        self.inner.state.lock().await.selection.category()
    }

    pub async fn selected_device(&self) -> Option<NetworkDevice> {
        self.inner.state.lock().await.selection.device().cloned()
    }

    pub async fn selected_vlan(&self) -> Option<VlanConfig> {
        let id = self.inner.state.lock().await.selected_vlan?;
        self.inner.catalog.find_vlan(id).cloned()
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Step the scan on every tick until it completes or is cancelled.
/// Cancellation is re-checked under the state lock, so a cancelled scan
/// can never append its alert.
async fn drive_scan(inner: Arc<SessionInner>, token: CancellationToken) {
    let tick = inner.config.scan.tick;
    loop {
        tokio::select! {
            () = token.cancelled() => return,
            () = inner.collaborators.scheduler.sleep(tick) => {}
        }

        let mut state = inner.state.lock().await;
        if token.is_cancelled() {
            return;
        }
        match state.alerts.advance_scan(Utc::now()) {
            ScanTick::Progress(progress) => {
                inner.scan_status.send_replace(ScanStatus::Running { progress });
            }
            ScanTick::Completed(alert_id) => {
                state.scan_cancel = None;
                info!(%alert_id, "AI scan completed");
                inner
                    .scan_status
                    .send_replace(ScanStatus::Completed { alert_id });
                return;
            }
            ScanTick::Idle => return,
        }
    }
}

async fn deliver_reply(inner: Arc<SessionInner>) -> Option<ChatMessage> {
    tokio::select! {
        () = inner.cancel.cancelled() => return None,
        () = inner.collaborators.scheduler.sleep(inner.config.assistant_delay) => {}
    }
    let mut state = inner.state.lock().await;
    let reply = state.assistant.deliver_reply().clone();
    debug!("assistant reply delivered");
    Some(reply)
}
