//! In-memory session kernel for the netdash network dashboard.
//!
//! This crate owns the domain model, the stateful dashboard components
//! and the authorization gate in front of them:
//!
//! - **[`Session`]**: Facade owning all per-caller state. Every mutation
//!   is an [`Action`] passed to [`Session::execute`], which checks the
//!   [`Authorization`] verdict computed once at [`Session::start`]. A
//!   denied attempt fires the [`UnauthorizedNotifier`] and returns
//!   [`ActionResult::Denied`]; nothing else happens.
//!
//! - **Components**: [`Catalog`] (static devices, VLANs and command
//!   templates), [`CommandStore`] (composition and bounded history),
//!   [`OutputLedger`] (simulated command results), [`AlertRegistry`]
//!   (alerts plus the scan progress machine), [`DeviceSelection`] and
//!   [`Assistant`].
//!
//! - **[`export`]**: Deterministic CSV / JSON / text serializer.
//!
//! - **Collaborators**: [`CallerResolver`], [`Clipboard`],
//!   [`Downloader`], [`UnauthorizedNotifier`] and the [`Scheduler`] timer
//!   seam. No device is ever contacted; all output is simulated.

pub mod action;
pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod ledger;
pub mod model;
pub mod responder;
pub mod scheduler;
mod seed;
pub mod selection;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, ActionResult, ReplyHandle, ScanHandle, ScanStatus};
pub use alerts::{AlertRegistry, ScanTick};
pub use assistant::Assistant;
pub use auth::{AllowEntry, Authorization, is_authorized};
pub use catalog::Catalog;
pub use collaborators::{CallerResolver, Clipboard, Downloader, FixedCaller, UnauthorizedNotifier};
pub use config::{DeviceCredentials, ScanSettings, SessionConfig};
pub use error::CoreError;
pub use export::{DateRange, ExportDocument, ExportFormat, ExportRequest, ExportType};
pub use history::{CommandMode, CommandStore, Composition};
pub use ledger::OutputLedger;
pub use scheduler::{ImmediateScheduler, Scheduler, TokioScheduler};
pub use selection::{ConnectionMethod, ConnectionPlan, DeviceSelection};
pub use session::{Collaborators, Session};

pub use model::{
    AiAlert, AlertCounts, AlertFilter, AlertSeverity, AlertStatus, ChatMessage, ChatRole,
    CommandOutput, DeviceStatus, DeviceType, EntityId, HealthSummary, NetworkDevice, OutputStats,
    OutputStatus, VlanConfig,
};
