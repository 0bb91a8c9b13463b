// ── Alert registry ──
//
// Alerts only move active → resolved and are never removed. The scan
// is a synchronous progress machine; callers decide how ticks are timed.

use chrono::{DateTime, Utc};

use crate::config::ScanSettings;
use crate::error::CoreError;
use crate::model::{AiAlert, AlertCounts, AlertFilter, AlertSeverity, AlertStatus, EntityId};

/// Finding reported when a scan completes.
pub(crate) const SCAN_FINDING_DEVICE: &str = "AP-15 (10.19.10.65)";
pub(crate) const SCAN_FINDING_ISSUE: &str = "Firmware version outdated";
pub(crate) const SCAN_FINDING_SUGGESTION: &str =
    "Update to latest firmware version for security patches.";

/// Outcome of one progress step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTick {
    Progress(u8),
    /// Progress reached 100; carries the id of the appended alert.
    Completed(EntityId),
    /// No scan was running.
    Idle,
}

#[derive(Debug, Clone, Copy)]
struct ScanState {
    progress: u8,
    step: u8,
}

#[derive(Debug, Clone, Default)]
pub struct AlertRegistry {
    alerts: Vec<AiAlert>,
    scan: Option<ScanState>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alerts(alerts: Vec<AiAlert>) -> Self {
        Self { alerts, scan: None }
    }

    /// Alerts newest first, filtered by status.
    pub fn list(&self, filter: AlertFilter) -> impl Iterator<Item = &AiAlert> {
        self.alerts.iter().filter(move |a| filter.matches(a.status))
    }

    pub fn get(&self, id: &EntityId) -> Option<&AiAlert> {
        self.alerts.iter().find(|a| &a.id == id)
    }

    /// Mark an alert resolved. Returns whether anything changed; unknown
    /// and already-resolved ids are silently ignored.
    pub fn resolve(&mut self, id: &EntityId) -> bool {
        match self
            .alerts
            .iter_mut()
            .find(|a| &a.id == id && a.status == AlertStatus::Active)
        {
            Some(alert) => {
                alert.status = AlertStatus::Resolved;
                true
            }
            None => false,
        }
    }

    pub fn counts(&self) -> AlertCounts {
        let active = self
            .alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Active)
            .count();
        AlertCounts {
            active,
            resolved: self.alerts.len() - active,
        }
    }

    // ── Scan progress machine ────────────────────────────────────

    /// Current progress, `None` when no scan is running.
    pub fn scan_progress(&self) -> Option<u8> {
        self.scan.map(|s| s.progress)
    }

    /// Start a scan at 0%. Rejected while another one is in flight.
    pub fn begin_scan(&mut self, settings: ScanSettings) -> Result<(), CoreError> {
        if let Some(state) = self.scan {
            return Err(CoreError::ScanInProgress {
                progress: state.progress,
            });
        }
        if settings.step == 0 || settings.step > 100 {
            return Err(CoreError::validation(format!(
                "scan step must be within 1..=100, got {}",
                settings.step
            )));
        }
        self.scan = Some(ScanState {
            progress: 0,
            step: settings.step,
        });
        Ok(())
    }

    /// Advance one step. The finding is appended exactly once, on the
    /// step that reaches 100, and the scan ends there.
    pub fn advance_scan(&mut self, now: DateTime<Utc>) -> ScanTick {
        let Some(state) = self.scan.as_mut() else {
            return ScanTick::Idle;
        };

        state.progress = state.progress.saturating_add(state.step).min(100);
        if state.progress < 100 {
            return ScanTick::Progress(state.progress);
        }

        self.scan = None;
        let alert = AiAlert {
            id: EntityId::generate(),
            device: SCAN_FINDING_DEVICE.to_owned(),
            severity: AlertSeverity::Medium,
            issue: SCAN_FINDING_ISSUE.to_owned(),
            suggestion: SCAN_FINDING_SUGGESTION.to_owned(),
            timestamp: now,
            status: AlertStatus::Active,
        };
        let id = alert.id.clone();
        self.alerts.insert(0, alert);
        ScanTick::Completed(id)
    }

    /// Abort the running scan without appending anything. Returns the
    /// progress it was stopped at.
    pub fn cancel_scan(&mut self) -> Option<u8> {
        self.scan.take().map(|s| s.progress)
    }
}
