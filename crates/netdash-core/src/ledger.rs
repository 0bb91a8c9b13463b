// ── Output ledger ──
//
// Newest-first record of simulated command results. The selection is a
// non-owning id that never outlives its entry.

use std::collections::VecDeque;

use crate::error::CoreError;
use crate::model::{CommandOutput, EntityId, OutputStats, OutputStatus};

#[derive(Debug, Clone, Default)]
pub struct OutputLedger {
    entries: VecDeque<CommandOutput>,
    selected: Option<EntityId>,
}

impl OutputLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries newest first.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &CommandOutput> {
        self.entries.iter()
    }

    pub fn get(&self, id: &EntityId) -> Option<&CommandOutput> {
        self.entries.iter().find(|o| &o.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the head.
    pub fn record(&mut self, output: CommandOutput) {
        self.entries.push_front(output);
    }

    /// Point the selection at `id`. Unknown ids clear it.
    pub fn select(&mut self, id: &EntityId) -> Option<&CommandOutput> {
        let found = self.entries.iter().find(|o| &o.id == id);
        self.selected = found.map(|o| o.id.clone());
        found
    }

    pub fn selected(&self) -> Option<&CommandOutput> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn delete(&mut self, id: &EntityId) -> Result<CommandOutput, CoreError> {
        let pos = self
            .entries
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| CoreError::not_found("output", id.to_string()))?;

        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.entries
            .remove(pos)
            .ok_or_else(|| CoreError::Internal(format!("ledger index {pos} vanished")))
    }

    /// Drop every entry and the selection. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.selected = None;
        removed
    }

    pub fn stats(&self) -> OutputStats {
        self.entries
            .iter()
            .fold(OutputStats::default(), |mut acc, o| {
                acc.total += 1;
                match o.status {
                    OutputStatus::Success => acc.success += 1,
                    OutputStatus::Error => acc.error += 1,
                    OutputStatus::Pending => acc.pending += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn output(id: &str, status: OutputStatus) -> CommandOutput {
        CommandOutput {
            id: EntityId::from(id),
            command: "show version".into(),
            output: String::new(),
            timestamp: Utc::now(),
            device: "Core Switch (10.19.10.2)".into(),
            status,
        }
    }

    fn ledger() -> OutputLedger {
        let mut ledger = OutputLedger::new();
        ledger.record(output("3", OutputStatus::Error));
        ledger.record(output("2", OutputStatus::Success));
        ledger.record(output("1", OutputStatus::Success));
        ledger
    }

    #[test]
    fn record_inserts_at_head() {
        let ids: Vec<_> = ledger().list().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn deleting_selected_clears_selection() {
        let mut ledger = ledger();
        ledger.select(&"1".into());
        ledger.delete(&"1".into()).unwrap();
        assert!(ledger.selected().is_none());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn deleting_other_keeps_selection() {
        let mut ledger = ledger();
        ledger.select(&"1".into());
        ledger.delete(&"2".into()).unwrap();
        assert_eq!(ledger.selected().unwrap().id, EntityId::from("1"));
    }

    #[test]
    fn deleting_unknown_is_not_found() {
        let mut ledger = ledger();
        let err = ledger.delete(&"99".into()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn selecting_unknown_clears_selection() {
        let mut ledger = ledger();
        ledger.select(&"2".into());
        assert!(ledger.select(&"nope".into()).is_none());
        assert!(ledger.selected().is_none());
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut ledger = ledger();
        ledger.select(&"3".into());
        assert_eq!(ledger.clear_all(), 3);
        assert!(ledger.is_empty());
        assert!(ledger.selected().is_none());
    }

    #[test]
    fn stats_count_by_status() {
        let stats = ledger().stats();
        assert_eq!(
            stats,
            OutputStats {
                total: 3,
                success: 2,
                error: 1,
                pending: 0
            }
        );
    }
}
