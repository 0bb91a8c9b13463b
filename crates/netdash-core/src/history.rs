// ── Command session store ──
//
// Composition state plus a bounded, most-recent-first history.
// Every transition validates before it mutates, so an `Err` always
// leaves the store untouched.

use std::collections::VecDeque;

use serde::Serialize;
use strum::Display;

use crate::catalog::Catalog;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommandMode {
    Predefined,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Composition {
    #[default]
    Idle,
    Composing { mode: CommandMode, text: String },
}

#[derive(Debug, Clone)]
pub struct CommandStore {
    history: VecDeque<String>,
    limit: usize,
    composition: Composition,
}

impl CommandStore {
    /// An empty store retaining at most `limit` entries (minimum one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            history: VecDeque::with_capacity(limit),
            limit,
            composition: Composition::Idle,
        }
    }

    /// Seed history, oldest last. Entries past the limit are dropped.
    pub fn with_history<I, S>(limit: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new(limit);
        store.history = entries
            .into_iter()
            .map(Into::into)
            .take(store.limit)
            .collect();
        store
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn select_template(&mut self, catalog: &Catalog, command: &str) -> Result<(), CoreError> {
        if !catalog.is_template(command) {
            return Err(CoreError::validation(format!(
                "unknown command template: {command:?}"
            )));
        }
        self.composition = Composition::Composing {
            mode: CommandMode::Predefined,
            text: command.to_owned(),
        };
        Ok(())
    }

    pub fn edit_custom(&mut self, text: impl Into<String>) {
        self.composition = Composition::Composing {
            mode: CommandMode::Custom,
            text: text.into(),
        };
    }

    /// Preload a history entry as custom text.
    pub fn select_from_history(&mut self, index: usize) -> Result<(), CoreError> {
        let entry = self.history.get(index).cloned().ok_or_else(|| {
            CoreError::validation(format!(
                "history index {index} out of range ({} entries)",
                self.history.len()
            ))
        })?;
        self.edit_custom(entry);
        Ok(())
    }

    /// Record the composed command and return to `Idle`. Returns the
    /// trimmed text and the mode it was composed in.
    pub fn send(&mut self) -> Result<(String, CommandMode), CoreError> {
        let (mode, text) = match &self.composition {
            Composition::Idle => return Err(CoreError::validation("no command composed")),
            Composition::Composing { mode, text } => (*mode, text.trim()),
        };
        if text.is_empty() {
            return Err(CoreError::validation("command text is empty"));
        }

        let text = text.to_owned();
        self.history.push_front(text.clone());
        self.history.truncate(self.limit);
        self.composition = Composition::Idle;
        Ok((text, mode))
    }
}

impl Default for CommandStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}
