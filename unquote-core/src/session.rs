//! Pending-edit registry: one entry per live editable copy.

use std::collections::HashMap;

use crate::position::Range;

/// A registered round trip: where an editable copy's content goes back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Handle of the editable copy (the CLI uses the scratch file path).
    pub copy_id: String,
    /// Identity of the source buffer the content was extracted from.
    pub source_id: String,
    /// Span in the source buffer to replace on write-back. Assumed to stay
    /// valid until then; concurrent edits to the source are not detected.
    pub range: Range,
}

/// In-memory map of pending edits, keyed by copy id.
///
/// Purely ephemeral: entries never survive the process. Each key moves
/// absent -> registered -> absent; re-registering an id overwrites the
/// previous entry without error.
#[derive(Debug, Default)]
pub struct EditSessions {
    entries: HashMap<String, PendingEdit>,
}

impl EditSessions {
    pub fn new() -> Self {
        EditSessions::default()
    }

    /// Insert or overwrite the entry for its copy id.
    pub fn register(&mut self, edit: PendingEdit) {
        self.entries.insert(edit.copy_id.clone(), edit);
    }

    pub fn lookup(&self, copy_id: &str) -> Option<&PendingEdit> {
        self.entries.get(copy_id)
    }

    /// Remove and return the entry. Safe to call again for the same id;
    /// the second call returns `None`.
    pub fn complete(&mut self, copy_id: &str) -> Option<PendingEdit> {
        self.entries.remove(copy_id)
    }

    /// Drain every entry, e.g. at shutdown.
    pub fn complete_all(&mut self) -> Vec<PendingEdit> {
        self.entries.drain().map(|(_, edit)| edit).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
