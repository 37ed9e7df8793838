//! Round-trip driver: extract an embedded JSON string into a scratch copy,
//! track it, and write edits back into the source.
//!
//! The host feeds discrete events in (`open`, `save`, `close`, `shutdown`)
//! and each runs to completion before the next; entries for distinct copy
//! ids are independent.

use std::io;

use thiserror::Error;

use crate::escape::{to_editable, to_literal};
use crate::host::{Notifier, ScratchStore, SourceBuffer};
use crate::locate::{locate_caret, locate_selection, EditTarget};
use crate::position::{resolve_span, Position, Range};
use crate::session::{EditSessions, PendingEdit};

/// Errors that abort an open or write-back operation.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("no JSON string found at the cursor")]
    NoTarget,
    #[error("no pending edit for {0}")]
    UnknownCopy(String),
    #[error("range {range} is out of bounds in {buffer}")]
    RangeOutOfBounds { buffer: String, range: Range },
    #[error("scratch copy failure: {0}")]
    ScratchIo(#[source] io::Error),
    #[error("source buffer failure: {0}")]
    BufferIo(#[source] io::Error),
}

/// Where the user pointed in the source buffer.
#[derive(Debug, Clone, Copy)]
pub enum Cursor {
    /// Collapsed cursor; the string literal on that line is searched for.
    Caret(Position),
    /// Explicit selection of the content, with or without its quotes. A
    /// collapsed selection behaves like a caret.
    Selection(Range),
}

/// What a save event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The edited text parsed as JSON and was written back.
    Written,
    /// The edited text was not JSON; an escaped plain string was written
    /// and the user was warned.
    WrittenRaw,
    /// The saved buffer had no pending edit; nothing happened.
    NotRegistered,
}

/// Locate the target under `cursor` and unescape it into editable text.
///
/// No session is created; `Editor::open` builds on this, and read-only
/// callers (like the CLI's `--print`) use it directly. The `\n`-to-newline
/// expansion applies only on the caret path.
pub fn extract<B: SourceBuffer>(buffer: &B, cursor: Cursor) -> Result<(EditTarget, String), EditError> {
    let text = buffer.text().map_err(EditError::BufferIo)?;

    let (target, expand_newlines) = match cursor {
        Cursor::Selection(range) if !range.is_empty() => {
            let selected = resolve_span(&text, range)
                .and_then(|(start, end)| text.get(start..end))
                .ok_or_else(|| EditError::RangeOutOfBounds {
                    buffer: buffer.id().to_string(),
                    range,
                })?;
            (locate_selection(selected, range), false)
        }
        Cursor::Selection(range) => (
            locate_line(&text, range.start).ok_or(EditError::NoTarget)?,
            true,
        ),
        Cursor::Caret(pos) => (
            locate_line(&text, pos).ok_or(EditError::NoTarget)?,
            true,
        ),
    };

    let editable = to_editable(&target.body, expand_newlines);
    Ok((target, editable))
}

/// Run the caret-path locator against the line containing `pos`.
fn locate_line(text: &str, pos: Position) -> Option<EditTarget> {
    if pos.line == 0 {
        return None;
    }
    let line_text = text.lines().nth(pos.line as usize - 1)?;
    locate_caret(line_text, pos.line, pos.column)
}

/// Owns the pending-edit registry and the scratch store, and exposes the
/// host-event entry points.
pub struct Editor<S: ScratchStore, N: Notifier> {
    sessions: EditSessions,
    scratch: S,
    notifier: N,
}

impl<S: ScratchStore, N: Notifier> Editor<S, N> {
    pub fn new(scratch: S, notifier: N) -> Self {
        Editor {
            sessions: EditSessions::new(),
            scratch,
            notifier,
        }
    }

    /// The pending edit for a copy id, if any.
    pub fn pending(&self, copy_id: &str) -> Option<&PendingEdit> {
        self.sessions.lookup(copy_id)
    }

    /// Number of round trips currently open.
    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }

    /// Extract the target under `cursor` into a new scratch copy and
    /// register the round trip. Returns the copy id.
    ///
    /// Nothing is registered when location or scratch creation fails.
    pub fn open<B: SourceBuffer>(&mut self, buffer: &B, cursor: Cursor) -> Result<String, EditError> {
        let (target, editable) = extract(buffer, cursor)?;
        let copy_id = self.scratch.create(&editable).map_err(EditError::ScratchIo)?;
        self.sessions.register(PendingEdit {
            copy_id: copy_id.clone(),
            source_id: buffer.id().to_string(),
            range: target.range,
        });
        Ok(copy_id)
    }

    /// Write the scratch copy's content back into the source buffer.
    ///
    /// `buffer` must be the buffer named by the pending edit's `source_id`;
    /// hosts fire save events for every buffer, so an unregistered id is a
    /// no-op rather than an error. Failures before the replace (scratch
    /// read, buffer read, stale range) leave the entry registered so the
    /// save can be retried; afterwards the entry is cleared and the scratch
    /// copy deleted even when the content was not valid JSON.
    pub fn save<B: SourceBuffer>(
        &mut self,
        copy_id: &str,
        buffer: &mut B,
    ) -> Result<SaveOutcome, EditError> {
        let Some(edit) = self.sessions.lookup(copy_id).cloned() else {
            return Ok(SaveOutcome::NotRegistered);
        };

        let edited = self.scratch.read(copy_id).map_err(EditError::ScratchIo)?;
        let result = to_literal(&edited);

        let text = buffer.text().map_err(EditError::BufferIo)?;
        let (start, end) =
            resolve_span(&text, edit.range).ok_or_else(|| EditError::RangeOutOfBounds {
                buffer: edit.source_id.clone(),
                range: edit.range,
            })?;
        buffer
            .replace(start, end, &result.body)
            .map_err(EditError::BufferIo)?;

        self.sessions.complete(copy_id);
        self.discard_scratch(copy_id);

        if result.valid_json {
            Ok(SaveOutcome::Written)
        } else {
            self.notifier
                .warn("content was not valid JSON; wrote it back as an escaped string");
            Ok(SaveOutcome::WrittenRaw)
        }
    }

    /// The cancellation path: drop the round trip without writing back.
    /// Harmless for unknown ids, so save-then-close event pairs work.
    pub fn close(&mut self, copy_id: &str) {
        if self.sessions.complete(copy_id).is_some() {
            self.discard_scratch(copy_id);
        }
    }

    /// Drop every open round trip and delete its scratch copy. Deletion
    /// failures are logged and never block shutdown.
    pub fn shutdown(&mut self) {
        for edit in self.sessions.complete_all() {
            self.discard_scratch(&edit.copy_id);
        }
    }

    fn discard_scratch(&mut self, copy_id: &str) {
        if let Err(e) = self.scratch.delete(copy_id) {
            log::warn!("failed to delete scratch copy {copy_id}: {e}");
        }
    }
}
