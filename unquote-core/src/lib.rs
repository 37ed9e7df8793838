//! unquote-core: edit JSON embedded in JSON strings
//!
//! This library provides:
//! - Locating single-line JSON string literals under a caret or selection
//! - Unescaping literal bodies into editable JSON text and re-escaping
//!   edited text back into correctly escaped literal bodies
//! - Tracking live editable copies and writing them back into the source

pub mod driver;
pub mod escape;
pub mod host;
pub mod locate;
pub mod position;
pub mod session;

pub use driver::{extract, Cursor, EditError, Editor, SaveOutcome};
pub use escape::{to_editable, to_literal, WriteBack};
pub use host::{DirScratch, FileBuffer, Notifier, ScratchStore, SourceBuffer, StderrNotifier};
pub use locate::{locate_caret, locate_selection, EditTarget};
pub use position::{parse_position, parse_range, position_to_offset, resolve_span, Position, Range};
pub use session::{EditSessions, PendingEdit};
