//! Host capability traits and the file-backed implementations the CLI and
//! integration tests run on.
//!
//! The core never talks to an editor or filesystem directly; everything
//! external comes in through these three traits.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Read/replace access to the text being edited.
pub trait SourceBuffer {
    /// Stable identity of this buffer across a round trip.
    fn id(&self) -> &str;

    /// Full text of the buffer.
    fn text(&self) -> io::Result<String>;

    /// Replace the byte span `start..end` with `replacement` as a single
    /// edit, visible to subsequent `text` calls.
    fn replace(&mut self, start: usize, end: usize, replacement: &str) -> io::Result<()>;
}

/// Storage for editable scratch copies.
pub trait ScratchStore {
    /// Create a new scratch artifact with the given content and return its
    /// handle.
    fn create(&mut self, content: &str) -> io::Result<String>;

    /// Read the current content of a scratch artifact.
    fn read(&self, handle: &str) -> io::Result<String>;

    /// Delete by handle. Deleting an already-deleted artifact succeeds.
    fn delete(&mut self, handle: &str) -> io::Result<()>;
}

/// Fire-and-forget user feedback. Must never block core logic.
pub trait Notifier {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// A file on disk acting as the source buffer. Replacing a range rewrites
/// the whole file.
pub struct FileBuffer {
    path: PathBuf,
    id: String,
}

impl FileBuffer {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.to_string_lossy().into_owned();
        FileBuffer { path, id }
    }
}

impl SourceBuffer for FileBuffer {
    fn id(&self) -> &str {
        &self.id
    }

    fn text(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn replace(&mut self, start: usize, end: usize, replacement: &str) -> io::Result<()> {
        let content = self.text()?;
        if start > end || end > content.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("replace span {start}..{end} out of bounds in {}", self.id),
            ));
        }
        if !content.is_char_boundary(start) || !content.is_char_boundary(end) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("replace span {start}..{end} splits a character in {}", self.id),
            ));
        }

        let mut result = String::with_capacity(content.len() + replacement.len());
        result.push_str(&content[..start]);
        result.push_str(replacement);
        result.push_str(&content[end..]);

        if result != content {
            fs::write(&self.path, &result)?;
        }
        Ok(())
    }
}

/// Scratch files in a directory. Handles are the file paths.
pub struct DirScratch {
    dir: PathBuf,
    next_id: u32,
    // keeps the temp directory alive for `temp()`-created stores
    _temp: Option<tempfile::TempDir>,
}

impl DirScratch {
    /// Scratch files in a fresh temp directory, removed when the store is
    /// dropped.
    pub fn temp() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        Ok(DirScratch {
            dir: temp.path().to_path_buf(),
            next_id: 0,
            _temp: Some(temp),
        })
    }

    /// Scratch files in an existing directory, left in place on drop.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        DirScratch {
            dir: dir.into(),
            next_id: 0,
            _temp: None,
        }
    }
}

impl ScratchStore for DirScratch {
    fn create(&mut self, content: &str) -> io::Result<String> {
        self.next_id += 1;
        let path = self.dir.join(format!("scratch-{:03}.json", self.next_id));
        fs::write(&path, content)?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn read(&self, handle: &str) -> io::Result<String> {
        fs::read_to_string(handle)
    }

    fn delete(&mut self, handle: &str) -> io::Result<()> {
        match fs::remove_file(handle) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Notifier that writes to stderr, the CLI default.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn info(&self, message: &str) {
        eprintln!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}
