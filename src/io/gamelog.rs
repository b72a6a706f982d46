//! Append-only log of game events

use crate::io::error::{Result, file_system_error};
use std::path::Path;

/// Ordered record of everything shown to the players
///
/// The log is threaded through callers by value: recording consumes the log
/// and hands back the extended one, and entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameLog {
    lines: Vec<String>,
}

impl GameLog {
    /// Start an empty log
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append `lines` and return the extended log
    #[must_use]
    pub fn record<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Recorded lines, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of recorded lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the whole log, one entry per line
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }
        let mut contents = self.lines.join("\n");
        contents.push('\n');
        std::fs::write(path, contents).map_err(|e| file_system_error(path, "write game log", e))
    }
}
