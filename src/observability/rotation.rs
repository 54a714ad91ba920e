//! Size-rotated append-only log file.
//!
//! When the live file grows past the size limit it is shifted into numbered
//! backups (`file.1` is the newest) and a fresh file is started. The oldest
//! backup beyond the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size limit for the live file (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of backups kept after rotation.
pub const DEFAULT_BACKUPS: usize = 3;

/// Line writer with numbered-backup rotation, shareable across threads.
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    /// Creates a writer with the default size limit and retention.
    ///
    /// The file is opened lazily on the first write.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error
    /// if the internal lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|meta| meta.len() >= self.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    /// Shifts `file.N` to `file.N+1`, dropping the oldest, then moves the live
    /// file to `file.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.backups))?;
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }

        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::new(path.clone());

        writer.write_line("one").unwrap();
        writer.write_line("two").unwrap();
        assert_eq!(read(&path), "one\ntwo\n");
    }

    #[test]
    fn rotates_into_numbered_backups_and_caps_retention() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limits(path.clone(), 4, 2);

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(read(&path), "dddd\n");
        assert_eq!(read(&dir.path().join("trace.json.1")), "cccc\n");
        assert_eq!(read(&dir.path().join("trace.json.2")), "bbbb\n");
        assert!(!dir.path().join("trace.json.3").exists());
    }

    #[test]
    fn zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limits(path.clone(), 4, 0);

        writer.write_line("aaaa").unwrap();
        writer.write_line("bbbb").unwrap();
        assert_eq!(read(&path), "bbbb\n");
        assert!(!dir.path().join("trace.json.1").exists());
    }
}
