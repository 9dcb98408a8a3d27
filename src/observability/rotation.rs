//! Size-rotated append-only file.
//!
//! Trace lines are appended to a single file. Once it reaches `max_bytes`
//! it is renamed to `<name>.<UTC timestamp>` and a fresh file is started;
//! only the newest `keep` backups survive. Timestamps are formatted so that
//! lexical order equals chronological order.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size threshold (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups kept.
pub const DEFAULT_KEEP: usize = 3;

const BACKUP_TIMESTAMP: &str = "%Y%m%dT%H%M%S%.9fZ";

/// Thread-safe line writer with size-based rotation.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    keep: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Creates a writer for `path`. Nothing is opened until the first write.
    #[must_use]
    pub const fn new(path: PathBuf, max_bytes: u64, keep: usize) -> Self {
        Self {
            path,
            max_bytes,
            keep,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails on any filesystem error or if a previous writer panicked while
    /// holding the lock.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("rotating file lock poisoned: {e}")))?;

        let current_len = fs::metadata(&self.path).map_or(0, |m| m.len());
        if current_len >= self.max_bytes {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::other("trace file not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let stamp = Utc::now().format(BACKUP_TIMESTAMP).to_string();
        let mut backup = self.backup_path(&stamp);
        let mut attempt = 1;
        while backup.exists() {
            backup = self.backup_path(&format!("{stamp}-{attempt}"));
            attempt += 1;
        }

        fs::rename(&self.path, &backup)?;
        self.prune()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Backups of this file, newest first.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory cannot be listed.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let Some(file_name) = self.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(vec![]);
        };
        let prefix = format!("{file_name}.");

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));
        Ok(backups)
    }

    fn prune(&self) -> io::Result<()> {
        for stale in self.backups()?.into_iter().skip(self.keep) {
            if let Err(e) = fs::remove_file(&stale) {
                tracing::debug!(path = %stale.display(), error = %e, "could not remove old trace backup");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("keep", &self.keep)
            .finish_non_exhaustive()
    }
}
