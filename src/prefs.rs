//! Persisted preferences
//!
//! A small JSON object file holding durable user flags. The only flag
//! easytask reads or writes is `DidShowGoodJobAlert`; other keys found in
//! the file are preserved on write.
//!
//! ```text
//! <preference dir>/
//!   preferences.json        # {"DidShowGoodJobAlert": true}
//!   preferences.json.lock   # advisory lock for read-modify-write
//! ```

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::project_dirs;
use crate::error::Result;
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};

/// Key of the one-time celebration flag
pub const CELEBRATION_KEY: &str = "DidShowGoodJobAlert";

/// File name of the preferences store
pub const PREFS_FILENAME: &str = "preferences.json";

/// Narrow access to the persisted celebration flag.
pub trait CelebrationStore {
    /// Whether the celebration banner has ever been shown
    fn celebration_shown(&self) -> Result<bool>;

    /// Permanently record that the banner was shown
    fn set_celebration_shown(&mut self) -> Result<()>;

    /// Check-and-set in one step.
    ///
    /// Returns `true` only for the call that flipped the flag from false to
    /// true.
    fn mark_celebration_shown(&mut self) -> Result<bool> {
        if self.celebration_shown()? {
            return Ok(false);
        }
        self.set_celebration_shown()?;
        Ok(true)
    }
}

/// Preferences backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    lock_timeout_ms: u64,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    /// Preferences at the platform default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_prefs_path()?))
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "preferences file is not a JSON object; treating as empty"
                );
                Ok(Map::new())
            }
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let data = serde_json::to_string_pretty(map)?;
        lock::write_atomic_str(&self.path, &data)
    }

    fn flag_in(map: &Map<String, Value>) -> bool {
        map.get(CELEBRATION_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl CelebrationStore for FilePreferences {
    fn celebration_shown(&self) -> Result<bool> {
        Ok(Self::flag_in(&self.read_map()?))
    }

    fn set_celebration_shown(&mut self) -> Result<()> {
        lock::with_lock(&self.path, self.lock_timeout_ms, || {
            let mut map = self.read_map()?;
            map.insert(CELEBRATION_KEY.to_string(), Value::Bool(true));
            self.write_map(&map)
        })
    }

    fn mark_celebration_shown(&mut self) -> Result<bool> {
        lock::with_lock(&self.path, self.lock_timeout_ms, || {
            let mut map = self.read_map()?;
            if Self::flag_in(&map) {
                return Ok(false);
            }
            map.insert(CELEBRATION_KEY.to_string(), Value::Bool(true));
            self.write_map(&map)?;
            tracing::debug!(path = %self.path.display(), "celebration flag persisted");
            Ok(true)
        })
    }
}

/// In-memory preferences, used in tests and when no preference directory
/// exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    shown: bool,
    failing_writes: usize,
    failing_reads: Cell<usize>,
}

impl MemoryPreferences {
    pub fn new(shown: bool) -> Self {
        Self {
            shown,
            failing_writes: 0,
            failing_reads: Cell::new(0),
        }
    }

    /// Make the next `count` writes fail with an I/O error.
    pub fn fail_next_writes(&mut self, count: usize) {
        self.failing_writes = count;
    }

    /// Make the next `count` reads fail with an I/O error.
    pub fn fail_next_reads(&mut self, count: usize) {
        self.failing_reads.set(count);
    }
}

fn read_only_error() -> crate::error::Error {
    std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "preferences are read-only",
    )
    .into()
}

impl CelebrationStore for MemoryPreferences {
    fn celebration_shown(&self) -> Result<bool> {
        let failing = self.failing_reads.get();
        if failing > 0 {
            self.failing_reads.set(failing - 1);
            return Err(read_only_error());
        }
        Ok(self.shown)
    }

    fn set_celebration_shown(&mut self) -> Result<()> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(read_only_error());
        }
        self.shown = true;
        Ok(())
    }
}

/// Default location of `preferences.json`
pub fn default_prefs_path() -> Result<PathBuf> {
    Ok(project_dirs()?.preference_dir().join(PREFS_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_false() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = FilePreferences::new(dir.path().join(PREFS_FILENAME));
        assert!(!prefs.celebration_shown().expect("read"));
    }

    #[test]
    fn mark_flips_only_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut prefs = FilePreferences::new(dir.path().join(PREFS_FILENAME));

        assert!(prefs.mark_celebration_shown().expect("first mark"));
        assert!(!prefs.mark_celebration_shown().expect("second mark"));
        assert!(prefs.celebration_shown().expect("read"));
    }

    #[test]
    fn writes_preserve_unknown_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PREFS_FILENAME);
        fs::write(&path, r#"{"Theme": "dark"}"#).expect("seed prefs");

        let mut prefs = FilePreferences::new(&path);
        prefs.set_celebration_shown().expect("write");

        let raw = fs::read_to_string(&path).expect("read back");
        let value: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["Theme"], "dark");
        assert_eq!(value[CELEBRATION_KEY], true);
    }

    #[test]
    fn corrupt_file_reads_false() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PREFS_FILENAME);
        fs::write(&path, "not json").expect("seed prefs");

        let prefs = FilePreferences::new(&path);
        assert!(!prefs.celebration_shown().expect("read"));
    }

    #[test]
    fn non_bool_value_reads_false() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PREFS_FILENAME);
        fs::write(&path, r#"{"DidShowGoodJobAlert": "yes"}"#).expect("seed prefs");

        let prefs = FilePreferences::new(&path);
        assert!(!prefs.celebration_shown().expect("read"));
    }

    #[test]
    fn memory_store_can_fail_writes() {
        let mut prefs = MemoryPreferences::new(false);
        prefs.fail_next_writes(1);
        assert!(prefs.mark_celebration_shown().is_err());
        assert!(!prefs.celebration_shown().expect("read"));
        assert!(prefs.mark_celebration_shown().expect("retry"));
    }

    #[test]
    fn memory_store_can_fail_reads() {
        let mut prefs = MemoryPreferences::new(true);
        prefs.fail_next_reads(1);
        assert!(prefs.celebration_shown().is_err());
        assert!(prefs.celebration_shown().expect("second read"));
    }

    #[test]
    fn held_lock_makes_write_fail() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PREFS_FILENAME);
        let _held = lock::FileLock::acquire(lock::lock_path_for(&path), 1000).expect("hold lock");

        let mut prefs = FilePreferences::new(&path).with_lock_timeout(30);
        let err = prefs.mark_celebration_shown().expect_err("lock held");
        assert!(matches!(err, crate::error::Error::LockFailed(_)));
    }
}
