//! File locking and atomic writes for the preferences store
//!
//! A store file `preferences.json` is guarded by an advisory lock on the
//! sibling `preferences.json.lock`. Writers hold the lock for the whole
//! read-modify-write and replace the store with a temp file + rename, so
//! readers never see a half-written object.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// How long a preferences write waits for a competing writer
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 2000;

const LOCK_RETRY_INTERVAL_MS: u64 = 25;

/// Path of the lock file guarding `path`
pub fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

/// Exclusive advisory lock, released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock at `path` is held or `timeout_ms` elapses.
    ///
    /// The lock file and its parent directory are created when missing.
    pub fn acquire(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    })
                }
                Err(err) if is_contended(&err) => {
                    if Instant::now() >= deadline {
                        tracing::debug!(path = %path.display(), timeout_ms, "lock wait timed out");
                        return Err(Error::LockFailed(path.to_path_buf()));
                    }
                    std::thread::sleep(Duration::from_millis(LOCK_RETRY_INTERVAL_MS));
                }
                Err(err) => return Err(Error::Io(err)),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn is_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }

    // Windows reports sharing/lock violations as raw OS errors.
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(32) | Some(33))
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Run `f` while holding the lock that guards `path`.
pub fn with_lock<T>(path: &Path, timeout_ms: u64, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let _guard = FileLock::acquire(lock_path_for(path), timeout_ms)?;
    f()
}

/// Replace `path` with `data` via a temp file in the same directory.
///
/// Does not lock; callers that read-modify-write wrap this in `with_lock`.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut temp = NamedTempFile::new_in(&parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}

pub fn write_atomic_str(path: impl AsRef<Path>, data: &str) -> Result<()> {
    write_atomic(path, data.as_bytes())
}
