//! easytask ui command implementation

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::prefs::{CelebrationStore, FilePreferences, MemoryPreferences};

pub struct UiOptions {
    pub config: Config,
    pub prefs: Option<PathBuf>,
}

pub fn run(options: UiOptions) -> Result<()> {
    let store = open_store(options.prefs)?;
    crate::ui::run(options.config, store)
}

/// Without a preference directory the flag lives for this session only.
fn open_store(path: Option<PathBuf>) -> Result<Box<dyn CelebrationStore>> {
    match path {
        Some(path) => Ok(Box::new(FilePreferences::new(path))),
        None => match FilePreferences::open_default() {
            Ok(store) => Ok(Box::new(store)),
            Err(Error::NoHomeDir(what)) => {
                tracing::warn!(what, "no preference directory; celebration flag will not persist");
                Ok(Box::new(MemoryPreferences::default()))
            }
            Err(err) => Err(err),
        },
    }
}
