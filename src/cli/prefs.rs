//! easytask prefs commands

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::prefs::{CelebrationStore, FilePreferences, CELEBRATION_KEY};

pub struct ShowOptions {
    pub prefs: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ShowReport {
    path: PathBuf,
    exists: bool,
    #[serde(rename = "DidShowGoodJobAlert")]
    celebration_shown: bool,
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let store = match options.prefs {
        Some(path) => FilePreferences::new(path),
        None => FilePreferences::open_default()?,
    };
    let report = ShowReport {
        path: store.path().to_path_buf(),
        exists: store.path().exists(),
        celebration_shown: store.celebration_shown()?,
    };

    let mut human = HumanOutput::new("easytask prefs");
    human.push_summary("path", report.path.display().to_string());
    human.push_summary(CELEBRATION_KEY, report.celebration_shown.to_string());
    if !report.exists {
        human.push_detail("preferences file not created yet");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "prefs show",
        &report,
        Some(&human),
    )
}
