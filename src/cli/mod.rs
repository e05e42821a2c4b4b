//! Command-line interface for easytask
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

mod parse;
mod prefs;
mod ui;

/// easytask - a single-screen task list
///
/// Type comma-separated tasks, tick them off, and get a one-time
/// "Well done!" after the third.
#[derive(Parser, Debug)]
#[command(name = "easytask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "EASYTASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to preferences.json (defaults to the platform preference directory)
    #[arg(long, global = true, env = "EASYTASK_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive task screen (default)
    Ui,

    /// Parse comma-separated text into a sorted task list
    Parse {
        /// Text to parse; multiple arguments are joined with the delimiter
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Inspect persisted preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),
}

/// Preferences subcommands
#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    /// Show the preferences path and stored flags
    Show,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        match self.command.unwrap_or(Commands::Ui) {
            Commands::Ui => ui::run(ui::UiOptions {
                config,
                prefs: self.prefs,
            }),
            Commands::Parse { text } => parse::run(parse::ParseOptions {
                text,
                config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Prefs(cmd) => match cmd {
                PrefsCommands::Show => prefs::run_show(prefs::ShowOptions {
                    prefs: self.prefs,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
        }
    }
}

/// An explicit `--config` must load cleanly; the implicit default location
/// falls back to defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::load_or_default(None)),
    }
}
