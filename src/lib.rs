//! easytask - Single-Screen Task List Library
//!
//! This library provides the core functionality for the easytask CLI:
//! parsing comma-separated input into tasks, tracking completion, and a
//! one-time celebration when enough items are done.
//!
//! # Core Concepts
//!
//! - **Task list**: trimmed, non-empty items kept stably sorted by text
//! - **Completion**: per-item Pending/Done state feeding a completed counter
//! - **Celebration**: a banner shown once ever, remembered in preferences
//! - **UI task queue**: keyed, replaceable deferred actions (banner hide)
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task items, parsing and the sorted list
//! - `input`: Editable input buffer
//! - `completion`: Item state and the completed counter
//! - `prefs`: Persisted preferences and the celebration flag
//! - `scheduler`: Deferred actions for the UI thread
//! - `celebration`: One-time banner trigger
//! - `date_header`: Long-form date header
//! - `view_model`: Screen state, change notification and render snapshot
//! - `ui`: Terminal front end using ratatui
//! - `lock`: File locking and atomic writes
//! - `output`: Human and JSON command output

pub mod celebration;
pub mod cli;
pub mod completion;
pub mod config;
pub mod date_header;
pub mod error;
pub mod input;
pub mod lock;
pub mod output;
pub mod prefs;
pub mod scheduler;
pub mod task;
pub mod ui;
pub mod view_model;

pub use error::{Error, Result};
