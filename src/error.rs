//! Error types for easytask
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config)
//! - 4: Operation failed (I/O, preferences, terminal)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the easytask CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for easytask operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    // Operation failures (exit code 4)
    #[error("Could not determine a home directory for {0}")]
    NoHomeDir(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_) | Error::InvalidArgument(_) | Error::TaskNotFound(_) => {
                exit_codes::USER_ERROR
            }

            Error::NoHomeDir(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for the JSON error envelope, if any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::LockFailed(path) => Some(serde_json::json!({ "path": path })),
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task_id": id })),
            _ => None,
        }
    }
}

/// Result type alias for easytask operations
pub type Result<T> = std::result::Result<T, Error>;
