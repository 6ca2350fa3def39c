// src/errors.rs

//! Crate-wide error types and helpers.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid construction or invocation arguments. Raised eagerly, never
    /// deferred into a `CommandResult`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested execution mode is not available for this command.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The executable could not be found when spawning a process.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// A process exceeded its configured deadline and was killed.
    #[error("Process timed out after {0:?}")]
    Timeout(Duration),

    /// A process exited with a non-zero status while `check` was enabled.
    #[error("Process exited with code {code}: {stderr}")]
    ProcessFailed { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CommandError>;
