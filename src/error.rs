//! Error types for grapnel.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error type. Everything here aborts the run before or during
/// startup; checker failures are recorded by the dispatch engine
/// instead and never surface as this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid hook name: {0}")]
    UnknownHook(String),

    #[error("Unknown checker: {0}")]
    UnknownChecker(String),

    #[error("Cannot find .git directory at or above {0}")]
    NoGitRepo(PathBuf),

    #[error("{command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("Malformed hook trigger: {0}")]
    Trigger(String),
}
