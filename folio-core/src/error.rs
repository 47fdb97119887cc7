//! Error types for the Folio shell core.
//!
//! Uses `thiserror` for the public error enum. Every variant renders as the
//! human-readable line the shell appends to the transcript, so session code
//! can turn any failure into a block with `to_string()` and carry on.

use std::path::PathBuf;

/// What kind of entry a hidden-path denial was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathKind::Directory => write!(f, "directories"),
            PathKind::File => write!(f, "files"),
        }
    }
}

/// Top-level error type for the Folio core library.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Navigation target is missing, not a directory, or outside the root.
    #[error("Invalid directory: {target}")]
    InvalidPath { target: String },

    /// Dot-prefixed access attempt.
    #[error("Access denied: Hidden {kind} are not accessible")]
    HiddenPathDenied { kind: PathKind },

    #[error("Error reading file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error fetching {service}: {message}")]
    Collaborator { service: String, message: String },

    #[error("{input} is not a valid command, try running help for commands")]
    UnknownCommand { input: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    pub fn collaborator(service: impl Into<String>, message: impl std::fmt::Display) -> Self {
        ShellError::Collaborator {
            service: service.into(),
            message: message.to_string(),
        }
    }
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `ShellError`.
pub type Result<T> = std::result::Result<T, ShellError>;
