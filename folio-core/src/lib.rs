//! # Folio Core
//!
//! UI-agnostic core of the Folio portfolio shell.
//! Provides the directory sandbox, command registry and parser, history,
//! scrollback transcript, file pager, tab completion, the per-user session
//! state machine, and the asynchronous network collaborators.

pub mod builtins;
pub mod command;
pub mod complete;
pub mod config;
pub mod error;
pub mod history;
pub mod pager;
pub mod sandbox;
pub mod services;
pub mod session;
pub mod transcript;

// Re-export commonly used types at the crate root.
pub use command::{Command, CommandCategory, CommandInfo, CommandRegistry};
pub use config::{FolioConfig, load_config};
pub use error::{ConfigError, PathKind, Result, ShellError};
pub use history::History;
pub use pager::Pager;
pub use sandbox::{Entry, Filesystem, LocalFs, Sandbox, WorkDir};
pub use services::{
    ChunkSink, Completion, Dispatcher, HttpService, Job, JobId, Payload, Request, Service,
};
pub use session::{Effect, Input, ScrollKind, Session};
pub use transcript::{Block, LineKind, RenderedLine, Transcript};
