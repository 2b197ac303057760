use std::io;

use thiserror::Error;

pub mod executor;
pub mod format;
pub mod signal;
pub mod status;

pub use executor::ProcessExecutor;
pub use format::render_exit_code;
pub use status::Termination;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("failed to execute {command}: {source}")]
    Spawn { command: String, source: io::Error },

    #[error("failed to wait for child: {0}")]
    Wait(io::Error),

    #[error("failed to install signal handler: {0}")]
    SignalSetup(io::Error),
}

impl ProcessError {
    /// Classifies a failed spawn of `command`.
    pub fn from_spawn(command: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ProcessError::CommandNotFound(command.to_string()),
            io::ErrorKind::PermissionDenied => ProcessError::PermissionDenied(command.to_string()),
            _ => ProcessError::Spawn {
                command: command.to_string(),
                source: err,
            },
        }
    }

    /// Status reported for a command that never started running.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessError::CommandNotFound(_) => 127,
            ProcessError::PermissionDenied(_) => 126,
            _ => 1,
        }
    }
}
