use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::core::config::ConfigError;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("process error: {0}")]
    Process(#[from] ProcessError),
}
