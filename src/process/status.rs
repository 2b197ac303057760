use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use libc::c_int;
use tracing::debug;

use super::format::render_exit_code;
use crate::core::config::ExecutionSettings;
use crate::streams::Streams;

/// How a waited-for child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
    Stopped(i32),
    Unknown(i32),
}

impl Termination {
    /// Decodes a raw `waitpid` status word.
    pub fn from_raw(status: c_int) -> Self {
        if libc::WIFEXITED(status) {
            Termination::Exited(libc::WEXITSTATUS(status))
        } else if libc::WIFSIGNALED(status) {
            Termination::Signaled(libc::WTERMSIG(status))
        } else if libc::WIFSTOPPED(status) {
            Termination::Stopped(libc::WSTOPSIG(status))
        } else {
            Termination::Unknown(status)
        }
    }

    /// Shell-style status: the exit code, or 128 plus the signal number.
    pub fn code(self) -> i32 {
        match self {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) | Termination::Stopped(signal) => 128 + signal,
            Termination::Unknown(_) => 1,
        }
    }

    /// Tells the user how the child ended and returns [`Termination::code`].
    ///
    /// Normal exits go to stdout only when `settings` asks for them; signal
    /// notices always go to stderr.
    pub fn report(self, settings: &ExecutionSettings, streams: &mut Streams) -> io::Result<i32> {
        match self {
            Termination::Exited(code) => {
                if settings.show_exit_codes.should_display(code) {
                    writeln!(
                        streams.out,
                        "{}",
                        render_exit_code(&settings.exit_code_format, code)
                    )?;
                }
            }
            Termination::Signaled(signal) => {
                writeln!(streams.err, "Terminated by signal {}", signal)?;
            }
            Termination::Stopped(signal) => {
                writeln!(streams.err, "Stopped by signal {}", signal)?;
            }
            Termination::Unknown(raw) => {
                debug!(raw, "undecodable child status");
            }
        }
        Ok(self.code())
    }
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        Termination::from_raw(status.into_raw())
    }
}
