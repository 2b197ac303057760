use std::error::Error as _;
use std::io::{self, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rustyline::error::ReadlineError;
use tracing::debug;

mod executor;

use crate::{
    core::{
        commands::{BuiltinRegistry, EXIT_SENTINEL},
        config::Settings,
        ShellState,
    },
    error::ShellError,
    input::{CommandParser, LineReader},
    process::ProcessExecutor,
    streams::Streams,
};

/// Consecutive hard read failures after which the input is given up on.
const MAX_READ_FAILURES: u32 = 3;

/// A bad line that was already consumed, or a read cut short by a signal.
fn is_recoverable(err: &ReadlineError) -> bool {
    match err {
        ReadlineError::Io(e) => matches!(
            e.kind(),
            io::ErrorKind::InvalidData | io::ErrorKind::Interrupted
        ),
        _ => false,
    }
}

/// The read, parse, dispatch loop.
pub struct Shell<R: LineReader> {
    reader: R,
    settings: Settings,
    state: ShellState,
    registry: BuiltinRegistry,
    parser: CommandParser,
    executor: ProcessExecutor,
    streams: Streams,
}

impl<R: LineReader> Shell<R> {
    pub fn new(reader: R, settings: Settings, streams: Streams) -> Self {
        let registry = BuiltinRegistry::new(&settings);
        Shell {
            reader,
            settings,
            state: ShellState::new(),
            registry,
            parser: CommandParser::new(),
            executor: ProcessExecutor::new(),
            streams,
        }
    }

    /// Lets the executor notice Ctrl-C delivered while a child runs.
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.executor = ProcessExecutor::with_interrupt_flag(flag);
        self
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Runs until `exit` or end of input and returns the shell's exit code:
    /// 0 normally, 1 if reading input keeps failing.
    pub fn run(&mut self) -> i32 {
        let mut read_failures = 0;
        loop {
            let line = match self
                .reader
                .read_line(&self.settings.prompt, self.streams.out.as_mut())
            {
                Ok(line) => {
                    read_failures = 0;
                    line
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("input interrupted");
                    let _ = writeln!(self.streams.out);
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    let _ = writeln!(self.streams.out);
                    let _ = writeln!(self.streams.out, "{}", self.settings.exit_message);
                    let _ = self.streams.flush();
                    return 0;
                }
                Err(e) => {
                    let recoverable = is_recoverable(&e);
                    self.report_error(&ShellError::from(e));
                    if recoverable {
                        continue;
                    }
                    read_failures += 1;
                    if read_failures >= MAX_READ_FAILURES {
                        return 1;
                    }
                    continue;
                }
            };

            match self.execute_line(&line) {
                Ok(EXIT_SENTINEL) => {
                    let _ = self.streams.flush();
                    return 0;
                }
                Ok(_) => {}
                Err(e) => self.report_error(&e),
            }
        }
    }

    /// Reports an error that escaped command dispatch. The loop keeps going.
    pub fn report_error(&mut self, err: &ShellError) {
        let err_stream = &mut self.streams.err;
        let _ = writeln!(err_stream, "akujobip1: shell error: {}", err);

        if self.settings.errors.verbose {
            let _ = writeln!(err_stream, "{:?}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                let _ = writeln!(err_stream, "  caused by: {}", cause);
                source = cause.source();
            }
        }
        let _ = err_stream.flush();
    }
}
