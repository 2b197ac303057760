use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use akujobip1::core::commands::{BuiltinRegistry, EXIT_SENTINEL};
use akujobip1::core::config::{self, Settings};
use akujobip1::error::ShellError;
use akujobip1::flags::Flags;
use akujobip1::input::{EditorReader, LineReader, StreamReader};
use akujobip1::process::signal;
use akujobip1::shell::Shell;
use akujobip1::streams::Streams;

const LOG_ENV_VAR: &str = "AKUJOBIP1_LOG";

fn main() -> ExitCode {
    let flags = Flags::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new(flags.log_level())),
        )
        .init();

    match run(&flags) {
        Ok(code) => ExitCode::from(code.clamp(0, 255) as u8),
        Err(e) => {
            eprintln!("akujobip1: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Startup failures come back as `Err`; once the shell runs, its own status
/// is returned.
fn run(flags: &Flags) -> Result<i32, ShellError> {
    let settings = config::load(flags.config.as_deref())?;

    match &flags.command {
        Some(line) => run_once(settings, line),
        None => run_interactive(settings),
    }
}

fn run_once(settings: Settings, line: &str) -> Result<i32, ShellError> {
    let mut shell = build_shell(StreamReader::new(io::empty()), settings)?;
    let code = match shell.execute_line(line) {
        Ok(EXIT_SENTINEL) => 0,
        Ok(code) => code,
        Err(e) => {
            shell.report_error(&e);
            1
        }
    };
    Ok(code)
}

fn run_interactive(settings: Settings) -> Result<i32, ShellError> {
    if !io::stdin().is_terminal() {
        let reader = StreamReader::new(io::stdin().lock());
        return Ok(build_shell(reader, settings)?.run());
    }

    let registry = BuiltinRegistry::new(&settings);
    let builtins: Vec<&str> = registry.names().collect();
    let reader = EditorReader::new(&builtins)?;
    Ok(build_shell(reader, settings)?.run())
}

fn build_shell<R: LineReader>(reader: R, settings: Settings) -> Result<Shell<R>, ShellError> {
    let flag = signal::install_interrupt_flag()?;
    Ok(Shell::new(reader, settings, Streams::stdio()).with_interrupt_flag(flag))
}
