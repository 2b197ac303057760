use std::io::{self, Write};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{signal, ProcessError, Termination};
use crate::core::config::Settings;
use crate::streams::Streams;

/// Runs a non-builtin command in a child process and waits for it.
#[derive(Clone, Default)]
pub struct ProcessExecutor {
    interrupted: Option<Arc<AtomicBool>>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `flag` to notice a Ctrl-C that arrived while a child ran.
    pub fn with_interrupt_flag(flag: Arc<AtomicBool>) -> Self {
        Self {
            interrupted: Some(flag),
        }
    }

    /// Spawns `args[0]` (looked up in `PATH`) with the rest as arguments and
    /// returns its shell-style status.
    ///
    /// Launch failures are reported on `streams.err`: 127 for an unknown
    /// command, 126 when it is not executable, 1 otherwise.
    pub fn execute(
        &self,
        args: &[String],
        settings: &Settings,
        streams: &mut Streams,
    ) -> io::Result<i32> {
        let Some((program, rest)) = args.split_first() else {
            writeln!(streams.err, "akujobip1: No command specified")?;
            return Ok(1);
        };

        if settings.debug.show_fork_pids {
            writeln!(streams.err, "[DEBUG] About to spawn: {}", args.join(" "))?;
        }
        // Anything we printed must land before the child's output.
        streams.flush()?;

        // Only interrupts that arrive while this child runs count.
        if let Some(flag) = &self.interrupted {
            signal::take_interrupt(flag);
        }

        let mut child = match self.spawn(program, rest) {
            Ok(child) => child,
            Err(e) => {
                debug!(error = ?e, "spawn failed");
                writeln!(streams.err, "akujobip1: {}", e)?;
                return Ok(e.exit_code());
            }
        };

        let pid = child.id();
        debug!(pid, program = %program, "spawned child");
        if settings.debug.show_fork_pids {
            writeln!(streams.err, "[DEBUG] Spawned child PID {}", pid)?;
        }

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                let e = ProcessError::Wait(e);
                warn!(pid, error = %e, "wait failed");
                writeln!(streams.err, "akujobip1: {}", e)?;
                return Ok(1);
            }
        };

        if let Some(flag) = &self.interrupted {
            if signal::take_interrupt(flag) {
                writeln!(streams.out)?;
            }
        }

        let termination = Termination::from(status);
        debug!(pid, ?termination, "child finished");
        termination.report(&settings.execution, streams)
    }

    fn spawn(&self, program: &str, args: &[String]) -> Result<Child, ProcessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // SAFETY: the hook only calls signal(2).
        unsafe {
            command.pre_exec(signal::restore_default_dispositions);
        }

        command
            .spawn()
            .map_err(|e| ProcessError::from_spawn(program, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExitCodeMode;
    use std::fs;
    use tempfile::TempDir;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn run_with(words: &[&str], settings: &Settings) -> (i32, String, String) {
        let (mut streams, out, err) = Streams::captured();
        let code = ProcessExecutor::new()
            .execute(&args(words), settings, &mut streams)
            .unwrap();
        (code, out.contents(), err.contents())
    }

    fn run(words: &[&str]) -> (i32, String, String) {
        run_with(words, &Settings::default())
    }

    #[test]
    fn test_empty_command() {
        let (code, out, err) = run(&[]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("No command specified"));
    }

    #[test]
    fn test_successful_command_is_quiet() {
        let (code, out, err) = run(&["true"]);
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_exit_code_returned_and_shown() {
        let (code, out, _) = run(&["sh", "-c", "exit 42"]);
        assert_eq!(code, 42);
        assert_eq!(out, "[Exit: 42]\n");
    }

    #[test]
    fn test_exit_code_hidden_when_never() {
        let mut settings = Settings::default();
        settings.execution.show_exit_codes = ExitCodeMode::Never;

        let (code, out, _) = run_with(&["false"], &settings);
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_custom_exit_format() {
        let mut settings = Settings::default();
        settings.execution.show_exit_codes = ExitCodeMode::Always;
        settings.execution.exit_code_format = "Exit code: {code}".to_string();

        let (code, out, _) = run_with(&["true"], &settings);
        assert_eq!(code, 0);
        assert_eq!(out, "Exit code: 0\n");
    }

    #[test]
    fn test_terminated_by_signal() {
        let mut settings = Settings::default();
        settings.execution.show_exit_codes = ExitCodeMode::Never;

        let (code, out, err) = run_with(&["sh", "-c", "kill -TERM $$"], &settings);
        assert_eq!(code, 143);
        assert!(out.is_empty());
        assert!(err.contains("Terminated by signal 15"));

        let (code, _, err) = run(&["sh", "-c", "kill -KILL $$"]);
        assert_eq!(code, 137);
        assert!(err.contains("Terminated by signal 9"));
    }

    #[test]
    fn test_command_not_found() {
        let (code, _, err) = run(&["nonexistent_command_akujobip1"]);
        assert_eq!(code, 127);
        assert!(err.contains("command not found: nonexistent_command_akujobip1"));
    }

    #[test]
    fn test_not_executable() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("script.sh");
        fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();
        let path = script.display().to_string();

        let (code, _, err) = run(&[&path]);
        assert_eq!(code, 126);
        assert!(err.contains("permission denied"));
    }

    #[test]
    fn test_debug_spawn_notices() {
        let mut settings = Settings::default();
        settings.debug.show_fork_pids = true;

        let (code, _, err) = run_with(&["true"], &settings);
        assert_eq!(code, 0);
        assert!(err.contains("[DEBUG] About to spawn: true"));
        assert!(err.contains("[DEBUG] Spawned child PID "));
    }

    #[test]
    fn test_stale_interrupt_ignored() {
        let flag = Arc::new(AtomicBool::new(true));
        let executor = ProcessExecutor::with_interrupt_flag(Arc::clone(&flag));
        let (mut streams, out, _) = Streams::captured();

        let code = executor
            .execute(&args(&["true"]), &Settings::default(), &mut streams)
            .unwrap();

        assert_eq!(code, 0);
        assert!(out.contents().is_empty());
        assert!(!flag.load(std::sync::atomic::Ordering::SeqCst));
    }
}
