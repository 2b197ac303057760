use tracing::debug;

use super::Shell;
use crate::{
    core::commands::{Command, CommandContext},
    error::ShellError,
    input::LineReader,
};

impl<R: LineReader> Shell<R> {
    /// Parses and runs one input line.
    ///
    /// Builtins are looked up first, anything else runs as an external
    /// program. Returns the command's status, `EXIT_SENTINEL` when the shell
    /// should stop, or 0 for a line with no words.
    pub fn execute_line(&mut self, line: &str) -> Result<i32, ShellError> {
        let args = self.parser.parse(line, &self.settings, &mut self.streams)?;
        let Some(name) = args.first() else {
            return Ok(0);
        };

        let status = match self.registry.get(name) {
            Some(builtin) => {
                let mut ctx = CommandContext {
                    settings: &self.settings,
                    state: &mut self.state,
                    streams: &mut self.streams,
                };
                builtin.execute(&args, &mut ctx)?
            }
            None => self
                .executor
                .execute(&args, &self.settings, &mut self.streams)?,
        };
        debug!(command = %name, status, "command finished");

        self.streams.flush()?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::EXIT_SENTINEL;
    use crate::core::config::Settings;
    use crate::input::StreamReader;
    use crate::streams::{SharedBuffer, Streams};
    use rustyline::error::ReadlineError;
    use std::collections::VecDeque;
    use std::io::{Cursor, Write};

    /// Replays canned read results, printing the prompt like a terminal.
    struct ScriptedReader {
        script: VecDeque<Result<String, ReadlineError>>,
    }

    impl LineReader for ScriptedReader {
        fn read_line(
            &mut self,
            prompt: &str,
            out: &mut dyn Write,
        ) -> Result<String, ReadlineError> {
            write!(out, "{}", prompt)?;
            self.script.pop_front().unwrap_or(Err(ReadlineError::Eof))
        }
    }

    type ScriptedShell = Shell<ScriptedReader>;

    fn scripted(
        script: Vec<Result<String, ReadlineError>>,
    ) -> (ScriptedShell, SharedBuffer, SharedBuffer) {
        let (streams, out, err) = Streams::captured();
        let reader = ScriptedReader {
            script: script.into(),
        };
        (Shell::new(reader, Settings::default(), streams), out, err)
    }

    type TestShell = Shell<StreamReader<Cursor<Vec<u8>>>>;

    fn shell_bytes(settings: Settings, input: &[u8]) -> (TestShell, SharedBuffer, SharedBuffer) {
        let (streams, out, err) = Streams::captured();
        let reader = StreamReader::new(Cursor::new(input.to_vec()));
        (Shell::new(reader, settings, streams), out, err)
    }

    fn shell_with(settings: Settings, input: &str) -> (TestShell, SharedBuffer, SharedBuffer) {
        shell_bytes(settings, input.as_bytes())
    }

    fn shell(input: &str) -> (TestShell, SharedBuffer, SharedBuffer) {
        shell_with(Settings::default(), input)
    }

    fn terminal_gone() -> Result<String, ReadlineError> {
        Err(ReadlineError::Io(std::io::Error::other("terminal gone")))
    }

    #[test]
    fn test_blank_line_does_nothing() {
        let (mut shell, out, err) = shell("");
        assert_eq!(shell.execute_line("   ").unwrap(), 0);
        assert!(out.contents().is_empty());
        assert!(err.contents().is_empty());
    }

    #[test]
    fn test_exit_returns_sentinel() {
        let (mut shell, out, _) = shell("");
        assert_eq!(shell.execute_line("exit").unwrap(), EXIT_SENTINEL);
        assert_eq!(out.contents(), "Bye!\n");
    }

    #[test]
    fn test_builtin_takes_precedence() {
        let (mut shell, out, _) = shell("");
        assert_eq!(shell.execute_line("help").unwrap(), 0);
        assert!(out.contents().starts_with("Built-in commands:"));
    }

    #[test]
    fn test_disabled_builtin_runs_externally() {
        let mut settings = Settings::default();
        settings.builtins.help_enabled = false;
        let (mut shell, _, err) = shell_with(settings, "");

        // No `help` executable is expected on PATH.
        let status = shell.execute_line("help").unwrap();
        assert_ne!(status, EXIT_SENTINEL);
        if status == 127 {
            assert!(err.contents().contains("command not found: help"));
        }
    }

    #[test]
    fn test_parse_error_reported() {
        let (mut shell, _, err) = shell("");
        assert_eq!(shell.execute_line("echo \"unterminated").unwrap(), 0);
        assert_eq!(err.contents(), "Parse error: No closing quotation\n");
    }

    #[test]
    fn test_external_status() {
        let (mut shell, out, _) = shell("");
        assert_eq!(shell.execute_line("sh -c 'exit 3'").unwrap(), 3);
        assert_eq!(out.contents(), "[Exit: 3]\n");
    }

    #[test]
    fn test_run_until_exit() {
        let (mut shell, out, _) = shell("\nexit\nnever reached\n");
        assert_eq!(shell.run(), 0);

        let out = out.contents();
        assert_eq!(out.matches("AkujobiP1> ").count(), 2);
        assert_eq!(out.matches("Bye!").count(), 1);
    }

    #[test]
    fn test_run_until_eof() {
        let mut settings = Settings::default();
        settings.exit_message = "Goodbye!".to_string();
        let (mut shell, out, _) = shell_with(settings, "true\n");

        assert_eq!(shell.run(), 0);
        let out = out.contents();
        assert_eq!(out.matches("AkujobiP1> ").count(), 2);
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_run_continues_after_failures() {
        let (mut shell, _, err) = shell("nonexistent_command_akujobip1\necho 'open\nexit\n");
        assert_eq!(shell.run(), 0);

        let err = err.contents();
        assert!(err.contains("command not found: nonexistent_command_akujobip1"));
        assert!(err.contains("Parse error: No closing quotation"));
    }

    #[test]
    fn test_report_error_verbose() {
        let mut settings = Settings::default();
        settings.errors.verbose = true;
        let (mut shell, _, err) = shell_with(settings, "");

        let cause = std::io::Error::other("disk on fire");
        shell.report_error(&ShellError::from(cause));

        let err = err.contents();
        assert!(err.starts_with("akujobip1: shell error: I/O error: disk on fire\n"));
        assert!(err.contains("Io("));
        assert!(err.contains("caused by: disk on fire"));
    }

    #[test]
    fn test_report_error_terse() {
        let (mut shell, _, err) = shell("");
        let cause = std::io::Error::other("disk on fire");
        shell.report_error(&ShellError::from(cause));

        assert_eq!(err.contents(), "akujobip1: shell error: I/O error: disk on fire\n");
    }

    #[test]
    fn test_interrupt_reprompts() {
        let (mut shell, out, _) = scripted(vec![
            Err(ReadlineError::Interrupted),
            Err(ReadlineError::Interrupted),
            Err(ReadlineError::Interrupted),
            Ok("exit".to_string()),
        ]);

        assert_eq!(shell.run(), 0);
        assert_eq!(out.contents().matches("AkujobiP1> ").count(), 4);
    }

    #[test]
    fn test_input_failure_stops_loop() {
        let (mut shell, _, err) = scripted(vec![terminal_gone(), terminal_gone(), terminal_gone()]);

        assert_eq!(shell.run(), 1);
        let err = err.contents();
        assert!(err.starts_with("akujobip1: shell error: readline error: terminal gone"));
        assert_eq!(err.matches("terminal gone").count(), 3);
    }

    #[test]
    fn test_isolated_input_failures_continue() {
        let (mut shell, out, _) = scripted(vec![
            terminal_gone(),
            Ok("true".to_string()),
            terminal_gone(),
            terminal_gone(),
            Ok("exit".to_string()),
        ]);

        assert_eq!(shell.run(), 0);
        assert!(out.contents().ends_with("Bye!\n"));
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let (mut shell, out, err) = shell_bytes(Settings::default(), b"\xff\xfe\nexit\n");

        assert_eq!(shell.run(), 0);
        let out = out.contents();
        assert_eq!(out.matches("AkujobiP1> ").count(), 2);
        assert!(out.ends_with("Bye!\n"));
        assert!(err.contents().starts_with("akujobip1: shell error: "));
    }

    #[test]
    fn test_recoverable_errors_never_stop_loop() {
        let mut script: Vec<Result<String, ReadlineError>> = (0..5)
            .map(|_| {
                Err(ReadlineError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "bad bytes",
                )))
            })
            .collect();
        script.push(Ok("exit".to_string()));
        let (mut shell, _, _) = scripted(script);

        assert_eq!(shell.run(), 0);
    }
}
