use std::io::{BufRead, Write};

use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use super::ShellCompleter;

/// Source of input lines for the dispatch loop.
pub trait LineReader {
    /// Shows `prompt` and returns the next line without its terminator.
    ///
    /// End of input is `Err(ReadlineError::Eof)`; Ctrl-C while editing is
    /// `Err(ReadlineError::Interrupted)`.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<String, ReadlineError>;
}

/// Interactive terminal input with completion, highlighting and in-memory
/// history.
pub struct EditorReader {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl EditorReader {
    pub fn new(builtins: &[&str]) -> Result<Self, ReadlineError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(builtins)));
        editor.set_auto_add_history(true);
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<String, ReadlineError> {
        out.flush()?;
        self.editor.readline(prompt)
    }
}

/// Plain line input from any buffered reader, for pipes and tests.
pub struct StreamReader<B> {
    input: B,
}

impl<B: BufRead> StreamReader<B> {
    pub fn new(input: B) -> Self {
        Self { input }
    }
}

impl<B: BufRead> LineReader for StreamReader<B> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<String, ReadlineError> {
        write!(out, "{}", prompt)?;
        out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReadlineError::Eof);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}
