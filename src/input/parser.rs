use std::io::{self, Write};

use thiserror::Error;

use crate::core::config::Settings;
use crate::path::PathExpander;
use crate::streams::Streams;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("No closing quotation")]
    UnbalancedQuotes,
}

/// Splits a line into words with POSIX shell quoting.
///
/// Single quotes are literal. Inside double quotes a backslash only escapes
/// `"` and `\\`; before any other character it is kept. A bare backslash
/// escapes the next character. `#` is an ordinary character, not a comment.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    shlex::split(&escape_literals(line)).ok_or(ParseError::UnbalancedQuotes)
}

/// Rewrites `line` so `shlex` keeps what it would otherwise interpret:
/// every unquoted `#` is escaped, and a backslash inside double quotes that
/// does not precede `"` or `\\` is doubled.
fn escape_literals(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len() + 4);
    let mut chars = line.chars();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => {
                quote = None;
                escaped.push(c);
            }
            (Some('"'), '\\') => match chars.next() {
                Some(next @ ('"' | '\\')) => {
                    escaped.push('\\');
                    escaped.push(next);
                }
                Some(next) => {
                    escaped.push_str("\\\\");
                    escaped.push(next);
                }
                None => escaped.push('\\'),
            },
            (Some(_), _) => escaped.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                escaped.push(c);
            }
            (None, '\\') => {
                escaped.push(c);
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
            }
            (None, '#') => escaped.push_str("\\#"),
            (None, _) => escaped.push(c),
        }
    }

    escaped
}

#[derive(Clone, Default)]
pub struct CommandParser {
    expander: PathExpander,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns an input line into an argument vector.
    ///
    /// Malformed quoting is reported on the error stream and yields an empty
    /// vector, same as a blank line.
    pub fn parse(
        &self,
        line: &str,
        settings: &Settings,
        streams: &mut Streams,
    ) -> io::Result<Vec<String>> {
        if line.trim().is_empty() {
            return Ok(Vec::new());
        }

        match tokenize(line) {
            Ok(tokens) => self
                .expander
                .expand(tokens, &settings.glob, streams.err.as_mut()),
            Err(e) => {
                writeln!(streams.err, "Parse error: {}", e)?;
                Ok(Vec::new())
            }
        }
    }
}
