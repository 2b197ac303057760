use std::collections::BTreeSet;

use inksac::prelude::*;

use crate::path::is_pattern;

/// Colors the line being edited: builtins, other commands, flags and
/// wildcard words each get their own style.
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    builtins: BTreeSet<String>,
}

impl SyntaxHighlighter {
    pub fn new<I, S>(builtins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support, builtins)
    }

    pub fn with_support<I, S>(color_support: ColorSupport, builtins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            color_support,
            builtins: builtins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Styles each word in place. Whitespace is copied through untouched so
    /// the cursor stays where the editor expects it.
    pub fn highlight_line(&self, line: &str) -> String {
        if !self.is_enabled() || line.trim().is_empty() {
            return line.to_string();
        }

        let mut highlighted = String::with_capacity(line.len() * 2);
        let mut first = true;
        let mut rest = line;

        while !rest.is_empty() {
            let word_start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
            highlighted.push_str(&rest[..word_start]);
            rest = &rest[word_start..];
            if rest.is_empty() {
                break;
            }

            let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..word_end];
            highlighted.push_str(&self.highlight_word(word, first));
            first = false;
            rest = &rest[word_end..];
        }

        highlighted
    }

    fn highlight_word(&self, word: &str, is_command: bool) -> String {
        let style = if is_command && self.builtins.contains(word) {
            Style::builder().foreground(Color::Magenta).bold().build()
        } else if is_command {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else if word.starts_with('-') {
            Style::builder().foreground(Color::Yellow).build()
        } else if is_pattern(word) {
            Style::builder().foreground(Color::Green).build()
        } else {
            return word.to_string();
        };

        word.style(style).to_string()
    }
}
