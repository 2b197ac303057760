use std::io::{self, Write};

use glob::MatchOptions;
use tracing::debug;

use crate::core::config::GlobSettings;

/// True when `token` contains a wildcard character.
pub fn is_pattern(token: &str) -> bool {
    token.contains(['*', '?', '['])
}

/// Replaces wildcard tokens with the paths they match, relative to the
/// current working directory.
#[derive(Clone)]
pub struct PathExpander {
    options: MatchOptions,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            options: MatchOptions {
                case_sensitive: true,
                require_literal_separator: true,
                require_literal_leading_dot: true,
            },
        }
    }

    /// Expands every pattern token in place of itself, keeping order.
    ///
    /// A pattern with no matches stays as the literal token. With
    /// `show_expansions` set, each expansion is also written to `report`.
    pub fn expand(
        &self,
        tokens: Vec<String>,
        settings: &GlobSettings,
        report: &mut dyn Write,
    ) -> io::Result<Vec<String>> {
        if !settings.enabled {
            return Ok(tokens);
        }

        let mut expanded = Vec::with_capacity(tokens.len());
        for token in tokens {
            if !is_pattern(&token) {
                expanded.push(token);
                continue;
            }

            let matches = self.matches(&token);
            if matches.is_empty() {
                expanded.push(token);
                continue;
            }

            if settings.show_expansions {
                writeln!(report, "glob: {} -> {}", token, matches.join(" "))?;
            }
            expanded.extend(matches);
        }
        Ok(expanded)
    }

    /// Sorted paths matching `pattern`. An invalid pattern matches nothing.
    pub fn matches(&self, pattern: &str) -> Vec<String> {
        let paths = match glob::glob_with(pattern, self.options) {
            Ok(paths) => paths,
            Err(e) => {
                debug!(pattern, error = %e, "treating invalid pattern as literal");
                return Vec::new();
            }
        };

        let mut found: Vec<String> = paths
            .filter_map(Result::ok)
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        found.sort();
        found
    }
}
