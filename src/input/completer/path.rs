use std::fs;
use std::path::Path;

use rustyline::completion::Pair;

/// Completes file and directory names for argument words.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Candidates for the partial path `word`. Directories end in `/`, files
    /// in a space. Hidden entries only show when the prefix starts with `.`.
    pub fn complete_path(&self, word: &str) -> Vec<Pair> {
        let (dir_part, prefix) = match word.rfind('/') {
            Some(idx) => (&word[..=idx], &word[idx + 1..]),
            None => ("", word),
        };
        let search_dir = if dir_part.is_empty() {
            Path::new(".")
        } else {
            Path::new(dir_part)
        };

        let Ok(entries) = fs::read_dir(search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let hidden = name.starts_with('.') && !prefix.starts_with('.');
                if !name.starts_with(prefix) || hidden {
                    return None;
                }
                let candidate = format!("{}{}", dir_part, name);
                let pair = if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", candidate),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", candidate),
                    }
                };
                Some(pair)
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}
