use std::collections::BTreeSet;
use std::env;
use std::fs;

use rustyline::completion::Pair;

/// Completes the first word from the shell's builtins and `PATH`.
#[derive(Clone, Debug, Default)]
pub struct CommandCompleter {
    builtins: BTreeSet<String>,
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<I, S>(builtins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut completer = Self {
            builtins: builtins.into_iter().map(Into::into).collect(),
            commands: BTreeSet::new(),
        };
        completer.refresh_commands();
        completer
    }

    /// Rescans `PATH`.
    fn refresh_commands(&mut self) {
        self.commands.clear();
        let Some(path_var) = env::var_os("PATH") else {
            return;
        };

        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if !is_candidate {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        let mut matches: Vec<Pair> = self
            .builtins
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: format!("{} (builtin)", name),
                replacement: format!("{} ", name),
            })
            .collect();

        matches.extend(
            self.commands
                .iter()
                .filter(|name| name.starts_with(prefix) && !self.builtins.contains(*name))
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: format!("{} ", name),
                }),
        );

        matches
    }
}
