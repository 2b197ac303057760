use std::path::{Path, PathBuf};

/// Session state that outlives a single command.
#[derive(Debug, Default, Clone)]
pub struct ShellState {
    previous_dir: Option<PathBuf>,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory `cd -` returns to, if a `cd` has succeeded yet.
    pub fn previous_dir(&self) -> Option<&Path> {
        self.previous_dir.as_deref()
    }

    pub fn set_previous_dir(&mut self, dir: PathBuf) {
        self.previous_dir = Some(dir);
    }
}
