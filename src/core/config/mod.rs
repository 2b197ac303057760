//! Shell settings: the typed [`Settings`] view and the YAML layers it is
//! loaded from.
//!
//! Layers, lowest priority first:
//!
//! 1. Compiled-in defaults
//! 2. `~/.config/akujobip1/config.yaml`
//! 3. `./akujobip1.yaml`
//! 4. `$AKUJOBIP1_CONFIG`
//! 5. A file passed with `--config`

use std::path::{Path, PathBuf};

use thiserror::Error;

mod loader;
mod paths;
mod settings;

pub use loader::{merge, read_layer, ConfigLoader};
pub use paths::{ConfigPaths, CONFIG_ENV_VAR, LOCAL_CONFIG_FILE};
pub use settings::{
    BuiltinSettings, CdSettings, DebugSettings, ErrorSettings, ExecutionSettings, ExitCodeMode,
    GlobSettings, Settings, DEFAULT_EXIT_CODE_FORMAT, DEFAULT_EXIT_MESSAGE, DEFAULT_PROMPT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config file {} is not a valid YAML dictionary", .path.display())]
    NotAMapping { path: PathBuf },
}

/// Load settings from the default locations, plus `explicit` when given.
pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let loader = ConfigLoader::new();
    match explicit {
        Some(path) => loader.with_file(path).load(),
        None => loader.load(),
    }
}
