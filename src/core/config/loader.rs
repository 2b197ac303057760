use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::{ConfigError, ConfigPaths, Settings};

/// Layers settings files over the compiled defaults.
///
/// Search-path files are optional and a broken one only produces a warning.
/// A file named explicitly with [`ConfigLoader::with_file`] must load.
pub struct ConfigLoader {
    paths: ConfigPaths,
    explicit_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::with_paths(ConfigPaths::discover())
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self {
            paths,
            explicit_file: None,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<Settings, ConfigError> {
        let tree = self.load_tree()?;
        let (settings, warnings) = Settings::from_tree(&tree);
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        Ok(settings)
    }

    /// Merged YAML tree of every layer that could be read.
    pub fn load_tree(&self) -> Result<Value, ConfigError> {
        let mut tree = Value::Mapping(Mapping::new());

        let optional = self
            .paths
            .user_path
            .iter()
            .chain(std::iter::once(&self.paths.local_path))
            .chain(self.paths.env_path.iter());

        for path in optional {
            if let Some(layer) = self.read_optional(path) {
                merge(&mut tree, layer);
            }
        }

        if let Some(explicit) = &self.explicit_file {
            merge(&mut tree, read_layer(explicit)?);
        }

        Ok(tree)
    }

    fn read_optional(&self, path: &Path) -> Option<Value> {
        if !path.exists() {
            debug!(path = %path.display(), "settings file not present");
            return None;
        }
        match read_layer(path) {
            Ok(layer) => {
                debug!(path = %path.display(), "loaded settings file");
                Some(layer)
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
                None
            }
        }
    }
}

/// Reads one settings document. An empty document is an empty map.
pub fn read_layer(path: &Path) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    match serde_yaml::from_str::<Value>(&content)? {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        layer @ Value::Mapping(_) => Ok(layer),
        _ => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Deep-merges `overlay` into `base`. Maps merge key by key; anything else
/// replaces what was there.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) if existing.is_mapping() && value.is_mapping() => {
                        merge(existing, value)
                    }
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
