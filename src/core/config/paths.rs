use std::env;
use std::path::PathBuf;

pub const CONFIG_ENV_VAR: &str = "AKUJOBIP1_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "akujobip1.yaml";

/// Settings files searched at startup, lowest priority first.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPaths {
    pub user_path: Option<PathBuf>,
    pub local_path: PathBuf,
    pub env_path: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn discover() -> Self {
        Self::resolve(dirs::home_dir(), env::var(CONFIG_ENV_VAR).ok())
    }

    pub fn resolve(home: Option<PathBuf>, env_value: Option<String>) -> Self {
        let user_path = home.map(|home| home.join(".config").join("akujobip1").join("config.yaml"));
        let env_path = env_value
            .filter(|value| !value.trim().is_empty())
            .map(|value| PathBuf::from(shellexpand::tilde(&value).into_owned()));

        ConfigPaths {
            user_path,
            local_path: PathBuf::from(LOCAL_CONFIG_FILE),
            env_path,
        }
    }
}
