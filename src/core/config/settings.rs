use serde::Deserialize;
use serde_yaml::Value;

pub const DEFAULT_PROMPT: &str = "AkujobiP1> ";
pub const DEFAULT_EXIT_MESSAGE: &str = "Bye!";
pub const DEFAULT_EXIT_CODE_FORMAT: &str = "[Exit: {code}]";

/// When the exit status of an external command is echoed back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCodeMode {
    Never,
    #[default]
    OnFailure,
    Always,
}

impl ExitCodeMode {
    pub fn should_display(self, code: i32) -> bool {
        match self {
            ExitCodeMode::Never => false,
            ExitCodeMode::OnFailure => code != 0,
            ExitCodeMode::Always => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSettings {
    pub show_exit_codes: ExitCodeMode,
    pub exit_code_format: String,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            show_exit_codes: ExitCodeMode::default(),
            exit_code_format: DEFAULT_EXIT_CODE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobSettings {
    pub enabled: bool,
    pub show_expansions: bool,
}

impl Default for GlobSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_expansions: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CdSettings {
    pub enabled: bool,
    pub show_pwd_after: bool,
}

impl Default for CdSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_pwd_after: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinSettings {
    pub cd: CdSettings,
    pub pwd_enabled: bool,
    pub help_enabled: bool,
}

impl Default for BuiltinSettings {
    fn default() -> Self {
        Self {
            cd: CdSettings::default(),
            pwd_enabled: true,
            help_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSettings {
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugSettings {
    pub show_fork_pids: bool,
}

/// Read-only view of the shell configuration for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub prompt: String,
    pub exit_message: String,
    pub execution: ExecutionSettings,
    pub glob: GlobSettings,
    pub builtins: BuiltinSettings,
    pub errors: ErrorSettings,
    pub debug: DebugSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            exit_message: DEFAULT_EXIT_MESSAGE.to_string(),
            execution: ExecutionSettings::default(),
            glob: GlobSettings::default(),
            builtins: BuiltinSettings::default(),
            errors: ErrorSettings::default(),
            debug: DebugSettings::default(),
        }
    }
}

impl Settings {
    /// Builds settings from a merged YAML tree.
    ///
    /// Absent keys and `null` sub-trees take their defaults silently. Values of
    /// the wrong shape also take their defaults, but are reported in the
    /// returned warning list.
    pub fn from_tree(tree: &Value) -> (Self, Vec<String>) {
        let defaults = Settings::default();
        let mut reader = TreeReader::new(tree);

        let settings = Settings {
            prompt: reader.string(&["prompt", "text"], &defaults.prompt),
            exit_message: reader.string(&["exit", "message"], &defaults.exit_message),
            execution: ExecutionSettings {
                show_exit_codes: reader.mode(
                    &["execution", "show_exit_codes"],
                    defaults.execution.show_exit_codes,
                ),
                exit_code_format: reader.string(
                    &["execution", "exit_code_format"],
                    &defaults.execution.exit_code_format,
                ),
            },
            glob: GlobSettings {
                enabled: reader.boolean(&["glob", "enabled"], defaults.glob.enabled),
                show_expansions: reader
                    .boolean(&["glob", "show_expansions"], defaults.glob.show_expansions),
            },
            builtins: BuiltinSettings {
                cd: CdSettings {
                    enabled: reader
                        .boolean(&["builtins", "cd", "enabled"], defaults.builtins.cd.enabled),
                    show_pwd_after: reader.boolean(
                        &["builtins", "cd", "show_pwd_after"],
                        defaults.builtins.cd.show_pwd_after,
                    ),
                },
                pwd_enabled: reader
                    .boolean(&["builtins", "pwd", "enabled"], defaults.builtins.pwd_enabled),
                help_enabled: reader
                    .boolean(&["builtins", "help", "enabled"], defaults.builtins.help_enabled),
            },
            errors: ErrorSettings {
                verbose: reader.boolean(&["errors", "verbose"], defaults.errors.verbose),
            },
            debug: DebugSettings {
                show_fork_pids: reader
                    .boolean(&["debug", "show_fork_pids"], defaults.debug.show_fork_pids),
            },
        };

        (settings, reader.warnings)
    }
}

struct TreeReader<'v> {
    root: &'v Value,
    warnings: Vec<String>,
}

impl<'v> TreeReader<'v> {
    fn new(root: &'v Value) -> Self {
        Self {
            root,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, message: String) {
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    fn lookup(&mut self, path: &[&str]) -> Option<&'v Value> {
        let mut node = self.root;
        for (depth, key) in path.iter().enumerate() {
            match node {
                Value::Mapping(map) => match map.get(*key) {
                    Some(child) => node = child,
                    None => return None,
                },
                Value::Null => return None,
                _ => {
                    let parent = if depth == 0 {
                        "<root>".to_string()
                    } else {
                        path[..depth].join(".")
                    };
                    self.warn(format!("{} should be a mapping, using defaults", parent));
                    return None;
                }
            }
        }
        match node {
            Value::Null => None,
            value => Some(value),
        }
    }

    fn string(&mut self, path: &[&str], default: &str) -> String {
        match self.lookup(path) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.warn(format!(
                    "{} should be a string, got {}",
                    path.join("."),
                    type_name(other)
                ));
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    fn boolean(&mut self, path: &[&str], default: bool) -> bool {
        match self.lookup(path) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.warn(format!(
                    "{} should be boolean, got {}",
                    path.join("."),
                    type_name(other)
                ));
                default
            }
            None => default,
        }
    }

    fn mode(&mut self, path: &[&str], default: ExitCodeMode) -> ExitCodeMode {
        let Some(value) = self.lookup(path) else {
            return default;
        };
        match serde_yaml::from_value::<ExitCodeMode>(value.clone()) {
            Ok(mode) => mode,
            Err(_) => {
                let shown = match value {
                    Value::String(s) => s.clone(),
                    other => type_name(other).to_string(),
                };
                self.warn(format!(
                    "Invalid {} value '{}', must be 'never', 'on_failure', or 'always'",
                    path.join("."),
                    shown
                ));
                default
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
