use std::collections::BTreeMap;
use std::io;

mod cd;
mod exit;
mod help;
mod pwd;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use pwd::PwdCommand;

use crate::core::config::Settings;
use crate::core::state::ShellState;
use crate::streams::Streams;

/// Returned by a builtin to end the dispatch loop. Never reaches the OS.
pub const EXIT_SENTINEL: i32 = -1;

/// Everything a builtin may read or change while it runs.
pub struct CommandContext<'a> {
    pub settings: &'a Settings,
    pub state: &'a mut ShellState,
    pub streams: &'a mut Streams,
}

pub trait Command {
    /// Runs the command. `args[0]` is the command name.
    ///
    /// Returns 0 on success, 1 on a reported failure, or [`EXIT_SENTINEL`].
    /// An `Err` means an output stream could not be written.
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> io::Result<i32>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandType {
    Exit(ExitCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Help(HelpCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> io::Result<i32> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(args, ctx),
            CommandType::Cd(cmd) => cmd.execute(args, ctx),
            CommandType::Pwd(cmd) => cmd.execute(args, ctx),
            CommandType::Help(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Name to builtin lookup. `exit` is always present; the others can be
/// switched off in settings, in which case the name resolves externally.
#[derive(Clone, Debug)]
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl BuiltinRegistry {
    pub fn new(settings: &Settings) -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("exit", CommandType::Exit(ExitCommand));
        if settings.builtins.cd.enabled {
            commands.insert("cd", CommandType::Cd(CdCommand));
        }
        if settings.builtins.pwd_enabled {
            commands.insert("pwd", CommandType::Pwd(PwdCommand));
        }
        if settings.builtins.help_enabled {
            commands.insert("help", CommandType::Help(HelpCommand));
        }

        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<CommandType> {
        self.commands.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}
