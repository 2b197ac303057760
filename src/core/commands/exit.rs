use std::io::{self, Write};

use super::{Command, CommandContext, EXIT_SENTINEL};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> io::Result<i32> {
        writeln!(ctx.streams.out, "{}", ctx.settings.exit_message)?;
        Ok(EXIT_SENTINEL)
    }
}
