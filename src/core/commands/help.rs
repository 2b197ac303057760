use std::io::{self, Write};

use super::{Command, CommandContext};

const HELP_TEXT: &str = "\
Built-in commands:
  exit       Exit the shell
  cd [dir]   Change directory (cd - for previous, cd for home)
  pwd        Print working directory
  help       Show this help message
";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> io::Result<i32> {
        ctx.streams.out.write_all(HELP_TEXT.as_bytes())?;
        Ok(0)
    }
}
