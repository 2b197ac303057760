use std::env;
use std::io::{self, Write};

use super::{Command, CommandContext};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> io::Result<i32> {
        match env::current_dir() {
            Ok(dir) => {
                writeln!(ctx.streams.out, "{}", dir.display())?;
                Ok(0)
            }
            Err(e) => {
                writeln!(ctx.streams.err, "pwd: {}", e)?;
                Ok(1)
            }
        }
    }
}
