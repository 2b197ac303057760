use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use super::{Command, CommandContext};
use crate::path::change_dir;

/// `cd [dir | -]`. With no argument goes home; `-` returns to the directory
/// the last successful `cd` left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CdCommand;

impl CdCommand {
    fn resolve_target(
        &self,
        args: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> io::Result<Option<PathBuf>> {
        match args.get(1).map(String::as_str) {
            None => match dirs::home_dir() {
                Some(home) => Ok(Some(home)),
                None => {
                    writeln!(ctx.streams.err, "cd: HOME not set")?;
                    Ok(None)
                }
            },
            Some("-") => match ctx.state.previous_dir() {
                Some(previous) => Ok(Some(previous.to_path_buf())),
                None => {
                    writeln!(ctx.streams.err, "cd: OLDPWD not set")?;
                    Ok(None)
                }
            },
            Some(path) => Ok(Some(PathBuf::from(path))),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> io::Result<i32> {
        let Some(target) = self.resolve_target(args, ctx)? else {
            return Ok(1);
        };

        // The old directory may have been removed underneath us.
        let current = env::current_dir().ok();

        if let Err(e) = change_dir(&target) {
            writeln!(ctx.streams.err, "cd: {}: {}", target.display(), e)?;
            return Ok(1);
        }
        debug!(target = %target.display(), "changed directory");

        if let Some(current) = current {
            ctx.state.set_previous_dir(current);
        }

        if ctx.settings.builtins.cd.show_pwd_after {
            match env::current_dir() {
                Ok(dir) => writeln!(ctx.streams.out, "{}", dir.display())?,
                Err(e) => writeln!(ctx.streams.err, "cd: {}", e)?,
            }
        }

        Ok(0)
    }
}
