use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "akujobip1")]
#[command(version, about = "A small interactive command shell")]
pub struct Flags {
    /// Settings file applied on top of all other layers
    #[arg(short = 'C', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Run one command line and exit with its status
    #[arg(short = 'c', value_name = "COMMAND")]
    pub command: Option<String>,
}

impl Flags {
    /// Default tracing filter when `AKUJOBIP1_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}
