use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "arbor", version, about = "Shell over an in-memory directory tree")]
pub struct CliArgs {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn", env = "ARBOR_LOG_LEVEL")]
    pub log_level: String,

    /// Run a single command line and exit
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Suppress the `[dir] $ ` prompt
    #[arg(long, env = "ARBOR_NO_PROMPT")]
    pub no_prompt: bool,

    /// Host file with one command per line, run in order
    pub script: Option<PathBuf>,
}

impl CliArgs {
    /// Only an interactive session on stdin shows the prompt.
    pub fn shows_prompt(&self) -> bool {
        !self.no_prompt && self.command.is_none() && self.script.is_none()
    }
}
