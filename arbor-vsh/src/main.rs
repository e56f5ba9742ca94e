use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::Context;
use arbor_vsh::config::CliArgs;
use arbor_vsh::Shell;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut shell = Shell::new(args.shows_prompt());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    if let Some(line) = &args.command {
        tracing::info!("arbor running one command");
        shell.run_line(line, &mut out, &mut err)?;
        out.flush()?;
        if shell.failures() > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Some(path) = &args.script {
        let file = File::open(path)
            .with_context(|| format!("Cannot open script: {}", path.display()))?;
        tracing::info!(script = %path.display(), "arbor running script");
        shell.run(BufReader::new(file), &mut out, &mut err)?;
        return Ok(());
    }

    tracing::info!("arbor ready");
    shell.run(io::stdin().lock(), &mut out, &mut err)?;
    Ok(())
}
