//! Ontorepo CLI main entry point

use anyhow::Result;
use clap::Parser;
use ontorepo_cli::commands::{Cli, CommandExecutor};

fn main() -> Result<()> {
    ontorepo_core::logging::init_tracing();

    let cli = Cli::parse();
    let executor = CommandExecutor::new();
    let result = executor.execute(cli.command)?;
    println!("{}", result.render(cli.format)?);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
