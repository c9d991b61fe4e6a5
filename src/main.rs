use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::info;
use std::process::ExitCode;

mod cli;

use cli::Cli;
use cli::app::Commands;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("project-migrate.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting project-migrate {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Migrate(migrate_args) => {
            cli::commands::handle_migrate_command(migrate_args).await?;
        }
    }

    Ok(())
}

/// The one line printed for a failed run, with the full cause chain
fn failure_message(err: &anyhow::Error) -> String {
    format!("{} {:#}", "Migration failed:".red().bold(), err)
}
