use super::commands::MigrateCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "project-migrate")]
#[command(about = "Migrate hosted classic apps into projects", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Migrate an app into a new or existing project
    Migrate(MigrateCommands),
}
