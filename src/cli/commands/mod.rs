pub mod migrate;

pub use migrate::{MigrateCommands, handle_migrate_command};
