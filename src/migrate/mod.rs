//! App-to-project migration engine
//!
//! Phases, in the order the orchestrator runs them:
//! `catalog` lists apps, `selection` picks one, `setup` resolves the project
//! name and destination, `initiate` starts the job and collects component
//! UIDs, `finalize` resubmits them and waits for a build, and `materialize`
//! downloads and extracts that build.

pub mod catalog;
pub mod error;
pub mod finalize;
pub mod initiate;
pub mod materialize;
pub mod orchestrator;
pub mod reasons;
pub mod selection;
pub mod setup;
pub mod status;
pub mod types;
pub mod uid;

pub use catalog::{fetch_migration_apps, filter_apps_by_project};
pub use error::MigrationError;
pub use finalize::finalize_app_migration;
pub use initiate::{MigrationStart, begin_app_migration};
pub use materialize::{download_project_files, sanitize_file_name};
pub use orchestrator::{
    MigrationContext, MigrationOutcome, migrate_app, migrate_app_2023_2, migrate_app_2025_2,
};
pub use selection::{SelectionResult, select_app_to_migrate, validate_migration_apps};
pub use setup::{MigrationSetup, handle_migration_setup};
pub use types::{
    ComponentError, ComponentUidRequest, LoadedProjectConfig, MigratableApp, MigrateOptions,
    MigrationApp, MigrationApps, MigrationComponent, MigrationSession, MigrationStatus,
    PlatformVersion, ProjectConfig, UidMap, UnmigratableApp, UnmigratableReason,
};
