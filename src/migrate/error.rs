//! Domain errors raised by the migration engine
//!
//! Transport errors are not represented here: they come out of reqwest as
//! `anyhow::Error` and travel up untouched.

use crate::api::polling::PollError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(
        "Account {account_id} isn't enrolled in the required product beta to access this command"
    )]
    NotEnrolledInBeta { account_id: u64 },

    #[error("The project configuration file in {0} is invalid")]
    InvalidProjectConfig(String),

    #[error(
        "Migrations are only supported for existing projects. Project '{project_name}' does not exist in account {account_id}"
    )]
    ProjectMustExist { project_name: String, account_id: u64 },

    #[error(
        "A project named '{project_name}' already exists in account {account_id}. Choose a different project name"
    )]
    ProjectAlreadyExists { project_name: String, account_id: u64 },

    #[error("No apps associated with project {0} are eligible for migration")]
    NoAppsForProject(String),

    #[error(
        "Multiple apps found for project {0}. Only one app per project can be migrated automatically"
    )]
    MultipleAppsForProject(String),

    #[error("No apps in account {account_id} are eligible for migration{details}")]
    NoAppsEligible { account_id: u64, details: String },

    #[error("No app with id {app_id} found in account {account_id}")]
    AppNotFound { app_id: u64, account_id: u64 },

    #[error("App {app_id} cannot be migrated: {reason}")]
    AppNotMigratable { app_id: u64, reason: String },

    #[error("Platform version {0} cannot migrate an existing project")]
    InvalidPlatformVersionForProject(String),

    #[error("{0}")]
    MigrationFailure(String),

    #[error("Migration Failed")]
    PollFailed {
        #[source]
        source: PollError,
    },

    #[error(
        "The migration asked for more component identifiers after they were submitted, which is not supported"
    )]
    UnexpectedInputRequired,

    #[error("Migration {migration_id} ended in unexpected status {status}")]
    UnexpectedStatus { migration_id: u64, status: String },
}

impl From<PollError> for MigrationError {
    fn from(source: PollError) -> Self {
        MigrationError::PollFailed { source }
    }
}
