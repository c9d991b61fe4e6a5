//! Submitting component UIDs and waiting for the build

use super::error::MigrationError;
use super::status::{failure_error, poll_migration_status};
use super::types::{MigrationStatus, UidMap};
use crate::api::{MigrationApi, Poller};
use log::{info, warn};

/// Continue the migration with `uid_map` and return the resulting build id
pub async fn finalize_app_migration(
    api: &dyn MigrationApi,
    poller: &Poller,
    account_id: u64,
    migration_id: u64,
    uid_map: &UidMap,
    project_name: &str,
) -> anyhow::Result<u64> {
    let migration_id = api
        .continue_migration(account_id, migration_id, uid_map, project_name)
        .await?
        .migration_id;
    info!(
        "Continued migration {} with {} component UIDs",
        migration_id,
        uid_map.len()
    );

    // INPUT_REQUIRED stops the poll too, so a second round of questions fails
    // here instead of polling until the timeout.
    let status = poll_migration_status(api, poller, account_id, migration_id, |status| {
        !matches!(status, MigrationStatus::Started)
    })
    .await?;

    match status {
        MigrationStatus::Success { build_id } => {
            info!("Migration {} produced build {}", migration_id, build_id);
            Ok(build_id)
        }
        MigrationStatus::Failure {
            project_error_detail,
            component_errors,
        } => Err(failure_error(&project_error_detail, &component_errors).into()),
        MigrationStatus::InputRequired { .. } => {
            warn!(
                "Migration {} asked for component UIDs a second time",
                migration_id
            );
            Err(MigrationError::UnexpectedInputRequired.into())
        }
        MigrationStatus::Started => Err(MigrationError::UnexpectedStatus {
            migration_id,
            status: "STARTED".to_string(),
        }
        .into()),
    }
}
