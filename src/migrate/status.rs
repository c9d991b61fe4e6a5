//! Polling and failure reporting shared by every platform version

use super::error::MigrationError;
use super::types::{ComponentError, MigrationStatus};
use crate::api::{MigrationApi, Poller};
use log::{error, info};
use std::future::Future;

/// Poll through the injected poller, turning any poll rejection into
/// `MigrationError::PollFailed` with the cause kept as its source.
pub async fn poll_until<F, Fut, T, P>(
    poller: &Poller,
    message: &str,
    check: F,
    is_done: P,
) -> Result<T, MigrationError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    P: Fn(&T) -> bool,
{
    poller.poll(message, check, is_done).await.map_err(|source| {
        error!("Polling '{}' failed: {}", message, source);
        MigrationError::from(source)
    })
}

/// Poll a migration until `is_done` accepts its status
pub async fn poll_migration_status<P>(
    api: &dyn MigrationApi,
    poller: &Poller,
    account_id: u64,
    migration_id: u64,
    is_done: P,
) -> Result<MigrationStatus, MigrationError>
where
    P: Fn(&MigrationStatus) -> bool,
{
    let status = poll_until(
        poller,
        "Waiting for the migration to finish",
        || api.check_migration_status(account_id, migration_id),
        is_done,
    )
    .await?;
    info!("Migration {} reached status {}", migration_id, status.name());
    Ok(status)
}

/// One line per component error, with the developer symbol when known
pub fn format_component_error(component_error: &ComponentError) -> String {
    match &component_error.developer_symbol {
        Some(symbol) => format!(
            "- {} ({}): {}",
            component_error.component_type, symbol, component_error.error_message
        ),
        None => format!(
            "- {}: {}",
            component_error.component_type, component_error.error_message
        ),
    }
}

/// The project error detail followed by the component errors, each on its
/// own tab-indented line
pub fn format_failure_message(project_error_detail: &str, component_errors: &[ComponentError]) -> String {
    if component_errors.is_empty() {
        return project_error_detail.to_string();
    }

    let lines: Vec<String> = component_errors.iter().map(format_component_error).collect();
    format!("{}\n\t{}", project_error_detail, lines.join("\n\t"))
}

/// `MigrationFailure` carrying the aggregated message of a failed status
pub fn failure_error(project_error_detail: &str, component_errors: &[ComponentError]) -> MigrationError {
    MigrationError::MigrationFailure(format_failure_message(project_error_detail, component_errors))
}
