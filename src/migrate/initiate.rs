//! Starting a migration job and collecting component UIDs

use super::error::MigrationError;
use super::status::{failure_error, poll_migration_status};
use super::types::{ComponentUidRequest, MigrationStatus, PlatformVersion, UidMap};
use super::uid::validate_unique_uid;
use crate::api::{MigrationApi, Poller};
use crate::ui::PromptProvider;
use indexmap::IndexMap;
use log::info;

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationStart {
    pub migration_id: u64,
    pub uid_map: UidMap,
}

/// Initialize the job, wait for it to leave `STARTED`, and answer one round of
/// UID questions. Once initialized the job exists server-side regardless of
/// what happens next.
pub async fn begin_app_migration(
    api: &dyn MigrationApi,
    prompts: &dyn PromptProvider,
    poller: &Poller,
    account_id: u64,
    app_id: u64,
    platform_version: PlatformVersion,
) -> anyhow::Result<MigrationStart> {
    let migration_id = api
        .initialize_migration(account_id, app_id, platform_version)
        .await?
        .migration_id;
    info!("Initialized migration {} for app {}", migration_id, app_id);

    let status = poll_migration_status(api, poller, account_id, migration_id, |status| {
        !matches!(status, MigrationStatus::Started)
    })
    .await?;

    let uid_map = match status {
        MigrationStatus::InputRequired {
            components_requiring_uids,
        } => collect_component_uids(prompts, &components_requiring_uids)?,
        MigrationStatus::Success { .. } => UidMap::new(),
        MigrationStatus::Failure {
            project_error_detail,
            component_errors,
        } => return Err(failure_error(&project_error_detail, &component_errors).into()),
        MigrationStatus::Started => {
            return Err(MigrationError::UnexpectedStatus {
                migration_id,
                status: "STARTED".to_string(),
            }
            .into());
        }
    };

    Ok(MigrationStart {
        migration_id,
        uid_map,
    })
}

/// Prompt for each component in server order. Every answer must be a valid
/// UID that no earlier component already took.
pub fn collect_component_uids(
    prompts: &dyn PromptProvider,
    components: &IndexMap<String, ComponentUidRequest>,
) -> anyhow::Result<UidMap> {
    let mut uid_map = UidMap::new();

    for (component_id, request) in components {
        let message = uid_prompt_message(component_id, request);
        let taken: Vec<String> = uid_map.values().cloned().collect();
        let validate = |value: &str| validate_unique_uid(value, &taken);

        let uid = prompts.input(&message, request.component_hint.as_deref(), &validate)?;
        validate(&uid).map_err(anyhow::Error::msg)?;
        uid_map.insert(component_id.clone(), uid);
    }

    info!("Collected {} component UIDs", uid_map.len());
    Ok(uid_map)
}

pub fn uid_prompt_message(component_id: &str, request: &ComponentUidRequest) -> String {
    let component_type = request.component_type.to_lowercase();
    match &request.component_hint {
        Some(hint) => format!(
            "Unique identifier for {} '{}' (ID: {})",
            component_type, hint, component_id
        ),
        None => format!(
            "Unique identifier for {} (ID: {})",
            component_type, component_id
        ),
    }
}
