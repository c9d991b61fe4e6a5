//! Discovery of migratable and unmigratable apps

use super::types::{
    LoadedProjectConfig, MigratableApp, MigrationApps, PlatformVersion, UnmigratableApp,
    UnmigratableReason,
};
use crate::api::MigrationApi;
use log::{debug, info};

/// List the apps of an account, scoped to an existing project when one is loaded
pub async fn fetch_migration_apps(
    api: &dyn MigrationApi,
    account_id: u64,
    platform_version: PlatformVersion,
    project_config: Option<&LoadedProjectConfig>,
) -> anyhow::Result<MigrationApps> {
    let response = api
        .list_apps_for_migration(account_id, platform_version)
        .await?;
    info!(
        "Account {} has {} migratable and {} unmigratable apps",
        account_id,
        response.migratable_apps.len(),
        response.unmigratable_apps.len()
    );

    let project_name = project_config.and_then(LoadedProjectConfig::project_name);
    let migratable_apps = filter_apps_by_project(response.migratable_apps, project_name);
    if let Some(name) = project_name {
        debug!(
            "{} migratable apps belong to project '{}'",
            migratable_apps.len(),
            name
        );
    }

    Ok(MigrationApps {
        migratable_apps,
        unmigratable_apps: response.unmigratable_apps,
    })
}

/// Keep the apps whose project name equals `project_name` exactly. `None` keeps everything.
pub fn filter_apps_by_project(apps: Vec<MigratableApp>, project_name: Option<&str>) -> Vec<MigratableApp> {
    match project_name {
        None => apps,
        Some(name) => apps
            .into_iter()
            .filter(|app| app.project_name.as_deref() == Some(name))
            .collect(),
    }
}

/// For a new project: apps that already back a project cannot be migrated
/// into another one, so they move to the unmigratable list.
pub fn mark_apps_in_projects(apps: MigrationApps) -> MigrationApps {
    let (in_project, free): (Vec<_>, Vec<_>) = apps
        .migratable_apps
        .into_iter()
        .partition(|app| app.project_name.is_some());

    let mut unmigratable_apps = apps.unmigratable_apps;
    unmigratable_apps.extend(in_project.into_iter().map(|app| UnmigratableApp {
        app_id: app.app_id,
        app_name: app.app_name,
        unmigratable_reason: UnmigratableReason::PartOfProjectAlready,
        migration_components: app.migration_components,
        project_name: app.project_name,
    }));

    MigrationApps {
        migratable_apps: free,
        unmigratable_apps,
    }
}
