//! Resolving which app, project name and destination a run uses

use super::catalog::{fetch_migration_apps, mark_apps_in_projects};
use super::error::MigrationError;
use super::selection::{select_app_to_migrate, validate_migration_apps};
use super::types::{LoadedProjectConfig, MigrateOptions, PlatformVersion};
use crate::api::MigrationApi;
use crate::ui::PromptProvider;
use log::info;

pub const DEFAULT_PROJECT_DEST: &str = ".";

/// Everything needed to start a migration once the user has agreed to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSetup {
    pub app_id_to_migrate: u64,
    pub project_name: String,
    pub project_dest: String,
}

/// Returns `Ok(None)` when the user declines at any confirm step
pub async fn handle_migration_setup(
    api: &dyn MigrationApi,
    prompts: &dyn PromptProvider,
    account_id: u64,
    platform_version: PlatformVersion,
    options: &MigrateOptions,
    project_config: Option<&LoadedProjectConfig>,
) -> anyhow::Result<Option<MigrationSetup>> {
    if let Some(loaded) = project_config {
        let config = loaded.project_config.as_ref().ok_or_else(|| {
            MigrationError::InvalidProjectConfig(loaded.project_dir.display().to_string())
        })?;

        let apps = fetch_migration_apps(api, account_id, platform_version, Some(loaded)).await?;
        validate_migration_apps(options.app_id, account_id, &apps, Some(loaded))?;
        let selection = select_app_to_migrate(prompts, &apps, account_id, options.app_id)?;
        if !selection.proceed {
            return Ok(None);
        }

        return Ok(Some(MigrationSetup {
            app_id_to_migrate: selection.app_id_to_migrate,
            project_name: config.name.clone(),
            project_dest: loaded.project_dir.display().to_string(),
        }));
    }

    let apps = mark_apps_in_projects(
        fetch_migration_apps(api, account_id, platform_version, None).await?,
    );
    validate_migration_apps(options.app_id, account_id, &apps, None)?;
    let selection = select_app_to_migrate(prompts, &apps, account_id, options.app_id)?;
    if !selection.proceed {
        return Ok(None);
    }

    let project_name = match &options.name {
        Some(name) => name.clone(),
        None => prompts.input(
            "[--name] What would you like to name the project?",
            None,
            &validate_project_name,
        )?,
    };
    validate_project_name(&project_name).map_err(anyhow::Error::msg)?;

    let project_dest = match &options.dest {
        Some(dest) => dest.clone(),
        None => prompts.input(
            "[--dest] Where should the project be created?",
            Some(DEFAULT_PROJECT_DEST),
            &validate_dest,
        )?,
    };

    let proceed = prompts.confirm(
        &format!(
            "Migrate app {} into a new project named '{}' in {}?",
            selection.app_id_to_migrate, project_name, project_dest
        ),
        true,
    )?;
    if !proceed {
        return Ok(None);
    }

    if api.project_exists(account_id, &project_name).await? {
        return Err(MigrationError::ProjectAlreadyExists {
            project_name,
            account_id,
        }
        .into());
    }

    info!(
        "Migrating app {} into new project '{}' at {}",
        selection.app_id_to_migrate, project_name, project_dest
    );
    Ok(Some(MigrationSetup {
        app_id_to_migrate: selection.app_id_to_migrate,
        project_name,
        project_dest,
    }))
}

pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        Err("A project name is required".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_dest(dest: &str) -> Result<(), String> {
    if dest.trim().is_empty() {
        Err("A destination is required".to_string())
    } else {
        Ok(())
    }
}
