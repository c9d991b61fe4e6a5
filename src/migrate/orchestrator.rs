//! Top-level migration pipelines
//!
//! Both platform versions run the same shape: select, initiate, poll to a
//! terminal state, materialize. 2025.2 adds a round of component UID
//! negotiation between initiation and the final poll.

use super::error::MigrationError;
use super::finalize::finalize_app_migration;
use super::initiate::begin_app_migration;
use super::materialize::download_project_files;
use super::setup::{
    DEFAULT_PROJECT_DEST, handle_migration_setup, validate_dest, validate_project_name,
};
use super::status::{failure_error, poll_until};
use super::types::{LoadedProjectConfig, MigrateOptions, MigrationSession, PlatformVersion};
use crate::api::{LegacyMigrationState, LegacyMigrationStatus, MigrationApi, Poller, PublicApp};
use crate::ui::{Choice, PromptProvider};
use log::info;
use std::path::PathBuf;

/// Capabilities a migration run is given instead of reaching for globals
pub struct MigrationContext<'a> {
    pub api: &'a dyn MigrationApi,
    pub prompts: &'a dyn PromptProvider,
    pub poller: &'a Poller,
    /// Base for relative destinations
    pub cwd: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The user declined a confirmation; nothing was changed on the server
    Cancelled,
    Completed {
        session: MigrationSession,
        project_dir: PathBuf,
        build_id: u64,
    },
}

/// Route to the pipeline for the requested platform version
pub async fn migrate_app(
    ctx: &MigrationContext<'_>,
    account_id: u64,
    options: &MigrateOptions,
    project_config: Option<&LoadedProjectConfig>,
) -> anyhow::Result<MigrationOutcome> {
    let platform_version =
        PlatformVersion::from_options(options.platform_version.as_deref(), options.unstable)?;
    info!(
        "Migrating for account {} on platform version {}",
        account_id, platform_version
    );

    match platform_version {
        PlatformVersion::V2023_2 if project_config.is_some() => Err(
            MigrationError::InvalidPlatformVersionForProject(platform_version.to_string()).into(),
        ),
        PlatformVersion::V2023_2 => migrate_app_2023_2(ctx, account_id, options).await,
        PlatformVersion::V2025_2 | PlatformVersion::Unstable => {
            migrate_app_2025_2(ctx, account_id, options, project_config).await
        }
    }
}

/// Migrate an app into a new project, or into the loaded existing project
pub async fn migrate_app_2025_2(
    ctx: &MigrationContext<'_>,
    account_id: u64,
    options: &MigrateOptions,
    project_config: Option<&LoadedProjectConfig>,
) -> anyhow::Result<MigrationOutcome> {
    let platform_version = if options.unstable {
        PlatformVersion::Unstable
    } else {
        PlatformVersion::V2025_2
    };

    if !ctx.api.has_unified_apps_access(account_id).await? {
        return Err(MigrationError::NotEnrolledInBeta { account_id }.into());
    }

    if let Some(loaded) = project_config {
        let config = loaded.project_config.as_ref().ok_or_else(|| {
            MigrationError::InvalidProjectConfig(loaded.project_dir.display().to_string())
        })?;
        if !ctx.api.project_exists(account_id, &config.name).await? {
            return Err(MigrationError::ProjectMustExist {
                project_name: config.name.clone(),
                account_id,
            }
            .into());
        }
    }

    let mut session = MigrationSession::new(account_id);

    let Some(setup) = handle_migration_setup(
        ctx.api,
        ctx.prompts,
        account_id,
        platform_version,
        options,
        project_config,
    )
    .await?
    else {
        info!("Migration cancelled during setup");
        return Ok(MigrationOutcome::Cancelled);
    };
    session.app_id_to_migrate = Some(setup.app_id_to_migrate);
    session.project_name = Some(setup.project_name.clone());
    session.project_dest = Some(setup.project_dest.clone());

    let start = begin_app_migration(
        ctx.api,
        ctx.prompts,
        ctx.poller,
        account_id,
        setup.app_id_to_migrate,
        platform_version,
    )
    .await?;
    session.migration_id = Some(start.migration_id);
    session.uid_map = start.uid_map;

    let build_id = finalize_app_migration(
        ctx.api,
        ctx.poller,
        account_id,
        start.migration_id,
        &session.uid_map,
        &setup.project_name,
    )
    .await?;

    let project_dir = download_project_files(
        ctx.api,
        account_id,
        &setup.project_name,
        build_id,
        &setup.project_dest,
        project_config,
        &ctx.cwd,
    )
    .await?;

    info!("Migration session finished: {:?}", session);
    Ok(MigrationOutcome::Completed {
        session,
        project_dir,
        build_id,
    })
}

/// Single-shot migration of a public app for platform version 2023.2
pub async fn migrate_app_2023_2(
    ctx: &MigrationContext<'_>,
    account_id: u64,
    options: &MigrateOptions,
) -> anyhow::Result<MigrationOutcome> {
    let mut session = MigrationSession::new(account_id);
    let public_apps = ctx.api.list_public_apps(account_id).await?;
    let app = select_public_app(ctx.prompts, &public_apps, account_id, options.app_id)?;
    session.app_id_to_migrate = Some(app.id);

    let project_name = match &options.name {
        Some(name) => name.clone(),
        None => ctx.prompts.input(
            "[--name] What would you like to name the project?",
            None,
            &validate_project_name,
        )?,
    };
    validate_project_name(&project_name).map_err(anyhow::Error::msg)?;
    let project_dest = match &options.dest {
        Some(dest) => dest.clone(),
        None => ctx.prompts.input(
            "[--dest] Where should the project be created?",
            Some(DEFAULT_PROJECT_DEST),
            &validate_dest,
        )?,
    };

    if ctx.api.project_exists(account_id, &project_name).await? {
        return Err(MigrationError::ProjectAlreadyExists {
            project_name,
            account_id,
        }
        .into());
    }

    let proceed = ctx.prompts.confirm(
        &format!(
            "Migrate public app {} ({}) into project '{}'? This cannot be undone",
            app.name, app.id, project_name
        ),
        false,
    )?;
    if !proceed {
        return Ok(MigrationOutcome::Cancelled);
    }

    let migration = ctx
        .api
        .migrate_app_2023_2(account_id, app.id, &project_name)
        .await?;
    info!("Started 2023.2 migration {} for app {}", migration.id, app.id);
    session.migration_id = Some(migration.id);

    let status = poll_until(
        ctx.poller,
        "Converting app to a project",
        || ctx.api.check_legacy_migration_status(account_id, migration.id),
        LegacyMigrationStatus::is_terminal,
    )
    .await?;

    let (project_name, build_id) = match status.status {
        LegacyMigrationState::Success => {
            let project = status.project.ok_or(MigrationError::UnexpectedStatus {
                migration_id: migration.id,
                status: "SUCCESS without project".to_string(),
            })?;
            let build_id = project.deployed_build_id.ok_or(MigrationError::UnexpectedStatus {
                migration_id: migration.id,
                status: "SUCCESS without deployed build".to_string(),
            })?;
            (project.name, build_id)
        }
        LegacyMigrationState::Failure => {
            let detail = status
                .project_error_detail
                .unwrap_or_else(|| format!("Migration of app {} failed", app.id));
            return Err(failure_error(&detail, &status.component_errors).into());
        }
        other => {
            return Err(MigrationError::UnexpectedStatus {
                migration_id: migration.id,
                status: format!("{:?}", other),
            }
            .into());
        }
    };

    let project_dir = download_project_files(
        ctx.api,
        account_id,
        &project_name,
        build_id,
        &project_dest,
        None,
        &ctx.cwd,
    )
    .await?;
    session.project_name = Some(project_name);
    session.project_dest = Some(project_dest);

    info!("Migration session finished: {:?}", session);
    Ok(MigrationOutcome::Completed {
        session,
        project_dir,
        build_id,
    })
}

fn select_public_app<'a>(
    prompts: &dyn PromptProvider,
    apps: &'a [PublicApp],
    account_id: u64,
    app_id: Option<u64>,
) -> anyhow::Result<&'a PublicApp> {
    if !apps.iter().any(|app| app.disabled_reason().is_none()) {
        let details: String = apps
            .iter()
            .map(|app| {
                format!(
                    "\n- {} ({})",
                    app.name,
                    app.disabled_reason().unwrap_or_default()
                )
            })
            .collect();
        return Err(MigrationError::NoAppsEligible {
            account_id,
            details,
        }
        .into());
    }

    let id = match app_id {
        Some(id) => id,
        None => {
            let choices: Vec<Choice> = apps
                .iter()
                .map(|app| match app.disabled_reason() {
                    Some(reason) => Choice::disabled(app.name.clone(), app.id.to_string(), reason),
                    None => Choice::new(app.name.clone(), app.id.to_string()),
                })
                .collect();
            prompts
                .choose("Which public app would you like to migrate?", &choices)?
                .parse()?
        }
    };

    let app = apps
        .iter()
        .find(|app| app.id == id)
        .ok_or(MigrationError::AppNotFound {
            app_id: id,
            account_id,
        })?;
    if let Some(reason) = app.disabled_reason() {
        return Err(MigrationError::AppNotMigratable {
            app_id: id,
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(app)
}
