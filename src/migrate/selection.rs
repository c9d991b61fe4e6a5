//! Choosing the single app a run migrates

use super::error::MigrationError;
use super::reasons::app_reason_text;
use super::types::{LoadedProjectConfig, MigrationApp, MigrationApps};
use crate::ui::{Choice, PromptProvider};
use colored::Colorize;
use log::{debug, info};

/// Outcome of selection. `proceed: false` means the user declined; not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub proceed: bool,
    pub app_id_to_migrate: u64,
}

/// Fail fast, before any prompt, when the catalog cannot yield a target
pub fn validate_migration_apps(
    app_id: Option<u64>,
    account_id: u64,
    apps: &MigrationApps,
    project_config: Option<&LoadedProjectConfig>,
) -> Result<(), MigrationError> {
    if let Some(name) = project_config.and_then(LoadedProjectConfig::project_name) {
        match apps.migratable_apps.len() {
            0 => return Err(MigrationError::NoAppsForProject(name.to_string())),
            1 => {}
            _ => return Err(MigrationError::MultipleAppsForProject(name.to_string())),
        }
    }

    if apps.migratable_apps.is_empty() {
        let details: String = apps
            .unmigratable_apps
            .iter()
            .map(|app| {
                format!(
                    "\n- {} ({})",
                    app.app_name,
                    app_reason_text(app, account_id)
                )
            })
            .collect();
        debug!(
            "No migratable apps for account {} (requested app: {:?})",
            account_id, app_id
        );
        return Err(MigrationError::NoAppsEligible {
            account_id,
            details,
        });
    }

    Ok(())
}

/// Resolve the app to migrate from `app_id` or a prompt, then confirm it
pub fn select_app_to_migrate(
    prompts: &dyn PromptProvider,
    apps: &MigrationApps,
    account_id: u64,
    app_id: Option<u64>,
) -> anyhow::Result<SelectionResult> {
    let id = match app_id {
        Some(id) => id,
        None => {
            let choices: Vec<Choice> = apps
                .all()
                .iter()
                .map(|app| match app {
                    MigrationApp::Migratable(app) => {
                        Choice::new(app.app_name.clone(), app.app_id.to_string())
                    }
                    MigrationApp::Unmigratable(app) => Choice::disabled(
                        app.app_name.clone(),
                        app.app_id.to_string(),
                        app_reason_text(app, account_id),
                    ),
                })
                .collect();

            prompts
                .choose("Which app would you like to migrate?", &choices)?
                .parse()?
        }
    };

    // checked for both sources: a prompt provider may hand back a disabled choice
    let selected = match apps.find(id) {
        None => {
            return Err(MigrationError::AppNotFound {
                app_id: id,
                account_id,
            }
            .into());
        }
        Some(MigrationApp::Unmigratable(app)) => {
            return Err(MigrationError::AppNotMigratable {
                app_id: id,
                reason: app_reason_text(&app, account_id),
            }
            .into());
        }
        Some(app @ MigrationApp::Migratable(_)) => app,
    };

    let app_id_to_migrate = selected.app_id();
    info!("Selected app {} ({})", selected.app_name(), app_id_to_migrate);
    print_components(&selected);

    let proceed = prompts.confirm(
        &format!(
            "Migrate app {} ({}) into a project?",
            selected.app_name(),
            app_id_to_migrate
        ),
        false,
    )?;

    Ok(SelectionResult {
        proceed,
        app_id_to_migrate,
    })
}

fn print_components(app: &MigrationApp) {
    let (supported, unsupported): (Vec<_>, Vec<_>) = app
        .migration_components()
        .iter()
        .partition(|component| component.is_supported);

    if !supported.is_empty() {
        println!("{}", "Components that will be migrated:".bold());
        for component in &supported {
            println!("  - {} ({})", component.component_type.to_lowercase(), component.id);
        }
    }
    if !unsupported.is_empty() {
        println!("{}", "Components that cannot be migrated yet:".yellow());
        for component in &unsupported {
            println!("  - {} ({})", component.component_type.to_lowercase(), component.id);
        }
    }
}
