use crate::common::{ACCOUNT_ID, Answer, ScriptedPrompts, migratable_app, unmigratable_app};
use project_migrate::migrate::{
    LoadedProjectConfig, MigrationApps, MigrationError, ProjectConfig, SelectionResult,
    UnmigratableReason, select_app_to_migrate, validate_migration_apps,
};
use project_migrate::migrate::catalog::mark_apps_in_projects;
use std::path::PathBuf;

fn loaded_project(name: &str) -> LoadedProjectConfig {
    LoadedProjectConfig {
        project_config: Some(ProjectConfig {
            name: name.to_string(),
            src_dir: "src".to_string(),
            platform_version: None,
        }),
        project_dir: PathBuf::from("/tmp/project"),
    }
}

fn mixed_apps() -> MigrationApps {
    MigrationApps {
        migratable_apps: vec![migratable_app(1, "Good App", None)],
        unmigratable_apps: vec![unmigratable_app(
            2,
            "Listed App",
            UnmigratableReason::ListedInMarketplace,
        )],
    }
}

#[test]
fn test_validate_multiple_apps_for_project() {
    let apps = MigrationApps {
        migratable_apps: vec![
            migratable_app(1, "One", Some("Test Project")),
            migratable_app(2, "Two", Some("Test Project")),
        ],
        unmigratable_apps: vec![],
    };

    let err =
        validate_migration_apps(None, ACCOUNT_ID, &apps, Some(&loaded_project("Test Project")))
            .unwrap_err();
    assert!(matches!(err, MigrationError::MultipleAppsForProject(_)));
    assert!(err.to_string().contains("Multiple apps found for project Test Project"));
}

#[test]
fn test_validate_no_apps_for_project() {
    let err = validate_migration_apps(
        None,
        ACCOUNT_ID,
        &MigrationApps::default(),
        Some(&loaded_project("Test Project")),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "No apps associated with project Test Project are eligible for migration"
    );
}

#[test]
fn test_validate_no_apps_in_account_lists_reasons() {
    let apps = MigrationApps {
        migratable_apps: vec![],
        unmigratable_apps: vec![
            unmigratable_app(2, "Listed App", UnmigratableReason::ListedInMarketplace),
            unmigratable_app(3, "Odd App", UnmigratableReason::from("SOMETHING_NEW")),
        ],
    };

    let message = validate_migration_apps(None, ACCOUNT_ID, &apps, None)
        .unwrap_err()
        .to_string();

    assert!(message.starts_with("No apps in account 123 are eligible for migration"));
    assert!(message.contains("\n- Listed App (Listed apps are not currently migratable)"));
    assert!(message.contains("\n- Odd App (Unable to migrate this app (reason: SOMETHING_NEW))"));
}

#[test]
fn test_validate_passes_with_a_migratable_app() {
    assert!(validate_migration_apps(Some(1), ACCOUNT_ID, &mixed_apps(), None).is_ok());
}

#[test]
fn test_select_unknown_app_id() {
    let prompts = ScriptedPrompts::default();

    let err = select_app_to_migrate(&prompts, &mixed_apps(), ACCOUNT_ID, Some(99)).unwrap_err();

    assert_eq!(err.to_string(), "No app with id 99 found in account 123");
    assert!(prompts.asked().is_empty());
}

#[test]
fn test_select_unmigratable_app_id() {
    let prompts = ScriptedPrompts::default();

    let err = select_app_to_migrate(&prompts, &mixed_apps(), ACCOUNT_ID, Some(2)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MigrationError>(),
        Some(MigrationError::AppNotMigratable { app_id: 2, .. })
    ));
}

#[test]
fn test_prompted_unmigratable_app_is_refused() {
    let prompts = ScriptedPrompts::new(vec![
        Answer::Choose("2".to_string()),
        Answer::Confirm(true),
    ]);

    let err = select_app_to_migrate(&prompts, &mixed_apps(), ACCOUNT_ID, None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MigrationError>(),
        Some(MigrationError::AppNotMigratable { app_id: 2, .. })
    ));
    // refused before the confirmation
    assert_eq!(prompts.asked().len(), 1);
}

#[test]
fn test_apps_in_other_projects_name_their_project() {
    let apps = mark_apps_in_projects(MigrationApps {
        migratable_apps: vec![
            migratable_app(1, "Good App", None),
            migratable_app(3, "Owned App", Some("Existing Project")),
        ],
        unmigratable_apps: vec![],
    });
    let prompts = ScriptedPrompts::new(vec![
        Answer::Choose("1".to_string()),
        Answer::Confirm(false),
    ]);

    select_app_to_migrate(&prompts, &apps, ACCOUNT_ID, None).unwrap();

    let choices = &prompts.asked()[0].choices;
    assert_eq!(choices[1].value, "3");
    assert!(
        choices[1]
            .disabled
            .as_deref()
            .unwrap()
            .contains("part of project Existing Project")
    );
}

#[test]
fn test_select_declined_confirmation() {
    let prompts = ScriptedPrompts::new(vec![Answer::Confirm(false)]);

    let result = select_app_to_migrate(&prompts, &mixed_apps(), ACCOUNT_ID, Some(1)).unwrap();

    assert_eq!(
        result,
        SelectionResult {
            proceed: false,
            app_id_to_migrate: 1
        }
    );
    assert_eq!(prompts.asked()[0].message, "Migrate app Good App (1) into a project?");
}

#[test]
fn test_select_from_prompt_disables_unmigratable_apps() {
    let prompts = ScriptedPrompts::new(vec![
        Answer::Choose("1".to_string()),
        Answer::Confirm(true),
    ]);

    let result = select_app_to_migrate(&prompts, &mixed_apps(), ACCOUNT_ID, None).unwrap();

    assert!(result.proceed);
    assert_eq!(result.app_id_to_migrate, 1);

    let choices = &prompts.asked()[0].choices;
    assert_eq!(choices.len(), 2);
    assert!(choices[0].is_enabled());
    assert_eq!(
        choices[1].disabled.as_deref(),
        Some("Listed apps are not currently migratable")
    );
}
