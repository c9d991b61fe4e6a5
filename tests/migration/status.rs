use crate::common::{ACCOUNT_ID, FakeMigrationApi};
use project_migrate::api::{PollConfig, PollError, Poller};
use project_migrate::migrate::status::{failure_error, format_failure_message, poll_migration_status};
use project_migrate::migrate::{ComponentError, MigrationError, MigrationStatus};
use std::time::Duration;

fn component_error(component_type: &str, symbol: Option<&str>, message: &str) -> ComponentError {
    ComponentError {
        component_type: component_type.to_string(),
        developer_symbol: symbol.map(str::to_string),
        error_message: message.to_string(),
    }
}

fn short_poller() -> Poller {
    Poller::new(PollConfig {
        interval: Duration::from_millis(1),
        timeout: Duration::from_millis(20),
        show_spinner: false,
    })
}

#[test]
fn test_failure_message_lists_component_errors() {
    let errors = vec![
        component_error("CARD", Some("my-card"), "Invalid uid"),
        component_error("WEBHOOK", None, "Missing target url"),
    ];

    assert_eq!(
        format_failure_message("Project build failed", &errors),
        "Project build failed\n\t- CARD (my-card): Invalid uid\n\t- WEBHOOK: Missing target url"
    );
}

#[test]
fn test_failure_message_without_component_errors() {
    assert_eq!(format_failure_message("Nope", &[]), "Nope");
    assert_eq!(failure_error("Nope", &[]).to_string(), "Nope");
}

#[tokio::test]
async fn test_poll_stops_on_requested_status() {
    let api = FakeMigrationApi::default().with_statuses(vec![
        MigrationStatus::Started,
        MigrationStatus::Started,
        MigrationStatus::Success { build_id: 9 },
    ]);
    let poller = Poller::new(PollConfig::immediate());

    let status = poll_migration_status(&api, &poller, ACCOUNT_ID, 1, MigrationStatus::is_terminal)
        .await
        .unwrap();

    assert_eq!(status, MigrationStatus::Success { build_id: 9 });
    assert_eq!(
        api.calls()
            .iter()
            .filter(|call| *call == "check_migration_status")
            .count(),
        3
    );
}

#[tokio::test]
async fn test_poll_timeout_is_migration_failed() {
    let api = FakeMigrationApi::default().with_statuses(vec![MigrationStatus::Started]);

    let err = poll_migration_status(&api, &short_poller(), ACCOUNT_ID, 1, MigrationStatus::is_terminal)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Migration Failed");
    assert!(matches!(
        err,
        MigrationError::PollFailed {
            source: PollError::TimedOut { .. }
        }
    ));
}

#[tokio::test]
async fn test_failed_status_check_is_not_retried() {
    let api = FakeMigrationApi {
        status_error: Some("503 Service Unavailable".to_string()),
        ..FakeMigrationApi::default()
    };

    let err = poll_migration_status(&api, &short_poller(), ACCOUNT_ID, 1, MigrationStatus::is_terminal)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MigrationError::PollFailed {
            source: PollError::CheckFailed { attempt: 1, .. }
        }
    ));
    assert_eq!(api.calls(), vec!["check_migration_status"]);
}
