//! Human readable text for unmigratable app reasons

use super::types::{UnmigratableApp, UnmigratableReason};

/// Extra context used by reasons that name a project or account
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasonContext<'a> {
    pub project_name: Option<&'a str>,
    pub account_id: Option<u64>,
}

/// Render a reason. Never fails: unknown codes get a generic message.
pub fn unmigratable_reason_text(reason: &UnmigratableReason, context: ReasonContext<'_>) -> String {
    match reason {
        UnmigratableReason::UpToDate => "App is already up to date".to_string(),
        UnmigratableReason::IsPrivateApp => {
            "Private apps are not currently migratable".to_string()
        }
        UnmigratableReason::ListedInMarketplace => {
            "Listed apps are not currently migratable".to_string()
        }
        UnmigratableReason::ProjectConnectedToGithub => {
            let project = match (context.project_name, context.account_id) {
                (Some(name), Some(account_id)) => {
                    format!("The project {} in account {}", name, account_id)
                }
                (Some(name), None) => format!("The project {}", name),
                _ => "The project linked to this app".to_string(),
            };
            format!(
                "{} is connected to GitHub. Disconnect the project from GitHub and try again",
                project
            )
        }
        UnmigratableReason::PartOfProjectAlready => match context.project_name {
            Some(name) => format!(
                "This app is part of project {}. Run the command from the project directory to migrate it",
                name
            ),
            None => "This app is already part of a project. Run the command from the project directory to migrate it".to_string(),
        },
        UnmigratableReason::Other(raw) => {
            format!("Unable to migrate this app (reason: {})", raw)
        }
    }
}

/// Reason text for one app, naming the project it belongs to when known
pub fn app_reason_text(app: &UnmigratableApp, account_id: u64) -> String {
    unmigratable_reason_text(
        &app.unmigratable_reason,
        ReasonContext {
            project_name: app.project_name.as_deref(),
            account_id: Some(account_id),
        },
    )
}
