//! Request and response bodies of the migration service

use crate::migrate::types::{MigratableApp, UnmigratableApp, UidMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAppsResponse {
    #[serde(default)]
    pub migratable_apps: Vec<MigratableApp>,
    #[serde(default)]
    pub unmigratable_apps: Vec<UnmigratableApp>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeMigrationRequest<'a> {
    pub portal_id: u64,
    pub app_id: u64,
    pub platform_version: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeMigrationResponse {
    pub migration_id: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueMigrationRequest<'a> {
    pub portal_id: u64,
    pub migration_id: u64,
    pub component_uids: &'a UidMap,
    pub project_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueMigrationResponse {
    pub migration_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatesResponse {
    #[serde(default)]
    pub gates: Vec<String>,
}

/// An app listed by the 2023.2 public apps endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicApp {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub prevent_project_migrations: bool,
    #[serde(default)]
    pub listing_info: Option<serde_json::Value>,
}

impl PublicApp {
    /// Why this app is excluded from the 2023.2 flow, if it is
    pub fn disabled_reason(&self) -> Option<&'static str> {
        if self.prevent_project_migrations {
            Some("Migration is turned off for this app")
        } else if self.listing_info.is_some() {
            Some("Listed apps are not currently migratable")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAppsResponse {
    #[serde(default)]
    pub results: Vec<PublicApp>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMigrationRequest<'a> {
    pub portal_id: u64,
    pub app_id: u64,
    pub project_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyMigrationResponse {
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyMigrationState {
    Started,
    InProgress,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProject {
    pub name: String,
    #[serde(default)]
    pub deployed_build_id: Option<u64>,
}

/// Status of a 2023.2 migration: `{status, project}` instead of a build id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMigrationStatus {
    pub status: LegacyMigrationState,
    #[serde(default)]
    pub project: Option<LegacyProject>,
    #[serde(default)]
    pub project_error_detail: Option<String>,
    #[serde(default)]
    pub component_errors: Vec<crate::migrate::types::ComponentError>,
}

impl LegacyMigrationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            LegacyMigrationState::Success | LegacyMigrationState::Failure
        )
    }
}
