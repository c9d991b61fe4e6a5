//! Data model shared by every migration phase

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// One unit inside an app that may need a stable identifier before it can be migrated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationComponent {
    pub id: String,
    pub component_type: String,
    pub is_supported: bool,
    #[serde(default)]
    pub component_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratableApp {
    pub app_id: u64,
    pub app_name: String,
    #[serde(default)]
    pub migration_components: Vec<MigrationComponent>,
    #[serde(default)]
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmigratableApp {
    pub app_id: u64,
    pub app_name: String,
    pub unmigratable_reason: UnmigratableReason,
    #[serde(default)]
    pub migration_components: Vec<MigrationComponent>,
    /// Project the app already belongs to, named in the reason text
    #[serde(default)]
    pub project_name: Option<String>,
}

/// An app as returned by the listing endpoint, tagged by `isMigratable`
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationApp {
    Migratable(MigratableApp),
    Unmigratable(UnmigratableApp),
}

impl<'de> Deserialize<'de> for MigrationApp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let is_migratable = value
            .get("isMigratable")
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| D::Error::missing_field("isMigratable"))?;

        if is_migratable {
            serde_json::from_value(value)
                .map(MigrationApp::Migratable)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(MigrationApp::Unmigratable)
                .map_err(D::Error::custom)
        }
    }
}

impl MigrationApp {
    pub fn app_id(&self) -> u64 {
        match self {
            MigrationApp::Migratable(app) => app.app_id,
            MigrationApp::Unmigratable(app) => app.app_id,
        }
    }

    pub fn app_name(&self) -> &str {
        match self {
            MigrationApp::Migratable(app) => &app.app_name,
            MigrationApp::Unmigratable(app) => &app.app_name,
        }
    }

    pub fn migration_components(&self) -> &[MigrationComponent] {
        match self {
            MigrationApp::Migratable(app) => &app.migration_components,
            MigrationApp::Unmigratable(app) => &app.migration_components,
        }
    }

    pub fn is_migratable(&self) -> bool {
        matches!(self, MigrationApp::Migratable(_))
    }
}

/// Result of one catalog fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationApps {
    pub migratable_apps: Vec<MigratableApp>,
    pub unmigratable_apps: Vec<UnmigratableApp>,
}

impl MigrationApps {
    /// Migratable apps first, then unmigratable ones, in listing order
    pub fn all(&self) -> Vec<MigrationApp> {
        self.migratable_apps
            .iter()
            .cloned()
            .map(MigrationApp::Migratable)
            .chain(
                self.unmigratable_apps
                    .iter()
                    .cloned()
                    .map(MigrationApp::Unmigratable),
            )
            .collect()
    }

    pub fn find(&self, app_id: u64) -> Option<MigrationApp> {
        self.all().into_iter().find(|app| app.app_id() == app_id)
    }
}

/// Why an app cannot be migrated. Unknown server values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnmigratableReason {
    UpToDate,
    IsPrivateApp,
    ListedInMarketplace,
    ProjectConnectedToGithub,
    /// Never sent by the server; assigned locally when an app already backs a project
    PartOfProjectAlready,
    Other(String),
}

impl UnmigratableReason {
    pub fn as_str(&self) -> &str {
        match self {
            UnmigratableReason::UpToDate => "UP_TO_DATE",
            UnmigratableReason::IsPrivateApp => "IS_PRIVATE_APP",
            UnmigratableReason::ListedInMarketplace => "LISTED_IN_MARKETPLACE",
            UnmigratableReason::ProjectConnectedToGithub => "PROJECT_CONNECTED_TO_GITHUB",
            UnmigratableReason::PartOfProjectAlready => "PART_OF_PROJECT_ALREADY",
            UnmigratableReason::Other(raw) => raw,
        }
    }
}

impl From<&str> for UnmigratableReason {
    fn from(value: &str) -> Self {
        match value {
            "UP_TO_DATE" => UnmigratableReason::UpToDate,
            "IS_PRIVATE_APP" => UnmigratableReason::IsPrivateApp,
            "LISTED_IN_MARKETPLACE" => UnmigratableReason::ListedInMarketplace,
            "PROJECT_CONNECTED_TO_GITHUB" => UnmigratableReason::ProjectConnectedToGithub,
            "PART_OF_PROJECT_ALREADY" => UnmigratableReason::PartOfProjectAlready,
            other => UnmigratableReason::Other(other.to_string()),
        }
    }
}

impl fmt::Display for UnmigratableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UnmigratableReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UnmigratableReason {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UnmigratableReason::from(raw.as_str()))
    }
}

/// A component the server wants a UID for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentUidRequest {
    pub component_type: String,
    #[serde(default)]
    pub component_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentError {
    pub component_type: String,
    #[serde(default)]
    pub developer_symbol: Option<String>,
    pub error_message: String,
}

/// Server-side migration job state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationStatus {
    Started,
    #[serde(rename_all = "camelCase")]
    InputRequired {
        components_requiring_uids: IndexMap<String, ComponentUidRequest>,
    },
    #[serde(rename_all = "camelCase")]
    Success { build_id: u64 },
    #[serde(rename_all = "camelCase")]
    Failure {
        #[serde(default)]
        project_error_detail: String,
        #[serde(default)]
        component_errors: Vec<ComponentError>,
    },
}

impl MigrationStatus {
    pub fn name(&self) -> &'static str {
        match self {
            MigrationStatus::Started => "STARTED",
            MigrationStatus::InputRequired { .. } => "INPUT_REQUIRED",
            MigrationStatus::Success { .. } => "SUCCESS",
            MigrationStatus::Failure { .. } => "FAILURE",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MigrationStatus::Success { .. } | MigrationStatus::Failure { .. }
        )
    }
}

/// Component id to developer-chosen UID, in prompt order
pub type UidMap = IndexMap<String, String>;

/// Target platform version of the produced project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformVersion {
    V2023_2,
    V2025_2,
    Unstable,
}

impl PlatformVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformVersion::V2023_2 => "2023.2",
            PlatformVersion::V2025_2 => "2025.2",
            PlatformVersion::Unstable => "unstable",
        }
    }

    /// Resolve the CLI flags; `--unstable` wins over `--platform-version`
    pub fn from_options(platform_version: Option<&str>, unstable: bool) -> anyhow::Result<Self> {
        if unstable {
            return Ok(PlatformVersion::Unstable);
        }
        match platform_version {
            None => Ok(PlatformVersion::V2025_2),
            Some(raw) => raw.parse(),
        }
    }
}

impl std::str::FromStr for PlatformVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2023.2" => Ok(PlatformVersion::V2023_2),
            "2025.2" => Ok(PlatformVersion::V2025_2),
            "unstable" => Ok(PlatformVersion::Unstable),
            other => anyhow::bail!(
                "Unsupported platform version '{}'. Supported versions: 2023.2, 2025.2",
                other
            ),
        }
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options record handed over by the command layer
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub name: Option<String>,
    pub dest: Option<String>,
    pub app_id: Option<u64>,
    pub platform_version: Option<String>,
    pub unstable: bool,
}

/// Contents of a local project configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub src_dir: String,
    #[serde(default)]
    pub platform_version: Option<String>,
}

/// A project configuration found on disk. `project_config` is `None` when the
/// file exists but could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProjectConfig {
    pub project_config: Option<ProjectConfig>,
    pub project_dir: PathBuf,
}

impl LoadedProjectConfig {
    pub fn project_name(&self) -> Option<&str> {
        self.project_config.as_ref().map(|config| config.name.as_str())
    }
}

/// Everything one migration run accumulates, filled phase by phase and
/// handed back to the caller with the outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSession {
    pub account_id: u64,
    pub app_id_to_migrate: Option<u64>,
    pub project_name: Option<String>,
    pub project_dest: Option<String>,
    pub migration_id: Option<u64>,
    pub uid_map: UidMap,
}

impl MigrationSession {
    pub fn new(account_id: u64) -> Self {
        Self {
            account_id,
            ..Self::default()
        }
    }
}
