//! Scripted fakes for the migration service and the prompt provider

use async_trait::async_trait;
use project_migrate::api::{
    ContinueMigrationResponse, InitializeMigrationResponse, LegacyMigrationResponse,
    LegacyMigrationStatus, ListAppsResponse, MigrationApi, PublicApp,
};
use project_migrate::migrate::{
    ComponentUidRequest, MigratableApp, MigrationComponent, MigrationStatus, PlatformVersion,
    UidMap, UnmigratableApp, UnmigratableReason,
};
use project_migrate::ui::{Choice, PromptProvider, prompts::Validator};
use std::collections::{HashSet, VecDeque};
use std::io::{Cursor, Write};
use std::sync::Mutex;

pub const ACCOUNT_ID: u64 = 123;

/// In-memory migration service. Status queues are consumed one entry per
/// check; the last entry repeats once the queue is down to one.
pub struct FakeMigrationApi {
    pub apps: ListAppsResponse,
    pub has_access: bool,
    pub existing_projects: HashSet<String>,
    pub statuses: Mutex<VecDeque<MigrationStatus>>,
    pub status_error: Option<String>,
    pub archive: Vec<u8>,
    pub migration_id: u64,
    pub continued_migration_id: u64,
    pub public_apps: Vec<PublicApp>,
    pub legacy_statuses: Mutex<VecDeque<LegacyMigrationStatus>>,
    pub calls: Mutex<Vec<String>>,
    pub submitted_uids: Mutex<Option<UidMap>>,
}

impl Default for FakeMigrationApi {
    fn default() -> Self {
        Self {
            apps: ListAppsResponse::default(),
            has_access: true,
            existing_projects: HashSet::new(),
            statuses: Mutex::new(VecDeque::new()),
            status_error: None,
            archive: project_archive("migrated", &[("project.json", "{}")]),
            migration_id: 1001,
            continued_migration_id: 1002,
            public_apps: vec![],
            legacy_statuses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(vec![]),
            submitted_uids: Mutex::new(None),
        }
    }
}

impl FakeMigrationApi {
    pub fn with_statuses(self, statuses: Vec<MigrationStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_legacy_statuses(self, statuses: Vec<LegacyMigrationStatus>) -> Self {
        *self.legacy_statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_existing_project(mut self, name: &str) -> Self {
        self.existing_projects.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls().iter().any(|call| call == name)
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

fn next_from<T: Clone>(queue: &Mutex<VecDeque<T>>) -> anyhow::Result<T> {
    let mut queue = queue.lock().unwrap();
    if queue.len() > 1 {
        Ok(queue.pop_front().unwrap())
    } else {
        queue
            .front()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no scripted status left"))
    }
}

#[async_trait]
impl MigrationApi for FakeMigrationApi {
    async fn list_apps_for_migration(
        &self,
        _account_id: u64,
        _platform_version: PlatformVersion,
    ) -> anyhow::Result<ListAppsResponse> {
        self.record("list_apps_for_migration");
        Ok(self.apps.clone())
    }

    async fn initialize_migration(
        &self,
        _account_id: u64,
        _app_id: u64,
        _platform_version: PlatformVersion,
    ) -> anyhow::Result<InitializeMigrationResponse> {
        self.record("initialize_migration");
        Ok(InitializeMigrationResponse {
            migration_id: self.migration_id,
        })
    }

    async fn check_migration_status(
        &self,
        _account_id: u64,
        _migration_id: u64,
    ) -> anyhow::Result<MigrationStatus> {
        self.record("check_migration_status");
        if let Some(message) = &self.status_error {
            anyhow::bail!("{}", message);
        }
        next_from(&self.statuses)
    }

    async fn continue_migration(
        &self,
        _account_id: u64,
        _migration_id: u64,
        uid_map: &UidMap,
        _project_name: &str,
    ) -> anyhow::Result<ContinueMigrationResponse> {
        self.record("continue_migration");
        *self.submitted_uids.lock().unwrap() = Some(uid_map.clone());
        Ok(ContinueMigrationResponse {
            migration_id: self.continued_migration_id,
        })
    }

    async fn download_project_build(
        &self,
        _account_id: u64,
        _project_name: &str,
        _build_id: u64,
    ) -> anyhow::Result<Vec<u8>> {
        self.record("download_project_build");
        Ok(self.archive.clone())
    }

    async fn project_exists(&self, _account_id: u64, project_name: &str) -> anyhow::Result<bool> {
        self.record("project_exists");
        Ok(self.existing_projects.contains(project_name))
    }

    async fn has_unified_apps_access(&self, _account_id: u64) -> anyhow::Result<bool> {
        self.record("has_unified_apps_access");
        Ok(self.has_access)
    }

    async fn list_public_apps(&self, _account_id: u64) -> anyhow::Result<Vec<PublicApp>> {
        self.record("list_public_apps");
        Ok(self.public_apps.clone())
    }

    async fn migrate_app_2023_2(
        &self,
        _account_id: u64,
        _app_id: u64,
        _project_name: &str,
    ) -> anyhow::Result<LegacyMigrationResponse> {
        self.record("migrate_app_2023_2");
        Ok(LegacyMigrationResponse {
            id: self.migration_id,
        })
    }

    async fn check_legacy_migration_status(
        &self,
        _account_id: u64,
        _id: u64,
    ) -> anyhow::Result<LegacyMigrationStatus> {
        self.record("check_legacy_migration_status");
        next_from(&self.legacy_statuses)
    }
}

#[derive(Debug, Clone)]
pub enum Answer {
    Choose(String),
    Confirm(bool),
    /// `None` accepts the default
    Input(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AskedPrompt {
    pub kind: &'static str,
    pub message: String,
    pub default: Option<String>,
    pub choices: Vec<Choice>,
}

/// Answers prompts from a script and records what was asked
#[derive(Default)]
pub struct ScriptedPrompts {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<AskedPrompt>>,
}

impl ScriptedPrompts {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            asked: Mutex::new(vec![]),
        }
    }

    pub fn asked(&self) -> Vec<AskedPrompt> {
        self.asked.lock().unwrap().clone()
    }

    fn next(&self, asked: AskedPrompt) -> anyhow::Result<Answer> {
        let message = asked.message.clone();
        self.asked.lock().unwrap().push(asked);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {}", message))
    }
}

impl PromptProvider for ScriptedPrompts {
    fn choose(&self, message: &str, choices: &[Choice]) -> anyhow::Result<String> {
        match self.next(AskedPrompt {
            kind: "choose",
            message: message.to_string(),
            default: None,
            choices: choices.to_vec(),
        })? {
            Answer::Choose(value) => Ok(value),
            other => anyhow::bail!("expected choose answer, got {:?}", other),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> anyhow::Result<bool> {
        match self.next(AskedPrompt {
            kind: "confirm",
            message: message.to_string(),
            default: None,
            choices: vec![],
        })? {
            Answer::Confirm(value) => Ok(value),
            other => anyhow::bail!("expected confirm answer, got {:?}", other),
        }
    }

    fn input(
        &self,
        message: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> anyhow::Result<String> {
        let answer = self.next(AskedPrompt {
            kind: "input",
            message: message.to_string(),
            default: default.map(str::to_string),
            choices: vec![],
        })?;
        let value = match answer {
            Answer::Input(Some(value)) => value,
            Answer::Input(None) => default
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("no default for prompt: {}", message))?,
            other => anyhow::bail!("expected input answer, got {:?}", other),
        };
        validate(&value).map_err(anyhow::Error::msg)?;
        Ok(value)
    }
}

pub fn migratable_app(app_id: u64, name: &str, project_name: Option<&str>) -> MigratableApp {
    MigratableApp {
        app_id,
        app_name: name.to_string(),
        migration_components: vec![MigrationComponent {
            id: "1".to_string(),
            component_type: "CARD".to_string(),
            is_supported: true,
            component_hint: Some("test-card".to_string()),
        }],
        project_name: project_name.map(str::to_string),
    }
}

pub fn unmigratable_app(app_id: u64, name: &str, reason: UnmigratableReason) -> UnmigratableApp {
    UnmigratableApp {
        app_id,
        app_name: name.to_string(),
        unmigratable_reason: reason,
        migration_components: vec![],
        project_name: None,
    }
}

pub fn card_input_required() -> MigrationStatus {
    let mut components = indexmap::IndexMap::new();
    components.insert(
        "1".to_string(),
        ComponentUidRequest {
            component_type: "CARD".to_string(),
            component_hint: Some("test-card".to_string()),
        },
    );
    MigrationStatus::InputRequired {
        components_requiring_uids: components,
    }
}

/// A zip with every file under a single `root/` directory
pub fn project_archive(root: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, contents) in files {
        writer
            .start_file(format!("{}/{}", root, name), options)
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
