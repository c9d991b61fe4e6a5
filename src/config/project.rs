//! Locating and reading the local project configuration file

use crate::migrate::types::{LoadedProjectConfig, ProjectConfig};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "project.json";

/// Walk up from `start` looking for a project configuration file
pub fn find_project_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Load the project enclosing `start`, if any. A file that cannot be parsed
/// still yields a `LoadedProjectConfig`, with `project_config: None`.
pub fn load_project_config(start: &Path) -> Result<Option<LoadedProjectConfig>> {
    let Some(path) = find_project_config_file(start) else {
        debug!("No {} found above {}", PROJECT_CONFIG_FILE, start.display());
        return Ok(None);
    };

    let project_dir = path
        .parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Project config {} has no parent directory", path.display()))?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read project config: {}", path.display()))?;

    let project_config = match serde_json::from_str::<ProjectConfig>(&content) {
        Ok(config) => {
            debug!("Loaded project '{}' from {}", config.name, path.display());
            Some(config)
        }
        Err(err) => {
            warn!("Failed to parse project config {}: {}", path.display(), err);
            None
        }
    };

    Ok(Some(LoadedProjectConfig {
        project_config,
        project_dir,
    }))
}
