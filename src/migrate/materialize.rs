//! Downloading a migrated build and writing it to disk
//!
//! Writes are sequential and not transactional. If the process dies after the
//! existing source directory was moved to `archive/` but before extraction
//! finished, the project is left with `archive/` and a partial (or missing)
//! source directory; moving `archive/` back restores the previous state.

use super::types::LoadedProjectConfig;
use crate::api::MigrationApi;
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};

pub const ARCHIVE_DIR_NAME: &str = "archive";

static INVALID_FILE_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid file name regex"));

static RESERVED_FILE_NAMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$").expect("valid reserved name regex")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Drop the single top-level directory the archive is wrapped in
    pub flatten_root_dir: bool,
}

/// Download the build and extract it. Returns the directory written to.
pub async fn download_project_files(
    api: &dyn MigrationApi,
    account_id: u64,
    project_name: &str,
    build_id: u64,
    dest: &str,
    project_config: Option<&LoadedProjectConfig>,
    cwd: &Path,
) -> Result<PathBuf> {
    let archive = api
        .download_project_build(account_id, project_name, build_id)
        .await?;
    debug!(
        "Fetched build {} of '{}' ({} bytes)",
        build_id,
        project_name,
        archive.len()
    );

    let target_dir = match project_config.and_then(|loaded| {
        loaded
            .project_config
            .as_ref()
            .map(|config| (loaded.project_dir.as_path(), config.src_dir.as_str()))
    }) {
        Some((project_dir, src_dir)) => {
            archive_source_dir(project_dir, src_dir)?;
            project_dir.to_path_buf()
        }
        None => cwd.join(dest).join(sanitize_file_name(project_name)),
    };

    extract_zip_archive(
        &archive,
        &target_dir,
        ExtractOptions {
            flatten_root_dir: true,
        },
    )?;

    info!("Extracted build {} into {}", build_id, target_dir.display());
    Ok(target_dir)
}

/// Move `<project_dir>/<src_dir>` to `<project_dir>/archive`
pub fn archive_source_dir(project_dir: &Path, src_dir: &str) -> Result<PathBuf> {
    let source = project_dir.join(src_dir);
    let archive = project_dir.join(ARCHIVE_DIR_NAME);

    if archive.exists() {
        bail!(
            "Cannot archive {}: {} already exists. Move or remove it and try again",
            source.display(),
            archive.display()
        );
    }

    if !source.exists() {
        warn!(
            "Source directory {} does not exist, nothing to archive",
            source.display()
        );
        return Ok(archive);
    }

    fs::rename(&source, &archive).with_context(|| {
        format!(
            "Failed to move {} to {}",
            source.display(),
            archive.display()
        )
    })?;
    info!("Archived {} to {}", source.display(), archive.display());
    Ok(archive)
}

/// Extract a zip held in memory into `dest`, creating it if needed.
/// Entries that would land outside `dest` are rejected.
pub fn extract_zip_archive(bytes: &[u8], dest: &Path, options: ExtractOptions) -> Result<()> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("Failed to read project archive")?;

    let root = if options.flatten_root_dir {
        single_root_dir(&mut archive)?
    } else {
        None
    };

    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory {}", dest.display()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read archive entry {}", index))?;

        let Some(path) = entry.enclosed_name() else {
            bail!("Archive entry '{}' has an unsafe path", entry.name());
        };
        let relative = match &root {
            Some(root) => match path.strip_prefix(root) {
                Ok(stripped) => stripped.to_path_buf(),
                Err(_) => path.clone(),
            },
            None => path,
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let mut file = fs::File::create(&target)
            .with_context(|| format!("Failed to create file {}", target.display()))?;
        io::copy(&mut entry, &mut file)
            .with_context(|| format!("Failed to write file {}", target.display()))?;
    }

    Ok(())
}

/// The directory every entry lives under, if there is exactly one
fn single_root_dir<R: io::Read + io::Seek>(archive: &mut zip::ZipArchive<R>) -> Result<Option<PathBuf>> {
    let mut roots: BTreeSet<OsString> = BTreeSet::new();

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let Some(path) = entry.enclosed_name() else {
            continue;
        };
        let components: Vec<Component> = path.components().collect();
        match components.first() {
            Some(Component::Normal(first)) => {
                if components.len() == 1 && !entry.is_dir() {
                    // a file at the top level means there is no wrapping directory
                    return Ok(None);
                }
                roots.insert(first.to_os_string());
            }
            _ => return Ok(None),
        }
    }

    if roots.len() == 1 {
        Ok(roots.into_iter().next().map(PathBuf::from))
    } else {
        Ok(None)
    }
}

/// Make a project name safe to use as a directory name on any platform
pub fn sanitize_file_name(name: &str) -> String {
    let replaced = INVALID_FILE_NAME_CHARS.replace_all(name, "-");
    let trimmed = replaced.trim().trim_end_matches(['.', ' ']);

    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return "project".to_string();
    }
    if RESERVED_FILE_NAMES.is_match(trimmed) {
        return format!("_{}", trimmed);
    }
    trimmed.to_string()
}
