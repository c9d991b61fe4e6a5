use crate::common::{ACCOUNT_ID, FakeMigrationApi, project_archive};
use project_migrate::migrate::{LoadedProjectConfig, ProjectConfig, download_project_files};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_existing_project_source_is_archived() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("src/app")).unwrap();
    fs::write(project.path().join("src/app/old.json"), "old").unwrap();

    let api = FakeMigrationApi {
        archive: project_archive(
            "Test Project",
            &[("project.json", "{}"), ("src/app/app-hsmeta.json", "new")],
        ),
        ..FakeMigrationApi::default()
    };
    let loaded = LoadedProjectConfig {
        project_config: Some(ProjectConfig {
            name: "Test Project".to_string(),
            src_dir: "src".to_string(),
            platform_version: None,
        }),
        project_dir: project.path().to_path_buf(),
    };

    let written = download_project_files(
        &api,
        ACCOUNT_ID,
        "Test Project",
        7,
        ".",
        Some(&loaded),
        project.path(),
    )
    .await
    .unwrap();

    assert_eq!(written, project.path());
    assert_eq!(
        fs::read_to_string(project.path().join("archive/app/old.json")).unwrap(),
        "old"
    );
    assert!(project.path().join("src/app/app-hsmeta.json").is_file());
    assert!(!project.path().join("src/app/old.json").exists());
}

#[tokio::test]
async fn test_existing_archive_dir_blocks_extraction() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::create_dir_all(project.path().join("archive")).unwrap();

    let api = FakeMigrationApi::default();
    let loaded = LoadedProjectConfig {
        project_config: Some(ProjectConfig {
            name: "Test Project".to_string(),
            src_dir: "src".to_string(),
            platform_version: None,
        }),
        project_dir: project.path().to_path_buf(),
    };

    let err = download_project_files(
        &api,
        ACCOUNT_ID,
        "Test Project",
        7,
        ".",
        Some(&loaded),
        project.path(),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert!(project.path().join("src").is_dir());
}

#[tokio::test]
async fn test_new_project_extracts_under_dest_and_name() {
    let cwd = TempDir::new().unwrap();
    let api = FakeMigrationApi {
        archive: project_archive("whatever-root", &[("project.json", "{\"name\":\"x\"}")]),
        ..FakeMigrationApi::default()
    };

    let written = download_project_files(&api, ACCOUNT_ID, "My: Project", 7, "out", None, cwd.path())
        .await
        .unwrap();

    assert_eq!(written, cwd.path().join("out").join("My- Project"));
    assert!(written.join("project.json").is_file());
    assert!(!written.join("whatever-root").exists());
}
