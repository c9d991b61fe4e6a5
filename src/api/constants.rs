//! Endpoint paths and request constants for the app migration service

/// Default service host used when an account does not override it
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

/// Migration API path prefix for the current platform versions
pub const MIGRATIONS_PATH: &str = "/dfs/migrations/v2";

/// Legacy (2023.2) migration API path prefix
pub const LEGACY_MIGRATIONS_PATH: &str = "/dfs/migrations/v1";

/// Project API path prefix
pub const PROJECTS_PATH: &str = "/project-components-external/v3/projects";

/// Public apps listing used by the 2023.2 flow
pub const PUBLIC_APPS_PATH: &str = "/apps-dev/external/public/v3/full/portal";

/// Feature gate checked before any 2025.2 migration mutates server state
pub const UNIFIED_APPS_GATE: &str = "Developers:UnifiedApps:PrivateBeta";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("project-migrate/", env!("CARGO_PKG_VERSION"));

/// Standard headers
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
    pub const ACCEPT_ZIP: &str = "application/zip";
    pub const CORRELATION_ID: &str = "X-Correlation-Id";
}

pub fn list_apps_endpoint(base_url: &str) -> String {
    format!("{}{}/list-apps", base_url, MIGRATIONS_PATH)
}

pub fn initialize_migration_endpoint(base_url: &str) -> String {
    format!("{}{}/migrations", base_url, MIGRATIONS_PATH)
}

pub fn migration_status_endpoint(base_url: &str, migration_id: u64) -> String {
    format!("{}{}/migrations/{}/status", base_url, MIGRATIONS_PATH, migration_id)
}

pub fn continue_migration_endpoint(base_url: &str) -> String {
    format!("{}{}/migrations/continue", base_url, MIGRATIONS_PATH)
}

pub fn project_endpoint(base_url: &str, project_name: &str) -> String {
    format!(
        "{}{}/{}",
        base_url,
        PROJECTS_PATH,
        urlencoding::encode(project_name)
    )
}

pub fn project_build_archive_endpoint(base_url: &str, project_name: &str, build_id: u64) -> String {
    format!(
        "{}/builds/{}/archive-full",
        project_endpoint(base_url, project_name),
        build_id
    )
}

pub fn gates_endpoint(base_url: &str) -> String {
    format!("{}/localdevauth/v1/auth/gates", base_url)
}

pub fn public_apps_endpoint(base_url: &str, account_id: u64) -> String {
    format!("{}{}/{}", base_url, PUBLIC_APPS_PATH, account_id)
}

pub fn legacy_migration_endpoint(base_url: &str) -> String {
    format!("{}{}/migrations", base_url, LEGACY_MIGRATIONS_PATH)
}

pub fn legacy_migration_status_endpoint(base_url: &str, id: u64) -> String {
    format!("{}{}/migrations/{}", base_url, LEGACY_MIGRATIONS_PATH, id)
}
