use super::constants::{self, headers};
use super::models::{
    ContinueMigrationRequest, ContinueMigrationResponse, GatesResponse,
    InitializeMigrationRequest, InitializeMigrationResponse, LegacyMigrationRequest,
    LegacyMigrationResponse, LegacyMigrationStatus, ListAppsResponse, PublicApp,
    PublicAppsResponse,
};
use crate::migrate::types::{MigrationStatus, PlatformVersion, UidMap};
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::{Duration, Instant};

/// Remote operations the migration engine depends on
#[async_trait]
pub trait MigrationApi: Send + Sync {
    async fn list_apps_for_migration(
        &self,
        account_id: u64,
        platform_version: PlatformVersion,
    ) -> anyhow::Result<ListAppsResponse>;

    async fn initialize_migration(
        &self,
        account_id: u64,
        app_id: u64,
        platform_version: PlatformVersion,
    ) -> anyhow::Result<InitializeMigrationResponse>;

    async fn check_migration_status(
        &self,
        account_id: u64,
        migration_id: u64,
    ) -> anyhow::Result<MigrationStatus>;

    async fn continue_migration(
        &self,
        account_id: u64,
        migration_id: u64,
        uid_map: &UidMap,
        project_name: &str,
    ) -> anyhow::Result<ContinueMigrationResponse>;

    /// Zipped project source of a finished build
    async fn download_project_build(
        &self,
        account_id: u64,
        project_name: &str,
        build_id: u64,
    ) -> anyhow::Result<Vec<u8>>;

    async fn project_exists(&self, account_id: u64, project_name: &str) -> anyhow::Result<bool>;

    async fn has_unified_apps_access(&self, account_id: u64) -> anyhow::Result<bool>;

    async fn list_public_apps(&self, account_id: u64) -> anyhow::Result<Vec<PublicApp>>;

    async fn migrate_app_2023_2(
        &self,
        account_id: u64,
        app_id: u64,
        project_name: &str,
    ) -> anyhow::Result<LegacyMigrationResponse>;

    async fn check_legacy_migration_status(
        &self,
        account_id: u64,
        id: u64,
    ) -> anyhow::Result<LegacyMigrationStatus>;
}

/// HTTP client for the migration service with connection pooling
#[derive(Clone)]
pub struct MigrationClient {
    base_url: String,
    http_client: reqwest::Client,
    access_token: String,
}

impl MigrationClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(120)) // build archives can be large
            .connect_timeout(Duration::from_secs(10))
            .user_agent(constants::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(base_url, access_token, http_client))
    }

    /// Create a new client with custom HTTP client configuration
    pub fn with_custom_client(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            access_token: access_token.into(),
        }
    }

    fn request(&self, method: Method, url: &str) -> (RequestBuilder, String) {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let builder = self
            .http_client
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header(headers::CORRELATION_ID, &correlation_id);
        (builder, correlation_id)
    }

    /// Send a request, logging it, and fail on non-success status codes
    async fn send(&self, builder: RequestBuilder, correlation_id: &str, url: &str) -> anyhow::Result<Response> {
        let started = Instant::now();
        let response = builder
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        log_response(correlation_id, url, response.status(), started.elapsed());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Request to {} failed with HTTP {}: {}", url, status, body);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<T> {
        let (builder, correlation_id) = self.request(Method::GET, url);
        let builder = builder
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .query(query);
        let response = self.send(builder, &correlation_id, url).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let (builder, correlation_id) = self.request(Method::POST, url);
        let builder = builder
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .json(body);
        let response = self.send(builder, &correlation_id, url).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

fn log_response(correlation_id: &str, url: &str, status: StatusCode, duration: Duration) {
    let log_data = json!({
        "event": "http_response",
        "correlation_id": correlation_id,
        "url": url,
        "status_code": status.as_u16(),
        "duration_ms": duration.as_millis(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    if status.is_success() || status == StatusCode::NOT_FOUND {
        debug!("HTTP Response: {}", log_data);
    } else {
        warn!("HTTP Response (Error): {}", log_data);
    }
}

fn portal_query(account_id: u64) -> Vec<(&'static str, String)> {
    vec![("portalId", account_id.to_string())]
}

#[async_trait]
impl MigrationApi for MigrationClient {
    async fn list_apps_for_migration(
        &self,
        account_id: u64,
        platform_version: PlatformVersion,
    ) -> anyhow::Result<ListAppsResponse> {
        let url = constants::list_apps_endpoint(&self.base_url);
        let mut query = portal_query(account_id);
        query.push(("platformVersion", platform_version.as_str().to_string()));
        self.get_json(&url, &query).await
    }

    async fn initialize_migration(
        &self,
        account_id: u64,
        app_id: u64,
        platform_version: PlatformVersion,
    ) -> anyhow::Result<InitializeMigrationResponse> {
        let url = constants::initialize_migration_endpoint(&self.base_url);
        let body = InitializeMigrationRequest {
            portal_id: account_id,
            app_id,
            platform_version: platform_version.as_str(),
        };
        self.post_json(&url, &body).await
    }

    async fn check_migration_status(
        &self,
        account_id: u64,
        migration_id: u64,
    ) -> anyhow::Result<MigrationStatus> {
        let url = constants::migration_status_endpoint(&self.base_url, migration_id);
        self.get_json(&url, &portal_query(account_id)).await
    }

    async fn continue_migration(
        &self,
        account_id: u64,
        migration_id: u64,
        uid_map: &UidMap,
        project_name: &str,
    ) -> anyhow::Result<ContinueMigrationResponse> {
        let url = constants::continue_migration_endpoint(&self.base_url);
        let body = ContinueMigrationRequest {
            portal_id: account_id,
            migration_id,
            component_uids: uid_map,
            project_name,
        };
        self.post_json(&url, &body).await
    }

    async fn download_project_build(
        &self,
        account_id: u64,
        project_name: &str,
        build_id: u64,
    ) -> anyhow::Result<Vec<u8>> {
        let url = constants::project_build_archive_endpoint(&self.base_url, project_name, build_id);
        let (builder, correlation_id) = self.request(Method::GET, &url);
        let builder = builder
            .header("Accept", headers::ACCEPT_ZIP)
            .query(&portal_query(account_id));
        let response = self.send(builder, &correlation_id, &url).await?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read build archive from {}", url))?;
        debug!("Downloaded {} bytes for build {}", bytes.len(), build_id);
        Ok(bytes.to_vec())
    }

    async fn project_exists(&self, account_id: u64, project_name: &str) -> anyhow::Result<bool> {
        let url = constants::project_endpoint(&self.base_url, project_name);
        let (builder, correlation_id) = self.request(Method::GET, &url);
        let started = Instant::now();
        let response = builder
            .query(&portal_query(account_id))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        log_response(&correlation_id, &url, response.status(), started.elapsed());

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => anyhow::bail!(
                "Unable to check whether project '{}' exists: HTTP {}",
                project_name,
                status
            ),
        }
    }

    async fn has_unified_apps_access(&self, account_id: u64) -> anyhow::Result<bool> {
        let url = constants::gates_endpoint(&self.base_url);
        let gates: GatesResponse = self.get_json(&url, &portal_query(account_id)).await?;
        Ok(gates
            .gates
            .iter()
            .any(|gate| gate == constants::UNIFIED_APPS_GATE))
    }

    async fn list_public_apps(&self, account_id: u64) -> anyhow::Result<Vec<PublicApp>> {
        let url = constants::public_apps_endpoint(&self.base_url, account_id);
        let response: PublicAppsResponse = self.get_json(&url, &[]).await?;
        Ok(response.results)
    }

    async fn migrate_app_2023_2(
        &self,
        account_id: u64,
        app_id: u64,
        project_name: &str,
    ) -> anyhow::Result<LegacyMigrationResponse> {
        let url = constants::legacy_migration_endpoint(&self.base_url);
        let body = LegacyMigrationRequest {
            portal_id: account_id,
            app_id,
            project_name,
        };
        self.post_json(&url, &body).await
    }

    async fn check_legacy_migration_status(
        &self,
        account_id: u64,
        id: u64,
    ) -> anyhow::Result<LegacyMigrationStatus> {
        let url = constants::legacy_migration_status_endpoint(&self.base_url, id);
        self.get_json(&url, &portal_query(account_id)).await
    }
}
