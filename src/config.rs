use crate::api::PollConfig;
use crate::api::constants::DEFAULT_API_BASE_URL;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub mod project;

pub const ACCESS_TOKEN_ENV: &str = "PROJECT_MIGRATE_ACCESS_TOKEN";
pub const API_URL_ENV: &str = "PROJECT_MIGRATE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub account_id: u64,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl AccountConfig {
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub default_account: Option<String>,
    #[serde(default)]
    pub accounts: HashMap<String, AccountConfig>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_poll_timeout_secs() -> u64 {
    15 * 60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new(
            Duration::from_secs(self.poll_interval_secs),
            Duration::from_secs(self.poll_timeout_secs),
        )
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("project-migrate")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".project-migrate")
        };

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let config = Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config with {} accounts", config.accounts.len());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Pick an account by name or numeric id, else the default, else the only one
    pub fn resolve_account(&self, requested: Option<&str>) -> Result<(String, AccountConfig)> {
        if let Some(requested) = requested {
            if let Some(account) = self.accounts.get(requested) {
                return Ok((requested.to_string(), account.clone()));
            }
            if let Ok(account_id) = requested.parse::<u64>() {
                if let Some((name, account)) = self
                    .accounts
                    .iter()
                    .find(|(_, account)| account.account_id == account_id)
                {
                    return Ok((name.clone(), account.clone()));
                }
            }
            anyhow::bail!("Account '{}' not found in config", requested);
        }

        if let Some(default) = &self.default_account {
            let account = self
                .accounts
                .get(default)
                .with_context(|| format!("Default account '{}' not found in config", default))?;
            return Ok((default.clone(), account.clone()));
        }

        let mut accounts = self.accounts.iter();
        match (accounts.next(), accounts.next()) {
            (Some((name, account)), None) => Ok((name.clone(), account.clone())),
            (None, _) => anyhow::bail!("No accounts configured. Add one to {:?}", Self::get_config_path()?),
            _ => anyhow::bail!("Multiple accounts configured; pass --account or set default_account"),
        }
    }

    /// Resolve an account and apply environment overrides (`.env` included)
    pub fn resolve_account_with_env(&self, requested: Option<&str>) -> Result<AccountConfig> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!("Failed to load .env file: {}", err);
            }
        }

        let (name, mut account) = self.resolve_account(requested)?;
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            debug!("Using access token from {}", ACCESS_TOKEN_ENV);
            account.access_token = token;
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            debug!("Using API url from {}", API_URL_ENV);
            account.api_base_url = Some(url);
        }

        if account.access_token.is_empty() {
            anyhow::bail!(
                "Account '{}' has no access token. Set it in the config file or {}",
                name,
                ACCESS_TOKEN_ENV
            );
        }
        info!("Using account '{}' ({})", name, account.account_id);
        Ok(account)
    }
}
