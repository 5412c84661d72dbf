//! Search client configuration.
//!
//! Each field is resolved in priority order:
//! 1. CLI flag
//! 2. `--config` JSON file
//! 3. `SCRY_CHECK_ENDPOINT` environment variable (endpoint only)
//! 4. built-in default
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.scryfall.com/cards/search";
pub const ENDPOINT_ENV: &str = "SCRY_CHECK_ENDPOINT";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings the HTTP search client is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Optional on-disk overrides.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Load a config file from disk.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let file: ConfigFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(file)
}

/// Merge flags, file, and environment into a validated config.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    file: Option<&ConfigFile>,
    env_endpoint: Option<String>,
) -> Result<ClientConfig> {
    let file_endpoint = file.and_then(|f| f.endpoint.clone());
    let endpoint = overrides
        .endpoint
        .clone()
        .or(file_endpoint)
        .or(env_endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let user_agent = file
        .and_then(|f| f.user_agent.clone())
        .unwrap_or_else(default_user_agent);
    let timeout_secs = overrides
        .timeout_secs
        .or(file.and_then(|f| f.timeout_secs))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let config = ClientConfig {
        endpoint,
        user_agent,
        timeout: Duration::from_secs(timeout_secs),
    };
    validate_config(&config)?;
    Ok(config)
}

/// Resolve config using the process environment.
pub fn resolve_from_env(
    overrides: &ConfigOverrides,
    config_path: Option<&Path>,
) -> Result<ClientConfig> {
    let file = config_path.map(load_config_file).transpose()?;
    let env_endpoint = std::env::var(ENDPOINT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty());
    resolve_config(overrides, file.as_ref(), env_endpoint)
}

fn validate_config(config: &ClientConfig) -> Result<()> {
    let endpoint = config.endpoint.as_str();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(anyhow!(
            "endpoint must be an http:// or https:// URL (got {endpoint:?})"
        ));
    }
    if endpoint.contains('?') {
        return Err(anyhow!(
            "endpoint must not carry a query string (got {endpoint:?})"
        ));
    }
    if config.user_agent.trim().is_empty() {
        return Err(anyhow!("user_agent must be non-empty"));
    }
    if config.timeout.is_zero() {
        return Err(anyhow!("timeout must be greater than zero seconds"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
