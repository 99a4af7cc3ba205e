//! Configuration file support for secdash.
//!
//! Provides YAML-based configuration through `secdash.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line flags (CLI wins, then config file, then defaults).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::application::dto::SessionOptions;
use crate::cli::Args;
use crate::shared::error::DashboardError;
use crate::shared::Result;

const CONFIG_FILENAME: &str = "secdash.config.yml";

/// Default API base URL when neither flag nor config provides one.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8001/api";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub per_page: Option<u64>,
    pub scope: Option<String>,
    pub fast_interval_secs: Option<u64>,
    pub findings_interval_secs: Option<u64>,
    pub progress_interval_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub options: SessionOptions,
}

/// Load config from an explicit path. Returns an error if the file is
/// not found or invalid.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content =
        std::fs::read_to_string(path).map_err(|error| DashboardError::InvalidConfig {
            path: path.to_path_buf(),
            reason: format!("failed to read file: {}", error),
        })?;

    let config: ConfigFile =
        serde_yaml_ng::from_str(&content).map_err(|error| DashboardError::InvalidConfig {
            path: path.to_path_buf(),
            reason: format!("failed to parse YAML: {}", error),
        })?;

    validate_config(path, &config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not
/// found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(per_page) = config.per_page {
        validate_per_page(per_page).map_err(|reason| DashboardError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        })?;
    }
    for (name, value) in [
        ("fast_interval_secs", config.fast_interval_secs),
        ("findings_interval_secs", config.findings_interval_secs),
        ("progress_interval_secs", config.progress_interval_secs),
    ] {
        if let Some(secs) = value {
            validate_interval(name, secs).map_err(|reason| DashboardError::InvalidConfig {
                path: path.to_path_buf(),
                reason,
            })?;
        }
    }
    if let Some(ref api_url) = config.api_url {
        validate_api_url(api_url).map_err(|reason| DashboardError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        })?;
    }
    Ok(())
}

fn validate_per_page(per_page: u64) -> std::result::Result<(), String> {
    if !(1..=100).contains(&per_page) {
        return Err(format!(
            "per_page must be between 1 and 100, got {}",
            per_page
        ));
    }
    Ok(())
}

fn validate_interval(name: &str, secs: u64) -> std::result::Result<(), String> {
    if secs == 0 {
        return Err(format!("{} must be at least 1 second", name));
    }
    Ok(())
}

fn validate_api_url(api_url: &str) -> std::result::Result<(), String> {
    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        return Err(format!(
            "api_url must start with http:// or https://, got '{}'",
            api_url
        ));
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Merges CLI flags over the optional config file over the defaults and
/// validates the resolved values.
pub fn resolve_settings(args: &Args, config: Option<ConfigFile>) -> Result<Settings> {
    let config = config.unwrap_or_default();
    let defaults = SessionOptions::default();

    let api_url = args
        .api_url
        .clone()
        .or(config.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    validate_api_url(&api_url).map_err(|message| DashboardError::InvalidOption { message })?;

    let per_page = args
        .per_page
        .or(config.per_page)
        .unwrap_or(defaults.per_page);
    validate_per_page(per_page).map_err(|message| DashboardError::InvalidOption { message })?;

    let resolve_interval = |name: &str, value: Option<u64>, default: Duration| -> Result<Duration> {
        match value {
            Some(secs) => validate_interval(name, secs)
                .map(|_| Duration::from_secs(secs))
                .map_err(|message| DashboardError::InvalidOption { message }.into()),
            None => Ok(default),
        }
    };
    let fast_interval = resolve_interval(
        "fast_interval",
        args.fast_interval.or(config.fast_interval_secs),
        defaults.fast_interval,
    )?;
    let findings_interval = resolve_interval(
        "findings_interval",
        args.findings_interval.or(config.findings_interval_secs),
        defaults.findings_interval,
    )?;
    let progress_interval = resolve_interval(
        "progress_interval",
        args.progress_interval.or(config.progress_interval_secs),
        defaults.progress_interval,
    )?;

    Ok(Settings {
        api_url,
        options: SessionOptions {
            fast_interval,
            findings_interval,
            progress_interval,
            per_page,
            scope: args.repo.clone().or(config.scope),
            once: args.once,
        },
    })
}
