use anyhow::Context;
use axum::http::HeaderValue;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::{Args, DEFAULT_CONFIG_PATH};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_DATA_DIR: &str = "data/assessments";
const DEFAULT_HISTORY_LIMIT: usize = 10;
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://192.168.5.14:3000"];

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub(crate) listen_addr: String,
    #[serde(default = "default_data_dir")]
    pub(crate) data_dir: String,
    #[serde(default = "default_history_limit")]
    pub(crate) history_limit: usize,
    #[serde(default)]
    pub(crate) cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub(crate) allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            data_dir: default_data_dir(),
            history_limit: default_history_limit(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl ServerConfig {
    pub(crate) fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.trim().is_empty() {
            anyhow::bail!("listen_addr cannot be empty");
        }
        if self.data_dir.trim().is_empty() {
            anyhow::bail!("data_dir cannot be empty");
        }
        if self.history_limit == 0 {
            anyhow::bail!("history_limit must be greater than zero");
        }
        for origin in &self.cors.allowed_origins {
            if origin == "*" {
                anyhow::bail!("cors origin \"*\" cannot be combined with credentials");
            }
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid cors origin {origin}"))?;
        }
        Ok(())
    }
}

pub(crate) fn load_server_config(path: &Path) -> anyhow::Result<ServerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ServerConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Config file plus command line overrides. A missing file is only
/// tolerated at the default location.
pub(crate) fn resolve_config(args: &Args) -> anyhow::Result<ServerConfig> {
    let mut config = if args.config.exists() || args.config != Path::new(DEFAULT_CONFIG_PATH) {
        load_server_config(&args.config)?
    } else {
        tracing::info!(
            config = %args.config.display(),
            "config file not found, using defaults"
        );
        ServerConfig::default()
    };
    if let Some(listen_addr) = args.listen_addr.as_ref() {
        config.listen_addr = listen_addr.clone();
    }
    if let Some(data_dir) = args.data_dir.as_ref() {
        config.data_dir = data_dir.clone();
    }
    config.validate()?;
    Ok(config)
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home);
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_allowed_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.to_string())
        .collect()
}
