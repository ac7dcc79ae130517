use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_dir: PathBuf,
    pub preload_default_model: bool,
    pub workers: Option<usize>,
    pub max_body_bytes: usize,
}

/// Batches are not capped, so the JSON limit sits far above actix's 2 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_dir: PathBuf::from("models"),
            preload_default_model: true,
            workers: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = ServerConfig::default();

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?,
            None => defaults.port,
        };

        let preload_default_model = match lookup("PRELOAD_DEFAULT_MODEL") {
            Some(flag) => parse_flag(&flag)
                .with_context(|| format!("PRELOAD_DEFAULT_MODEL must be a boolean, got {flag:?}"))?,
            None => defaults.preload_default_model,
        };

        let workers = match lookup("WORKERS") {
            Some(workers) => Some(
                workers
                    .trim()
                    .parse()
                    .with_context(|| format!("WORKERS must be a count, got {workers:?}"))?,
            ),
            None => defaults.workers,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(limit) => limit
                .trim()
                .parse()
                .with_context(|| format!("MAX_BODY_BYTES must be a byte count, got {limit:?}"))?,
            None => defaults.max_body_bytes,
        };

        Ok(ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            model_dir: lookup("MODEL_DIR").map(PathBuf::from).unwrap_or(defaults.model_dir),
            preload_default_model,
            workers,
            max_body_bytes,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
