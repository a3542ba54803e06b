use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::TimeDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(anyhow!(
                "unknown STORAGE_BACKEND '{other}', expecting 'postgres' or 'memory'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(anyhow!(
                "unknown LOG_FORMAT '{other}', expecting 'compact' or 'pretty'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub session_ttl_seconds: i64,
    pub session_cookie_secure: bool,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let storage_backend: StorageBackend = std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()?;

        let database_url = match storage_backend {
            StorageBackend::Postgres => {
                Some(get_required("DATABASE_URL").context("DATABASE_URL is required")?)
            }
            StorageBackend::Memory => std::env::var("DATABASE_URL").ok(),
        };
        let database_max_connections = parse_usize_env("DATABASE_MAX_CONNECTIONS", 10)?;
        let database_max_connections = u32::try_from(database_max_connections)
            .context("DATABASE_MAX_CONNECTIONS is too large")?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let log_format: LogFormat = std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .parse()?;

        let session_ttl_seconds = parse_u64_env("SESSION_TTL_SECONDS", 24 * 60 * 60)?;
        let session_ttl_seconds = i64::try_from(session_ttl_seconds)
            .ok()
            .filter(|secs| TimeDelta::try_seconds(*secs).is_some())
            .context("SESSION_TTL_SECONDS is too large")?;
        let session_cookie_secure = parse_bool_env("SESSION_COOKIE_SECURE", false)?;

        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 10 * 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            http_addr,
            cors_origins,
            log_level,
            log_format,
            session_ttl_seconds,
            session_cookie_secure,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{key} must be a boolean, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::{LogFormat, StorageBackend, parse_cors_origins};

    #[test]
    fn storage_backend_parses_known_values() {
        assert_eq!(
            "Postgres".parse::<StorageBackend>().unwrap(),
            StorageBackend::Postgres
        );
        assert_eq!(
            " memory ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn log_format_parses_known_values() {
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("json".parse::<LogFormat>().is_err());
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test".to_string());
        assert_eq!(origins, ["http://a.test", "http://b.test"]);
    }
}
