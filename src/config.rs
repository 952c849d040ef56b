use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::payload::ChatModel;

pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Upper bound for configured durations (one year).
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_url: String,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub chat_model: ChatModel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            static_dir: "static".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            chat_model: ChatModel::default(),
        }
    }
}

impl Config {
    /// Reads configuration from the environment, loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Config::default();
        Ok(Config {
            upstream_url: get_env_or_default("PANORAMA_UPSTREAM_URL", &defaults.upstream_url),
            bind_addr: parse_env("PANORAMA_BIND_ADDR", defaults.bind_addr)?,
            static_dir: get_env_or_default("PANORAMA_STATIC_DIR", &defaults.static_dir),
            cache_ttl: bounded_secs(
                "PANORAMA_CACHE_TTL_SECS",
                parse_env("PANORAMA_CACHE_TTL_SECS", defaults.cache_ttl.as_secs())?,
                0,
            )?,
            request_timeout: bounded_secs(
                "PANORAMA_REQUEST_TIMEOUT_SECS",
                parse_env(
                    "PANORAMA_REQUEST_TIMEOUT_SECS",
                    defaults.request_timeout.as_secs(),
                )?,
                1,
            )?,
            chat_model: ChatModel {
                provider: get_env_or_default("PANORAMA_CHAT_PROVIDER", &defaults.chat_model.provider),
                model: get_env_or_default("PANORAMA_CHAT_MODEL", &defaults.chat_model.model),
            },
        })
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for environment variable {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn bounded_secs(key: &str, secs: u64, min: u64) -> Result<Duration> {
    if !(min..=MAX_DURATION_SECS).contains(&secs) {
        bail!("Invalid value for environment variable {key}: {secs} (expected {min}..={MAX_DURATION_SECS} seconds)");
    }
    Ok(Duration::from_secs(secs))
}
