//! Configuration management for the ASOS dashboard
//!
//! Everything is read from the process environment, with a `.env` file in the
//! working directory loaded first when present.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_ASOS_BASE_URL: &str = "https://apis.data.go.kr/1360000/AsosDalyInfoService";
pub const DEFAULT_PORT: u16 = 3000;

/// Root configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the web server listens on
    pub port: u16,
    /// Service key for the ASOS API, inserted into the URL as issued
    pub weather_api_key: String,
    /// Base URL of the ASOS daily-observation service
    pub asos_base_url: String,
    /// URL the dashboard page posts to when it mounts
    pub proxy_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            weather_api_key: String::new(),
            asos_base_url: DEFAULT_ASOS_BASE_URL.to_string(),
            proxy_url: default_proxy_url(DEFAULT_PORT),
        }
    }
}

fn default_proxy_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}/api/v0")
}

impl Config {
    /// Load configuration from `.env` and the environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_env()
    }

    /// Build configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let weather_api_key =
            env::var("WEATHER_API_KEY").context("Missing WEATHER_API_KEY env var")?;

        let port = match env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {port}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let asos_base_url =
            env::var("ASOS_BASE_URL").unwrap_or_else(|_| DEFAULT_ASOS_BASE_URL.to_string());
        let proxy_url = env::var("DASHBOARD_PROXY_URL").unwrap_or_else(|_| default_proxy_url(port));

        let config = Self {
            port,
            weather_api_key,
            asos_base_url,
            proxy_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        if self.weather_api_key.trim().is_empty() {
            return Err(crate::WeatherError::config("WEATHER_API_KEY is empty").into());
        }
        if !self.asos_base_url.starts_with("http") {
            return Err(crate::WeatherError::config(format!(
                "ASOS_BASE_URL must be an http(s) URL, got {}",
                self.asos_base_url
            ))
            .into());
        }
        Ok(())
    }
}
