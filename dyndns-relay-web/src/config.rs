//! Environment-driven process configuration.

use anyhow::{Context, Result};

/// Log output format, selected with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Process configuration read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SeaORM connection string (`sqlite://...`, `postgres://...`,
    /// `mysql://...`).
    pub database_url: String,
    /// Socket address the HTTP server binds.
    pub bind_addr: String,
    /// Log output format.
    pub log_format: LogFormat,
}

const DEFAULT_PORT: &str = "3050";

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// `DATABASE_URL` is required. `BIND_ADDR` overrides the listen
    /// address; otherwise `PORT` (default 3050) is bound on all
    /// interfaces. `LOG_FORMAT=json` switches to JSON log output.
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(addr) => addr,
            Err(_) => {
                let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
                format!("0.0.0.0:{port}")
            }
        };

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            database_url,
            bind_addr,
            log_format,
        })
    }
}
