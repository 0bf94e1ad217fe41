//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the standby API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `STANDBY_TIMEZONE`: IANA zone handover times are expressed in (default: "America/Toronto")
//! - `STANDBY_HANDOVER_DAY`: Weekday weekly windows start on (default: "Fri")
//! - `STANDBY_SHIFT_START`: Local start time of a window, `HH:MM` (default: "16:00")
//! - `STANDBY_SHIFT_END`: Local end time of a window, `HH:MM` (default: "07:00")

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use standby_core::rotation::RotationPolicy;
use std::env;
use tracing::Level;

/// Configuration for the standby API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use standby_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Handover rules for the weekly rotation
    pub rotation: RotationPolicy,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - One of the STANDBY_* values is not a valid zone, weekday or time
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match var("LOG_LEVEL", "info").as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30").parse().unwrap_or(30);

        // Rotation settings
        let timezone = var("STANDBY_TIMEZONE", "America/Toronto")
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid STANDBY_TIMEZONE value: {}", e))?;
        let handover_day = var("STANDBY_HANDOVER_DAY", "Fri")
            .parse::<Weekday>()
            .map_err(|e| eyre!("Invalid STANDBY_HANDOVER_DAY value: {:?}", e))?;
        let shift_start = NaiveTime::parse_from_str(&var("STANDBY_SHIFT_START", "16:00"), "%H:%M")
            .wrap_err("Invalid STANDBY_SHIFT_START value")?;
        let shift_end = NaiveTime::parse_from_str(&var("STANDBY_SHIFT_END", "07:00"), "%H:%M")
            .wrap_err("Invalid STANDBY_SHIFT_END value")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            rotation: RotationPolicy {
                timezone,
                handover_day,
                shift_start,
                shift_end,
            },
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
