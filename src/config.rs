// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through the environment variable
//! named next to it; a `.env` file in the working directory is loaded first.

use crate::services::cosmic::{CosmicConfig, DEFAULT_API_URL};
use crate::services::logging::LogFormat;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set (or pass --seed to serve from a local file)")]
    Missing(&'static str),
}

/// Server-rendered search front end for a Cosmic bucket of indexed pages
#[derive(Debug, Clone, Parser)]
#[command(name = "search-gateway", version)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Cosmic API base URL
    #[arg(long, env = "COSMIC_API_URL", default_value = DEFAULT_API_URL)]
    pub cosmic_api_url: String,

    /// Slug of the bucket holding the search-results objects
    #[arg(long, env = "COSMIC_BUCKET_SLUG")]
    pub cosmic_bucket_slug: Option<String>,

    #[arg(long, env = "COSMIC_READ_KEY", hide_env_values = true)]
    pub cosmic_read_key: Option<String>,

    #[arg(long, env = "COSMIC_WRITE_KEY", hide_env_values = true)]
    pub cosmic_write_key: Option<String>,

    /// Per-request timeout for backend calls, in seconds
    #[arg(long, env = "COSMIC_TIMEOUT_SECS", default_value_t = 10)]
    pub cosmic_timeout_secs: u64,

    /// Serve objects from a local JSON file instead of Cosmic
    #[arg(long, env = "SEED_FILE")]
    pub seed: Option<PathBuf>,

    /// Default tracing filter when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load `.env` (if present) and parse the process arguments.
    pub fn load() -> Self {
        // A missing .env file is the normal case in deployments
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    /// Cosmic connection settings. Fails when bucket or read key are absent.
    pub fn cosmic(&self) -> Result<CosmicConfig, ConfigError> {
        let bucket_slug = non_blank(&self.cosmic_bucket_slug)
            .ok_or(ConfigError::Missing("COSMIC_BUCKET_SLUG"))?;
        let read_key =
            non_blank(&self.cosmic_read_key).ok_or(ConfigError::Missing("COSMIC_READ_KEY"))?;

        Ok(CosmicConfig {
            api_url: self.cosmic_api_url.clone(),
            bucket_slug,
            read_key,
            write_key: non_blank(&self.cosmic_write_key),
            timeout: Duration::from_secs(self.cosmic_timeout_secs),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
