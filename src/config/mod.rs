//! Configuration module for Wheelcast.
//!
//! Loads engine settings and the history file location from environment
//! variables (a `.env` file is honoured by the binary).

mod engine_config;

pub use engine_config::EngineEnvConfig;

use crate::domain::ml::EngineConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default location of the spin history file
pub const DEFAULT_HISTORY_PATH: &str = "historico_resultados.json";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    pub history_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let history_path = lookup("WHEELCAST_HISTORY_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string());
        let engine = EngineEnvConfig::from_lookup(lookup).into_engine_config();
        engine
            .validate()
            .context("Invalid engine configuration")?;

        Ok(Self {
            engine,
            history_path: PathBuf::from(history_path),
        })
    }
}
