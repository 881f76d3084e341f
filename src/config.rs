//! Runtime configuration: TOML file with env-var overrides.
//!
//! Lookup order:
//! 1) $ADVISOR_CONFIG_PATH (must exist when set)
//! 2) config/advisor.toml if present
//! 3) built-in defaults
//! Individual ADVISOR_* variables then override whatever the file provided.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const ENV_CONFIG_PATH: &str = "ADVISOR_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/advisor.toml";

const ENV_BIND_ADDR: &str = "ADVISOR_BIND_ADDR";
const ENV_FORECAST_BASE_URL: &str = "ADVISOR_FORECAST_BASE_URL";
const ENV_GEOCODE_BASE_URL: &str = "ADVISOR_GEOCODE_BASE_URL";
const ENV_FORECAST_DAYS: &str = "ADVISOR_FORECAST_DAYS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub bind_addr: String,
    pub forecast_base_url: String,
    pub geocode_base_url: String,
    /// Days in the forecast window handed to the aggregator.
    pub forecast_days: u8,
    /// Per-request timeout for upstream HTTP calls, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            forecast_base_url: crate::forecast::open_meteo::DEFAULT_BASE_URL.to_string(),
            geocode_base_url: crate::geocode::DEFAULT_BASE_URL.to_string(),
            forecast_days: 7,
            http_timeout_secs: 10,
        }
    }
}

impl AdvisorConfig {
    /// Load the effective configuration (file, then env overrides).
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let path = Path::new(&p);
            if !path.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::from_file(path)?
        } else {
            let fallback = Path::new(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                Self::from_file(fallback)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var(ENV_BIND_ADDR) {
            self.bind_addr = v;
        }
        if let Ok(v) = env::var(ENV_FORECAST_BASE_URL) {
            self.forecast_base_url = v;
        }
        if let Ok(v) = env::var(ENV_GEOCODE_BASE_URL) {
            self.geocode_base_url = v;
        }
        if let Ok(v) = env::var(ENV_FORECAST_DAYS) {
            if let Ok(days) = v.trim().parse::<u8>() {
                if days > 0 {
                    self.forecast_days = days;
                }
            }
        }
    }
}
