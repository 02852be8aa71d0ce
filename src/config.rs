use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use crate::data::gamma_api::{EventQuery, DEFAULT_GAMMA_URL};
use crate::data::types::AssetDescriptor;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gamma: GammaConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GammaConfig {
    #[serde(default = "default_gamma_url")]
    pub base_url: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Capped at 10 by the search itself.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Re-run every N seconds until interrupted; 0 runs once.
    #[serde(default)]
    pub refresh_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub csv_logging: bool,
    #[serde(default = "default_csv_path")]
    pub csv_log_path: String,
}

/// An asset to look up, as listed under `[[assets]]`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    #[serde(flatten)]
    pub descriptor: AssetDescriptor,
}

impl AssetConfig {
    pub fn label(&self) -> String {
        self.descriptor.name.clone()
            .or_else(|| self.descriptor.symbol.clone())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

fn default_gamma_url() -> String { DEFAULT_GAMMA_URL.to_string() }
fn default_limit() -> u32 { 200 }
fn default_timeout() -> u64 { 15 }
fn default_max_results() -> usize { 10 }
fn default_display_limit() -> usize { 5 }
fn default_cache_ttl() -> u64 { 300 }
fn default_csv_path() -> String { "polybets.csv".to_string() }

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            base_url: default_gamma_url(),
            limit: default_limit(),
            offset: 0,
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            display_limit: default_display_limit(),
            cache_ttl_secs: default_cache_ttl(),
            refresh_secs: 0,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            csv_logging: false,
            csv_log_path: default_csv_path(),
        }
    }
}

impl GammaConfig {
    pub fn event_query(&self) -> EventQuery {
        EventQuery {
            limit: self.limit,
            offset: self.offset,
            ..EventQuery::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub config_path: String,
    pub polymarket_gamma_url: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Environment settings win over the file.
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(url) = &env.polymarket_gamma_url {
            self.gamma.base_url = url.clone();
        }
    }
}

impl EnvConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            config_path: std::env::var("POLYBETS_CONFIG")
                .unwrap_or_else(|_| "config.toml".to_string()),
            polymarket_gamma_url: std::env::var("POLYMARKET_GAMMA_URL").ok(),
        })
    }
}
