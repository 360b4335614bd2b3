use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_valuation_url() -> String {
    "http://fundgz.1234567.com.cn/js".to_string()
}

fn default_detail_url() -> String {
    "http://fund.eastmoney.com/pingzhongdata".to_string()
}

fn default_history_url() -> String {
    "http://api.fund.eastmoney.com/f10/lsjz".to_string()
}

fn default_search_url() -> String {
    "https://fundsuggest.eastmoney.com/FundSearch/api/FundSearchAPI.ashx".to_string()
}

fn default_rank_url() -> String {
    "http://fund.eastmoney.com/data/rankhandler.aspx".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EndpointsConfig {
    #[serde(default = "default_valuation_url")]
    pub valuation_base_url: String,
    #[serde(default = "default_detail_url")]
    pub detail_base_url: String,
    #[serde(default = "default_history_url")]
    pub history_base_url: String,
    #[serde(default = "default_search_url")]
    pub search_base_url: String,
    #[serde(default = "default_rank_url")]
    pub rank_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        EndpointsConfig {
            valuation_base_url: default_valuation_url(),
            detail_base_url: default_detail_url(),
            history_base_url: default_history_url(),
            search_base_url: default_search_url(),
            rank_base_url: default_rank_url(),
        }
    }
}

fn default_valuation_ttl() -> u64 {
    5 * 60
}

fn default_detail_ttl() -> u64 {
    60 * 60
}

fn default_rank_ttl() -> u64 {
    30 * 60
}

/// Per-data-class cache lifetimes, in seconds. Zero disables expiry.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheTtlConfig {
    #[serde(default = "default_valuation_ttl")]
    pub valuation_secs: u64,
    #[serde(default = "default_detail_ttl")]
    pub detail_secs: u64,
    #[serde(default = "default_rank_ttl")]
    pub rank_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        CacheTtlConfig {
            valuation_secs: default_valuation_ttl(),
            detail_secs: default_detail_ttl(),
            rank_secs: default_rank_ttl(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub cache_ttl: CacheTtlConfig,
    /// Overrides the store location; used by tests and portable setups.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults
    /// when none exists. The watch list lives in the store, not here, so
    /// a missing config is not an error.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fundwatch")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fundwatch")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
