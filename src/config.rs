use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub platform: PlatformConfig,
    pub filters: FilterConfig,
    #[serde(default)]
    pub imagery: ImageryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlatformConfig {
    /// Base URL of the remote-sensing platform's REST API
    pub base_url: String,
    /// Path to the service-account key file
    pub service_account_file: PathBuf,
    /// Image collection to query
    pub collection: String,
}

/// Catalog filters applied to every scene query.
#[derive(Debug, Deserialize, Clone)]
pub struct FilterConfig {
    /// Inclusive acquisition window start, YYYY-MM-DD
    pub start_date: String,
    /// Exclusive acquisition window end, YYYY-MM-DD
    pub end_date: String,
    /// Scenes at or above this cloud-cover percentage are excluded
    pub max_cloud_cover: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageryConfig {
    /// Side of the square footprint clipped around the request point, meters
    #[serde(default = "default_footprint")]
    pub footprint_meters: f64,
    /// Zoom level used when the tile-URL request does not carry one
    #[serde(default = "default_zoom")]
    pub default_zoom: u32,
}

fn default_footprint() -> f64 {
    90.0
}

fn default_zoom() -> u32 {
    12
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            footprint_meters: default_footprint(),
            default_zoom: default_zoom(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
