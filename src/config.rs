use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod db;
pub mod migrations;

/// Name of the orders table every statement targets
pub const ORDERS_TABLE: &str = "clean_orders";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("ecommerce_project.db")
}

fn default_create_if_missing() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            create_if_missing: default_create_if_missing(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

fn default_export_file() -> PathBuf {
    PathBuf::from("clean_orders_report.xlsx")
}

fn default_sheet_name() -> String {
    "Clean Orders Data".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_file: default_export_file(),
            sheet_name: default_sheet_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_id_base")]
    pub id_base: i64,
    #[serde(default = "default_generator_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

fn default_rows() -> u32 {
    160
}

fn default_seed() -> u64 {
    42
}

fn default_id_base() -> i64 {
    1000
}

fn default_generator_file() -> PathBuf {
    PathBuf::from("raw_ecommerce_data_160_rows.csv")
}

fn default_sample_rows() -> usize {
    10
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: default_seed(),
            id_base: default_id_base(),
            output_file: default_generator_file(),
            sample_rows: default_sample_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

fn default_pacing_ms() -> u64 {
    1_000
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
        }
    }
}

impl MenuConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("orders-toolkit")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".orders-toolkit")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file {:?} doesn't exist, using defaults", config_path);
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid TOML configuration")?;
        debug!("Loaded config with database at {:?}", config.database.path);
        Ok(config)
    }
}
