use anyhow::{Context, Result};
use config::{Config, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_timeout_secs() -> u64 {
    30
}

fn default_accept_invalid_certs() -> bool {
    true
}

fn default_workers() -> usize {
    8
}

fn default_work_dir() -> String {
    ".".to_string()
}

fn default_output() -> String {
    "checklist.json".to_string()
}

fn default_inventory_file() -> String {
    "inventory.toml".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedfishConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Management controllers ship self-signed certificates.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
    /// Devices queried at the same time.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Base directory for every relative path the tool reads or writes.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default = "default_output")]
    pub output: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    #[serde(default = "default_inventory_file")]
    pub file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for RedfishConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: default_accept_invalid_certs(),
            workers: default_workers(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            output: default_output(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            file: default_inventory_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(rename = "REDFISH", alias = "redfish", default)]
    pub redfish: RedfishConfig,
    #[serde(rename = "REPORT", alias = "report", default)]
    pub report: ReportConfig,
    #[serde(rename = "INVENTORY", alias = "inventory", default)]
    pub inventory: InventoryConfig,
    #[serde(rename = "LOGGING", alias = "logging", default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            redfish: RedfishConfig::default(),
            report: ReportConfig::default(),
            inventory: InventoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    /// Resolves `path` against the configured working directory.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.report.work_dir).join(path)
        }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.resolve(&self.inventory.file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.report.output)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(config::FileFormat::Ini))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config.try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!(
            "[REDFISH]\ntimeout_secs = {}\naccept_invalid_certs = {}\nworkers = {}\n\n",
            self.redfish.timeout_secs,
            self.redfish.accept_invalid_certs,
            self.redfish.workers
        ));

        config_str.push_str(&format!(
            "[REPORT]\nwork_dir = {}\noutput = {}\n\n",
            self.report.work_dir,
            self.report.output
        ));

        config_str.push_str(&format!(
            "[INVENTORY]\nfile = {}\n\n",
            self.inventory.file
        ));

        config_str.push_str(&format!(
            "[LOGGING]\nlevel = {}\n",
            self.logging.level
        ));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}
