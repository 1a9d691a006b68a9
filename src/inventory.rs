use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::collectors::Vendor;

/// Role of the server, as `1|2|3` or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawServerType")]
pub enum ServerType {
    Compute,
    Ceph,
    BareMetal,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawServerType {
    Code(i64),
    Name(String),
}

impl TryFrom<RawServerType> for ServerType {
    type Error = String;

    fn try_from(raw: RawServerType) -> std::result::Result<Self, Self::Error> {
        let name = match raw {
            RawServerType::Code(code) => code.to_string(),
            RawServerType::Name(name) => name.trim().to_lowercase(),
        };
        match name.as_str() {
            "1" | "compute" => Ok(ServerType::Compute),
            "2" | "ceph" => Ok(ServerType::Ceph),
            "3" | "bare-metal" | "baremetal" => Ok(ServerType::BareMetal),
            other => Err(format!("unknown server type: {}", other)),
        }
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerType::Compute => write!(f, "Compute"),
            ServerType::Ceph => write!(f, "Ceph"),
            ServerType::BareMetal => write!(f, "Bare-metal"),
        }
    }
}

/// One managed server and its management controller credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    pub bmc_address: String,
    pub username: String,
    pub password: String,
    /// Manufacturer string as the server reports it.
    pub vendor: String,
    pub ip_os: Option<String>,
    pub hostname: Option<String>,
    pub server_type: Option<ServerType>,
    /// OS facts and asset registry columns gathered elsewhere.
    #[serde(default)]
    pub facts: IndexMap<String, String>,
}

impl DeviceEntry {
    pub fn vendor(&self) -> std::result::Result<Vendor, String> {
        self.vendor.parse()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

impl Inventory {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse inventory")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading inventory from {}", path.display());

        let content = fs::read_to_string(path)
            .context(format!("Failed to read inventory from {}", path.display()))?;
        let inventory = Self::from_toml(&content)
            .context(format!("Invalid inventory in {}", path.display()))?;

        info!("Loaded {} devices from {}", inventory.devices.len(), path.display());
        Ok(inventory)
    }
}
