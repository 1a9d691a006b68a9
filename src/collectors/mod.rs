use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::client::redfish::{Fetch, FetchError, SESSION_SERVICE_PATH};
use crate::models::cpu::Processor;
use crate::models::disk::DiskReport;
use crate::models::fan::Fan;
use crate::models::memory::MemoryModule;
use crate::models::network::NetworkCard;
use crate::models::power::PowerSupply;
use crate::models::system::{BaseInfo, BiosConfig, Firmware, SnmpService};
use crate::models::{ComponentGroup, SubsystemReport};

pub mod collector;
pub(crate) mod common;
pub mod dell;
pub mod fujitsu;
pub mod grouping;
pub mod health;
pub mod hpe;
pub(crate) mod schema;

#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("unexpected shape at {path}: {reason}")]
    Shape { path: String, reason: String },

    #[error("ambiguous topology: {0}")]
    Topology(String),
}

impl CollectError {
    pub fn shape(path: &str, reason: impl fmt::Display) -> Self {
        CollectError::Shape {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Hpe,
    Fujitsu,
    Dell,
}

impl FromStr for Vendor {
    type Err = String;

    /// Accepts the manufacturer strings servers report about themselves.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hpe" | "hp" => Ok(Vendor::Hpe),
            "fujitsu" => Ok(Vendor::Fujitsu),
            "dell" | "dell inc." => Ok(Vendor::Dell),
            other => Err(format!("unsupported vendor: {}", other)),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Hpe => write!(f, "HPE"),
            Vendor::Fujitsu => write!(f, "Fujitsu"),
            Vendor::Dell => write!(f, "Dell"),
        }
    }
}

/// Resource paths of the one system, chassis and manager a device exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub system: String,
    pub chassis: String,
    pub manager: String,
    /// Service root `RedfishVersion` with the dots removed (`1.6.0` is 160).
    pub redfish_version: Option<u32>,
}

/// Per-vendor retrieval of every subsystem.
///
/// The provided methods implement the standard Redfish layout; each vendor
/// overrides only where its controller differs.
pub trait VendorAdapter: Send + Sync {
    fn vendor(&self) -> Vendor;

    /// Where to POST credentials; `root` answers without a session.
    fn session_path(&self, _root: &dyn Fetch) -> Result<String> {
        Ok(SESSION_SERVICE_PATH.to_string())
    }

    fn discover(&self, fetch: &dyn Fetch) -> Result<Topology>;

    fn base_info(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<BaseInfo> {
        let system = common::computer_system(fetch, &topology.system)?;
        let memory_status = system.memory_summary.status.health_or_rollup();
        Ok(common::base_info(&system, memory_status))
    }

    fn processor(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<Processor>> {
        common::processors(fetch, &common::join(&topology.system, "Processors"))
    }

    fn fan(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<Fan>> {
        common::fans(fetch, &common::join(&topology.chassis, "Thermal"))
    }

    fn memory(
        &self,
        fetch: &dyn Fetch,
        topology: &Topology,
    ) -> Result<SubsystemReport<ComponentGroup<MemoryModule>>> {
        common::memory(fetch, &common::join(&topology.system, "Memory"), &|raw| raw.round() as u64)
    }

    fn disk(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<DiskReport>;

    fn power(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<PowerSupply>> {
        common::power(fetch, &common::join(&topology.chassis, "Power"), &|_| None)
    }

    fn network(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<NetworkCard>>;

    fn firmware(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<Firmware> {
        common::manager_firmware(fetch, &topology.manager)
    }

    fn snmp(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SnmpService>;

    /// `Ok(None)` when the vendor exposes no BIOS policy to check.
    fn bios_config(&self, _fetch: &dyn Fetch, _topology: &Topology) -> Result<Option<BiosConfig>> {
        Ok(None)
    }
}

pub fn adapter_for(vendor: Vendor) -> Box<dyn VendorAdapter> {
    match vendor {
        Vendor::Hpe => Box::new(hpe::HpeAdapter),
        Vendor::Fujitsu => Box::new(fujitsu::FujitsuAdapter),
        Vendor::Dell => Box::new(dell::DellAdapter),
    }
}
