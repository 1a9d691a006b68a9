use indexmap::IndexMap;

use super::common::{self, join};
use super::health;
use super::schema::{self, value_text};
use super::{CollectError, Result, Topology, Vendor, VendorAdapter};
use crate::client::redfish::Fetch;
use crate::models::disk::{DiskReport, RaidLevel};
use crate::models::network::NetworkCard;
use crate::models::system::{BiosConfig, SnmpService};
use crate::models::SubsystemReport;

const PROFILE_PATH: &str = "/rest/v1/Oem/eLCM/ProfileManagement/Server";
const CPU_CONFIG: &str = "/Server/SystemConfig/BiosConfig/CpuConfig";

/// Fujitsu iRMC S4/S5.
pub struct FujitsuAdapter;

/// `Location.Info` against `Location.InfoFormat`, brackets dropped.
fn drive_label(drive: &schema::Drive) -> String {
    let text = |key: &str| {
        drive
            .location
            .as_ref()
            .and_then(|location| location.get(key))
            .and_then(value_text)
            .map(|raw| raw.replace(['[', ']'], ""))
    };
    match (text("InfoFormat"), text("Info")) {
        (Some(format), Some(info)) => health::location_label(&format, &info),
        _ => drive.name.clone().unwrap_or_default(),
    }
}

fn volume_raid(volume: &schema::Volume) -> Option<RaidLevel> {
    if volume.volume_type.as_deref() == Some("RawDevice") {
        return None;
    }
    Some(RaidLevel::parse(volume.raid_type.as_deref().unwrap_or_default()))
}

impl VendorAdapter for FujitsuAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Fujitsu
    }

    fn discover(&self, fetch: &dyn Fetch) -> Result<Topology> {
        Ok(Topology {
            system: common::single_member(fetch, "/redfish/v1/Systems/")?,
            chassis: common::single_member(fetch, "/redfish/v1/Chassis/")?,
            manager: common::single_member(fetch, "/redfish/v1/Managers/")?,
            redfish_version: None,
        })
    }

    fn disk(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<DiskReport> {
        let controller = common::storage_controller(fetch, &topology.system, &|_| true)?;
        common::storage_disks(
            fetch,
            &controller,
            &volume_raid,
            &drive_label,
        )
    }

    fn network(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<NetworkCard>> {
        common::network(fetch, &join(&topology.chassis, "NetworkAdapters"), &|adapter| {
            adapter.model.clone()
        })
    }

    fn snmp(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SnmpService> {
        common::protocol_snmp(fetch, &join(&topology.manager, "ManagerNetwork"))
    }

    /// Reads the CPU section of the eLCM server profile.
    fn bios_config(&self, fetch: &dyn Fetch, _topology: &Topology) -> Result<Option<BiosConfig>> {
        let profile = fetch.get(PROFILE_PATH)?;
        let cpu_config = profile
            .pointer(CPU_CONFIG)
            .ok_or_else(|| CollectError::shape(PROFILE_PATH, "missing BiosConfig.CpuConfig"))?;

        let mut settings = IndexMap::new();
        for key in ["EnergyPerformanceMode", "OsEnergyPerformanceOverrideEnabled"] {
            let value = cpu_config
                .get(key)
                .and_then(value_text)
                .ok_or_else(|| CollectError::shape(PROFILE_PATH, format!("missing {}", key)))?;
            settings.insert(key.to_string(), Some(value));
        }

        let compliant = settings.get("EnergyPerformanceMode") == Some(&Some("OptimizedPerformance".to_string()))
            && settings.get("OsEnergyPerformanceOverrideEnabled") == Some(&Some("True".to_string()));
        Ok(Some(BiosConfig { compliant, settings }))
    }
}
