use log::warn;
use regex::Regex;
use std::sync::OnceLock;

use super::common::{self, join};
use super::schema;
use super::{Result, Topology, Vendor, VendorAdapter};
use crate::client::redfish::{Fetch, LEGACY_SESSION_PATH, SERVICE_ROOT, SESSION_SERVICE_PATH};
use crate::models::disk::{DiskReport, RaidLevel};
use crate::models::memory::MemoryModule;
use crate::models::network::NetworkCard;
use crate::models::power::PowerSupply;
use crate::models::system::{BaseInfo, SnmpService};
use crate::models::{ComponentGroup, SubsystemReport};

/// First Redfish version (digits only) reporting memory in true MiB.
pub const MODERN_DIALECT: u32 = 160;
/// Capacity correction for older iDRAC dialects.
pub const LEGACY_MEMORY_FACTOR: f64 = 1.074;

/// Dell iDRAC 7/8/9.
pub struct DellAdapter;

fn is_legacy(version: Option<u32>) -> bool {
    version.is_some_and(|version| version < MODERN_DIALECT)
}

fn redfish_version(fetch: &dyn Fetch) -> Result<Option<u32>> {
    let root: schema::ServiceRoot = common::fetch_as(fetch, SERVICE_ROOT)?;
    Ok(root
        .redfish_version
        .as_deref()
        .and_then(common::parse_redfish_version))
}

/// Rounds a reported capacity, correcting it first on legacy dialects.
pub fn corrected_capacity(raw: f64, version: Option<u32>) -> u64 {
    if is_legacy(version) {
        (raw * LEGACY_MEMORY_FACTOR).round() as u64
    } else {
        raw.round() as u64
    }
}

/// Wattage embedded in a supply model such as `PWR SPLY,750W,RDNT,DELTA`.
fn model_wattage(supply: &schema::PowerSupply) -> Option<u32> {
    static WATTAGE: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = WATTAGE.get_or_init(|| Regex::new(r",\s*(\d+)\s*W").ok()).as_ref()?;
    let model = supply.model.as_deref()?;
    pattern.captures(model)?.get(1)?.as_str().parse().ok()
}

fn volume_raid(volume: &schema::Volume) -> Option<RaidLevel> {
    match volume.volume_type.as_deref() {
        Some("RawDevice") => None,
        Some("Mirrored") => Some(RaidLevel::Numeric(1)),
        _ => Some(RaidLevel::Numeric(0)),
    }
}

impl VendorAdapter for DellAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Dell
    }

    /// Older dialects keep sessions outside the session service.
    fn session_path(&self, root: &dyn Fetch) -> Result<String> {
        let path = if is_legacy(redfish_version(root)?) {
            LEGACY_SESSION_PATH
        } else {
            SESSION_SERVICE_PATH
        };
        Ok(path.to_string())
    }

    fn discover(&self, fetch: &dyn Fetch) -> Result<Topology> {
        let redfish_version = redfish_version(fetch).unwrap_or_else(|e| {
            warn!("Can not read Redfish version, assuming a current dialect: {}", e);
            None
        });
        Ok(Topology {
            system: common::first_member(fetch, "/redfish/v1/Systems/")?,
            chassis: common::first_member(fetch, "/redfish/v1/Chassis/")?,
            manager: common::first_member(fetch, "/redfish/v1/Managers/")?,
            redfish_version,
        })
    }

    fn base_info(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<BaseInfo> {
        let system = common::computer_system(fetch, &topology.system)?;
        let memory_status = system.memory_summary.status.health_or_rollup();
        let mut info = common::base_info(&system, memory_status);
        info.serial = system.sku.clone();
        info.memory_gib = Some(corrected_capacity(
            system.memory_summary.total_system_memory_gib,
            topology.redfish_version,
        ) as f64);
        Ok(info)
    }

    fn memory(
        &self,
        fetch: &dyn Fetch,
        topology: &Topology,
    ) -> Result<SubsystemReport<ComponentGroup<MemoryModule>>> {
        let version = topology.redfish_version;
        common::memory(fetch, &join(&topology.system, "Memory"), &|raw| {
            corrected_capacity(raw, version)
        })
    }

    /// The controller whose id names it a RAID adapter.
    fn disk(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<DiskReport> {
        let controller = common::storage_controller(fetch, &topology.system, &|member| member.contains("RAID"))?;
        common::storage_disks(fetch, &controller, &volume_raid, &|drive| {
            drive.name.clone().unwrap_or_default()
        })
    }

    fn power(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<PowerSupply>> {
        common::power(fetch, &join(&topology.chassis, "Power"), &model_wattage)
    }

    fn network(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<NetworkCard>> {
        common::network(fetch, &join(&topology.system, "NetworkAdapters"), &|adapter| {
            adapter.model.clone()
        })
    }

    fn snmp(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SnmpService> {
        common::protocol_snmp(fetch, &join(&topology.manager, "NetworkProtocol"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::testing::dell_device;
    use crate::collectors::CollectError;
    use serde_json::json;

    fn topology(version: &str) -> Topology {
        DellAdapter.discover(&dell_device(version)).unwrap()
    }

    #[test]
    fn test_legacy_memory_correction() {
        assert_eq!(corrected_capacity(1024.0, Some(102)), 1100);
        assert_eq!(corrected_capacity(1024.0, Some(160)), 1024);
        assert_eq!(corrected_capacity(1024.0, None), 1024);
    }

    #[test]
    fn test_session_path_by_dialect() {
        assert_eq!(DellAdapter.session_path(&dell_device("1.0.2")).unwrap(), LEGACY_SESSION_PATH);
        assert_eq!(DellAdapter.session_path(&dell_device("1.6.0")).unwrap(), SESSION_SERVICE_PATH);
    }

    #[test]
    fn test_discover_reads_dialect() {
        let topology = topology("1.4.0");
        assert_eq!(topology.redfish_version, Some(140));
        assert_eq!(topology.system, "/redfish/v1/Systems/System.Embedded.1");
    }

    #[test]
    fn test_legacy_memory_modules_are_corrected() {
        let fetch = dell_device("1.0.2");
        let report = DellAdapter.memory(&fetch, &topology("1.0.2")).unwrap();
        assert_eq!(report.info[0].attributes.capacity_mib, 17596);

        let fetch = dell_device("1.6.0");
        let report = DellAdapter.memory(&fetch, &topology("1.6.0")).unwrap();
        assert_eq!(report.info[0].attributes.capacity_mib, 16384);
    }

    #[test]
    fn test_serial_comes_from_sku() {
        let info = DellAdapter.base_info(&dell_device("1.6.0"), &topology("1.6.0")).unwrap();
        assert_eq!(info.serial.as_deref(), Some("7XK4Q93"));
    }

    #[test]
    fn test_legacy_total_memory_is_corrected() {
        let info = DellAdapter.base_info(&dell_device("1.0.2"), &topology("1.0.2")).unwrap();
        assert_eq!(info.memory_gib, Some(69.0));

        let info = DellAdapter.base_info(&dell_device("1.6.0"), &topology("1.6.0")).unwrap();
        assert_eq!(info.memory_gib, Some(64.0));
    }

    #[test]
    fn test_absent_socket_is_not_counted() {
        let fetch = dell_device("1.6.0").with(
            "/redfish/v1/Systems/System.Embedded.1/Processors/CPU.Socket.4",
            json!({ "Status": { "State": "Absent" } }),
        );
        let report = DellAdapter.processor(&fetch, &topology("1.6.0")).unwrap();
        assert_eq!(report.number, 3);
        assert_eq!(report.info.len(), 3);
        assert!(report.fail_part.is_empty());
    }

    #[test]
    fn test_raw_device_volume_is_skipped() {
        let report = DellAdapter.disk(&dell_device("1.6.0"), &topology("1.6.0")).unwrap();
        let logical = report.logical.unwrap();
        assert_eq!(logical.number, 1);
        assert_eq!(logical.info[0].raid, RaidLevel::Numeric(1));
    }

    #[test]
    fn test_disk_needs_raid_controller() {
        let fetch = dell_device("1.6.0").with(
            "/redfish/v1/Systems/System.Embedded.1/Storage/",
            json!({ "Members": [{ "@odata.id": "/redfish/v1/Systems/System.Embedded.1/Storage/AHCI.Embedded.1-1" }] }),
        );
        assert!(matches!(
            DellAdapter.disk(&fetch, &topology("1.6.0")),
            Err(CollectError::Topology(_))
        ));
    }

    #[test]
    fn test_power_capacity_from_model() {
        let fetch = dell_device("1.6.0").with(
            "/redfish/v1/Chassis/System.Embedded.1/Power/",
            json!({ "PowerSupplies": [
                { "MemberId": "PSU.Slot.1", "Model": "PWR SPLY,750W,RDNT,DELTA",
                  "Status": { "Health": "OK", "State": "Enabled" } }
            ]}),
        );
        let report = DellAdapter.power(&fetch, &topology("1.6.0")).unwrap();
        assert_eq!(report.info[0].capacity_watts, Some(750));
    }
}
