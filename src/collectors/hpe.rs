use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use super::common::{self, fetch_as, fetch_member, join, member_paths};
use super::health::{self, is_unhealthy_or_disabled};
use super::schema::{self, value_text};
use super::{grouping, CollectError, Result, Topology, Vendor, VendorAdapter};
use crate::client::redfish::Fetch;
use crate::models::disk::{DiskReport, LogicalDisk, PhysicalDisk, RaidLevel};
use crate::models::network::NetworkCard;
use crate::models::system::{BaseInfo, BiosConfig, Firmware, SnmpService};
use crate::models::{ComponentGroup, FailEntry, SubsystemReport};

const SYSTEM: &str = "/redfish/v1/Systems/1/";
const CHASSIS: &str = "/redfish/v1/Chassis/1/";
const MANAGER: &str = "/redfish/v1/Managers/1/";

/// Historical SmartStorage divisor from logical drive MiB to marketing GB.
const LOGICAL_MIB_PER_GB: f64 = 954.0;

const ILO4: &str = "iLO 4";

/// HPE iLO 4 and later.
///
/// Storage lives under the OEM `SmartStorage` tree rather than the standard
/// `Storage` collection, and the iLO generation decides several paths.
pub struct HpeAdapter;

fn smart_disk(path: &str, drive: &schema::SmartDiskDrive) -> Result<PhysicalDisk> {
    common::shape_disk(
        path,
        drive.capacity_gb.round() as u64,
        &drive.media_type,
        drive.rotational_speed_rpm,
    )
}

fn logical_drives(fetch: &dyn Fetch, controller: &str) -> Result<SubsystemReport<LogicalDisk>> {
    let mut report = SubsystemReport::default();

    for member in member_paths(fetch, &join(controller, "LogicalDrives"))? {
        let Some(volume) = fetch_member::<schema::SmartLogicalDrive>(fetch, &member)? else {
            continue;
        };

        let data_drives = member_paths(fetch, &join(&member, "DataDrives")).unwrap_or_else(|e| {
            warn!("Can not list data drives of {}: {}", member, e);
            Vec::new()
        });
        let mut disks = Vec::new();
        for path in &data_drives {
            if let Some(drive) = fetch_member::<schema::SmartDiskDrive>(fetch, path)? {
                disks.push(smart_disk(path, &drive)?);
            }
        }

        report.info.push(LogicalDisk {
            raid: RaidLevel::parse(volume.raid.as_deref().unwrap_or_default()),
            capacity_gb: (volume.capacity_mib / LOGICAL_MIB_PER_GB).round() as u64,
            physical_count: data_drives.len(),
            disks: grouping::group(disks),
        });
    }

    report.number = report.info.len();
    Ok(report)
}

fn disk_drives(fetch: &dyn Fetch, controller: &str) -> Result<SubsystemReport<ComponentGroup<PhysicalDisk>>> {
    let mut fail_part = Vec::new();
    let mut disks = Vec::new();

    for member in member_paths(fetch, &join(controller, "DiskDrives"))? {
        let Some(drive) = fetch_member::<schema::SmartDiskDrive>(fetch, &member)? else {
            continue;
        };
        let status = drive.status.normalized();
        if status.is_absent() {
            continue;
        }
        if is_unhealthy_or_disabled(&status) {
            let label = match (&drive.location_format, &drive.location) {
                (Some(format), Some(location)) => health::location_label(format, location),
                _ => member.clone(),
            };
            fail_part.push(FailEntry::location(label));
        }
        disks.push(smart_disk(&member, &drive)?);
    }

    let number = disks.len();
    Ok(SubsystemReport {
        number,
        info: grouping::group(disks),
        fail_part,
    })
}

fn pointer_text(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(value_text)
}

impl VendorAdapter for HpeAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Hpe
    }

    fn discover(&self, fetch: &dyn Fetch) -> Result<Topology> {
        // iLO always exposes a single system, chassis and manager at index 1.
        fetch.get(SYSTEM)?;
        Ok(Topology {
            system: SYSTEM.to_string(),
            chassis: CHASSIS.to_string(),
            manager: MANAGER.to_string(),
            redfish_version: None,
        })
    }

    fn base_info(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<BaseInfo> {
        let system = common::computer_system(fetch, &topology.system)?;
        let memory_status = system.memory_summary.status.rollup();
        Ok(common::base_info(&system, memory_status))
    }

    fn disk(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<DiskReport> {
        let controller = common::single_member(fetch, &join(&topology.system, "SmartStorage/ArrayControllers"))?;

        let logical = logical_drives(fetch, &controller)
            .map_err(|e| warn!("Can not get logical disk info from {}: {}", controller, e))
            .ok();
        let physical = disk_drives(fetch, &controller)
            .map_err(|e| warn!("Can not get physical disk info from {}: {}", controller, e))
            .ok();

        Ok(DiskReport { logical, physical })
    }

    fn network(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SubsystemReport<NetworkCard>> {
        let firmware = self.firmware(fetch, topology)?;
        let collection = if firmware.model == ILO4 {
            "NetworkAdapters"
        } else {
            "BaseNetworkAdapters"
        };
        common::network(fetch, &join(&topology.system, collection), &|adapter| adapter.name.clone())
    }

    /// iLO generation and firmware string from the manager OEM block.
    fn firmware(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<Firmware> {
        let manager: schema::Manager = fetch_as(fetch, &topology.manager)?;
        let generation = manager
            .firmware_version
            .as_deref()
            .ok_or_else(|| CollectError::shape(&topology.manager, "missing FirmwareVersion"))?;
        let oem = manager
            .oem
            .as_ref()
            .ok_or_else(|| CollectError::shape(&topology.manager, "missing Oem"))?;

        let legacy = generation.starts_with(ILO4);
        let current = if legacy {
            "/Hp/Firmware/Current"
        } else {
            "/Hpe/Firmware/Current"
        };
        let version_string = pointer_text(oem, &format!("{}/VersionString", current))
            .ok_or_else(|| CollectError::shape(&topology.manager, "missing firmware VersionString"))?;
        let date = pointer_text(oem, &format!("{}/Date", current))
            .ok_or_else(|| CollectError::shape(&topology.manager, "missing firmware Date"))?;

        let model = if legacy {
            ILO4.to_string()
        } else {
            let generation = version_string
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| CollectError::shape(&topology.manager, "unrecognized VersionString"))?;
            format!("iLO {}", generation)
        };
        let version = format!("{} {}", version_string.replace(&model, "").trim(), date);

        Ok(Firmware { model, version })
    }

    fn snmp(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<SnmpService> {
        let path = join(&topology.manager, "SnmpService");
        let service: schema::HpeSnmpService = fetch_as(fetch, &path)?;
        Ok(SnmpService {
            state: service
                .status
                .state
                .ok_or_else(|| CollectError::shape(&path, "missing Status.State"))?,
            communities: service.read_communities,
        })
    }

    /// Compliant with optimal cooling and static high performance power.
    fn bios_config(&self, fetch: &dyn Fetch, topology: &Topology) -> Result<Option<BiosConfig>> {
        let bios = fetch.get(&join(&topology.system, "Bios"))?;

        let mut settings = IndexMap::new();
        match bios.get("Attributes").filter(|attributes| attributes.is_object()) {
            Some(attributes) => {
                for key in ["ThermalConfig", "PowerRegulator"] {
                    settings.insert(key.to_string(), attributes.get(key).and_then(value_text));
                }
            }
            None => {
                for key in ["ThermalConfig", "PowerProfile", "PowerRegulator"] {
                    settings.insert(key.to_string(), bios.get(key).and_then(value_text));
                }
            }
        }

        let compliant = settings.get("ThermalConfig") == Some(&Some("OptimalCooling".to_string()))
            && settings.get("PowerRegulator") == Some(&Some("StaticHighPerf".to_string()));
        Ok(Some(BiosConfig { compliant, settings }))
    }
}
