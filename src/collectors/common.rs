use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::time::Instant;

use super::grouping;
use super::health::{self, is_unhealthy, is_unhealthy_or_disabled};
use super::schema::{self, status_of};
use super::{CollectError, Result};
use crate::client::redfish::Fetch;
use crate::models::cpu::Processor;
use crate::models::disk::{DiskReport, LogicalDisk, PhysicalDisk, RaidLevel, MEDIA_HDD};
use crate::models::fan::Fan;
use crate::models::memory::MemoryModule;
use crate::models::network::NetworkCard;
use crate::models::power::PowerSupply;
use crate::models::system::{BaseInfo, Firmware, SnmpService};
use crate::models::{ComponentGroup, FailEntry, SubsystemReport, STATE_ENABLED};

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Appends a child segment to a resource path, keeping the trailing slash.
pub(crate) fn join(base: &str, segment: &str) -> String {
    format!("{}/{}/", base.trim_end_matches('/'), segment.trim_matches('/'))
}

pub(crate) fn fetch_as<T: DeserializeOwned>(fetch: &dyn Fetch, path: &str) -> Result<T> {
    let value = fetch.get(path)?;
    serde_json::from_value(value).map_err(|e| CollectError::shape(path, e))
}

/// Like [`fetch_as`], but an unreachable member is skipped instead of
/// failing the whole collection. A malformed member still fails it.
pub(crate) fn fetch_member<T: DeserializeOwned>(fetch: &dyn Fetch, path: &str) -> Result<Option<T>> {
    match fetch.get(path) {
        Ok(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| CollectError::shape(path, e)),
        Err(e) => {
            warn!("Skipping member {}: {}", path, e);
            Ok(None)
        }
    }
}

pub(crate) fn member_paths(fetch: &dyn Fetch, path: &str) -> Result<Vec<String>> {
    let collection: schema::Collection = fetch_as(fetch, path)?;
    Ok(collection.members.into_iter().map(|m| m.odata_id).collect())
}

/// The only member of a collection; none or several is an error.
pub(crate) fn single_member(fetch: &dyn Fetch, path: &str) -> Result<String> {
    let mut members = member_paths(fetch, path)?;
    if members.len() != 1 {
        return Err(CollectError::Topology(format!(
            "{} lists {} members, expected exactly 1",
            path,
            members.len()
        )));
    }
    Ok(members.remove(0))
}

pub(crate) fn first_member(fetch: &dyn Fetch, path: &str) -> Result<String> {
    member_paths(fetch, path)?
        .into_iter()
        .next()
        .ok_or_else(|| CollectError::Topology(format!("{} lists no members", path)))
}

/// Storage controller behind the system's `Storage` collection.
///
/// Exactly one member may pass `accept`; ambiguity is not resolved.
pub(crate) fn storage_controller(
    fetch: &dyn Fetch,
    system: &str,
    accept: &dyn Fn(&str) -> bool,
) -> Result<String> {
    let path = join(system, "Storage");
    let mut controllers: Vec<String> = member_paths(fetch, &path)?
        .into_iter()
        .filter(|member| accept(member))
        .collect();
    if controllers.len() != 1 {
        return Err(CollectError::Topology(format!(
            "{} controllers found under {}, expected exactly 1",
            controllers.len(),
            path
        )));
    }
    Ok(controllers.remove(0))
}

pub(crate) fn parse_redfish_version(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub(crate) fn computer_system(fetch: &dyn Fetch, path: &str) -> Result<schema::ComputerSystem> {
    fetch_as(fetch, path)
}

pub(crate) fn base_info(system: &schema::ComputerSystem, memory_status: Option<String>) -> BaseInfo {
    BaseInfo {
        model: system.model.clone(),
        serial: system.serial_number.clone(),
        bios_version: system.bios_version.clone(),
        memory_gib: Some(system.memory_summary.total_system_memory_gib),
        memory_status,
        processor_count: system.processor_summary.count,
        processor_model: system.processor_summary.model.clone(),
        health: system.status.health.clone(),
    }
}

pub(crate) fn processors(fetch: &dyn Fetch, path: &str) -> Result<SubsystemReport<Processor>> {
    let start = Instant::now();
    let members = member_paths(fetch, path)?;
    let mut report = SubsystemReport::default();

    for member in &members {
        let Some(cpu) = fetch_member::<schema::Processor>(fetch, member)? else {
            continue;
        };
        let status = status_of(&cpu.status);
        if status.is_absent() {
            continue;
        }
        health::classify(
            &mut report.fail_part,
            cpu.socket.as_deref().unwrap_or(member),
            &status,
            is_unhealthy,
        );
        report.info.push(Processor {
            model: cpu.model,
            cores: cpu.total_cores,
            threads: cpu.total_threads,
        });
    }
    report.number = report.info.len();

    debug!("processors took: {} ms", start.elapsed().as_millis());
    Ok(report)
}

pub(crate) fn fans(fetch: &dyn Fetch, path: &str) -> Result<SubsystemReport<Fan>> {
    let thermal: schema::Thermal = fetch_as(fetch, path)?;
    let mut report = SubsystemReport::default();

    for fan in thermal.fans {
        let status = fan.status.normalized();
        if status.is_absent() {
            continue;
        }
        let name = fan.name.or(fan.fan_name);
        health::classify(
            &mut report.fail_part,
            name.as_deref().unwrap_or("Fan"),
            &status,
            is_unhealthy,
        );
        report.info.push(Fan { name });
    }

    report.number = report.info.len();
    Ok(report)
}

/// Groups populated DIMMs by capacity. `correct` turns the reported
/// capacity into MiB-true units.
pub(crate) fn memory(
    fetch: &dyn Fetch,
    path: &str,
    correct: &dyn Fn(f64) -> u64,
) -> Result<SubsystemReport<ComponentGroup<MemoryModule>>> {
    let start = Instant::now();
    let members = member_paths(fetch, path)?;
    let mut fail_part = Vec::new();
    let mut modules = Vec::new();

    for member in &members {
        let Some(dimm) = fetch_member::<schema::MemoryModule>(fetch, member)? else {
            continue;
        };
        if dimm.dimm_status.as_deref() == Some("NotPresent") {
            continue;
        }
        if let Some(raw_status) = &dimm.status {
            let status = raw_status.normalized();
            if status.is_absent() {
                continue;
            }
            health::classify(
                &mut fail_part,
                dimm.device_locator.as_deref().unwrap_or(member),
                &status,
                is_unhealthy,
            );
        }

        let capacity = dimm
            .capacity_mib
            .filter(|capacity| *capacity > 0.0)
            .or(dimm.size_mb)
            .ok_or_else(|| CollectError::shape(member, "neither CapacityMiB nor SizeMB"))?;
        modules.push(MemoryModule {
            capacity_mib: correct(capacity),
            kind: dimm.memory_device_type.or(dimm.dimm_type),
        });
    }

    let number = modules.len();
    let info = grouping::group(modules);
    debug!("memory took: {} ms", start.elapsed().as_millis());
    Ok(SubsystemReport {
        number,
        info,
        fail_part,
    })
}

/// Rotational media keep their speed; everything else reports none.
pub(crate) fn shape_disk(
    path: &str,
    capacity_gb: u64,
    media_type: &str,
    rpm: Option<f64>,
) -> Result<PhysicalDisk> {
    let speed = if media_type == MEDIA_HDD {
        let rpm = rpm.ok_or_else(|| CollectError::shape(path, "rotational disk without speed"))?;
        Some(rpm.round() as u32)
    } else {
        None
    };
    Ok(PhysicalDisk {
        capacity_gb,
        media_type: media_type.to_string(),
        speed,
    })
}

pub(crate) fn bytes_to_gb(bytes: f64) -> u64 {
    (bytes / BYTES_PER_GB).round() as u64
}

fn standard_disk(path: &str, drive: &schema::Drive) -> Result<PhysicalDisk> {
    shape_disk(
        path,
        bytes_to_gb(drive.capacity_bytes),
        &drive.media_type,
        drive.rotation_speed_rpm,
    )
}

/// Physical drives of a standard `Storage` resource.
pub(crate) fn drives(
    fetch: &dyn Fetch,
    paths: &[String],
    label: &dyn Fn(&schema::Drive) -> String,
) -> Result<SubsystemReport<ComponentGroup<PhysicalDisk>>> {
    let mut fail_part = Vec::new();
    let mut disks = Vec::new();

    for path in paths {
        let Some(drive) = fetch_member::<schema::Drive>(fetch, path)? else {
            continue;
        };
        let status = drive.status.normalized();
        if status.is_absent() {
            continue;
        }
        if is_unhealthy_or_disabled(&status) {
            fail_part.push(FailEntry::location(label(&drive)));
        }
        disks.push(standard_disk(path, &drive)?);
    }

    let number = disks.len();
    Ok(SubsystemReport {
        number,
        info: grouping::group(disks),
        fail_part,
    })
}

/// Volumes of a standard `Storage` resource. `raid` returns `None` for
/// volumes that are not RAID sets at all; those are left out.
pub(crate) fn volumes(
    fetch: &dyn Fetch,
    path: &str,
    raid: &dyn Fn(&schema::Volume) -> Option<RaidLevel>,
) -> Result<SubsystemReport<LogicalDisk>> {
    let mut report = SubsystemReport::default();

    for member in member_paths(fetch, path)? {
        let Some(volume) = fetch_member::<schema::Volume>(fetch, &member)? else {
            continue;
        };
        let Some(raid) = raid(&volume) else {
            debug!("Skipping non-RAID volume {}", member);
            continue;
        };

        let links = volume.links.clone().unwrap_or_default();
        let mut disks = Vec::new();
        for drive in &links.drives {
            if let Some(data) = fetch_member::<schema::Drive>(fetch, &drive.odata_id)? {
                disks.push(standard_disk(&drive.odata_id, &data)?);
            }
        }

        report.info.push(LogicalDisk {
            raid,
            capacity_gb: bytes_to_gb(volume.capacity_bytes),
            physical_count: links.drives.len(),
            disks: grouping::group(disks),
        });
    }

    report.number = report.info.len();
    Ok(report)
}

/// Disk subsystem of a standard `Storage` controller resource.
///
/// A failing half is reported as `None` without discarding the other.
pub(crate) fn storage_disks(
    fetch: &dyn Fetch,
    controller: &str,
    raid: &dyn Fn(&schema::Volume) -> Option<RaidLevel>,
    label: &dyn Fn(&schema::Drive) -> String,
) -> Result<DiskReport> {
    let storage: schema::Storage = fetch_as(fetch, controller)?;

    let logical = storage.volumes.as_ref().and_then(|link| {
        volumes(fetch, &link.odata_id, raid)
            .map_err(|e| warn!("Can not get logical disk info from {}: {}", link.odata_id, e))
            .ok()
    });

    let physical = if storage.drives.is_empty() {
        None
    } else {
        let paths: Vec<String> = storage.drives.iter().map(|d| d.odata_id.clone()).collect();
        drives(fetch, &paths, label)
            .map_err(|e| warn!("Can not get physical disk info from {}: {}", controller, e))
            .ok()
    };

    Ok(DiskReport { logical, physical })
}

/// `fallback` supplies a capacity when `PowerCapacityWatts` is missing.
pub(crate) fn power(
    fetch: &dyn Fetch,
    path: &str,
    fallback: &dyn Fn(&schema::PowerSupply) -> Option<u32>,
) -> Result<SubsystemReport<PowerSupply>> {
    let power: schema::Power = fetch_as(fetch, path)?;
    if power.power_supplies.is_empty() {
        return Err(CollectError::shape(path, "no PowerSupplies"));
    }

    let mut report = SubsystemReport {
        number: power.power_supplies.len(),
        ..Default::default()
    };
    for supply in &power.power_supplies {
        let label = supply
            .member_id
            .as_deref()
            .or(supply.name.as_deref())
            .unwrap_or("PSU");
        health::classify(
            &mut report.fail_part,
            label,
            &supply.status.normalized(),
            is_unhealthy_or_disabled,
        );
        let capacity_watts = supply
            .power_capacity_watts
            .map(|watts| watts.round() as u32)
            .or_else(|| fallback(supply));
        report.info.push(PowerSupply { capacity_watts });
    }
    Ok(report)
}

/// `model` picks which adapter field names the card.
pub(crate) fn network(
    fetch: &dyn Fetch,
    path: &str,
    model: &dyn Fn(&schema::NetworkAdapter) -> Option<String>,
) -> Result<SubsystemReport<NetworkCard>> {
    let members = member_paths(fetch, path)?;
    let mut report = SubsystemReport {
        number: members.len(),
        ..Default::default()
    };

    for member in &members {
        let Some(adapter) = fetch_member::<schema::NetworkAdapter>(fetch, member)? else {
            continue;
        };
        let card = NetworkCard {
            model: model(&adapter),
            name: adapter.name.clone(),
        };
        if adapter.status.is_some() {
            let label = card.model.as_deref().or(card.name.as_deref()).unwrap_or(member);
            health::classify(&mut report.fail_part, label, &status_of(&adapter.status), is_unhealthy);
        }
        report.info.push(card);
    }
    Ok(report)
}

pub(crate) fn manager_firmware(fetch: &dyn Fetch, path: &str) -> Result<Firmware> {
    let manager: schema::Manager = fetch_as(fetch, path)?;
    Ok(Firmware {
        model: manager
            .model
            .ok_or_else(|| CollectError::shape(path, "missing Model"))?,
        version: manager
            .firmware_version
            .ok_or_else(|| CollectError::shape(path, "missing FirmwareVersion"))?,
    })
}

/// SNMP state from a manager network protocol resource.
pub(crate) fn protocol_snmp(fetch: &dyn Fetch, path: &str) -> Result<SnmpService> {
    let protocol: schema::ManagerNetworkProtocol = fetch_as(fetch, path)?;
    let snmp = protocol
        .snmp
        .ok_or_else(|| CollectError::shape(path, "missing SNMP"))?;
    let state = if snmp.protocol_enabled.unwrap_or(false) {
        STATE_ENABLED
    } else {
        "Disabled"
    };
    Ok(SnmpService {
        state: state.to_string(),
        communities: Vec::new(),
    })
}
