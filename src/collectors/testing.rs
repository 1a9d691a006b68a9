//! In-memory `Fetch` double and canned controller trees.

use serde_json::{json, Value};
use std::collections::HashMap;

use crate::client::redfish::{Fetch, FetchError};

/// Serves resources from a map; paths match with or without a trailing slash.
#[derive(Debug, Clone, Default)]
pub struct MapFetch {
    resources: HashMap<String, Value>,
}

fn key(path: &str) -> String {
    path.trim_end_matches('/').to_string()
}

impl MapFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, value: Value) -> Self {
        self.insert(path, value);
        self
    }

    pub fn insert(&mut self, path: &str, value: Value) {
        self.resources.insert(key(path), value);
    }

    pub fn without(mut self, path: &str) -> Self {
        self.resources.remove(&key(path));
        self
    }
}

impl Fetch for MapFetch {
    fn get(&self, path: &str) -> Result<Value, FetchError> {
        self.resources
            .get(&key(path))
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

pub fn members(paths: &[&str]) -> Value {
    let members: Vec<Value> = paths.iter().map(|path| json!({ "@odata.id": path })).collect();
    json!({ "Members@odata.count": members.len(), "Members": members })
}

fn ok() -> Value {
    json!({ "Health": "OK", "State": "Enabled" })
}

pub fn hpe_device() -> MapFetch {
    let mut fetch = MapFetch::new()
        .with(
            "/redfish/v1/Systems/1/",
            json!({
                "Model": "ProLiant DL380 Gen10",
                "SerialNumber": "CZJ9010ABC",
                "BiosVersion": "U30 v2.42 (01/23/2021)",
                "MemorySummary": { "TotalSystemMemoryGiB": 96, "Status": { "HealthRollup": "OK" } },
                "ProcessorSummary": { "Count": 2, "Model": "Intel(R) Xeon(R) Gold 6248 CPU @ 2.50GHz" },
                "Status": { "Health": "OK", "State": "Enabled" }
            }),
        )
        .with(
            "/redfish/v1/Systems/1/Processors/",
            members(&["/redfish/v1/Systems/1/Processors/1/", "/redfish/v1/Systems/1/Processors/2/"]),
        )
        .with(
            "/redfish/v1/Chassis/1/Thermal/",
            json!({ "Fans": [
                { "Name": "Fan 1", "Status": ok() },
                { "Name": "Fan 2", "Status": ok() },
                { "Name": "Fan 3", "Status": ok() },
                { "Name": "Fan 4", "Status": { "State": "Absent" } }
            ]}),
        )
        .with(
            "/redfish/v1/Systems/1/Memory/",
            members(&[
                "/redfish/v1/Systems/1/Memory/proc1dimm1/",
                "/redfish/v1/Systems/1/Memory/proc1dimm2/",
                "/redfish/v1/Systems/1/Memory/proc1dimm3/",
                "/redfish/v1/Systems/1/Memory/proc1dimm4/",
            ]),
        )
        .with(
            "/redfish/v1/Systems/1/Memory/proc1dimm4/",
            json!({ "DeviceLocator": "PROC 1 DIMM 4", "Status": { "State": "Absent" } }),
        )
        .with(
            "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/",
            members(&["/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/"]),
        )
        .with(
            "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/LogicalDrives/",
            members(&["/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/LogicalDrives/1/"]),
        )
        .with(
            "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/LogicalDrives/1/",
            json!({ "Raid": "1", "CapacityMiB": 572325 }),
        )
        .with(
            "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/LogicalDrives/1/DataDrives/",
            members(&[
                "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/0/",
                "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/1/",
            ]),
        )
        .with(
            "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/",
            members(&[
                "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/0/",
                "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/1/",
            ]),
        )
        .with(
            "/redfish/v1/Chassis/1/Power/",
            json!({ "PowerSupplies": [
                { "MemberId": "0", "Name": "HpeServerPowerSupply", "PowerCapacityWatts": 800, "Status": ok() },
                { "MemberId": "1", "Name": "HpeServerPowerSupply", "PowerCapacityWatts": 800, "Status": ok() }
            ]}),
        )
        .with(
            "/redfish/v1/Systems/1/BaseNetworkAdapters/",
            members(&["/redfish/v1/Systems/1/BaseNetworkAdapters/1/"]),
        )
        .with(
            "/redfish/v1/Systems/1/BaseNetworkAdapters/1/",
            json!({ "Name": "HPE Ethernet 1Gb 4-port 331i Adapter", "Status": { "Health": "OK" } }),
        )
        .with(
            "/redfish/v1/Managers/1/",
            json!({
                "Model": "iLO 5",
                "FirmwareVersion": "iLO 5 v2.44",
                "Oem": { "Hpe": { "Firmware": { "Current": {
                    "VersionString": "iLO 5 v2.44", "Date": "Apr 30 2021"
                }}}}
            }),
        )
        .with(
            "/redfish/v1/Managers/1/SnmpService/",
            json!({ "Status": { "State": "Enabled" }, "ReadCommunities": ["public"] }),
        )
        .with(
            "/redfish/v1/Systems/1/Bios/",
            json!({ "Attributes": { "ThermalConfig": "OptimalCooling", "PowerRegulator": "StaticHighPerf" } }),
        );

    for socket in 1..=2 {
        fetch.insert(
            &format!("/redfish/v1/Systems/1/Processors/{}/", socket),
            json!({
                "Socket": format!("Proc {}", socket),
                "Model": "Intel(R) Xeon(R) Gold 6248 CPU @ 2.50GHz",
                "TotalCores": 20,
                "TotalThreads": 40,
                "Status": ok()
            }),
        );
    }
    for slot in 1..=3 {
        fetch.insert(
            &format!("/redfish/v1/Systems/1/Memory/proc1dimm{}/", slot),
            json!({
                "DeviceLocator": format!("PROC 1 DIMM {}", slot),
                "CapacityMiB": 32768,
                "MemoryDeviceType": "DDR4",
                "Status": ok()
            }),
        );
    }
    for bay in 0..=1 {
        fetch.insert(
            &format!("/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/{}/", bay),
            json!({
                "CapacityGB": 600,
                "MediaType": "HDD",
                "RotationalSpeedRpm": 10000,
                "Location": format!("1I:1:{}", bay + 1),
                "LocationFormat": "ControllerPort:Box:Bay",
                "Status": ok()
            }),
        );
    }
    fetch
}

pub fn fujitsu_device() -> MapFetch {
    let mut fetch = MapFetch::new()
        .with("/redfish/v1/Systems/", members(&["/redfish/v1/Systems/0"]))
        .with("/redfish/v1/Chassis/", members(&["/redfish/v1/Chassis/0"]))
        .with("/redfish/v1/Managers/", members(&["/redfish/v1/Managers/iRMC"]))
        .with(
            "/redfish/v1/Systems/0",
            json!({
                "Model": "PRIMERGY RX2540 M5",
                "SerialNumber": "YM5A001234",
                "BiosVersion": "V5.0.0.14 R1.22.0",
                "MemorySummary": { "TotalSystemMemoryGiB": 64, "Status": { "Health": "OK", "HealthRollup": "OK" } },
                "ProcessorSummary": { "Count": 2, "Model": "Intel(R) Xeon(R) Silver 4214 CPU @ 2.20GHz" },
                "Status": { "Health": "OK" }
            }),
        )
        .with(
            "/redfish/v1/Systems/0/Processors/",
            members(&["/redfish/v1/Systems/0/Processors/0", "/redfish/v1/Systems/0/Processors/1"]),
        )
        .with(
            "/redfish/v1/Chassis/0/Thermal/",
            json!({ "Fans": [
                { "Name": "FAN1 SYS", "Status": ok() },
                { "Name": "FAN2 SYS", "Status": ok() }
            ]}),
        )
        .with(
            "/redfish/v1/Systems/0/Memory/",
            members(&["/redfish/v1/Systems/0/Memory/0", "/redfish/v1/Systems/0/Memory/1"]),
        )
        .with(
            "/redfish/v1/Systems/0/Memory/0",
            json!({ "DeviceLocator": "DIMM-1A", "CapacityMiB": 32768, "MemoryDeviceType": "DDR4", "Status": ok() }),
        )
        .with(
            "/redfish/v1/Systems/0/Memory/1",
            json!({ "DeviceLocator": "DIMM-1B", "SizeMB": 32768, "DIMMType": "DDR4", "Status": ok() }),
        )
        .with("/redfish/v1/Systems/0/Storage/", members(&["/redfish/v1/Systems/0/Storage/0"]))
        .with(
            "/redfish/v1/Systems/0/Storage/0",
            json!({
                "Volumes": { "@odata.id": "/redfish/v1/Systems/0/Storage/0/Volumes" },
                "Drives": [
                    { "@odata.id": "/redfish/v1/Systems/0/Storage/0/Drives/0" },
                    { "@odata.id": "/redfish/v1/Systems/0/Storage/0/Drives/1" }
                ]
            }),
        )
        .with(
            "/redfish/v1/Systems/0/Storage/0/Volumes",
            members(&["/redfish/v1/Systems/0/Storage/0/Volumes/0"]),
        )
        .with(
            "/redfish/v1/Systems/0/Storage/0/Volumes/0",
            json!({
                "RAIDType": "RAID1",
                "CapacityBytes": 479_559_942_144u64,
                "Links": { "Drives": [
                    { "@odata.id": "/redfish/v1/Systems/0/Storage/0/Drives/0" },
                    { "@odata.id": "/redfish/v1/Systems/0/Storage/0/Drives/1" }
                ]}
            }),
        )
        .with(
            "/redfish/v1/Chassis/0/Power/",
            json!({ "PowerSupplies": [
                { "MemberId": "0", "Name": "PSU1", "PowerCapacityWatts": 800, "Status": ok() },
                { "MemberId": "1", "Name": "PSU2", "PowerCapacityWatts": 800, "Status": ok() }
            ]}),
        )
        .with(
            "/redfish/v1/Chassis/0/NetworkAdapters/",
            members(&["/redfish/v1/Chassis/0/NetworkAdapters/0"]),
        )
        .with(
            "/redfish/v1/Chassis/0/NetworkAdapters/0",
            json!({ "Name": "NetworkAdapter 0", "Model": "Intel I350", "Status": ok() }),
        )
        .with(
            "/redfish/v1/Managers/iRMC",
            json!({ "Model": "iRMC S5", "FirmwareVersion": "2.50P" }),
        )
        .with(
            "/redfish/v1/Managers/iRMC/ManagerNetwork/",
            json!({ "SNMP": { "ProtocolEnabled": true, "Port": 161 } }),
        )
        .with(
            "/rest/v1/Oem/eLCM/ProfileManagement/Server",
            json!({ "Server": { "SystemConfig": { "BiosConfig": { "CpuConfig": {
                "EnergyPerformanceMode": "OptimizedPerformance",
                "OsEnergyPerformanceOverrideEnabled": "True"
            }}}}}),
        );

    for socket in 0..=1 {
        fetch.insert(
            &format!("/redfish/v1/Systems/0/Processors/{}", socket),
            json!({
                "Socket": format!("CPU{}", socket + 1),
                "Model": "Intel(R) Xeon(R) Silver 4214 CPU @ 2.20GHz",
                "TotalCores": 12,
                "TotalThreads": 24,
                "Status": ok()
            }),
        );
    }
    for slot in 0..=1 {
        fetch.insert(
            &format!("/redfish/v1/Systems/0/Storage/0/Drives/{}", slot),
            json!({
                "Name": format!("Disk {}", slot),
                "CapacityBytes": 480_103_981_056u64,
                "MediaType": "SSD",
                "Location": { "Info": format!("[0]:[{}]", slot), "InfoFormat": "[Enclosure]:[Slot]" },
                "Status": ok()
            }),
        );
    }
    fetch
}

/// A 4-socket iDRAC reporting `version` as its Redfish version.
pub fn dell_device(version: &str) -> MapFetch {
    let system = "/redfish/v1/Systems/System.Embedded.1";
    let storage = "/redfish/v1/Systems/System.Embedded.1/Storage/RAID.Integrated.1-1";

    let mut fetch = MapFetch::new()
        .with("/redfish/v1/", json!({ "RedfishVersion": version }))
        .with("/redfish/v1/Systems/", members(&[system]))
        .with("/redfish/v1/Chassis/", members(&["/redfish/v1/Chassis/System.Embedded.1"]))
        .with("/redfish/v1/Managers/", members(&["/redfish/v1/Managers/iDRAC.Embedded.1"]))
        .with(
            system,
            json!({
                "Model": "PowerEdge R840",
                "SerialNumber": "CNIVC0012345",
                "SKU": "7XK4Q93",
                "BiosVersion": "2.12.2",
                "MemorySummary": { "TotalSystemMemoryGiB": 64, "Status": { "Health": "OK", "HealthRollup": "OK" } },
                "ProcessorSummary": { "Count": 4, "Model": "Gold 6248" },
                "Status": { "Health": "OK", "HealthRollup": "OK" }
            }),
        )
        .with(
            "/redfish/v1/Chassis/System.Embedded.1/Thermal/",
            json!({ "Fans": [
                { "FanName": "System Board Fan1A", "Status": ok() },
                { "FanName": "System Board Fan2A", "Status": ok() },
                { "FanName": "System Board Fan3A", "Status": ok() },
                { "FanName": "System Board Fan4A", "Status": ok() }
            ]}),
        )
        .with(
            &format!("{}/Storage/", system),
            members(&[storage, "/redfish/v1/Systems/System.Embedded.1/Storage/AHCI.Embedded.1-1"]),
        )
        .with(
            storage,
            json!({
                "Volumes": { "@odata.id": format!("{}/Volumes", storage) },
                "Drives": [
                    { "@odata.id": format!("{}/Drives/Disk.Bay.0", storage) },
                    { "@odata.id": format!("{}/Drives/Disk.Bay.1", storage) },
                    { "@odata.id": format!("{}/Drives/Disk.Bay.2", storage) }
                ]
            }),
        )
        .with(
            &format!("{}/Volumes", storage),
            members(&[
                format!("{}/Volumes/Disk.Virtual.0", storage).as_str(),
                format!("{}/Volumes/Disk.Bay.2", storage).as_str(),
            ]),
        )
        .with(
            &format!("{}/Volumes/Disk.Virtual.0", storage),
            json!({
                "VolumeType": "Mirrored",
                "CapacityBytes": 599_550_590_976u64,
                "Links": { "Drives": [
                    { "@odata.id": format!("{}/Drives/Disk.Bay.0", storage) },
                    { "@odata.id": format!("{}/Drives/Disk.Bay.1", storage) }
                ]}
            }),
        )
        .with(
            &format!("{}/Volumes/Disk.Bay.2", storage),
            json!({ "VolumeType": "RawDevice", "CapacityBytes": 599_550_590_976u64 }),
        )
        .with(
            "/redfish/v1/Chassis/System.Embedded.1/Power/",
            json!({ "PowerSupplies": [
                { "MemberId": "PSU.Slot.1", "Name": "PS1 Status", "PowerCapacityWatts": 800, "Status": ok() },
                { "MemberId": "PSU.Slot.2", "Name": "PS2 Status", "PowerCapacityWatts": 800, "Status": ok() },
                { "MemberId": "PSU.Slot.3", "Name": "PS3 Status", "PowerCapacityWatts": 800, "Status": ok() }
            ]}),
        )
        .with(
            &format!("{}/NetworkAdapters/", system),
            members(&[format!("{}/NetworkAdapters/NIC.Integrated.1", system).as_str()]),
        )
        .with(
            &format!("{}/NetworkAdapters/NIC.Integrated.1", system),
            json!({ "Name": "Network Adapter View", "Model": "Broadcom 57416", "Status": ok() }),
        )
        .with(
            "/redfish/v1/Managers/iDRAC.Embedded.1",
            json!({ "Model": "14G Monolithic", "FirmwareVersion": "4.40.00.00" }),
        )
        .with(
            "/redfish/v1/Managers/iDRAC.Embedded.1/NetworkProtocol/",
            json!({ "SNMP": { "ProtocolEnabled": false } }),
        );

    let processors: Vec<String> = (1..=4).map(|n| format!("{}/Processors/CPU.Socket.{}", system, n)).collect();
    let paths: Vec<&str> = processors.iter().map(String::as_str).collect();
    fetch.insert(&format!("{}/Processors/", system), members(&paths));
    for (n, path) in processors.iter().enumerate() {
        fetch.insert(
            path,
            json!({
                "Socket": format!("CPU.Socket.{}", n + 1),
                "Model": "Gold 6248",
                "TotalCores": 20,
                "TotalThreads": 40,
                "Status": ok()
            }),
        );
    }

    let dimms: Vec<String> = ["A1", "A2", "B1", "B2"]
        .iter()
        .map(|slot| format!("{}/Memory/iDRAC.Embedded.1#DIMM.Socket.{}", system, slot))
        .collect();
    let paths: Vec<&str> = dimms.iter().map(String::as_str).collect();
    fetch.insert(&format!("{}/Memory/", system), members(&paths));
    for path in &dimms {
        fetch.insert(
            path,
            json!({ "CapacityMiB": 16384, "MemoryDeviceType": "DDR4", "DeviceLocator": path, "Status": ok() }),
        );
    }

    for bay in 0..=2 {
        fetch.insert(
            &format!("{}/Drives/Disk.Bay.{}", storage, bay),
            json!({
                "Name": format!("Physical Disk 0:1:{}", bay),
                "CapacityBytes": 599_550_590_976u64,
                "MediaType": "HDD",
                "RotationSpeedRPM": 10000,
                "Status": ok()
            }),
        );
    }
    fetch
}
