//! Tolerant serde views of the Redfish resources the adapters read.
//!
//! Fields a vendor may omit are `Option`; fields whose absence makes the
//! resource useless are required so that deserialization reports the gap.

use serde::Deserialize;
use serde_json::Value;

use crate::models::Status;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RawStatus {
    pub health: Option<String>,
    pub state: Option<String>,
    pub health_rollup: Option<String>,
    #[serde(rename = "HealthRollUp")]
    pub health_roll_up: Option<String>,
}

impl RawStatus {
    pub fn normalized(&self) -> Status {
        Status::new(self.health.as_deref(), self.state.as_deref())
    }

    /// `HealthRollUp`, falling back to `HealthRollup`.
    pub fn rollup(&self) -> Option<String> {
        self.health_roll_up.clone().or_else(|| self.health_rollup.clone())
    }

    /// `Health`, falling back to `HealthRollup`.
    pub fn health_or_rollup(&self) -> Option<String> {
        self.health.clone().or_else(|| self.health_rollup.clone())
    }
}

pub fn status_of(status: &Option<RawStatus>) -> Status {
    status.as_ref().map(RawStatus::normalized).unwrap_or_default()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ODataId {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    pub members: Vec<ODataId>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRoot {
    pub redfish_version: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct MemorySummary {
    #[serde(rename = "TotalSystemMemoryGiB")]
    pub total_system_memory_gib: f64,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessorSummary {
    pub count: Option<u32>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ComputerSystem {
    pub bios_version: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    pub memory_summary: MemorySummary,
    pub processor_summary: ProcessorSummary,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Processor {
    pub socket: Option<String>,
    pub model: Option<String>,
    pub total_cores: Option<u32>,
    pub total_threads: Option<u32>,
    pub status: Option<RawStatus>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Thermal {
    pub fans: Vec<ThermalFan>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalFan {
    pub name: Option<String>,
    pub fan_name: Option<String>,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct MemoryModule {
    #[serde(rename = "CapacityMiB")]
    pub capacity_mib: Option<f64>,
    #[serde(rename = "SizeMB")]
    pub size_mb: Option<f64>,
    pub memory_device_type: Option<String>,
    #[serde(rename = "DIMMType")]
    pub dimm_type: Option<String>,
    #[serde(rename = "DIMMStatus")]
    pub dimm_status: Option<String>,
    pub device_locator: Option<String>,
    pub status: Option<RawStatus>,
}

/// HPE SmartStorage array controller disk.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct SmartDiskDrive {
    #[serde(rename = "CapacityGB")]
    pub capacity_gb: f64,
    pub media_type: String,
    pub rotational_speed_rpm: Option<f64>,
    pub location: Option<String>,
    pub location_format: Option<String>,
    #[serde(default)]
    pub status: RawStatus,
}

/// HPE SmartStorage logical drive.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct SmartLogicalDrive {
    pub raid: Option<String>,
    #[serde(rename = "CapacityMiB")]
    pub capacity_mib: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Drive {
    pub name: Option<String>,
    pub capacity_bytes: f64,
    pub media_type: String,
    #[serde(rename = "RotationSpeedRPM")]
    pub rotation_speed_rpm: Option<f64>,
    pub location: Option<Value>,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeLinks {
    #[serde(default)]
    pub drives: Vec<ODataId>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Volume {
    #[serde(rename = "RAIDType")]
    pub raid_type: Option<String>,
    pub volume_type: Option<String>,
    pub capacity_bytes: f64,
    pub links: Option<VolumeLinks>,
}

/// Storage resource linking volumes and drives of one controller.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Storage {
    pub volumes: Option<ODataId>,
    #[serde(default)]
    pub drives: Vec<ODataId>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Power {
    #[serde(default)]
    pub power_supplies: Vec<PowerSupply>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSupply {
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub power_capacity_watts: Option<f64>,
    pub model: Option<String>,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkAdapter {
    pub name: Option<String>,
    pub model: Option<String>,
    pub status: Option<RawStatus>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Manager {
    pub model: Option<String>,
    pub firmware_version: Option<String>,
    pub oem: Option<Value>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct HpeSnmpService {
    pub status: RawStatus,
    #[serde(default)]
    pub read_communities: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ProtocolState {
    pub protocol_enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManagerNetworkProtocol {
    #[serde(rename = "SNMP")]
    pub snmp: Option<ProtocolState>,
}

/// Renders a scalar JSON value the way the vendors' settings pages show it.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
