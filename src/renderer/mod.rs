use indexmap::IndexMap;

use crate::models::DeviceRecord;

pub mod labels;
pub mod widgets;

/// Display fields produced for every device, in report order.
pub const FIELDS: [&str; 12] = [
    "Health",
    "CPU",
    "RAM",
    "Disk",
    "Fan",
    "Power",
    "Network Card",
    "SNMP",
    "BIOS_Config",
    "Serial",
    "Firmware",
    "Model",
];

pub type DisplayFields = IndexMap<String, Option<String>>;

/// Renders one record into its display strings.
///
/// Every name in [`FIELDS`] is present; a subsystem that could not be
/// retrieved maps to `None`.
pub fn format_device_record(record: &DeviceRecord) -> DisplayFields {
    let base = record.base_info.as_ref();

    let health = if record.reachable {
        base.and_then(|base| base.health.clone())
    } else {
        Some(format!("NOK. Could not get information for IP {}", record.address))
    };

    let values = [
        health,
        record.processor.as_ref().and_then(widgets::render_cpu),
        record
            .memory
            .as_ref()
            .zip(base)
            .map(|(memory, base)| widgets::render_memory(memory, base)),
        record.disk.as_ref().and_then(widgets::render_disk),
        record.fan.as_ref().map(widgets::render_fan),
        record.power.as_ref().and_then(widgets::render_power),
        record.network.as_ref().map(widgets::render_network),
        record.snmp.as_ref().map(widgets::render_snmp),
        record.bios_config.as_ref().map(widgets::render_bios_config),
        base.and_then(|base| base.serial.clone()),
        record
            .firmware
            .as_ref()
            .map(|firmware| widgets::render_firmware(firmware, base)),
        base.and_then(|base| base.model.clone()),
    ];

    FIELDS
        .iter()
        .map(|name| name.to_string())
        .zip(values)
        .collect()
}
