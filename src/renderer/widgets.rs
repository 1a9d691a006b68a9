use crate::collectors::health::memory_ok;
use crate::models::cpu::Processor;
use crate::models::disk::DiskReport;
use crate::models::fan::Fan;
use crate::models::memory::MemoryModule;
use crate::models::network::NetworkCard;
use crate::models::power::PowerSupply;
use crate::models::system::{BaseInfo, BiosConfig, Firmware, SnmpService};
use crate::models::{ComponentGroup, FailEntry, SubsystemReport};
use crate::renderer::labels::{self, fail_list, UNKNOWN};

fn nok(fail_part: &[FailEntry]) -> String {
    format!("NOK. {}", fail_list(fail_part))
}

/// Mixed CPU models are NOK even when every CPU is healthy.
pub fn render_cpu(processor: &SubsystemReport<Processor>) -> Option<String> {
    if !processor.is_ok() {
        return Some(nok(&processor.fail_part));
    }
    let first = processor.info.first()?;
    let model = first.model.as_deref().unwrap_or(UNKNOWN);

    if processor.info.iter().any(|cpu| cpu.model != first.model) {
        let models: Vec<&str> = processor
            .info
            .iter()
            .map(|cpu| cpu.model.as_deref().unwrap_or(UNKNOWN))
            .collect();
        return Some(format!("NOK. {}", models.join(", ")));
    }
    Some(format!("OK. {}x{}", processor.number, model))
}

pub fn render_fan(fan: &SubsystemReport<Fan>) -> String {
    if fan.is_ok() {
        format!("OK. {} FAN", fan.number)
    } else {
        nok(&fan.fail_part)
    }
}

/// Mixed DIMM sizes stay OK; only failures and the rollup make memory NOK.
pub fn render_memory(memory: &SubsystemReport<ComponentGroup<MemoryModule>>, base: &BaseInfo) -> String {
    if !memory_ok(memory, base.memory_status.as_deref()) {
        return if memory.fail_part.is_empty() {
            format!(
                "NOK. memory health: {}",
                base.memory_status.as_deref().unwrap_or(UNKNOWN)
            )
        } else {
            nok(&memory.fail_part)
        };
    }

    let total = format!(
        "OK. total: {}GB",
        base.memory_gib.map(labels::number).unwrap_or_else(|| UNKNOWN.to_string())
    );
    if memory.info.is_empty() {
        return total;
    }
    let groups: Vec<String> = memory.info.iter().map(labels::memory_group).collect();
    format!("{}, {}", total, groups.join(", "))
}

/// Both halves are needed; any failed physical disk pre-empts the layout.
pub fn render_disk(disk: &DiskReport) -> Option<String> {
    let logical = disk.logical.as_ref()?;
    let physical = disk.physical.as_ref()?;

    if !physical.is_ok() {
        return Some(nok(&physical.fail_part));
    }

    let physical_text = format!(
        "Physical: {}",
        physical.info.iter().map(labels::disk_group).collect::<Vec<_>>().join(", ")
    );

    if !logical.info.iter().any(|volume| volume.raid.is_truthy()) {
        return Some(format!("OK. {}", physical_text));
    }

    let volumes: Vec<String> = logical
        .info
        .iter()
        .map(|volume| {
            if volume.raid.is_truthy() {
                format!("RAID {} - {}", volume.raid, labels::volume(volume))
            } else {
                labels::volume(volume)
            }
        })
        .collect();
    Some(format!("OK. Logical: {}, {}", volumes.join(", "), physical_text))
}

fn watts(supply: &PowerSupply) -> String {
    supply
        .capacity_watts
        .map(|capacity| format!("{}W", capacity))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn render_power(power: &SubsystemReport<PowerSupply>) -> Option<String> {
    if !power.is_ok() {
        return Some(nok(&power.fail_part));
    }
    let first = power.info.first()?;
    if power.info.iter().all(|supply| supply.capacity_watts == first.capacity_watts) {
        Some(format!("OK. {}x{}", power.number, watts(first)))
    } else {
        let supplies: Vec<String> = power.info.iter().map(watts).collect();
        Some(format!("OK. {}", supplies.join(", ")))
    }
}

pub fn render_network(network: &SubsystemReport<NetworkCard>) -> String {
    if !network.is_ok() {
        return nok(&network.fail_part);
    }
    let models: Vec<&str> = network.info.iter().filter_map(|card| card.model.as_deref()).collect();
    format!("OK. {} card(s): {}", network.number, models.join(", "))
}

pub fn render_snmp(snmp: &SnmpService) -> String {
    let verdict = if snmp.is_enabled() { "OK" } else { "NOK" };
    format!(
        "{}. State: {}. String: {}",
        verdict,
        snmp.state,
        snmp.communities.join(", ")
    )
}

/// Always carries the BIOS version, whatever the controller state.
pub fn render_firmware(firmware: &Firmware, base: Option<&BaseInfo>) -> String {
    let bios = base
        .and_then(|base| base.bios_version.as_deref())
        .unwrap_or(UNKNOWN);
    format!("{}: {}. BIOS: {}", firmware.model, firmware.version, bios)
}

pub fn render_bios_config(bios: &BiosConfig) -> String {
    let verdict = if bios.compliant { "OK" } else { "NOK" };
    let settings: Vec<String> = bios
        .settings
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value.as_deref().unwrap_or(UNKNOWN)))
        .collect();
    format!("{}. {}", verdict, settings.join(", "))
}
