use crate::models::disk::{LogicalDisk, PhysicalDisk};
use crate::models::memory::MemoryModule;
use crate::models::{ComponentGroup, FailEntry};

pub const UNKNOWN: &str = "unknown";

/// Short suffix for common spindle speeds; other speeds render verbatim.
pub fn speed_label(rpm: u32) -> String {
    match rpm {
        10000 => " 10K".to_string(),
        15000 => " 15K".to_string(),
        7200 => " 7K2".to_string(),
        5400 => " 5K4".to_string(),
        other => other.to_string(),
    }
}

/// Whole numbers lose their fractional part.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

pub fn fail_entry(entry: &FailEntry) -> String {
    match (&entry.health, &entry.state) {
        (None, None) => entry.label.clone(),
        (health, state) => format!(
            "{} ({}, {})",
            entry.label,
            health.as_deref().unwrap_or(UNKNOWN),
            state.as_deref().unwrap_or(UNKNOWN)
        ),
    }
}

pub fn fail_list(fail_part: &[FailEntry]) -> String {
    fail_part.iter().map(fail_entry).collect::<Vec<_>>().join(", ")
}

fn disk_shape(disk: &PhysicalDisk) -> String {
    let mut text = format!("{}GB {}", disk.capacity_gb, disk.media_type);
    if let Some(rpm) = disk.speed {
        text.push_str(&speed_label(rpm));
    }
    text
}

pub fn disk_group(group: &ComponentGroup<PhysicalDisk>) -> String {
    format!("{}x{}", group.count, disk_shape(&group.attributes))
}

/// Member disks of a volume; a uniform volume is counted by its member list.
pub fn volume(volume: &LogicalDisk) -> String {
    match volume.disks.as_slice() {
        [] => format!("{}GB", volume.capacity_gb),
        [only] => format!("{}x{}", volume.physical_count, disk_shape(&only.attributes)),
        groups => groups.iter().map(disk_group).collect::<Vec<_>>().join(" + "),
    }
}

pub fn memory_group(group: &ComponentGroup<MemoryModule>) -> String {
    format!(
        "{}x{}GB {}",
        group.count,
        group.attributes.capacity_gib(),
        group.attributes.kind.as_deref().unwrap_or(UNKNOWN)
    )
}
