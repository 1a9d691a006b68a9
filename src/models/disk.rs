use std::fmt;

use super::{ComponentGroup, SubsystemReport};

pub const MEDIA_HDD: &str = "HDD";

/// A physical drive normalized to gigabytes.
///
/// `speed` is `Some(rpm)` for rotational media and `None` for everything
/// else; grouping and rendering rely on that distinction.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalDisk {
    pub capacity_gb: u64,
    pub media_type: String,
    pub speed: Option<u32>,
}

/// RAID descriptor as the vendor reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaidLevel {
    Numeric(u32),
    Label(String),
}

impl RaidLevel {
    /// Parses "1", "RAID5" or "1+0" style labels.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim().trim_start_matches("RAID").trim();
        match trimmed.parse::<u32>() {
            Ok(level) => RaidLevel::Numeric(level),
            Err(_) => RaidLevel::Label(trimmed.to_string()),
        }
    }

    /// Zero and empty descriptors count as "no RAID" when rendering.
    pub fn is_truthy(&self) -> bool {
        match self {
            RaidLevel::Numeric(level) => *level != 0,
            RaidLevel::Label(label) => !label.is_empty(),
        }
    }
}

impl fmt::Display for RaidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaidLevel::Numeric(level) => write!(f, "{}", level),
            RaidLevel::Label(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalDisk {
    pub raid: RaidLevel,
    pub capacity_gb: u64,
    pub physical_count: usize,
    pub disks: Vec<ComponentGroup<PhysicalDisk>>,
}

/// Logical and physical halves of the disk subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskReport {
    pub logical: Option<SubsystemReport<LogicalDisk>>,
    pub physical: Option<SubsystemReport<ComponentGroup<PhysicalDisk>>>,
}
