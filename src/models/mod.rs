pub mod cpu;
pub mod disk;
pub mod fan;
pub mod memory;
pub mod network;
pub mod power;
pub mod system;

/// Health value every vendor uses for a healthy component.
pub const HEALTH_OK: &str = "OK";
/// Operational state of a running supply or drive.
pub const STATE_ENABLED: &str = "Enabled";
/// State reported for an empty slot or bay.
pub const STATE_ABSENT: &str = "Absent";

/// Tri-state health of one physical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    Ok,
    Degraded(String),
    Absent,
}

/// Normalized `Status` block of a Redfish resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub health: Option<String>,
    pub state: Option<String>,
}

impl Status {
    pub fn new(health: Option<&str>, state: Option<&str>) -> Self {
        Self {
            health: health.map(str::to_string),
            state: state.map(str::to_string),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.state.as_deref() == Some(STATE_ABSENT)
    }

    pub fn is_enabled(&self) -> bool {
        self.state.as_deref() == Some(STATE_ENABLED)
    }

    pub fn health_state(&self) -> HealthState {
        if self.is_absent() {
            return HealthState::Absent;
        }
        match self.health.as_deref() {
            Some(health) if health != HEALTH_OK => HealthState::Degraded(health.to_string()),
            _ => HealthState::Ok,
        }
    }
}

/// One unhealthy component, listed individually whatever group it falls in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailEntry {
    pub label: String,
    pub health: Option<String>,
    pub state: Option<String>,
}

impl FailEntry {
    pub fn new(label: impl Into<String>, status: &Status) -> Self {
        Self {
            label: label.into(),
            health: status.health.clone(),
            state: status.state.clone(),
        }
    }

    /// Entry carrying only a location, as drives report it.
    pub fn location(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            health: None,
            state: None,
        }
    }
}

/// Identical physical units collapsed into one counted entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGroup<T> {
    /// First-seen order of the group within its subsystem.
    pub index: usize,
    pub attributes: T,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemReport<T> {
    pub number: usize,
    pub info: Vec<T>,
    pub fail_part: Vec<FailEntry>,
}

impl<T> Default for SubsystemReport<T> {
    fn default() -> Self {
        Self {
            number: 0,
            info: Vec::new(),
            fail_part: Vec::new(),
        }
    }
}

impl<T> SubsystemReport<T> {
    pub fn is_ok(&self) -> bool {
        self.fail_part.is_empty()
    }
}

/// Canonical aggregate for one managed server.
///
/// Any subsystem may be `None` when its retrieval failed; `bios_config` is
/// also `None` on vendors that expose no policy settings.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub address: String,
    pub reachable: bool,
    pub base_info: Option<system::BaseInfo>,
    pub processor: Option<SubsystemReport<cpu::Processor>>,
    pub fan: Option<SubsystemReport<fan::Fan>>,
    pub memory: Option<SubsystemReport<ComponentGroup<memory::MemoryModule>>>,
    pub disk: Option<disk::DiskReport>,
    pub power: Option<SubsystemReport<power::PowerSupply>>,
    pub network: Option<SubsystemReport<network::NetworkCard>>,
    pub snmp: Option<system::SnmpService>,
    pub firmware: Option<system::Firmware>,
    pub bios_config: Option<system::BiosConfig>,
}

impl DeviceRecord {
    /// Record for a device whose session could not be established.
    pub fn unreachable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reachable: false,
            base_info: None,
            processor: None,
            fan: None,
            memory: None,
            disk: None,
            power: None,
            network: None,
            snmp: None,
            firmware: None,
            bios_config: None,
        }
    }
}
