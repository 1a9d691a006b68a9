use indexmap::IndexMap;

/// Chassis-level summary from the computer system resource.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseInfo {
    pub model: Option<String>,
    pub serial: Option<String>,
    pub bios_version: Option<String>,
    pub memory_gib: Option<f64>,
    pub memory_status: Option<String>,
    pub processor_count: Option<u32>,
    pub processor_model: Option<String>,
    pub health: Option<String>,
}

impl Default for BaseInfo {
    fn default() -> Self {
        Self {
            model: None,
            serial: None,
            bios_version: None,
            memory_gib: None,
            memory_status: None,
            processor_count: None,
            processor_model: None,
            health: None,
        }
    }
}

/// Management controller identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Firmware {
    pub model: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnmpService {
    pub state: String,
    pub communities: Vec<String>,
}

impl SnmpService {
    pub fn is_enabled(&self) -> bool {
        self.state == super::STATE_ENABLED
    }
}

/// BIOS policy settings and whether they match the expected profile.
#[derive(Debug, Clone, PartialEq)]
pub struct BiosConfig {
    pub compliant: bool,
    pub settings: IndexMap<String, Option<String>>,
}
