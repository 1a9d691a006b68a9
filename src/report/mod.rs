use anyhow::{Context, Result};
use chrono::Local;
use indexmap::IndexMap;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::inventory::DeviceEntry;
use crate::renderer::DisplayFields;

/// Sheet headers in output order.
pub const COLUMNS: [&str; 37] = [
    "Result",
    "IP_OS",
    "Type",
    "Health",
    "Hostname",
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
    "Capacity",
    "BIOS_Date",
    "BIOS_Version",
    "OS_Distribution",
    "Iptables_Status",
    "Number_Iptables_rules",
    "Number_Iptables_rules_in_file",
    "Bond",
    "Bond0",
    "Bond1",
    "IP_Manager",
    "Product_Name",
    "Vendor_Name",
    "Logical_Volume",
    "HBA",
    "Define_in_dcim",
    "Contract_in_dcim",
    "Warranty_in_dcim",
    "License_in_dcim",
    "Verify_status_in_dcim",
    "Monitored_in_dcim",
];

const RESULT: &str = "Result";
const NOK: &str = "NOK";

pub type Row = IndexMap<String, Option<String>>;

fn cell(entry: &DeviceEntry, fields: &DisplayFields, column: &str) -> Option<String> {
    let own = match column {
        "IP_OS" => entry.ip_os.clone(),
        "Type" => entry.server_type.map(|server_type| server_type.to_string()),
        "Hostname" => entry.hostname.clone(),
        "IP_Manager" => Some(entry.bmc_address.clone()),
        _ => fields.get(column).cloned().flatten(),
    };
    own.or_else(|| entry.facts.get(column).cloned())
}

/// One sheet row; `Result` is NOK when any other cell is.
pub fn build_row(entry: &DeviceEntry, fields: &DisplayFields) -> Row {
    let mut row: Row = COLUMNS
        .iter()
        .map(|column| (column.to_string(), cell(entry, fields, column)))
        .collect();

    let failed = row
        .iter()
        .filter(|(column, _)| column.as_str() != RESULT)
        .any(|(_, value)| value.as_deref().is_some_and(|value| value.starts_with(NOK)));
    let verdict = if failed { NOK } else { "OK" };
    row.insert(RESULT.to_string(), Some(verdict.to_string()));
    row
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub rows: Vec<Row>,
}

impl Report {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            rows,
        }
    }

    pub fn failed(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(RESULT).cloned().flatten().as_deref() == Some(NOK))
            .count()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create report directory {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, content).context(format!("Failed to save report to {}", path.display()))?;

        info!(
            "Report with {} rows ({} NOK) saved to {}",
            self.rows.len(),
            self.failed(),
            path.display()
        );
        Ok(())
    }
}
