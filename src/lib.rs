pub mod client;
pub mod collectors;
pub mod config;
pub mod inventory;
pub mod models;
pub mod renderer;
pub mod report;

use crate::client::redfish::{RedfishClient, Session};
use crate::collectors::collector::build_device_record;
use crate::collectors::{adapter_for, Vendor};
use crate::config::{AppConfig, RedfishConfig};
use crate::inventory::{DeviceEntry, Inventory};
use crate::models::DeviceRecord;
use crate::renderer::format_device_record;
use crate::report::{build_row, Report, Row};
use anyhow::Context;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting checklist");

    match checklist(&config).await {
        Ok(_) => info!("Checklist completed successfully"),
        Err(e) => {
            error!("Application error: {e:#}");
            // Print chain of error causes
            let mut source = e.source();
            while let Some(e) = source {
                error!("Caused by: {e}");
                source = e.source();
            }
            return Err(e).context("Checklist failed to run");
        }
    }

    Ok(())
}

async fn checklist(config: &AppConfig) -> anyhow::Result<()> {
    let start = Instant::now();
    let inventory = Inventory::from_file(config.inventory_path()).context("Failed to load inventory")?;

    let workers = Arc::new(Semaphore::new(config.redfish.workers.max(1)));
    let mut tasks = Vec::with_capacity(inventory.devices.len());
    for entry in inventory.devices {
        let permit = workers
            .clone()
            .acquire_owned()
            .await
            .context("Worker pool closed")?;
        let redfish = config.redfish.clone();
        let device = entry.clone();
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            checklist_device(&device, &redfish)
        });
        tasks.push((entry, task));
    }

    let mut rows = Vec::with_capacity(tasks.len());
    for (entry, task) in tasks {
        match task.await {
            Ok(row) => rows.push(row),
            Err(e) => {
                error!("Worker for {} failed: {}", entry.bmc_address, e);
                rows.push(unreachable_row(&entry));
            }
        }
    }
    debug!("Collecting {} devices took: {} ms", rows.len(), start.elapsed().as_millis());

    Report::new(rows)
        .save(config.output_path())
        .context("Failed to save report")?;
    Ok(())
}

fn unreachable_row(entry: &DeviceEntry) -> Row {
    build_row(entry, &format_device_record(&DeviceRecord::unreachable(&entry.bmc_address)))
}

/// Collects and renders one device. Never fails: problems end up in the row.
pub fn checklist_device(entry: &DeviceEntry, config: &RedfishConfig) -> Row {
    let record = match entry.vendor() {
        Ok(vendor) => collect_device(vendor, entry, config),
        Err(e) => {
            warn!("Skipping {}: {}", entry.bmc_address, e);
            DeviceRecord::unreachable(&entry.bmc_address)
        }
    };
    build_row(entry, &format_device_record(&record))
}

fn open_session(vendor: Vendor, entry: &DeviceEntry, config: &RedfishConfig) -> anyhow::Result<Session> {
    let client = RedfishClient::new(&entry.bmc_address, config).context("Failed to build HTTP client")?;
    let session_path = adapter_for(vendor)
        .session_path(&client)
        .context("Failed to choose session path")?;
    let session = client
        .login(&session_path, &entry.username, &entry.password)
        .context("Failed to create session")?;
    Ok(session)
}

fn collect_device(vendor: Vendor, entry: &DeviceEntry, config: &RedfishConfig) -> DeviceRecord {
    let session = match open_session(vendor, entry, config) {
        Ok(session) => session,
        Err(e) => {
            warn!("Can not reach {} controller at {}: {:#}", vendor, entry.bmc_address, e);
            return DeviceRecord::unreachable(&entry.bmc_address);
        }
    };

    let record = build_device_record(vendor, &entry.bmc_address, &session);

    if let Err(e) = session.logout() {
        warn!("Can not expire session on {}: {}", entry.bmc_address, e);
    }
    record
}
