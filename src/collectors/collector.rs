use log::{debug, info, warn};
use std::time::Instant;

use super::{adapter_for, Result, Vendor, VendorAdapter};
use crate::client::redfish::Fetch;
use crate::models::DeviceRecord;

/// Runs one subsystem call; a failure is logged and becomes `None`.
fn guarded<T>(address: &str, subsystem: &str, call: impl FnOnce() -> Result<T>) -> Option<T> {
    let start = Instant::now();
    let result = call();
    debug!("{} {} took: {} ms", address, subsystem, start.elapsed().as_millis());

    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Can not get {} info for {}: {}", subsystem, address, e);
            None
        }
    }
}

/// Builds the record for one device through the adapter for `vendor`.
pub fn build_device_record(vendor: Vendor, address: &str, fetch: &dyn Fetch) -> DeviceRecord {
    collect_with(adapter_for(vendor).as_ref(), address, fetch)
}

pub fn collect_with(adapter: &dyn VendorAdapter, address: &str, fetch: &dyn Fetch) -> DeviceRecord {
    let start = Instant::now();
    let topology = match adapter.discover(fetch) {
        Ok(topology) => topology,
        Err(e) => {
            warn!("Can not discover {} resources on {}: {}", adapter.vendor(), address, e);
            return DeviceRecord::unreachable(address);
        }
    };
    debug!("{} topology: {:?}", address, topology);

    let record = DeviceRecord {
        address: address.to_string(),
        reachable: true,
        base_info: guarded(address, "base", || adapter.base_info(fetch, &topology)),
        processor: guarded(address, "processor", || adapter.processor(fetch, &topology)),
        fan: guarded(address, "fan", || adapter.fan(fetch, &topology)),
        memory: guarded(address, "memory", || adapter.memory(fetch, &topology)),
        disk: guarded(address, "disk", || adapter.disk(fetch, &topology)),
        power: guarded(address, "power", || adapter.power(fetch, &topology)),
        network: guarded(address, "network", || adapter.network(fetch, &topology)),
        snmp: guarded(address, "SNMP", || adapter.snmp(fetch, &topology)),
        firmware: guarded(address, "firmware", || adapter.firmware(fetch, &topology)),
        bios_config: guarded(address, "BIOS config", || adapter.bios_config(fetch, &topology)).flatten(),
    };

    info!(
        "Collected {} device {} in {} ms",
        adapter.vendor(),
        address,
        start.elapsed().as_millis()
    );
    record
}
