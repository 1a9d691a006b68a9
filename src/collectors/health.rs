use crate::models::memory::MemoryModule;
use crate::models::{ComponentGroup, FailEntry, HealthState, Status, SubsystemReport, HEALTH_OK};

/// Health is present and not OK.
pub fn is_unhealthy(status: &Status) -> bool {
    matches!(status.health_state(), HealthState::Degraded(_))
}

/// Drives and power supplies must also be running.
pub fn is_unhealthy_or_disabled(status: &Status) -> bool {
    is_unhealthy(status) || !status.is_enabled()
}

/// Records `label` in `fail_part` when `bad` holds for `status`.
pub fn classify(fail_part: &mut Vec<FailEntry>, label: &str, status: &Status, bad: fn(&Status) -> bool) {
    if bad(status) {
        fail_part.push(FailEntry::new(label, status));
    }
}

/// Zips a `:`-delimited format against a `:`-delimited value list.
///
/// `"ControllerPort:Box:Bay"` with `"1I:1:3"` gives
/// `"ControllerPort 1I Box 1 Bay 3"`. Lists of different length are cut to
/// the shorter one.
pub fn location_label(format: &str, values: &str) -> String {
    format
        .split(':')
        .zip(values.split(':'))
        .map(|(name, value)| format!("{} {}", name.trim(), value.trim()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Memory is OK only when the system rollup says so and no module failed.
pub fn memory_ok(
    report: &SubsystemReport<ComponentGroup<MemoryModule>>,
    rollup: Option<&str>,
) -> bool {
    report.is_ok() && rollup == Some(HEALTH_OK)
}
