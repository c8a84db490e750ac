//! Sensor group handling
//!
//! Rules:
//! - `[sensor<N>]` groups become sensor index `N`
//! - the sensor index is unique
//! - disabled groups are skipped
//! - unknown groups and keys are logged and ignored

use contracts::{ContractError, SensorRecord, SensorTable};
use tracing::{debug, warn};

use crate::keyfile::{Group, KeyFile};

pub const SENSOR_GROUP: &str = "sensor";

pub const KEY_ENABLE: &str = "enable";
pub const KEY_ID: &str = "id";
pub const KEY_TYPE: &str = "type";
pub const KEY_DESCRIPTION: &str = "description";

/// Build the sensor table from parsed key-file groups
///
/// Returns the first error encountered; no partial table is produced.
pub fn build_sensor_table(key_file: &KeyFile) -> Result<SensorTable, ContractError> {
    let mut table = SensorTable::new();
    for group in key_file.groups() {
        if group.name().starts_with(SENSOR_GROUP) {
            parse_sensor_group(&mut table, group)?;
        } else {
            warn!(group = group.name(), "Unknown group, ignored");
        }
    }
    Ok(table)
}

/// Extract `N` from `sensor<N>`
///
/// Only the leading digits after the prefix are read, so `sensor2-lobby` is
/// sensor 2.
pub fn sensor_index(group: &str) -> Result<u32, ContractError> {
    let rest = group
        .strip_prefix(SENSOR_GROUP)
        .ok_or_else(|| ContractError::malformed_group(group))?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    rest[..digits_end]
        .parse()
        .map_err(|_| ContractError::malformed_group(group))
}

fn parse_sensor_group(table: &mut SensorTable, group: &Group) -> Result<(), ContractError> {
    let index = sensor_index(group.name())?;

    if table.contains(index) {
        return Err(ContractError::duplicate_sensor(index, group.name()));
    }

    match group.get_bool(KEY_ENABLE) {
        Some(Ok(true)) => {}
        Some(Ok(false)) => {
            debug!(group = group.name(), "Sensor disabled, skipped");
            return Ok(());
        }
        Some(Err(e)) => {
            warn!(group = group.name(), error = %e, "Invalid enable flag, sensor skipped");
            return Ok(());
        }
        None => {
            warn!(group = group.name(), "Missing enable flag, sensor skipped");
            return Ok(());
        }
    }

    let mut record = SensorRecord::default();
    for key in group.keys() {
        let value = group.get(key).unwrap_or_default().to_string();
        match key {
            KEY_ENABLE => {}
            KEY_ID => record.id = value,
            KEY_TYPE => record.sensor_type = value,
            KEY_DESCRIPTION => record.description = value,
            other => warn!(group = group.name(), key = other, "Unknown key, ignored"),
        }
    }

    debug!(index, id = %record.id, "Sensor parsed");
    table.insert(index, record);
    Ok(())
}
