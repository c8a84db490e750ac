//! SensorRecord / SensorTable - Config Parser output
//!
//! Static sensor metadata keyed by integer sensor index.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Entry};

use crate::ContractError;

/// Sensor type assigned to every row of a CSV sensor file
pub const CSV_SENSOR_TYPE: &str = "Camera";

/// Static description of one camera/sensor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Sensor identifier published in messages
    pub id: String,

    /// Sensor type (e.g. "Camera")
    #[serde(rename = "type")]
    pub sensor_type: String,

    /// Free-form description
    pub description: String,
}

impl SensorRecord {
    pub fn new(
        id: impl Into<String>,
        sensor_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sensor_type: sensor_type.into(),
            description: description.into(),
        }
    }
}

/// Sensor index -> record mapping
///
/// Built once at context creation and read-only afterwards. Iteration is
/// ordered by sensor index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorTable {
    sensors: BTreeMap<u32, SensorRecord>,
}

impl SensorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, refusing to overwrite an existing index
    ///
    /// Returns `false` (and leaves the table untouched) when `index` is
    /// already present.
    pub fn insert(&mut self, index: u32, record: SensorRecord) -> bool {
        match self.sensors.entry(index) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.sensors.contains_key(&index)
    }

    /// Look up a sensor by index
    pub fn get(&self, index: u32) -> Option<&SensorRecord> {
        self.sensors.get(&index)
    }

    /// Look up a sensor by index, failing with `UnresolvedSensor`
    pub fn resolve(&self, index: u32) -> Result<&SensorRecord, ContractError> {
        self.get(index)
            .ok_or(ContractError::UnresolvedSensor { sensor_id: index })
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Iterate `(index, record)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SensorRecord)> {
        self.sensors.iter().map(|(index, record)| (*index, record))
    }
}

impl FromIterator<(u32, SensorRecord)> for SensorTable {
    /// Later duplicates are ignored, matching `insert`.
    fn from_iter<I: IntoIterator<Item = (u32, SensorRecord)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (index, record) in iter {
            table.insert(index, record);
        }
        table
    }
}
