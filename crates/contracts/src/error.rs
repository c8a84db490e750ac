//! Layered error definitions
//!
//! Categorized by source: config / sensor lookup

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse { message: String },

    /// Configuration file could not be opened or read
    #[error("cannot read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Group name does not carry a sensor index
    #[error("wrong sensor group name [{group}]")]
    MalformedGroup { group: String },

    /// Two groups resolve to the same sensor index
    #[error("duplicate entries for sensor index {index} (group [{group}])")]
    DuplicateSensor { index: u32, group: String },

    /// CSV row has fewer fields than required
    #[error("csv line {line}: expected at least {expected} fields, found {found}")]
    CsvRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    // ===== Generation Errors =====
    /// Sensor index absent from the sensor table
    #[error("no entry for sensor{sensor_id} in configuration file")]
    UnresolvedSensor { sensor_id: u32 },

    // ===== General Errors =====
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    /// Create configuration read error
    pub fn config_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create malformed group error
    pub fn malformed_group(group: impl Into<String>) -> Self {
        Self::MalformedGroup {
            group: group.into(),
        }
    }

    /// Create duplicate sensor error
    pub fn duplicate_sensor(index: u32, group: impl Into<String>) -> Self {
        Self::DuplicateSensor {
            index,
            group: group.into(),
        }
    }
}
