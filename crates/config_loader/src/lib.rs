//! # Config Loader
//!
//! Sensor configuration loading.
//!
//! Responsibilities:
//! - Parse key-value (`[sensor<N>]` groups) and CSV sensor files
//! - Reject malformed group names, duplicate indices and short CSV rows
//! - Produce the read-only `SensorTable`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let sensors = ConfigLoader::load_from_path(Path::new("msgconv_config.txt")).unwrap();
//! println!("sensors: {}", sensors.len());
//! ```

mod csv;
mod keyfile;
mod parser;
mod sensors;

pub use contracts::SensorTable;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::{info, instrument};

/// Configuration loader
///
/// Provides static methods to load sensor tables from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a sensor table from file path
    ///
    /// Files ending in `.csv` are read as CSV, everything else as key-value.
    ///
    /// # Errors
    /// - File read failure
    /// - Parse failure (syntax, malformed group, duplicate index, short row)
    #[instrument(name = "config_load", skip_all, fields(path = %path.display()))]
    pub fn load_from_path(path: &Path) -> Result<SensorTable, ContractError> {
        let format = ConfigFormat::from_path(path);
        let content = Self::read_file(path)?;
        let table = Self::load_from_str(&content, format)?;
        info!(format = ?format, sensors = table.len(), "Sensor configuration loaded");
        Ok(table)
    }

    /// Load a sensor table from string
    ///
    /// # Errors
    /// - Parse failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<SensorTable, ContractError> {
        parser::parse(content, format)
    }

    /// Serialize a sensor table as key-value groups
    ///
    /// Every written group is enabled; the output loads back into an equal
    /// table.
    pub fn to_key_value(table: &SensorTable) -> String {
        table
            .iter()
            .map(|(index, record)| {
                format!(
                    "[{group}{index}]\n{enable}=true\n{id}={}\n{ty}={}\n{desc}={}\n\n",
                    keyfile::escape(&record.id),
                    keyfile::escape(&record.sensor_type),
                    keyfile::escape(&record.description),
                    group = sensors::SENSOR_GROUP,
                    enable = sensors::KEY_ENABLE,
                    id = sensors::KEY_ID,
                    ty = sensors::KEY_TYPE,
                    desc = sensors::KEY_DESCRIPTION,
                )
            })
            .collect()
    }
}

impl ConfigLoader {
    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        std::fs::read_to_string(path)
            .map_err(|e| ContractError::config_read(path.display().to_string(), e))
    }
}
