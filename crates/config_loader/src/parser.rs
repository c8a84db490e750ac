//! 配置解析模块
//!
//! 支持 key-value (GLib key-file) 和 CSV 两种传感器配置格式。

use contracts::{ContractError, SensorTable};
use std::path::Path;

use crate::{csv, keyfile, sensors};

/// Sensor configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `[sensor<N>]` key-value groups
    KeyValue,
    /// Header row + `cameraId,id,description` rows
    Csv,
}

impl ConfigFormat {
    /// Infer format from a file extension
    ///
    /// Anything other than `csv` is read as key-value.
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("csv") {
            Self::Csv
        } else {
            Self::KeyValue
        }
    }

    /// Infer format from a path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::KeyValue)
    }
}

/// Parse key-value sensor configuration
pub fn parse_key_value(content: &str) -> Result<SensorTable, ContractError> {
    let key_file = keyfile::parse(content)?;
    sensors::build_sensor_table(&key_file)
}

/// Parse by format
pub fn parse(content: &str, format: ConfigFormat) -> Result<SensorTable, ContractError> {
    match format {
        ConfigFormat::KeyValue => parse_key_value(content),
        ConfigFormat::Csv => csv::parse_csv(content),
    }
}
