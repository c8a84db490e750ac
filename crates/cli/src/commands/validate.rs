//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{ConfigFormat, ConfigLoader};
use contracts::SensorTable;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sensors: Option<Vec<SensorSummary>>,
}

#[derive(Serialize)]
struct SensorSummary {
    index: u32,
    id: String,
    #[serde(rename = "type")]
    sensor_type: String,
    description: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating sensor configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Sensor configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();
    let format = match ConfigFormat::from_path(&args.config) {
        ConfigFormat::Csv => "csv",
        ConfigFormat::KeyValue => "key-value",
    };

    match ConfigLoader::load_from_path(&args.config) {
        Ok(table) => {
            let warnings = collect_warnings(&table);
            ValidationResult {
                valid: true,
                config_path,
                format,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                sensors: Some(summarize(&table)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            format,
            error: Some(e.to_string()),
            warnings: None,
            sensors: None,
        },
    }
}

fn summarize(table: &SensorTable) -> Vec<SensorSummary> {
    table
        .iter()
        .map(|(index, record)| SensorSummary {
            index,
            id: record.id.clone(),
            sensor_type: record.sensor_type.clone(),
            description: record.description.clone(),
        })
        .collect()
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(table: &SensorTable) -> Vec<String> {
    let mut warnings = Vec::new();

    if table.is_empty() {
        warnings.push(
            "No enabled sensors - full schema messages will never be generated".to_string(),
        );
    }

    for (index, record) in table.iter() {
        if record.id.is_empty() {
            warnings.push(format!("sensor{index} has an empty id"));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Sensor configuration is valid: {}", result.config_path);
        println!("\n  Format: {}", result.format);

        if let Some(ref sensors) = result.sensors {
            println!("  Sensors: {}", sensors.len());
            for sensor in sensors {
                println!(
                    "    [{}] {} ({}) {}",
                    sensor.index, sensor.id, sensor.sensor_type, sensor.description
                );
            }
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Sensor configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn args_for(file: &NamedTempFile) -> ValidateArgs {
        ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        }
    }

    #[test]
    fn test_valid_config_summary() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[sensor0]\nenable=true\nid=\n[sensor2]\nenable=true\nid=cam-2\n").unwrap();

        let result = validate_config(&args_for(&file));
        assert!(result.valid);
        assert_eq!(result.format, "key-value");
        let sensors = result.sensors.unwrap();
        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[1].index, 2);
        assert_eq!(result.warnings.unwrap(), vec!["sensor0 has an empty id"]);
    }

    #[test]
    fn test_invalid_config_reports_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[sensorX]\nenable=true\n").unwrap();

        let result = validate_config(&args_for(&file));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("sensorX"));
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/sensors.csv"),
            json: false,
        };
        let result = validate_config(&args);
        assert!(!result.valid);
        assert_eq!(result.format, "csv");
        assert!(run_validate(&args).is_err());
    }
}
