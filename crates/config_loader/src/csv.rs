//! CSV sensor files
//!
//! Columns are fixed: `cameraId, id, description, ...`. The header row is
//! discarded and rows are numbered from sensor index 0.

use contracts::{ContractError, SensorRecord, SensorTable, CSV_SENSOR_TYPE};

/// Number of leading fields kept per row
pub const DEFAULT_CSV_FIELDS: usize = 10;

const ID_FIELD: usize = 1;
const DESCRIPTION_FIELD: usize = 2;

/// Parse CSV text into a sensor table
///
/// Fails on the first row with fewer than three fields. A blank row counts
/// as a single empty field.
pub fn parse_csv(content: &str) -> Result<SensorTable, ContractError> {
    let mut table = SensorTable::new();
    let mut index = 0u32;

    for (line_idx, line) in content.lines().enumerate().skip(1) {
        let tokens = csv_tokens(line);
        if tokens.len() <= DESCRIPTION_FIELD {
            return Err(ContractError::CsvRow {
                line: line_idx + 1,
                expected: DESCRIPTION_FIELD + 1,
                found: tokens.len(),
            });
        }

        table.insert(
            index,
            SensorRecord::new(
                tokens[ID_FIELD],
                CSV_SENSOR_TYPE,
                tokens[DESCRIPTION_FIELD],
            ),
        );
        index += 1;
    }

    Ok(table)
}

fn csv_tokens(line: &str) -> Vec<&str> {
    line.split(',')
        .take(DEFAULT_CSV_FIELDS)
        .map(str::trim)
        .collect()
}
