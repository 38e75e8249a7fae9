//! CSV import for appliance lists.
//!
//! Accepts the appliance table columns
//! `Device,Power (kW),Operating Hours,Earliest Hour,Latest Hour,Priority`
//! or the snake_case field names used in scenario files. Only the device
//! column is required; an empty power cell falls back to the catalog.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::appliance::ApplianceDemand;
use crate::config::ApplianceConfig;

/// Failure to read an appliance list.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed appliance CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A record parsed but violates the input contract. `row` is 1-based and
    /// counts data rows only.
    #[error("row {row} ({name}): {field}: {message}")]
    Invalid {
        row: usize,
        name: String,
        field: &'static str,
        message: String,
    },
}

/// Reads and validates an appliance list from a CSV file.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be opened, a row cannot be
/// parsed, or a record is invalid.
pub fn read_appliances_file(path: &Path) -> Result<Vec<ApplianceDemand>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_appliances(file)
}

/// Reads and validates an appliance list from any CSV reader.
///
/// Stops at the first invalid record.
///
/// # Errors
///
/// Returns an [`ImportError`] if a row cannot be parsed or a record is
/// invalid.
pub fn read_appliances(reader: impl Read) -> Result<Vec<ApplianceDemand>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut appliances = Vec::new();
    for (i, record) in rdr.deserialize::<ApplianceConfig>().enumerate() {
        let demand = record?.to_demand();
        if let Some(e) = demand.validate().into_iter().next() {
            return Err(ImportError::Invalid {
                row: i + 1,
                name: demand.name,
                field: e.field(),
                message: e.to_string(),
            });
        }
        appliances.push(demand);
    }
    Ok(appliances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_table_columns() {
        let data = "\
Device,Power (kW),Operating Hours,Earliest Hour,Latest Hour,Priority
Washing machine,1.0,2,8,20,2
Dishwasher,,1,20,24,3
";
        let appliances = read_appliances(data.as_bytes()).unwrap();
        assert_eq!(appliances.len(), 2);
        assert_eq!(appliances[0], ApplianceDemand::new("Washing machine", 1.0, 2, 8, 20, 2));
        assert_eq!(appliances[1].power_kw, 1.3);
    }

    #[test]
    fn reads_snake_case_columns_with_defaults() {
        let data = "name,power_kw\nHeat pump,2.5\n";
        let appliances = read_appliances(data.as_bytes()).unwrap();
        assert_eq!(appliances[0].hours_needed, 2);
        assert_eq!(appliances[0].latest_hour, 23);
        assert_eq!(appliances[0].priority, 1);
    }

    #[test]
    fn rejects_invalid_record_with_row_number() {
        let data = "Device,Power (kW),Operating Hours\nFan,0.06,2\nHeater,2.0,30\n";
        let err = read_appliances(data.as_bytes()).unwrap_err();
        match err {
            ImportError::Invalid { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "hours_needed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_numeric_power() {
        let data = "Device,Power (kW)\nFan,lots\n";
        assert!(matches!(
            read_appliances(data.as_bytes()),
            Err(ImportError::Csv(_))
        ));
    }

    #[test]
    fn rejects_unknown_column() {
        let data = "Device,Colour\nFan,blue\n";
        assert!(read_appliances(data.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = read_appliances_file(Path::new("/nonexistent/appliances.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Open { .. }));
    }
}
