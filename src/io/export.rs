//! CSV export for the hourly schedule table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sched::report::ScheduleReport;

/// Column header for the schedule CSV export.
pub const HEADER: [&str; 4] = ["Hour", "Devices", "Power (kW)", "Cost (€)"];

/// Exports the hourly schedule table to a CSV file at the given path.
///
/// Writes a header row followed by one row per hour of the report.
/// Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `report` - Finished schedule report
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &ScheduleReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes the hourly schedule table as CSV to any writer.
///
/// Device lists contain commas and are quoted by the CSV writer. Numbers
/// always carry a decimal point (`3.0`, `0.0`).
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &ScheduleReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;

    for r in &report.rows {
        wtr.write_record(&[
            r.label.clone(),
            r.devices.clone(),
            format!("{:?}", r.power_kw),
            format!("{:?}", r.cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
