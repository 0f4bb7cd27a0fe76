//! CSV file operations

use crate::error::{PersistenceError, Result};
use crate::table::{InferenceOptions, Table, csv::read_csv, csv::write_csv};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a table to `path` as CSV with a header row, replacing any existing
/// file.
///
/// # Errors
/// Returns [`PersistenceError::Write`] if the file cannot be created or
/// written
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source: csv::Error| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| write_error(e.into()))?;
    write_csv(BufWriter::new(file), table).map_err(write_error)?;

    log::debug!(
        "Wrote {} rows x {} columns to {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
    Ok(())
}

/// Read a CSV file written by [`write_table`] (or any CSV with a header row).
///
/// # Errors
/// Returns [`PersistenceError::Read`] if the file cannot be opened and a
/// parse error if its contents are malformed
pub fn read_table(path: impl AsRef<Path>, options: &InferenceOptions) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv(BufReader::new(file), &path.display().to_string(), options)?;
    Ok(table)
}
