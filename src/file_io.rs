//! File-writing collaborator for report export.
//!
//! One capability: write a record as a one-row CSV to a named file under
//! an existing directory. Filesystem errors propagate unmodified; the
//! directory is never created here.

use crate::error::Result;
use crate::report::Record;
use std::fs;
use std::path::Path;

/// Writes `record` as `<directory>/<filename>`: a header row of field
/// names followed by a single data row of rendered values.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory does not exist or
/// the file cannot be written.
pub fn write_csv(filename: &str, record: &Record, directory: &Path) -> Result<()> {
    let header: Vec<String> = record
        .entries()
        .iter()
        .map(|(key, _)| quote(key))
        .collect();
    let row: Vec<String> = record
        .entries()
        .iter()
        .map(|(_, value)| quote(&value.to_string()))
        .collect();

    let contents = format!("{}\n{}\n", header.join(","), row.join(","));
    fs::write(directory.join(filename), contents)?;
    Ok(())
}

/// RFC 4180 quoting: fields containing commas, quotes, or newlines are
/// wrapped in double quotes with inner quotes doubled.
fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
