use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::table::ExportTable;

/// Renders `table` as CSV with a header row.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a record cannot be written or flushed.
pub fn write_csv<W: Write>(table: &ExportTable, writer: W) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.headers())?;
    for record in table.records() {
        out.write_record(record)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `table` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created, otherwise the
/// same errors as [`write_csv`].
pub fn write_csv_file(table: &ExportTable, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_csv(table, file)?;
    tracing::info!(path = %path.display(), rows = table.rows().len(), "wrote CSV export");
    Ok(())
}
