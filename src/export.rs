use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::{Record, COLUMNS};

// ---------------------------------------------------------------------------
// Spreadsheet export of the displayed table rows
// ---------------------------------------------------------------------------

/// Write the displayed rows as CSV: a header row with the original column
/// labels, then exactly the rows in the order they appear on screen
/// (post filter/sort).
pub fn write_csv<W: Write>(writer: W, rows: &[&Record]) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    w.write_record(COLUMNS).context("writing CSV header")?;
    for row in rows {
        w.serialize(row).context("writing CSV row")?;
    }
    w.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export the displayed rows to a file.
pub fn export_to_file(path: &Path, rows: &[&Record]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, rows)
}
