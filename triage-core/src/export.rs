//! CSV export of normalized rows.

use std::io::Write;

use anyhow::{Context, Result};

use crate::report::Row;

/// Write rows as CSV, header included. Column order follows the `Row`
/// serialization order.
pub fn write_csv<W: Write>(rows: &[Row], writer: W) -> Result<()> {
  let mut csv_writer = csv::Writer::from_writer(writer);
  for row in rows {
    csv_writer.serialize(row).context("Failed to serialize row as CSV")?;
  }
  csv_writer.flush().context("Failed to flush CSV output")?;
  Ok(())
}
