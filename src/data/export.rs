use anyhow::{Context, Result};

use super::model::{EmployeeTable, COLUMNS};

/// File name offered by the download dialog.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";

/// Serialize a table to CSV bytes: canonical header row, one data row per
/// record, UTF-8. Deterministic, so the same table always produces
/// byte-identical output. The header is written even for an empty table.
pub fn to_csv_bytes(table: &EmployeeTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS).context("writing CSV header")?;
    for row in &table.rows {
        writer.serialize(row).context("writing CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV output: {e}"))?;
    Ok(bytes)
}
