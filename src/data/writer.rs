use super::model::Table;
use crate::error::{MergeError, MergeResult};

/// Serialize a table to CSV bytes: header first, then one record per row.
/// Missing values render as empty fields; quoting follows RFC 4180.
pub fn write_table(table: &Table) -> MergeResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&table.columns)
        .map_err(|e| MergeError::Write(e.to_string()))?;

    for row in &table.rows {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| MergeError::Write(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| MergeError::Write(e.to_string()))
}
