//! CSV artifact reading and writing

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::path::Path;

use crate::records::CsvRecord;

/// Write `records` to `path` with a header line, replacing any existing file
pub fn write_records<T: CsvRecord>(path: &Path, records: &[T]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record(T::HEADERS)
        .with_context(|| format!("Failed to write CSV header: {}", path.display()))?;

    for record in records {
        wtr.serialize(record)
            .with_context(|| format!("Failed to write record to {}", path.display()))?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to flush CSV writer: {}", path.display()))?;

    Ok(())
}

/// Read all records of an artifact previously written by [`write_records`]
pub fn read_records<T: CsvRecord>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let record: T = result
            .with_context(|| format!("Failed to parse row {} of {}", idx + 1, path.display()))?;
        records.push(record);
    }

    Ok(records)
}

/// Append `extra` to the artifact at `path` and rewrite it
///
/// A missing file is treated as empty. Returns the combined records.
pub fn append_records<T: CsvRecord + Clone>(path: &Path, extra: &[T]) -> Result<Vec<T>> {
    let mut combined = if path.exists() {
        read_records(path)?
    } else {
        Vec::new()
    };
    combined.extend_from_slice(extra);

    write_records(path, &combined)?;
    Ok(combined)
}
