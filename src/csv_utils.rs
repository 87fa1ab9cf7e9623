//! CSV reading and writing utilities.
//!
//! Provides whole-table reading, record serialization, and atomic
//! replacement of an output file.

use std::io::{self, Read, Write};
use std::path::Path;

use csv::StringRecord;
use serde::Serialize;
use tempfile::NamedTempFile;

/// A fully materialized CSV file.
#[derive(Debug, Default)]
pub struct Table {
    pub header: StringRecord,
    /// Data rows, each carrying its position in the source.
    pub rows: Vec<StringRecord>,
}

/// Reads a header row and all data rows.
/// Rows whose cell count differs from the header's are rejected.
pub fn read_table<R: Read>(reader: R) -> csv::Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let header = rdr.headers()?.clone();
    let rows = rdr.into_records().collect::<csv::Result<_>>()?;
    Ok(Table { header, rows })
}

/// Writes a header row followed by the serialized records.
/// The header is written even when there are no records.
pub fn write_csv<T, W, H>(writer: W, header: H, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Replaces the file at `path` with `contents`.
///
/// The data goes to a temporary file in the same directory first, which is
/// renamed over `path` only once it is completely written.
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
