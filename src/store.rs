//! CSV persistence for the history table.
//!
//! The history file predates this tool and is consumed by spreadsheet
//! software configured for Windows-1252, so both load and save go through
//! that encoding rather than UTF-8.

use crate::history::{HistoryRecord, HistoryTable};
use anyhow::{bail, Context, Result};
use encoding_rs::WINDOWS_1252;
use std::path::Path;

/// Column headers of the persisted history file, in order.
pub const HISTORY_HEADERS: [&str; 5] = [
    "Cliente",
    "URL",
    "Versão Atual",
    "Versão Anterior",
    "Data da pesquisa",
];

/// Load the history table from `path`.
///
/// An absent file is the normal first-run case and yields an empty table.
/// A present but malformed file is an error that aborts the run.
pub fn load_history(path: &Path) -> Result<HistoryTable> {
    if !path.exists() {
        return Ok(HistoryTable::new());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    let (decoded, _, _) = WINDOWS_1252.decode(&bytes);

    let mut reader = csv::Reader::from_reader(decoded.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize::<HistoryRecord>() {
        let record = record
            .with_context(|| format!("malformed history file {}", path.display()))?;
        rows.push(record);
    }
    Ok(HistoryTable::from_rows(rows))
}

/// Write the history table to `path`, overwriting any prior file.
///
/// Header row first, one row per record, no index column.
pub fn write_history_csv(path: &Path, table: &HistoryTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(HISTORY_HEADERS)
        .context("failed to write history header")?;
    for row in table.rows() {
        writer
            .serialize(row)
            .context("failed to serialize history row")?;
    }
    let utf8 = String::from_utf8(writer.into_inner().context("failed to flush history CSV")?)
        .context("history CSV was not valid UTF-8")?;

    let (encoded, _, unmappable) = WINDOWS_1252.encode(&utf8);
    if unmappable {
        // The encoder substitutes numeric character references, which would
        // come back changed on reload; refuse to write mangled history.
        bail!("history contains characters not representable in Windows-1252");
    }
    std::fs::write(path, &encoded)
        .with_context(|| format!("failed to write history file {}", path.display()))?;
    Ok(())
}
