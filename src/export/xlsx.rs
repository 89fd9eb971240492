//! XLSX workbook sink, via rust_xlsxwriter.

use crate::history::HistoryTable;
use crate::store::HISTORY_HEADERS;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

/// Sheet name inside the workbook.
pub const SHEET_NAME: &str = "Histórico";

/// Display width applied to every column.
const COLUMN_WIDTH: f64 = 30.0;

/// Header fill color.
const HEADER_COLOR: u32 = 0xD7E4BC;

/// Write the history table as a single-sheet workbook.
///
/// The header row is bold, text-wrapped, top-aligned, filled and bordered;
/// every column gets the same fixed width; an autofilter spans the header
/// plus all data rows.
pub fn write_workbook(path: &Path, table: &HistoryTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_border(FormatBorder::Thin);

    for (col, name) in HISTORY_HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *name, &header_format)?;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (i, record) in table.rows().iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.client)?;
        worksheet.write_string(row, 1, &record.url)?;
        worksheet.write_string(row, 2, &record.current_version)?;
        worksheet.write_string(row, 3, &record.previous_version)?;
        worksheet.write_string(row, 4, &record.last_checked)?;
    }

    worksheet.autofilter(
        0,
        0,
        table.len() as u32,
        (HISTORY_HEADERS.len() - 1) as u16,
    )?;

    workbook
        .save(path)
        .with_context(|| format!("failed to write workbook {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_write_workbook_produces_a_file() {
        let now = NaiveDate::from_ymd_opt(2026, 8, 29)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut table = HistoryTable::new();
        table.upsert("Acme", "https://acme.example/app", Some("v=3"), now);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historico_versoes.xlsx");
        write_workbook(&path, &table).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // XLSX is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_workbook_accepts_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historico_versoes.xlsx");
        write_workbook(&path, &HistoryTable::new()).unwrap();
        assert!(path.exists());
    }
}
