#![cfg(feature = "excel")]

//! Workbook decoding (`.xlsx`, `.xls`).

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};

use crate::error::{DecodeResult, ImportError};

use super::table::RawTable;

/// Decode a workbook file into a [`RawTable`].
pub fn decode_excel_from_path(path: impl AsRef<Path>, sheet_name: Option<&str>) -> DecodeResult<RawTable> {
    let bytes = std::fs::read(path)?;
    decode_excel_from_bytes(&bytes, sheet_name)
}

/// Decode in-memory workbook bytes into a [`RawTable`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Every following row (blank rows included) becomes a body row of stringified cells
pub fn decode_excel_from_bytes(bytes: &[u8], sheet_name: Option<&str>) -> DecodeResult<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::NoSheet {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    table_from_range(&sheet, &range)
}

fn table_from_range(sheet: &str, range: &calamine::Range<Data>) -> DecodeResult<RawTable> {
    let header_row_idx = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| ImportError::NoSheet {
            message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
        })?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx0, row) in range.rows().enumerate().skip(header_row_idx) {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        if idx0 == header_row_idx {
            headers = cells;
        } else {
            rows.push(cells);
        }
    }

    Ok(RawTable::new(Some(sheet.to_string()), headers, rows))
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => datetime_to_string(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

/// Render a date cell as `YYYY-MM-DD` (or `HH:MM:SS` for time-only values).
///
/// The workbook's date system (1900 or 1904) is carried by the cell. Durations are not calendar
/// dates and keep their raw serial value.
fn datetime_to_string(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return dt.as_f64().to_string();
    }
    match dt.as_datetime() {
        Some(t) if dt.as_f64() < 1.0 => t.format("%H:%M:%S").to_string(),
        Some(t) => t.format("%Y-%m-%d").to_string(),
        None => dt.as_f64().to_string(),
    }
}
