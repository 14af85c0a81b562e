//! CSV decoding.

use std::path::Path;

use crate::error::{DecodeResult, ImportError};

use super::table::RawTable;

const UTF8_BOM: &str = "\u{feff}";

/// Decode a CSV file into a [`RawTable`].
pub fn decode_csv_from_path(path: impl AsRef<Path>) -> DecodeResult<RawTable> {
    let bytes = std::fs::read(path)?;
    decode_csv_from_bytes(&bytes)
}

/// Decode in-memory CSV bytes into a [`RawTable`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Records may be ragged; short rows are kept as-is (callers pad on access).
/// - A leading UTF-8 byte-order mark is stripped from the first header.
pub fn decode_csv_from_bytes(bytes: &[u8]) -> DecodeResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    decode_csv_from_reader(&mut rdr)
}

/// Decode CSV data from an existing CSV reader configured without headers.
pub fn decode_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> DecodeResult<RawTable> {
    let mut records = rdr.records();

    let headers: Vec<String> = match records.next() {
        Some(first) => first?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
                h.to_string()
            })
            .collect(),
        None => {
            return Err(ImportError::NoSheet {
                message: "csv input is empty (no header row)".to_string(),
            });
        }
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in records {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(None, headers, rows))
}

#[cfg(test)]
mod tests {
    use super::decode_csv_from_bytes;
    use crate::error::ImportError;

    #[test]
    fn splits_header_and_body() {
        let t = decode_csv_from_bytes("設備ID,設備名\nP-1,ポンプA-1\nP-2,ポンプA-2\n".as_bytes()).unwrap();
        assert_eq!(t.headers, vec!["設備ID", "設備名"]);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.rows[1], vec!["P-2", "ポンプA-2"]);
    }

    #[test]
    fn strips_bom_and_accepts_ragged_rows() {
        let t = decode_csv_from_bytes("\u{feff}id,name,cost\n1,a\n2,b,300,extra\n".as_bytes()).unwrap();
        assert_eq!(t.headers[0], "id");
        assert_eq!(t.cell(0, 2), "");
        assert_eq!(t.rows[1].len(), 4);
    }

    #[test]
    fn empty_input_has_no_sheet() {
        let err = decode_csv_from_bytes(b"").unwrap_err();
        assert!(matches!(err, ImportError::NoSheet { .. }));
    }
}
