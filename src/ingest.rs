//! Spreadsheet loading.
//!
//! Reads `.csv` and `.xlsx` files into a [`RawTable`]: trimmed headers plus
//! string cells. Nothing here knows about the league; column meaning is
//! resolved later by the normalizer.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Reader, Xlsx};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a spreadsheet.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel parse error: {0}")]
    Excel(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Sheet has no header row")]
    NoHeader,
}

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
}

impl SheetFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(SheetFormat::Csv),
            "xlsx" | "xlsm" => Ok(SheetFormat::Xlsx),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

/// An untyped table: one header row and string cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a cell as text. Empty and "nan" cells count as null.
pub fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    let value = row.get(idx?)?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value)
    }
}

/// Parse an in-memory spreadsheet.
pub fn parse_bytes(bytes: &[u8], format: SheetFormat) -> Result<RawTable, LoadError> {
    let table = match format {
        SheetFormat::Csv => parse_csv(bytes)?,
        SheetFormat::Xlsx => parse_xlsx(bytes)?,
    };
    debug!(
        "Parsed {:?} sheet: {} rows, {} columns",
        format,
        table.rows.len(),
        table.headers.len()
    );
    Ok(table)
}

fn parse_csv(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::NoHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        if row.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable::new(dedupe_headers(&headers), rows))
}

fn parse_xlsx(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| LoadError::Excel(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoWorksheet)?;
    debug!("Reading worksheet {:?}", sheet_name);

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Excel(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows.next().ok_or(LoadError::NoHeader)?;
    let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();

    let mut rows = Vec::new();
    for data_row in sheet_rows {
        let row: Vec<String> = data_row
            .iter()
            .map(|c| c.to_string().trim().to_string())
            .collect();
        if row.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable::new(dedupe_headers(&headers), rows))
}

/// Trim headers and disambiguate repeats as `name.1`, `name.2`, ...
///
/// Results sheets commonly carry two columns both titled "Pontuação"; the
/// second one becomes "Pontuação.1".
pub fn dedupe_headers(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    headers
        .iter()
        .map(|h| {
            let base = h.trim().to_string();
            let n = seen.entry(base.clone()).or_insert(0);
            let name = if *n == 0 {
                base
            } else {
                format!("{}.{}", base, n)
            };
            *n += 1;
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SheetFormat::from_path(Path::new("dados.csv")).unwrap(),
            SheetFormat::Csv
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("dados_campeonato.XLSX")).unwrap(),
            SheetFormat::Xlsx
        );
        assert!(matches!(
            SheetFormat::from_path(Path::new("dados.ods")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_csv_trims_headers_and_skips_blank_rows() {
        let data = b" Mandante ,Visitante,Rodada\nA,B,1\n,,\nC,D,2\n";
        let table = parse_bytes(data, SheetFormat::Csv).unwrap();

        assert_eq!(table.headers, vec!["Mandante", "Visitante", "Rodada"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["C", "D", "2"]);
    }

    #[test]
    fn test_parse_csv_duplicate_score_headers() {
        let data = "Mandante,Pontuação,Visitante,Pontuação\nA,55.0,B,50.0\n";
        let table = parse_bytes(data.as_bytes(), SheetFormat::Csv).unwrap();

        assert_eq!(
            table.headers,
            vec!["Mandante", "Pontuação", "Visitante", "Pontuação.1"]
        );
    }

    #[test]
    fn test_parse_csv_flexible_row_lengths() {
        let data = b"Mandante,Visitante,Rodada\nA,B\n";
        let table = parse_bytes(data, SheetFormat::Csv).unwrap();
        assert_eq!(cell(&table.rows[0], Some(2)), None);
        assert_eq!(cell(&table.rows[0], Some(1)), Some("B"));
    }

    #[test]
    fn test_cell_null_markers() {
        let row = vec!["".to_string(), "NaN".to_string(), " x ".to_string()];
        assert_eq!(cell(&row, Some(0)), None);
        assert_eq!(cell(&row, Some(1)), None);
        assert_eq!(cell(&row, Some(2)), Some("x"));
        assert_eq!(cell(&row, Some(9)), None);
        assert_eq!(cell(&row, None), None);
    }

    #[test]
    fn test_dedupe_headers() {
        let headers: Vec<String> = ["a", "b", "a", " a "]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dedupe_headers(&headers), vec!["a", "b", "a.1", "a.2"]);
    }

    #[test]
    fn test_parse_xlsx_rejects_garbage() {
        let result = parse_bytes(b"not a zip archive", SheetFormat::Xlsx);
        assert!(matches!(result, Err(LoadError::Excel(_))));
    }
}
