//! Workbook decoding
//!
//! Turns an uploaded `.xlsx`, `.xls` or `.csv` buffer into header-keyed rows.
//! Only the first sheet is read, and the first row supplies the headers.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use tracing::debug;

use crate::error::ImportError;

const EMPTY_HEADER: &str = "__EMPTY";

/// Decoded cell, keeping the spreadsheet's native type
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Stringified form, empty cells become an empty string
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(d) => d.format("%d/%m/%Y").to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Integral values print without a decimal point, like spreadsheet text export
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One data row: literal header -> cell, in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }
}

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Xls,
    Csv,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Result<Self, ImportError> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            "csv" => Ok(FileFormat::Csv),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }
}

/// Decode a buffer into rows. Fails with `EmptyFile` when there are no data rows.
pub fn decode(bytes: &[u8], format: FileFormat) -> Result<Vec<RawRow>, ImportError> {
    let grid = match format {
        FileFormat::Xlsx | FileFormat::Xls => decode_spreadsheet(bytes)?,
        FileFormat::Csv => decode_csv(bytes)?,
    };
    build_rows(grid)
}

fn decode_spreadsheet(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyFile)?
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect())
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Text(v.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        other => CellValue::Text(other.to_string()),
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(text))
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Unreadable(e.to_string()))?;
        grid.push(
            record
                .iter()
                .map(|s| {
                    if s.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(s.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}

/// Spreadsheet exports in Indonesian locales often use `;`
fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn build_rows(grid: Vec<Vec<CellValue>>) -> Result<Vec<RawRow>, ImportError> {
    let mut lines = grid.into_iter();
    let header_cells = lines.next().ok_or(ImportError::EmptyFile)?;
    let headers = unique_headers(&header_cells);

    let rows: Vec<RawRow> = lines
        .filter(|cells| !cells.iter().all(CellValue::is_blank))
        .map(|cells| {
            RawRow::new(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), cells.get(i).cloned().unwrap_or(CellValue::Empty)))
                    .collect(),
            )
        })
        .collect();

    if rows.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    debug!("Decoded {} rows with headers {:?}", rows.len(), headers);
    Ok(rows)
}

/// Blank headers become `__EMPTY`, repeats get `_1`, `_2`, ... so keys stay unique
fn unique_headers(cells: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .map(|cell| {
            let base = if cell.is_blank() {
                EMPTY_HEADER.to_string()
            } else {
                cell.to_text()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}
