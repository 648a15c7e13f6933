use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Sheets};
use tracing::debug;

use crate::error::{KolekError, Result};
use crate::models::{RawTable, Scalar};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert an Excel serial date to text. Whole days render as a date only.
pub fn excel_serial_to_text(serial: f64) -> Option<String> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    let dt = base.checked_add_signed(chrono::Duration::try_seconds(seconds)?)?;
    if serial.fract() == 0.0 {
        Some(dt.format("%Y-%m-%d").to_string())
    } else {
        Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

fn scalar_from_cell(cell: &Data) -> Scalar {
    match cell {
        Data::Int(i) => Scalar::Int(*i),
        Data::Float(f) => Scalar::Float(*f),
        Data::String(s) => {
            if s.trim().is_empty() {
                Scalar::Empty
            } else {
                Scalar::Text(s.clone())
            }
        }
        Data::Bool(b) => Scalar::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_text(serial)
                .map(Scalar::Text)
                .unwrap_or(Scalar::Float(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Scalar::Text(s.clone()),
        Data::Error(_) | Data::Empty => Scalar::Empty,
    }
}

fn header_text(cell: &Scalar) -> String {
    cell.to_string().trim().to_string()
}

/// First row becomes the header; fully blank data rows are skipped.
fn table_from_rows<I>(mut rows: I) -> RawTable
where
    I: Iterator<Item = Vec<Scalar>>,
{
    let headers = rows
        .next()
        .map(|r| r.iter().map(header_text).collect())
        .unwrap_or_default();
    let rows = rows
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();
    RawTable { headers, rows }
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceFormat {
    /// Anything calamine opens: xls, xlsx, xlsm, xlsb, ods.
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn detect(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(KolekError::UnsupportedFormat(name.to_string())),
        }
    }
}

fn read_first_sheet<RS>(mut workbook: Sheets<RS>, name: &str) -> Result<RawTable>
where
    RS: Read + Seek,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| KolekError::EmptyWorkbook(name.to_string()))??;
    let rows = range
        .rows()
        .map(|row| row.iter().map(scalar_from_cell).collect::<Vec<_>>());
    Ok(table_from_rows(rows))
}

fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Scalar::infer).collect::<Vec<_>>());
    }
    Ok(table_from_rows(rows.into_iter()))
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn load_table(file_path: &Path) -> Result<RawTable> {
    let name = file_path.to_string_lossy().to_string();
    let table = match SourceFormat::detect(&name)? {
        SourceFormat::Workbook => {
            let workbook = calamine::open_workbook_auto(file_path)?;
            read_first_sheet(workbook, &name)?
        }
        SourceFormat::Csv => {
            let file = std::fs::File::open(file_path)?;
            read_csv(std::io::BufReader::new(file))?
        }
    };
    debug!(file = %name, columns = table.headers.len(), rows = table.rows.len(), "Loaded table");
    Ok(table)
}

/// Load an in-memory upload; `name` is only used to pick the reader.
pub fn load_table_from_bytes(name: &str, bytes: Vec<u8>) -> Result<RawTable> {
    match SourceFormat::detect(name)? {
        SourceFormat::Workbook => {
            let workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
            read_first_sheet(workbook, name)
        }
        SourceFormat::Csv => read_csv(Cursor::new(bytes)),
    }
}
