use thiserror::Error;

use crate::models::Period;

#[derive(Error, Debug)]
pub enum KolekError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Required columns (NOREKENING, _KOLEK) not found in the {period} file: missing {}", .missing.join(", "))]
    MissingRequiredColumn {
        period: Period,
        missing: Vec<&'static str>,
    },

    #[error("None of the selected columns were found in {0}")]
    NoKnownColumns(String),

    #[error("Unsupported file format: {0} (expected .xls, .xlsx or .csv)")]
    UnsupportedFormat(String),

    #[error("Workbook has no worksheets: {0}")]
    EmptyWorkbook(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KolekError>;
