use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::error::Result;
use crate::models::Scalar;
use crate::projection::FilteredTable;
use crate::render::{build_filtered_report, build_report, ReportTable};
use crate::tracer::MergedTable;

pub const SHEET_NAME: &str = "Sheet1";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Scalar) -> Result<()> {
    match value {
        Scalar::Empty => {}
        Scalar::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Scalar::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Scalar::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        Scalar::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

/// Write a report as a single `Sheet1` worksheet: header row, then one row
/// per record, no index column. Returns the `.xlsx` bytes.
pub fn write_report(report: &ReportTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (col, header) in report.headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        for (i, row) in report.rows.iter().enumerate() {
            let r = i as u32 + 1;
            for (col, value) in row.cells.iter().enumerate() {
                write_cell(sheet, r, col as u16, value)?;
            }
        }
    }
    let bytes = workbook.save_to_buffer()?;
    debug!(rows = report.rows.len(), bytes = bytes.len(), "Serialized workbook");
    Ok(bytes)
}

/// Serialize the merged table with monetary columns rendered as rupiah.
pub fn serialize(merged: &MergedTable) -> Result<Vec<u8>> {
    write_report(&build_report(merged))
}

pub fn serialize_filtered(filtered: &FilteredTable) -> Result<Vec<u8>> {
    write_report(&build_filtered_report(filtered))
}
