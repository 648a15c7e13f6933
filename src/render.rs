use colored::Colorize;
use comfy_table::{Cell, Color, Table};

use crate::fmt::format_currency;
use crate::models::{
    Column, MergedRecord, Scalar, Status, RATING_CURRENT_HEADER, RATING_PREVIOUS_HEADER,
    STATUS_HEADER,
};
use crate::projection::FilteredTable;
use crate::tracer::MergedTable;

// ---------------------------------------------------------------------------
// Row highlighting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    /// Rating worsened.
    Alert,
    /// Rating improved.
    Positive,
    /// Unrated in the previous period.
    Highlight,
    Plain,
}

impl RowStyle {
    /// Background and foreground for a data cell.
    pub fn colors(&self) -> Option<(Color, Color)> {
        match self {
            Self::Alert => Some((Color::Red, Color::White)),
            Self::Positive => Some((Color::DarkGreen, Color::White)),
            Self::Highlight => Some((Color::Rgb { r: 0xAD, g: 0xD8, b: 0xE6 }, Color::Black)),
            Self::Plain => None,
        }
    }
}

pub fn status_style(status: Status) -> RowStyle {
    match status {
        Status::Upgraded => RowStyle::Alert,
        Status::Downgraded => RowStyle::Positive,
        Status::New => RowStyle::Highlight,
        Status::Unchanged => RowStyle::Plain,
    }
}

pub fn row_style(record: &MergedRecord) -> RowStyle {
    status_style(record.status)
}

// ---------------------------------------------------------------------------
// Display/export view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub style: RowStyle,
    pub cells: Vec<Scalar>,
}

/// Final table as shown on screen and written to the export: monetary
/// columns already formatted, status label appended.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

fn merged_headers(columns: &[Column]) -> Vec<String> {
    let mut headers: Vec<String> = columns
        .iter()
        .map(|c| match c {
            Column::Rating => RATING_CURRENT_HEADER.to_string(),
            other => other.header().to_string(),
        })
        .collect();
    headers.push(RATING_PREVIOUS_HEADER.to_string());
    headers.push(STATUS_HEADER.to_string());
    headers
}

fn display_cell(column: Column, value: Option<&Scalar>) -> Scalar {
    let value = value.cloned().unwrap_or(Scalar::Empty);
    if column.is_monetary() {
        format_currency(&value).into_scalar()
    } else {
        value
    }
}

fn merged_row(columns: &[Column], record: &MergedRecord) -> ReportRow {
    let mut cells: Vec<Scalar> = columns
        .iter()
        .map(|&c| match c {
            Column::AccountId => Scalar::Text(record.current.account_id.clone()),
            Column::Rating => Scalar::Int(record.rating_current as i64),
            other => display_cell(other, record.current.optional_field(other)),
        })
        .collect();
    cells.push(Scalar::Int(record.rating_previous as i64));
    cells.push(Scalar::Text(record.status.label().to_string()));
    ReportRow {
        style: row_style(record),
        cells,
    }
}

pub fn build_report(merged: &MergedTable) -> ReportTable {
    ReportTable {
        headers: merged_headers(&merged.columns),
        rows: merged
            .records
            .iter()
            .map(|r| merged_row(&merged.columns, r))
            .collect(),
    }
}

pub fn build_filtered_report(filtered: &FilteredTable) -> ReportTable {
    ReportTable {
        headers: filtered.columns.iter().map(|c| c.header().to_string()).collect(),
        rows: filtered
            .rows
            .iter()
            .map(|cells| ReportRow {
                style: RowStyle::Plain,
                cells: cells.clone(),
            })
            .collect(),
    }
}

pub fn render_table(report: &ReportTable) -> Table {
    let mut table = Table::new();
    table.set_header(report.headers.clone());
    for row in &report.rows {
        let colors = row.style.colors();
        table.add_row(row.cells.iter().map(|value| {
            let cell = Cell::new(value.to_string());
            match colors {
                Some((bg, fg)) => cell.bg(bg).fg(fg),
                None => cell,
            }
        }));
    }
    table
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub upgraded: usize,
    pub downgraded: usize,
    pub new: usize,
    pub unchanged: usize,
    /// Accounts absent from the previous period, whatever their status.
    pub unmatched: usize,
    pub total: usize,
}

pub fn summarize(merged: &MergedTable) -> StatusSummary {
    let mut summary = StatusSummary {
        total: merged.len(),
        ..Default::default()
    };
    for record in &merged.records {
        match record.status {
            Status::Upgraded => summary.upgraded += 1,
            Status::Downgraded => summary.downgraded += 1,
            Status::New => summary.new += 1,
            Status::Unchanged => summary.unchanged += 1,
        }
        if !record.matched {
            summary.unmatched += 1;
        }
    }
    summary
}

pub fn format_summary(summary: &StatusSummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Status", "Accounts"]);
    table.add_row(vec![Cell::new(Status::Upgraded.label().red().bold()), Cell::new(summary.upgraded)]);
    table.add_row(vec![Cell::new(Status::Downgraded.label().green().bold()), Cell::new(summary.downgraded)]);
    table.add_row(vec![Cell::new(Status::New.label().bright_blue().bold()), Cell::new(summary.new)]);
    table.add_row(vec![Cell::new(Status::Unchanged.label()), Cell::new(summary.unchanged)]);
    table.add_row(vec![Cell::new("Total".bold()), Cell::new(summary.total)]);

    let mut out = table.to_string();
    if summary.unmatched > 0 {
        out.push_str(&format!(
            "\n{} account(s) not found in the previous period",
            summary.unmatched
        ));
    }
    out
}
