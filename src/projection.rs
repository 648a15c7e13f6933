use tracing::debug;

use crate::error::{KolekError, Result};
use crate::models::{AccountRecord, Column, Period, RawTable, Scalar};
use crate::normalize::{normalize_account_id, normalize_rating};

/// A raw table reduced to the fixed column set, ratings already normalised.
#[derive(Debug, Clone)]
pub struct ProjectedTable {
    pub period: Period,
    /// Known columns present in the source, in projection order.
    pub columns: Vec<Column>,
    pub records: Vec<AccountRecord>,
}

impl ProjectedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Known columns present in `table`, with their source positions.
fn present_columns(table: &RawTable) -> Vec<(Column, usize)> {
    Column::ALL
        .iter()
        .filter_map(|&col| table.column_index(col.header()).map(|idx| (col, idx)))
        .collect()
}

fn dropped_headers(table: &RawTable) -> Vec<&str> {
    table
        .headers
        .iter()
        .map(|h| h.as_str())
        .filter(|h| Column::from_header(h).is_none())
        .collect()
}

pub fn project_and_normalize(table: &RawTable, period: Period) -> Result<ProjectedTable> {
    let present = present_columns(table);

    let missing: Vec<&'static str> = Column::REQUIRED
        .iter()
        .filter(|req| !present.iter().any(|(c, _)| c == *req))
        .map(|c| c.header())
        .collect();
    if !missing.is_empty() {
        return Err(KolekError::MissingRequiredColumn { period, missing });
    }

    let dropped = dropped_headers(table);
    if !dropped.is_empty() {
        debug!(%period, columns = ?dropped, "Dropping unknown columns");
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let mut record = AccountRecord::new(String::new(), 0);
        for &(col, idx) in &present {
            let cell = table.cell(row, idx);
            match col {
                Column::AccountId => record.account_id = normalize_account_id(cell),
                Column::Rating => record.rating = normalize_rating(cell),
                other => {
                    if let Some(slot) = record.optional_field_mut(other) {
                        *slot = Some(cell.clone());
                    }
                }
            }
        }
        records.push(record);
    }

    debug!(%period, rows = records.len(), "Projected table");
    Ok(ProjectedTable {
        period,
        columns: present.into_iter().map(|(c, _)| c).collect(),
        records,
    })
}

// ---------------------------------------------------------------------------
// Single-file column filter
// ---------------------------------------------------------------------------

/// Known columns of one file, values kept as read.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Scalar>>,
}

/// Keep whichever known columns `table` has. The account number is turned
/// into text with decimal commas rewritten as dots.
pub fn filter_columns(table: &RawTable, source: &str) -> Result<FilteredTable> {
    let present = present_columns(table);
    if present.is_empty() {
        return Err(KolekError::NoKnownColumns(source.to_string()));
    }

    let rows = (0..table.rows.len())
        .map(|row| {
            present
                .iter()
                .map(|&(col, idx)| {
                    let cell = table.cell(row, idx);
                    if col == Column::AccountId {
                        Scalar::Text(account_text(cell))
                    } else {
                        cell.clone()
                    }
                })
                .collect()
        })
        .collect();

    Ok(FilteredTable {
        columns: present.into_iter().map(|(c, _)| c).collect(),
        rows,
    })
}

fn account_text(cell: &Scalar) -> String {
    match cell {
        // blank cells read as "nan" when stringified by the legacy tool
        Scalar::Empty => "nan".to_string(),
        other => other.to_string().replace(',', "."),
    }
}
