// Collectability tracing: join the current period onto the previous one by
// account number and label each account's transition.
// Pure functions, no IO.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{classify, Column, MergedRecord, Period, RawTable, Status};
use crate::projection::{project_and_normalize, ProjectedTable};

#[derive(Debug, Clone)]
pub struct MergedTable {
    /// Known columns present in the current-period table.
    pub columns: Vec<Column>,
    pub records: Vec<MergedRecord>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, status: Status) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}

/// Index previous-period ratings by account number. The first occurrence of
/// a duplicated account wins; blank account numbers are not indexed.
fn previous_index(previous: &ProjectedTable) -> HashMap<&str, u32> {
    let mut index: HashMap<&str, u32> = HashMap::with_capacity(previous.len());
    let mut duplicates = 0usize;
    for record in &previous.records {
        if record.account_id.is_empty() {
            continue;
        }
        if index.contains_key(record.account_id.as_str()) {
            duplicates += 1;
            continue;
        }
        index.insert(record.account_id.as_str(), record.rating);
    }
    if duplicates > 0 {
        warn!(duplicates, "Previous period has duplicate account numbers; first occurrence used");
    }
    index
}

/// Stable left join of `current` onto `previous`. Produces exactly one row
/// per current-period row, in input order.
pub fn join(current: &ProjectedTable, previous: &ProjectedTable) -> MergedTable {
    let index = previous_index(previous);

    let records = current
        .records
        .iter()
        .map(|record| {
            let found = if record.account_id.is_empty() {
                None
            } else {
                index.get(record.account_id.as_str()).copied()
            };
            let rating_previous = found.unwrap_or(0);
            let rating_current = record.rating;
            MergedRecord {
                current: record.clone(),
                rating_previous,
                rating_current,
                status: classify(rating_previous, rating_current),
                matched: found.is_some(),
            }
        })
        .collect();

    MergedTable {
        columns: current.columns.clone(),
        records,
    }
}

/// Validate and project both tables, then join them. Nothing is joined
/// unless both tables carry the required columns.
pub fn compare(previous: &RawTable, current: &RawTable) -> Result<MergedTable> {
    let previous = project_and_normalize(previous, Period::Previous)?;
    let current = project_and_normalize(current, Period::Current)?;

    let merged = join(&current, &previous);
    info!(
        current = current.len(),
        previous = previous.len(),
        unmatched = merged.records.iter().filter(|r| !r.matched).count(),
        "Joined collectability tables"
    );
    Ok(merged)
}
