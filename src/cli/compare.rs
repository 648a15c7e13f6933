use std::path::Path;

use colored::Colorize;
use tracing::info;

use crate::cli::{output_path, write_export, COMPARE_FILE_NAME};
use crate::error::{KolekError, Result};
use crate::export::serialize;
use crate::loader::load_table;
use crate::render::{build_report, format_summary, render_table, summarize};
use crate::tracer::{compare, MergedTable};

/// Validation failures are shown as-is; anything else is reported as a
/// processing failure with its cause.
pub(crate) fn processing_failure(err: KolekError) -> KolekError {
    match err {
        e @ (KolekError::MissingRequiredColumn { .. }
        | KolekError::NoKnownColumns(_)
        | KolekError::UnsupportedFormat(_)) => e,
        other => KolekError::Other(format!("Failed to process data: {other}")),
    }
}

fn build(previous: &str, current: &str) -> Result<(MergedTable, Vec<u8>)> {
    let previous_table = load_table(Path::new(previous))?;
    let current_table = load_table(Path::new(current))?;
    let merged = compare(&previous_table, &current_table)?;
    let bytes = serialize(&merged)?;
    Ok((merged, bytes))
}

pub fn run(previous: &str, current: &str, output: Option<String>, no_view: bool) -> Result<()> {
    let (merged, bytes) = build(previous, current).map_err(processing_failure)?;

    if !no_view {
        println!(
            "{}",
            "Collectability changes: Data Saat Ini vs Bulan Lalu (by NOREKENING)".bold()
        );
        println!("{}", render_table(&build_report(&merged)));
    }
    println!("{}", format_summary(&summarize(&merged)));

    let path = output_path(output, COMPARE_FILE_NAME);
    info!(path = %path.display(), rows = merged.len(), "Writing comparison export");
    write_export(&bytes, &path)
}
