use std::path::Path;

use tracing::info;

use crate::cli::compare::processing_failure;
use crate::cli::{output_path, write_export, FILTER_FILE_NAME};
use crate::error::Result;
use crate::export::serialize_filtered;
use crate::loader::load_table;
use crate::projection::{filter_columns, FilteredTable};
use crate::render::{build_filtered_report, render_table};

fn build(file: &str) -> Result<(FilteredTable, Vec<u8>)> {
    let table = load_table(Path::new(file))?;
    let filtered = filter_columns(&table, file)?;
    let bytes = serialize_filtered(&filtered)?;
    Ok((filtered, bytes))
}

pub fn run(file: &str, output: Option<String>, no_view: bool) -> Result<()> {
    let (filtered, bytes) = build(file).map_err(processing_failure)?;

    if !no_view {
        println!("{}", render_table(&build_filtered_report(&filtered)));
    }
    println!("{} rows, {} columns kept", filtered.rows.len(), filtered.columns.len());

    let path = output_path(output, FILTER_FILE_NAME);
    info!(path = %path.display(), "Writing filtered export");
    write_export(&bytes, &path)
}
