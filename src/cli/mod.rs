pub mod compare;
pub mod config;
pub mod filter;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::settings::get_export_dir;

pub(crate) const COMPARE_FILE_NAME: &str = "gabungan_data_perubahan_kolektabilitas.xlsx";
pub(crate) const FILTER_FILE_NAME: &str = "filtered_data.xlsx";

#[derive(Parser)]
#[command(
    name = "kolek",
    about = "Trace month-over-month changes in loan collectability ratings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the previous period (Bulan Lalu) with the current period (Data Saat Ini).
    Compare {
        /// Previous-period spreadsheet (.xls, .xlsx or .csv)
        previous: String,
        /// Current-period spreadsheet (.xls, .xlsx or .csv)
        current: String,
        /// Output .xlsx path (default: <export_dir>/gabungan_data_perubahan_kolektabilitas.xlsx)
        #[arg(long)]
        output: Option<String>,
        /// Skip printing the highlighted table
        #[arg(long = "no-view")]
        no_view: bool,
    },
    /// Keep only the known collectability columns of a single spreadsheet.
    Filter {
        /// Spreadsheet to filter (.xls, .xlsx or .csv)
        file: String,
        /// Output .xlsx path (default: <export_dir>/filtered_data.xlsx)
        #[arg(long)]
        output: Option<String>,
        /// Skip printing the filtered table
        #[arg(long = "no-view")]
        no_view: bool,
    },
    /// Show or update settings.
    Config {
        /// Default directory for exported spreadsheets
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
    },
}

/// Resolve the export destination, falling back to the configured export dir.
pub(crate) fn output_path(output: Option<String>, default_name: &str) -> PathBuf {
    output
        .map(PathBuf::from)
        .unwrap_or_else(|| get_export_dir().join(default_name))
}

pub(crate) fn write_export(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}
