//! Month-over-month loan collectability tracing.
//!
//! Loads two period snapshots, joins them by account number, labels each
//! account's rating transition and renders the result for the terminal and
//! as an `.xlsx` export.

pub mod cli;
pub mod error;
pub mod export;
pub mod fmt;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod projection;
pub mod render;
pub mod settings;
pub mod tracer;
