//! ftable-core: Letter frequency tables for text streams
//!
//! This crate provides:
//! - A single-pass tally of ASCII letters (case folded) with an optional
//!   leading skip window and every-Nth sampling
//! - The fixed-format report (total, per-letter count, percentage, bar)
//! - Optional TOML configuration for scan defaults

pub mod config;
pub mod error;
pub mod letters;
pub mod report;
pub mod scan;

// Re-exports
pub use config::{default_config_path, load_config, Config, ScanConfig};
pub use error::{FtableError, Result};
pub use letters::{index_letter, letter_index, ALPHABET_LEN};
pub use report::{bar_len, percentage, Report, ReportLine, BAR_MARKER};
pub use scan::{scan, scan_bytes, CounterTable, ScanOptions, Tally};
