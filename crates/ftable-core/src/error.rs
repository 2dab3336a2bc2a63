//! Error type shared by the scan, config, and CLI layers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// ftable errors
#[derive(Debug, Error)]
pub enum FtableError {
    #[error("Invalid sample period {0}: must be at least 1")]
    InvalidSamplePeriod(u64),
    #[error("Invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error("Failed to open input file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open output file {}: {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("Failed to write report: {0}")]
    Write(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, FtableError>;

impl FtableError {
    /// Process exit status for this error.
    ///
    /// - 2: bad configuration (same status as a usage error)
    /// - 3: an input or output file could not be opened
    /// - 1: I/O failed after the files were open
    pub fn exit_code(&self) -> u8 {
        match self {
            FtableError::InvalidSamplePeriod(_) | FtableError::Config { .. } => 2,
            FtableError::OpenInput { .. } | FtableError::OpenOutput { .. } => 3,
            FtableError::Read(_) | FtableError::Write(_) => 1,
        }
    }
}
