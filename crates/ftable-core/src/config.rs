//! Configuration loading for ftable.
//!
//! ```toml
//! [scan]
//! skip = 100
//! period = 2
//! ```
//!
//! Command-line flags take precedence over the file; the file over built-in
//! defaults.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{FtableError, Result};
use crate::scan::ScanOptions;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub scan: Option<ScanConfig>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    pub skip: Option<u64>,
    pub period: Option<u64>,
}

impl Config {
    pub fn skip(&self) -> Option<u64> {
        self.scan.as_ref().and_then(|scan| scan.skip)
    }

    pub fn period(&self) -> Option<u64> {
        self.scan.as_ref().and_then(|scan| scan.period)
    }

    /// Merge command-line overrides with the file values and validate.
    pub fn scan_options(&self, skip: Option<u64>, period: Option<u64>) -> Result<ScanOptions> {
        let defaults = ScanOptions::default();
        let skip = skip.or_else(|| self.skip()).unwrap_or(defaults.skip());
        let period = period
            .or_else(|| self.period())
            .unwrap_or(defaults.period());
        ScanOptions::new(skip, period)
    }
}

/// `config.toml` in the platform config directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ftable").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| FtableError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| FtableError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
