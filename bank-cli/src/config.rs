//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data/bank.json";
pub const DEFAULT_EXPORT_DIR: &str = "data/exports";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the bank is saved between runs
    pub data_file: PathBuf,
    /// Directory for transaction book exports
    pub export_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup("BANK_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let export_dir = lookup("BANK_EXPORT_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_DIR.to_string());

        Self {
            data_file: data_file.into(),
            export_dir: export_dir.into(),
        }
    }

    /// Replaces the data file when one was given on the command line.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}
