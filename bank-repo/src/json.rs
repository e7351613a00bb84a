//! JSON file store adapter.

use std::fs;
use std::path::{Path, PathBuf};

use bank_types::{BankSnapshot, BankStore, StoreError};

use crate::types::StoredBank;

// ─────────────────────────────────────────────────────────────────────────────
// JSON File Store
// ─────────────────────────────────────────────────────────────────────────────

/// Stores the whole bank as one pretty-printed JSON document.
///
/// Saves go to a sibling temporary file that is then renamed over the
/// target, so a reader only ever sees a complete document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the bank file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a bank has been saved at this path.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "bank".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BankStore for JsonFileStore {
    fn save(&self, snapshot: &BankSnapshot) -> Result<(), StoreError> {
        // Ensure the target directory exists.
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&StoredBank::wrap(snapshot.clone()))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::info!(path = %self.path.display(), "Bank file written");
        Ok(())
    }

    fn load(&self) -> Result<BankSnapshot, StoreError> {
        if !self.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let json = fs::read_to_string(&self.path)?;
        let stored: StoredBank =
            serde_json::from_str(&json).map_err(|e| StoreError::Serialization(e.to_string()))?;

        tracing::info!(
            path = %self.path.display(),
            saved_at = %stored.saved_at,
            "Bank file read"
        );
        stored.into_domain()
    }
}
