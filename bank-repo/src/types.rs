//! On-disk envelope around the bank snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bank_types::{BankSnapshot, StoreError};

/// Layout version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// File contents written by `JsonFileStore`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredBank {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub bank: BankSnapshot,
}

impl StoredBank {
    pub fn wrap(bank: BankSnapshot) -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            bank,
        }
    }

    /// Unwraps the snapshot, refusing layouts this crate does not know.
    pub fn into_domain(self) -> Result<BankSnapshot, StoreError> {
        if self.version != FORMAT_VERSION {
            return Err(StoreError::Serialization(format!(
                "Unsupported bank file version {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(self.bank)
    }
}
