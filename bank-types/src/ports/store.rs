//! Persistence port trait.
//!
//! Adapters (JSON file, in-memory) implement this trait.

use crate::dto::BankSnapshot;
use crate::error::StoreError;

/// Bulk persistence of the whole registry.
///
/// A save replaces the previously stored snapshot as a whole; a load returns
/// exactly what the last successful save wrote.
pub trait BankStore {
    /// Persists the snapshot, replacing any previous one.
    fn save(&self, snapshot: &BankSnapshot) -> Result<(), StoreError>;

    /// Reads the last saved snapshot.
    fn load(&self) -> Result<BankSnapshot, StoreError>;
}
