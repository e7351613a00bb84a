//! In-memory store adapter.

use std::cell::RefCell;

use bank_types::{BankSnapshot, BankStore, StoreError};

/// Keeps the last saved snapshot in memory. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<BankSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.borrow().is_none()
    }
}

impl BankStore for MemoryStore {
    fn save(&self, snapshot: &BankSnapshot) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<BankSnapshot, StoreError> {
        self.saved
            .borrow()
            .clone()
            .ok_or_else(|| StoreError::NotFound("<memory>".into()))
    }
}
