//! # Bank Types
//!
//! Domain types and port traits for the bank ledger.
//! This crate has ZERO IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the workspace:
//! - `domain/` - Pure domain types (Money, Account, Customer, TransactionEntry)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Records handed back to callers (closure snapshots, summaries)
//! - `error/` - Domain, store and registry error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Account, AccountKind, AccountNumber, AccountType, Customer, Money, NationalId,
    TransactionEntry, TransactionType,
};
pub use dto::*;
pub use error::{BankError, DomainError, StoreError};
pub use ports::BankStore;
