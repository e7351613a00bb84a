//! # Bank Repository
//!
//! Concrete store implementations (adapters) for the bank ledger.
//! This crate provides adapters that implement the `BankStore` port,
//! plus the plain-text transaction book export.

pub mod book;
pub mod json;
pub mod memory;

mod types;

pub use book::TransactionBook;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
