//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The registry depends on these traits, not concrete implementations.

mod store;

pub use store::BankStore;
