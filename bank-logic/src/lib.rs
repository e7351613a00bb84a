//! # Bank Logic
//!
//! The registry of customers and accounts for the bank ledger.
//!
//! `BankLogic` is the single entry point for every use-case: creating
//! customers and accounts, deposits, withdrawals, closing accounts,
//! deleting customers and queries. Persistence goes through the
//! `BankStore` port, so any adapter can be injected for save/load.

pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{BankLogic, INITIAL_ACCOUNT_COUNTER};
