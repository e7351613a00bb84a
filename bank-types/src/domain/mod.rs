//! Domain models for the bank ledger.

pub mod account;
pub mod customer;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountKind, AccountNumber, AccountType};
pub use customer::{Customer, NationalId};
pub use money::Money;
pub use transaction::{TransactionEntry, TransactionType};
