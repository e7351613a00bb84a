//! Error types for the bank ledger.

use std::path::PathBuf;

use crate::domain::{AccountNumber, Money, NationalId};

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: Money, requested: Money },

    #[error("Credit limit exceeded: limit {limit}, requested {requested}")]
    CreditLimitExceeded { limit: Money, requested: Money },

    #[error("Amount out of range")]
    Overflow,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Persistence errors raised by `BankStore` adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No saved bank at {}", .0.display())]
    NotFound(PathBuf),
}

/// Registry-level errors returned by every `BankLogic` operation.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(NationalId),

    #[error("Account {account} not found for customer {national_id}")]
    AccountNotFound {
        national_id: NationalId,
        account: AccountNumber,
    },

    #[error("Customer already exists: {0}")]
    DuplicateCustomer(NationalId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rejected: {0}")]
    Rejected(DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BankError {
    /// Unknown customer or account.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BankError::CustomerNotFound(_) | BankError::AccountNotFound { .. }
        )
    }

    /// An account rule refused the operation.
    pub fn is_rejected(&self) -> bool {
        matches!(self, BankError::Rejected(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BankError::InvalidInput(_) | BankError::DuplicateCustomer(_)
        )
    }
}

impl From<DomainError> for BankError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NonPositiveAmount => {
                BankError::InvalidInput("Amount must be positive".into())
            }
            DomainError::ValidationError(msg) => BankError::InvalidInput(msg),
            e => BankError::Rejected(e),
        }
    }
}
