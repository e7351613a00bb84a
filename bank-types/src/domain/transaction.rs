//! Transaction history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Timestamp layout used when an entry is rendered as text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming into an account
    Deposit,
    /// Money leaving an account, including any withdrawal fee
    Withdrawal,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "DEPOSIT"),
            TransactionType::Withdrawal => write!(f, "WITHDRAWAL"),
        }
    }
}

/// A recorded change to an account balance.
///
/// Entries are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Type of transaction
    pub transaction_type: TransactionType,
    /// Signed change to the balance (negative for withdrawals)
    pub amount: Money,
    /// Balance after the change was applied
    pub balance_after: Money,
    /// When the change was applied
    pub created_at: DateTime<Utc>,
}

impl TransactionEntry {
    /// Creates a new deposit entry.
    pub fn deposit(amount: Money, balance_after: Money) -> Self {
        Self {
            transaction_type: TransactionType::Deposit,
            amount,
            balance_after,
            created_at: Utc::now(),
        }
    }

    /// Creates a new withdrawal entry from the amount actually charged.
    pub fn withdrawal(charged: Money, balance_after: Money) -> Self {
        Self {
            transaction_type: TransactionType::Withdrawal,
            amount: charged.negate(),
            balance_after,
            created_at: Utc::now(),
        }
    }

    /// Reconstructs an entry from stored fields.
    pub fn from_parts(
        transaction_type: TransactionType,
        amount: Money,
        balance_after: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_type,
            amount,
            balance_after,
            created_at,
        }
    }
}

impl std::fmt::Display for TransactionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} Balance: {}",
            self.created_at.format(TIMESTAMP_FORMAT),
            self.amount,
            self.balance_after
        )
    }
}
