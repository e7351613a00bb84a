//! Records handed back to callers of the registry.

use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountNumber, AccountType, Customer, Money, NationalId};

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a customer without their accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub national_id: NationalId,
    pub given_name: String,
    pub surname: String,
}

impl std::fmt::Display for CustomerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.national_id, self.given_name, self.surname)
    }
}

/// A customer together with the current state of each account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub customer: CustomerSummary,
    pub accounts: Vec<AccountInfo>,
}

/// Result of deleting a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedCustomer {
    pub customer: CustomerSummary,
    /// One record per account, in the order the accounts were opened
    pub closed_accounts: Vec<ClosedAccount>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Display view of an open account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub number: AccountNumber,
    pub account_type: AccountType,
    pub balance: Money,
    /// Rate descriptor for the current balance, e.g. `2.4 %`
    pub interest_rate: String,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            number: account.number(),
            account_type: account.account_type(),
            balance: account.balance(),
            interest_rate: account.interest_label().to_string(),
        }
    }
}

impl std::fmt::Display for AccountInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.number, self.balance, self.account_type, self.interest_rate
        )
    }
}

/// Snapshot taken when an account is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedAccount {
    pub number: AccountNumber,
    pub account_type: AccountType,
    /// Balance at closing time
    pub balance: Money,
    /// Final interest computed from the closing balance
    pub interest: Money,
}

impl std::fmt::Display for ClosedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.number, self.balance, self.account_type, self.interest
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// The whole registry as a single persistable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSnapshot {
    pub customers: Vec<Customer>,
    /// Last account number handed out
    pub next_account_number: u32,
}
