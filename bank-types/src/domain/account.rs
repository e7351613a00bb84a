//! Account domain model.
//!
//! An [`Account`] composes the fields every account has (number, balance,
//! history) with an [`AccountKind`] tag that decides the withdrawal and
//! interest rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::TransactionEntry;
use crate::dto::ClosedAccount;
use crate::error::DomainError;

/// Factor applied to every savings withdrawal after the first one.
pub const SAVINGS_WITHDRAWAL_FACTOR: Decimal = dec!(1.02);
/// Interest paid on a savings balance at closing.
pub const SAVINGS_CLOSING_RATE: Decimal = dec!(0.024);
/// Lowest balance a credit account may reach.
pub const CREDIT_LIMIT: Decimal = dec!(-5000);
/// Closing rate for a credit account with a non-negative balance.
pub const CREDIT_POSITIVE_RATE: Decimal = dec!(0.011);
/// Closing rate for a credit account in overdraft.
pub const CREDIT_NEGATIVE_RATE: Decimal = dec!(0.05);

/// Account number issued by the bank registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(u32);

impl AccountNumber {
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Label of an account variant, used when opening accounts and in records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Credit,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Savings => write!(f, "Savings"),
            AccountType::Credit => write!(f, "Credit"),
        }
    }
}

/// Variant tag plus the per-variant state the rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    /// Savings account; `withdrawals` counts successful withdrawals and never resets.
    Savings { withdrawals: u32 },
    /// Credit account with a fixed overdraft floor.
    Credit,
}

impl AccountKind {
    /// Fresh state for a newly opened account of the given type.
    pub fn open(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Savings => AccountKind::Savings { withdrawals: 0 },
            AccountType::Credit => AccountKind::Credit,
        }
    }

    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Savings { .. } => AccountType::Savings,
            AccountKind::Credit => AccountType::Credit,
        }
    }

    /// Amount actually taken from the balance for a withdrawal request.
    pub fn charge_for(&self, requested: Money) -> Result<Money, DomainError> {
        match self {
            AccountKind::Savings { withdrawals } if *withdrawals >= 1 => {
                requested.checked_scale(SAVINGS_WITHDRAWAL_FACTOR)
            }
            AccountKind::Savings { .. } | AccountKind::Credit => Ok(requested),
        }
    }

    /// Checks that `charged` may leave an account holding `balance`.
    pub fn check_withdrawal(&self, balance: Money, charged: Money) -> Result<(), DomainError> {
        match self {
            AccountKind::Savings { .. } => {
                if balance < charged {
                    return Err(DomainError::InsufficientFunds {
                        available: balance,
                        requested: charged,
                    });
                }
            }
            AccountKind::Credit => {
                if balance.checked_sub(charged)? < Money::new(CREDIT_LIMIT) {
                    return Err(DomainError::CreditLimitExceeded {
                        limit: Money::new(CREDIT_LIMIT),
                        requested: charged,
                    });
                }
            }
        }
        Ok(())
    }

    fn record_withdrawal(&mut self) {
        if let AccountKind::Savings { withdrawals } = self {
            *withdrawals = withdrawals.saturating_add(1);
        }
    }

    /// Closing interest rate for the given balance.
    pub fn closing_rate(&self, balance: Money) -> Decimal {
        match self {
            AccountKind::Savings { .. } => SAVINGS_CLOSING_RATE,
            AccountKind::Credit if balance.is_negative() => CREDIT_NEGATIVE_RATE,
            AccountKind::Credit => CREDIT_POSITIVE_RATE,
        }
    }

    /// Rate descriptor shown next to the balance.
    pub fn interest_label(&self, balance: Money) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "2.4 %",
            AccountKind::Credit if balance.is_negative() => "5 %",
            AccountKind::Credit => "1.1 %",
        }
    }
}

/// A bank account owned by exactly one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    number: AccountNumber,
    kind: AccountKind,
    balance: Money,
    history: Vec<TransactionEntry>,
}

impl Account {
    /// Opens an account with zero balance and empty history.
    pub fn open(number: AccountNumber, account_type: AccountType) -> Self {
        Self {
            number,
            kind: AccountKind::open(account_type),
            balance: Money::ZERO,
            history: Vec::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Transaction history in the order the changes were applied.
    pub fn history(&self) -> &[TransactionEntry] {
        &self.history
    }

    /// Adds `amount` to the balance and records it.
    ///
    /// The sign of `amount` is not checked here; `Customer::deposit` rejects
    /// non-positive amounts before delegating.
    pub fn deposit(&mut self, amount: Money) -> Result<&TransactionEntry, DomainError> {
        let balance = self.balance.checked_add(amount)?;
        self.balance = balance;
        Ok(self.push(TransactionEntry::deposit(amount, balance)))
    }

    /// Withdraws `amount` according to the account's rules.
    ///
    /// On failure the account is left unchanged.
    pub fn withdraw(&mut self, amount: Money) -> Result<&TransactionEntry, DomainError> {
        let charged = self.kind.charge_for(amount)?;
        self.kind.check_withdrawal(self.balance, charged)?;

        let balance = self.balance.checked_sub(charged)?;
        self.balance = balance;
        self.kind.record_withdrawal();
        Ok(self.push(TransactionEntry::withdrawal(charged, balance)))
    }

    /// Interest the customer would receive (or owe) if the account closed now.
    pub fn final_interest(&self) -> Result<Money, DomainError> {
        self.balance
            .checked_scale(self.kind.closing_rate(self.balance))
    }

    pub fn interest_label(&self) -> &'static str {
        self.kind.interest_label(self.balance)
    }

    /// Captures the closure record for this account.
    pub fn closing_snapshot(&self) -> Result<ClosedAccount, DomainError> {
        Ok(ClosedAccount {
            number: self.number,
            account_type: self.account_type(),
            balance: self.balance,
            interest: self.final_interest()?,
        })
    }

    fn push(&mut self, entry: TransactionEntry) -> &TransactionEntry {
        self.history.push(entry);
        &self.history[self.history.len() - 1]
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.number,
            self.balance,
            self.account_type(),
            self.interest_label()
        )
    }
}
