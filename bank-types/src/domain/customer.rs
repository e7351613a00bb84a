//! Customer domain model.

use serde::{Deserialize, Serialize};

use super::account::{Account, AccountNumber, AccountType};
use super::money::Money;
use super::transaction::TransactionEntry;
use crate::dto::{ClosedAccount, CustomerSummary};
use crate::error::{BankError, DomainError};

/// National identity number of a customer (personnummer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NationalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for NationalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bank customer and the accounts they own.
///
/// Deserialization goes through [`Customer::new`], so a stored customer with
/// an empty ID or name is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    national_id: NationalId,
    given_name: String,
    surname: String,
    accounts: Vec<Account>,
}

impl Customer {
    /// Creates a customer without accounts.
    ///
    /// # Validation
    /// - National ID, given name and surname cannot be empty
    pub fn new(
        national_id: NationalId,
        given_name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let given_name = given_name.into();
        let surname = surname.into();

        if national_id.as_str().trim().is_empty() {
            return Err(DomainError::ValidationError(
                "National ID cannot be empty".into(),
            ));
        }
        if given_name.trim().is_empty() || surname.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Customer name cannot be empty".into(),
            ));
        }

        Ok(Self {
            national_id,
            given_name,
            surname,
            accounts: Vec::new(),
        })
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            national_id: self.national_id.clone(),
            given_name: self.given_name.clone(),
            surname: self.surname.clone(),
        }
    }

    /// Owned accounts in the order they were opened.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account_numbers(&self) -> Vec<AccountNumber> {
        self.accounts.iter().map(Account::number).collect()
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    pub fn account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    /// Opens an account under a number issued by the registry.
    pub fn add_account(&mut self, number: AccountNumber, account_type: AccountType) -> AccountNumber {
        self.accounts.push(Account::open(number, account_type));
        number
    }

    /// Deposits into one of this customer's accounts.
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Money,
    ) -> Result<&TransactionEntry, BankError> {
        let amount = Money::positive(amount.amount())?;
        let account = self.find_mut(number)?;
        Ok(account.deposit(amount)?)
    }

    /// Withdraws from one of this customer's accounts.
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Money,
    ) -> Result<&TransactionEntry, BankError> {
        let amount = Money::positive(amount.amount())?;
        let account = self.find_mut(number)?;
        Ok(account.withdraw(amount)?)
    }

    /// Closes an account and returns its final record.
    pub fn close_account(&mut self, number: AccountNumber) -> Result<ClosedAccount, BankError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.number() == number)
            .ok_or_else(|| self.not_found(number))?;

        let closed = self.accounts[index].closing_snapshot()?;
        self.accounts.remove(index);
        Ok(closed)
    }

    /// Closes every account, returning the records in ownership order.
    pub fn close_all_accounts(&mut self) -> Result<Vec<ClosedAccount>, BankError> {
        // Snapshot first so a failure leaves every account in place.
        let closed = self
            .accounts
            .iter()
            .map(Account::closing_snapshot)
            .collect::<Result<Vec<_>, _>>()?;
        self.accounts.clear();
        Ok(closed)
    }

    /// Updates the given name and/or surname.
    ///
    /// Each field changes only when a non-empty value is supplied.
    /// Returns whether anything changed.
    pub fn set_name(&mut self, given_name: Option<&str>, surname: Option<&str>) -> bool {
        let mut changed = false;
        if let Some(name) = given_name.filter(|n| !n.trim().is_empty()) {
            self.given_name = name.to_string();
            changed = true;
        }
        if let Some(name) = surname.filter(|n| !n.trim().is_empty()) {
            self.surname = name.to_string();
            changed = true;
        }
        changed
    }

    /// History of one account.
    pub fn transactions(&self, number: AccountNumber) -> Result<&[TransactionEntry], BankError> {
        self.account(number)
            .map(Account::history)
            .ok_or_else(|| self.not_found(number))
    }

    fn find_mut(&mut self, number: AccountNumber) -> Result<&mut Account, BankError> {
        match self.accounts.iter().position(|a| a.number() == number) {
            Some(index) => Ok(&mut self.accounts[index]),
            None => Err(self.not_found(number)),
        }
    }

    fn not_found(&self, number: AccountNumber) -> BankError {
        BankError::AccountNotFound {
            national_id: self.national_id.clone(),
            account: number,
        }
    }
}

/// Stored form of a customer, checked before it becomes a [`Customer`].
#[derive(Deserialize)]
struct CustomerRecord {
    national_id: NationalId,
    given_name: String,
    surname: String,
    accounts: Vec<Account>,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = DomainError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        let mut customer = Customer::new(record.national_id, record.given_name, record.surname)?;
        customer.accounts = record.accounts;
        Ok(customer)
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.national_id, self.given_name, self.surname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer() -> Customer {
        Customer::new(NationalId::from("19900101-1234"), "Anna", "Berg").unwrap()
    }

    #[test]
    fn test_customer_creation() {
        let c = customer();
        assert_eq!(c.national_id().as_str(), "19900101-1234");
        assert_eq!(c.to_string(), "19900101-1234 Anna Berg");
        assert!(c.accounts().is_empty());
    }

    #[test]
    fn test_empty_fields_fail() {
        let result = Customer::new(NationalId::from(""), "Anna", "Berg");
        assert!(matches!(result, Err(DomainError::ValidationError(_))));

        let result = Customer::new(NationalId::from("1"), "  ", "Berg");
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut c = customer();
        let number = c.add_account(AccountNumber::new(1001), AccountType::Savings);

        let result = c.deposit(number, Money::ZERO);
        assert!(matches!(
            result,
            Err(BankError::InvalidInput(_))
        ));
        let result = c.deposit(number, Money::new(dec!(-10)));
        assert!(matches!(result, Err(BankError::InvalidInput(_))));

        let account = c.account(number).unwrap();
        assert_eq!(account.balance(), Money::ZERO);
        assert!(account.history().is_empty());
    }

    #[test]
    fn test_deposit_unknown_account() {
        let mut c = customer();
        let result = c.deposit(AccountNumber::new(42), Money::from_units(10));
        assert!(matches!(result, Err(BankError::AccountNotFound { .. })));
    }

    #[test]
    fn test_withdraw_rule_violation() {
        let mut c = customer();
        let number = c.add_account(AccountNumber::new(1001), AccountType::Savings);
        let result = c.withdraw(number, Money::from_units(1));
        assert!(matches!(
            result,
            Err(BankError::Rejected(DomainError::InsufficientFunds { .. }))
        ));
    }

    #[test]
    fn test_close_account() {
        let mut c = customer();
        let savings = c.add_account(AccountNumber::new(1001), AccountType::Savings);
        let credit = c.add_account(AccountNumber::new(1002), AccountType::Credit);
        c.deposit(savings, Money::from_units(1000)).unwrap();

        let closed = c.close_account(savings).unwrap();
        assert_eq!(closed.interest, Money::new(dec!(24)));
        assert_eq!(c.account_numbers(), vec![credit]);
        assert!(c.account(savings).is_none());

        let again = c.close_account(savings);
        assert!(matches!(again, Err(BankError::AccountNotFound { .. })));
    }

    #[test]
    fn test_close_all_accounts_keeps_order() {
        let mut c = customer();
        c.add_account(AccountNumber::new(1001), AccountType::Savings);
        c.add_account(AccountNumber::new(1002), AccountType::Credit);
        c.add_account(AccountNumber::new(1003), AccountType::Savings);

        let closed = c.close_all_accounts().unwrap();
        let numbers: Vec<u32> = closed.iter().map(|a| a.number.value()).collect();
        assert_eq!(numbers, vec![1001, 1002, 1003]);
        assert!(c.accounts().is_empty());
    }

    #[test]
    fn test_set_name() {
        let mut c = customer();
        assert!(!c.set_name(None, Some("")));
        assert_eq!(c.surname(), "Berg");

        assert!(c.set_name(Some("Annika"), None));
        assert_eq!(c.given_name(), "Annika");
        assert_eq!(c.surname(), "Berg");

        assert!(c.set_name(Some(""), Some("Lind")));
        assert_eq!(c.given_name(), "Annika");
        assert_eq!(c.surname(), "Lind");
    }

    #[test]
    fn test_transactions_lookup() {
        let mut c = customer();
        let number = c.add_account(AccountNumber::new(1001), AccountType::Credit);
        c.deposit(number, Money::from_units(5)).unwrap();
        c.withdraw(number, Money::from_units(2)).unwrap();

        let history = c.transactions(number).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].balance_after, Money::from_units(3));

        assert!(c.transactions(AccountNumber::new(9)).is_err());
    }

    #[test]
    fn test_deserialize_keeps_accounts() {
        let mut c = customer();
        let number = c.add_account(AccountNumber::new(1001), AccountType::Savings);
        c.deposit(number, Money::from_units(300)).unwrap();

        let json = serde_json::to_string(&c).unwrap();
        let restored: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, c);
    }

    #[test]
    fn test_deserialize_rejects_empty_name() {
        let json = r#"{"national_id":"19900101-1234","given_name":" ","surname":"Berg","accounts":[]}"#;
        let err = serde_json::from_str::<Customer>(json).unwrap_err();
        assert!(err.to_string().contains("Customer name cannot be empty"));

        let json = r#"{"national_id":"","given_name":"Anna","surname":"Berg","accounts":[]}"#;
        assert!(serde_json::from_str::<Customer>(json).is_err());
    }
}
