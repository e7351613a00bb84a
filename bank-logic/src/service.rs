//! Bank registry service
//!
//! Resolves customers by national ID and delegates to the customer and
//! account rules. Contains NO infrastructure logic; persistence is reached
//! only through the `BankStore` port.

use std::collections::HashSet;

use rust_decimal::Decimal;

use bank_types::{
    AccountInfo, AccountNumber, AccountType, BankError, BankSnapshot, BankStore, ClosedAccount,
    Customer, CustomerDetails, CustomerSummary, DeletedCustomer, DomainError, Money, NationalId,
    TransactionEntry,
};

/// Counter value of an empty registry; the first issued number is one higher.
pub const INITIAL_ACCOUNT_COUNTER: u32 = 1000;

/// Registry of all customers and the account-number counter.
///
/// Lookups are linear scans over customers in insertion order.
#[derive(Debug, Clone)]
pub struct BankLogic {
    customers: Vec<Customer>,
    next_account_number: u32,
}

impl Default for BankLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl BankLogic {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            customers: Vec::new(),
            next_account_number: INITIAL_ACCOUNT_COUNTER,
        }
    }

    /// Rebuilds a registry from a persisted snapshot.
    ///
    /// # Validation
    /// - National IDs must be unique
    /// - Account numbers must be unique across all customers
    /// - The counter must not be below any issued account number
    pub fn from_snapshot(snapshot: BankSnapshot) -> Result<Self, BankError> {
        let mut ids = HashSet::new();
        let mut numbers = HashSet::new();

        for customer in &snapshot.customers {
            if !ids.insert(customer.national_id().clone()) {
                return Err(BankError::InvalidInput(format!(
                    "Snapshot contains customer {} twice",
                    customer.national_id()
                )));
            }
            for number in customer.account_numbers() {
                if !numbers.insert(number) {
                    return Err(BankError::InvalidInput(format!(
                        "Snapshot contains account {} twice",
                        number
                    )));
                }
                if number.value() > snapshot.next_account_number {
                    return Err(BankError::InvalidInput(format!(
                        "Account {} is above the counter {}",
                        number, snapshot.next_account_number
                    )));
                }
            }
        }

        Ok(Self {
            customers: snapshot.customers,
            next_account_number: snapshot.next_account_number,
        })
    }

    /// Copies the whole registry into a persistable value.
    pub fn snapshot(&self) -> BankSnapshot {
        BankSnapshot {
            customers: self.customers.clone(),
            next_account_number: self.next_account_number,
        }
    }

    /// Saves the registry through the given store.
    pub fn save_to<S: BankStore>(&self, store: &S) -> Result<(), BankError> {
        store.save(&self.snapshot())?;
        tracing::info!(
            customers = self.customers.len(),
            counter = self.next_account_number,
            "Bank saved"
        );
        Ok(())
    }

    /// Replaces the registry with the snapshot held by the given store.
    ///
    /// On error the current state is kept.
    pub fn load_from<S: BankStore>(&mut self, store: &S) -> Result<(), BankError> {
        let loaded = Self::from_snapshot(store.load()?)?;
        *self = loaded;
        tracing::info!(
            customers = self.customers.len(),
            counter = self.next_account_number,
            "Bank loaded"
        );
        Ok(())
    }

    /// Last account number handed out.
    pub fn next_account_number(&self) -> u32 {
        self.next_account_number
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Customer Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new customer.
    pub fn create_customer(
        &mut self,
        given_name: &str,
        surname: &str,
        national_id: &str,
    ) -> Result<(), BankError> {
        if self.customer(national_id).is_some() {
            return Err(BankError::DuplicateCustomer(NationalId::from(national_id)));
        }

        let customer = Customer::new(NationalId::from(national_id), given_name, surname)?;
        self.customers.push(customer);
        tracing::info!(national_id, "Customer created");
        Ok(())
    }

    pub fn customer(&self, national_id: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.national_id() == national_id)
    }

    /// All customers in registration order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn all_customers(&self) -> Vec<CustomerSummary> {
        self.customers.iter().map(Customer::summary).collect()
    }

    /// A customer and each of their accounts.
    pub fn customer_details(&self, national_id: &str) -> Result<CustomerDetails, BankError> {
        let customer = self.find(national_id)?;
        Ok(CustomerDetails {
            customer: customer.summary(),
            accounts: customer.accounts().iter().map(AccountInfo::from).collect(),
        })
    }

    /// Changes given name and/or surname. Returns `Ok(false)` if nothing changed.
    pub fn change_customer_name(
        &mut self,
        given_name: Option<&str>,
        surname: Option<&str>,
        national_id: &str,
    ) -> Result<bool, BankError> {
        let changed = self.find_mut(national_id)?.set_name(given_name, surname);
        if changed {
            tracing::info!(national_id, "Customer renamed");
        }
        Ok(changed)
    }

    /// Closes all accounts of a customer and removes the customer.
    pub fn delete_customer(&mut self, national_id: &str) -> Result<DeletedCustomer, BankError> {
        let index = self
            .customers
            .iter()
            .position(|c| c.national_id() == national_id)
            .ok_or_else(|| BankError::CustomerNotFound(NationalId::from(national_id)))?;

        let closed_accounts = self.customers[index].close_all_accounts()?;
        let customer = self.customers.remove(index);

        tracing::info!(
            national_id,
            closed = closed_accounts.len(),
            "Customer deleted"
        );
        Ok(DeletedCustomer {
            customer: customer.summary(),
            closed_accounts,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Account Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens a savings account and returns its number.
    pub fn create_savings_account(&mut self, national_id: &str) -> Result<AccountNumber, BankError> {
        self.create_account(national_id, AccountType::Savings)
    }

    /// Opens a credit account and returns its number.
    pub fn create_credit_account(&mut self, national_id: &str) -> Result<AccountNumber, BankError> {
        self.create_account(national_id, AccountType::Credit)
    }

    fn create_account(
        &mut self,
        national_id: &str,
        account_type: AccountType,
    ) -> Result<AccountNumber, BankError> {
        let index = self.index_of(national_id)?;
        let next = self
            .next_account_number
            .checked_add(1)
            .ok_or(BankError::Rejected(DomainError::Overflow))?;

        self.next_account_number = next;
        let number = self.customers[index].add_account(AccountNumber::new(next), account_type);
        tracing::info!(national_id, account = %number, %account_type, "Account opened");
        Ok(number)
    }

    pub fn account_info(
        &self,
        national_id: &str,
        number: AccountNumber,
    ) -> Result<AccountInfo, BankError> {
        let customer = self.find(national_id)?;
        customer
            .account(number)
            .map(AccountInfo::from)
            .ok_or_else(|| account_not_found(national_id, number))
    }

    pub fn account_numbers(&self, national_id: &str) -> Result<Vec<AccountNumber>, BankError> {
        Ok(self.find(national_id)?.account_numbers())
    }

    /// Closes one account and returns its final record.
    pub fn close_account(
        &mut self,
        national_id: &str,
        number: AccountNumber,
    ) -> Result<ClosedAccount, BankError> {
        let closed = self.find_mut(national_id)?.close_account(number)?;
        tracing::info!(
            national_id,
            account = %number,
            balance = %closed.balance,
            interest = %closed.interest,
            "Account closed"
        );
        Ok(closed)
    }

    /// History of one account in the order it happened.
    pub fn transactions(
        &self,
        national_id: &str,
        number: AccountNumber,
    ) -> Result<&[TransactionEntry], BankError> {
        self.find(national_id)?.transactions(number)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Deposits a decimal amount. Returns the new balance.
    pub fn deposit(
        &mut self,
        national_id: &str,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Money, BankError> {
        let entry = self
            .find_mut(national_id)?
            .deposit(number, Money::new(amount))?;
        tracing::debug!(national_id, account = %number, amount = %entry.amount, "Deposit");
        Ok(entry.balance_after)
    }

    /// Withdraws a whole number of currency units. Returns the new balance.
    pub fn withdraw(
        &mut self,
        national_id: &str,
        number: AccountNumber,
        amount: u32,
    ) -> Result<Money, BankError> {
        let customer = self.find_mut(national_id)?;
        match customer.withdraw(number, Money::from_units(i64::from(amount))) {
            Ok(entry) => {
                tracing::debug!(national_id, account = %number, charged = %entry.amount, "Withdrawal");
                Ok(entry.balance_after)
            }
            Err(err) => {
                if err.is_rejected() {
                    tracing::warn!(national_id, account = %number, amount, error = %err, "Withdrawal rejected");
                }
                Err(err)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookup helpers
    // ─────────────────────────────────────────────────────────────────────────────

    fn index_of(&self, national_id: &str) -> Result<usize, BankError> {
        self.customers
            .iter()
            .position(|c| c.national_id() == national_id)
            .ok_or_else(|| BankError::CustomerNotFound(NationalId::from(national_id)))
    }

    fn find(&self, national_id: &str) -> Result<&Customer, BankError> {
        self.customer(national_id)
            .ok_or_else(|| BankError::CustomerNotFound(NationalId::from(national_id)))
    }

    fn find_mut(&mut self, national_id: &str) -> Result<&mut Customer, BankError> {
        let index = self.index_of(national_id)?;
        Ok(&mut self.customers[index])
    }
}

fn account_not_found(national_id: &str, number: AccountNumber) -> BankError {
    BankError::AccountNotFound {
        national_id: NationalId::from(national_id),
        account: number,
    }
}
