//! Plain-text export of customer transaction histories.

use std::fs;
use std::path::Path;

use bank_types::{Customer, StoreError};

/// Line written for an account that has no history yet.
pub const NO_TRANSACTIONS: &str = " No transactions found for this account.";

/// Accumulates human-readable transaction lines for one or more customers.
#[derive(Debug, Default)]
pub struct TransactionBook {
    lines: Vec<String>,
}

impl TransactionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the history of every account the customer owns.
    pub fn add_customer(&mut self, customer: &Customer) {
        self.lines
            .push(format!("Transactions for customer {}:", customer));

        for account in customer.accounts() {
            self.lines.push(format!("Account number: {}", account.number()));

            if account.history().is_empty() {
                self.lines.push(NO_TRANSACTIONS.to_string());
                continue;
            }
            self.lines
                .extend(account.history().iter().map(|entry| format!(" {}", entry)));
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The whole book, one line per entry, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Writes the book to `path`, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render())?;
        tracing::info!(path = %path.display(), lines = self.lines.len(), "Transaction book written");
        Ok(())
    }
}
