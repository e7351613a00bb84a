//! Bank CLI
//!
//! Command-line front end for the bank ledger. Each invocation loads the
//! bank file, runs one command and saves the bank again if it changed.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_logic::BankLogic;
use bank_repo::{JsonFileStore, MemoryStore, TransactionBook};
use bank_types::AccountNumber;

#[derive(Parser)]
#[command(name = "bank")]
#[command(author, version, about = "Bank ledger CLI", long_about = None)]
struct Cli {
    /// Path of the bank file (overrides BANK_DATA_FILE)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Run the command without writing the bank file
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Account operations
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Deposit into an account
    Deposit {
        national_id: String,
        account: AccountNumber,
        /// Amount in kronor, decimals allowed
        amount: Decimal,
    },
    /// Withdraw whole kronor from an account
    Withdraw {
        national_id: String,
        account: AccountNumber,
        amount: u32,
    },
    /// Write the transaction history of customers to a text file
    Export {
        /// Customers to include (all customers if omitted)
        national_ids: Vec<String>,
        /// Output file (defaults to <export dir>/transactions.txt)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Register a new customer
    Create {
        national_id: String,
        given_name: String,
        surname: String,
    },
    /// List all customers
    List,
    /// Show a customer and their accounts
    Show { national_id: String },
    /// Change given name and/or surname
    Rename {
        national_id: String,
        #[arg(long)]
        given_name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
    },
    /// Delete a customer, closing all accounts
    Delete { national_id: String },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Open a savings account
    Savings { national_id: String },
    /// Open a credit account
    Credit { national_id: String },
    /// Show one account
    Info { national_id: String, account: AccountNumber },
    /// Close an account
    Close { national_id: String, account: AccountNumber },
    /// List the transactions of an account
    History { national_id: String, account: AccountNumber },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,bank_logic=info,bank_repo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_bank(store: &JsonFileStore) -> Result<BankLogic> {
    let mut bank = BankLogic::new();
    if store.exists() {
        bank.load_from(store)
            .with_context(|| format!("Could not load bank from {}", store.path().display()))?;
    } else {
        tracing::info!(path = %store.path().display(), "No bank file yet, starting empty");
    }
    Ok(bank)
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = config::Config::from_env().with_data_file(cli.data);
    tracing::debug!(?config, "Configuration loaded");

    let store = JsonFileStore::new(&config.data_file);
    let mut bank = load_bank(&store)?;

    let changed = run(&mut bank, cli.command, &config)?;

    if changed && cli.dry_run {
        bank.save_to(&MemoryStore::new())?;
        println!("✓ Dry run: {} left unchanged", store.path().display());
    } else if changed {
        bank.save_to(&store)
            .with_context(|| format!("Could not save bank to {}", store.path().display()))?;
    }
    Ok(())
}

/// Runs one command. Returns whether the bank needs saving.
fn run(bank: &mut BankLogic, command: Commands, config: &config::Config) -> Result<bool> {
    match command {
        Commands::Customer { action } => match action {
            CustomerCommands::Create {
                national_id,
                given_name,
                surname,
            } => {
                bank.create_customer(&given_name, &surname, &national_id)?;
                println!("✓ Customer {} created", national_id);
                Ok(true)
            }
            CustomerCommands::List => {
                for customer in bank.all_customers() {
                    println!("{}", customer);
                }
                Ok(false)
            }
            CustomerCommands::Show { national_id } => {
                let details = bank.customer_details(&national_id)?;
                println!("{}", serde_json::to_string_pretty(&details)?);
                Ok(false)
            }
            CustomerCommands::Rename {
                national_id,
                given_name,
                surname,
            } => {
                let changed = bank.change_customer_name(
                    given_name.as_deref(),
                    surname.as_deref(),
                    &national_id,
                )?;
                if changed {
                    println!("✓ Customer {} renamed", national_id);
                } else {
                    println!("✗ Nothing to change");
                }
                Ok(changed)
            }
            CustomerCommands::Delete { national_id } => {
                let deleted = bank.delete_customer(&national_id)?;
                println!("{}", serde_json::to_string_pretty(&deleted)?);
                Ok(true)
            }
        },

        Commands::Account { action } => match action {
            AccountCommands::Savings { national_id } => {
                let number = bank.create_savings_account(&national_id)?;
                println!("{}", number);
                Ok(true)
            }
            AccountCommands::Credit { national_id } => {
                let number = bank.create_credit_account(&national_id)?;
                println!("{}", number);
                Ok(true)
            }
            AccountCommands::Info {
                national_id,
                account,
            } => {
                let info = bank.account_info(&national_id, account)?;
                println!("{}", info);
                Ok(false)
            }
            AccountCommands::Close {
                national_id,
                account,
            } => {
                let closed = bank.close_account(&national_id, account)?;
                println!("{}", closed);
                Ok(true)
            }
            AccountCommands::History {
                national_id,
                account,
            } => {
                for entry in bank.transactions(&national_id, account)? {
                    println!("{}", entry);
                }
                Ok(false)
            }
        },

        Commands::Deposit {
            national_id,
            account,
            amount,
        } => {
            let balance = bank.deposit(&national_id, account, amount)?;
            println!("✓ New balance: {}", balance);
            Ok(true)
        }

        Commands::Withdraw {
            national_id,
            account,
            amount,
        } => {
            let balance = bank.withdraw(&national_id, account, amount)?;
            println!("✓ New balance: {}", balance);
            Ok(true)
        }

        Commands::Export { national_ids, out } => {
            let mut book = TransactionBook::new();
            if national_ids.is_empty() {
                for customer in bank.customers() {
                    book.add_customer(customer);
                }
            } else {
                for id in &national_ids {
                    let customer = bank
                        .customer(id)
                        .ok_or_else(|| anyhow::anyhow!("Customer not found: {}", id))?;
                    book.add_customer(customer);
                }
            }

            let path = out.unwrap_or_else(|| config.export_dir.join("transactions.txt"));
            book.save(&path)?;
            println!("✓ Saved to {}", path.display());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_arguments() {
        let cli = Cli::try_parse_from(["bank", "--dry-run", "account", "info", "1", "1001"]).unwrap();
        assert!(cli.dry_run);
        assert!(cli.data.is_none());
        assert!(matches!(
            cli.command,
            Commands::Account {
                action: AccountCommands::Info { account, .. }
            } if account == AccountNumber::new(1001)
        ));

        let result = Cli::try_parse_from(["bank", "withdraw", "1", "abc", "100"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_data_flag() {
        let cli = Cli::try_parse_from(["bank", "--data", "other.json", "customer", "list"]).unwrap();
        assert!(!cli.dry_run);
        assert_eq!(cli.data, Some(PathBuf::from("other.json")));
    }
}
