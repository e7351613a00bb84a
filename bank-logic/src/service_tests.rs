//! BankLogic unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use rust_decimal_macros::dec;

    use bank_types::{
        AccountKind, AccountNumber, AccountType, BankError, BankSnapshot, BankStore, DomainError,
        Money, StoreError, TransactionType,
    };

    use crate::{BankLogic, INITIAL_ACCOUNT_COUNTER};

    /// Simple in-memory store for testing the registry.
    pub struct MockStore {
        saved: RefCell<Option<BankSnapshot>>,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self {
                saved: RefCell::new(None),
            }
        }

        pub fn with(snapshot: BankSnapshot) -> Self {
            Self {
                saved: RefCell::new(Some(snapshot)),
            }
        }
    }

    impl BankStore for MockStore {
        fn save(&self, snapshot: &BankSnapshot) -> Result<(), StoreError> {
            *self.saved.borrow_mut() = Some(snapshot.clone());
            Ok(())
        }

        fn load(&self) -> Result<BankSnapshot, StoreError> {
            self.saved
                .borrow()
                .clone()
                .ok_or_else(|| StoreError::NotFound("memory".into()))
        }
    }

    const ANNA: &str = "19900101-1234";
    const ERIK: &str = "19851231-5678";

    fn bank_with_customers() -> BankLogic {
        let mut bank = BankLogic::new();
        bank.create_customer("Anna", "Berg", ANNA).unwrap();
        bank.create_customer("Erik", "Lund", ERIK).unwrap();
        bank
    }

    #[test]
    fn test_create_customer_success() {
        let mut bank = BankLogic::new();
        bank.create_customer("Anna", "Berg", ANNA).unwrap();

        let customer = bank.customer(ANNA).unwrap();
        assert_eq!(customer.given_name(), "Anna");
        assert_eq!(customer.surname(), "Berg");
    }

    #[test]
    fn test_create_duplicate_customer_fails() {
        let mut bank = bank_with_customers();

        let result = bank.create_customer("Other", "Person", ANNA);

        assert!(matches!(result, Err(BankError::DuplicateCustomer(_))));
        assert_eq!(bank.customers().len(), 2);
        assert_eq!(bank.customer(ANNA).unwrap().given_name(), "Anna");
    }

    #[test]
    fn test_create_customer_empty_name_fails() {
        let mut bank = BankLogic::new();

        let result = bank.create_customer("", "Berg", ANNA);

        assert!(matches!(result, Err(BankError::InvalidInput(_))));
        assert!(bank.customer(ANNA).is_none());
    }

    #[test]
    fn test_all_customers_keeps_registration_order() {
        let bank = bank_with_customers();

        let lines: Vec<String> = bank.all_customers().iter().map(|c| c.to_string()).collect();

        assert_eq!(
            lines,
            vec!["19900101-1234 Anna Berg", "19851231-5678 Erik Lund"]
        );
    }

    #[test]
    fn test_account_numbers_are_global_and_increasing() {
        let mut bank = bank_with_customers();

        let first = bank.create_savings_account(ANNA).unwrap();
        let second = bank.create_credit_account(ERIK).unwrap();
        let third = bank.create_savings_account(ANNA).unwrap();

        assert_eq!(first, AccountNumber::new(INITIAL_ACCOUNT_COUNTER + 1));
        assert_eq!(first.value(), 1001);
        assert_eq!(second.value(), 1002);
        assert_eq!(third.value(), 1003);
        assert_eq!(bank.next_account_number(), 1003);
        assert_eq!(bank.account_numbers(ANNA).unwrap(), vec![first, third]);
    }

    #[test]
    fn test_create_account_for_unknown_customer_fails() {
        let mut bank = BankLogic::new();

        let result = bank.create_credit_account("nobody");

        assert!(matches!(result, Err(BankError::CustomerNotFound(_))));
        // The counter only moves when an account is issued.
        assert_eq!(bank.next_account_number(), INITIAL_ACCOUNT_COUNTER);
    }

    #[test]
    fn test_savings_withdrawal_fee_after_first() {
        let mut bank = bank_with_customers();
        let account = bank.create_savings_account(ANNA).unwrap();
        bank.deposit(ANNA, account, dec!(1000)).unwrap();

        let balance = bank.withdraw(ANNA, account, 100).unwrap();
        assert_eq!(balance, Money::from_units(900));

        let balance = bank.withdraw(ANNA, account, 100).unwrap();
        assert_eq!(balance, Money::from_units(798));

        let kind = bank.customer(ANNA).unwrap().account(account).unwrap().kind();
        assert_eq!(kind, AccountKind::Savings { withdrawals: 2 });
    }

    #[test]
    fn test_savings_fee_may_empty_the_account() {
        let mut bank = bank_with_customers();
        let account = bank.create_savings_account(ANNA).unwrap();
        bank.deposit(ANNA, account, dec!(202)).unwrap();

        let balance = bank.withdraw(ANNA, account, 100).unwrap();
        assert_eq!(balance, Money::from_units(102));

        // 100 * 1.02 = 102, exactly the balance
        let balance = bank.withdraw(ANNA, account, 100).unwrap();
        assert_eq!(balance, Money::ZERO);

        let history = bank.transactions(ANNA, account).unwrap();
        assert_eq!(history.last().unwrap().amount, Money::from_units(-102));

        let result = bank.withdraw(ANNA, account, 1);
        assert!(matches!(
            result,
            Err(BankError::Rejected(DomainError::InsufficientFunds { .. }))
        ));
    }

    #[test]
    fn test_credit_withdrawal_floor() {
        let mut bank = bank_with_customers();
        let account = bank.create_credit_account(ERIK).unwrap();

        let balance = bank.withdraw(ERIK, account, 5000).unwrap();
        assert_eq!(balance, Money::from_units(-5000));

        let result = bank.withdraw(ERIK, account, 1);
        assert!(matches!(
            result,
            Err(BankError::Rejected(DomainError::CreditLimitExceeded { .. }))
        ));
        assert_eq!(bank.transactions(ERIK, account).unwrap().len(), 1);
    }

    #[test]
    fn test_withdraw_zero_fails() {
        let mut bank = bank_with_customers();
        let account = bank.create_credit_account(ERIK).unwrap();

        let result = bank.withdraw(ERIK, account, 0);

        assert!(matches!(result, Err(BankError::InvalidInput(_))));
    }

    #[test]
    fn test_deposit_non_positive_fails_without_change() {
        let mut bank = bank_with_customers();
        let account = bank.create_savings_account(ANNA).unwrap();

        assert!(matches!(
            bank.deposit(ANNA, account, dec!(0)),
            Err(BankError::InvalidInput(_))
        ));
        assert!(matches!(
            bank.deposit(ANNA, account, dec!(-100)),
            Err(BankError::InvalidInput(_))
        ));

        let info = bank.account_info(ANNA, account).unwrap();
        assert_eq!(info.balance, Money::ZERO);
        assert!(bank.transactions(ANNA, account).unwrap().is_empty());
    }

    #[test]
    fn test_deposit_accepts_fractions() {
        let mut bank = bank_with_customers();
        let account = bank.create_savings_account(ANNA).unwrap();

        let balance = bank.deposit(ANNA, account, dec!(0.01)).unwrap();
        assert_eq!(balance, Money::new(dec!(0.01)));
        let balance = bank.deposit(ANNA, account, dec!(99.99)).unwrap();
        assert_eq!(balance, Money::from_units(100));
    }

    #[test]
    fn test_operations_on_other_customers_account_fail() {
        let mut bank = bank_with_customers();
        let annas = bank.create_savings_account(ANNA).unwrap();

        let result = bank.deposit(ERIK, annas, dec!(10));

        assert!(matches!(result, Err(BankError::AccountNotFound { .. })));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_customer_is_not_found() {
        let mut bank = BankLogic::new();
        let number = AccountNumber::new(1001);

        assert!(bank.deposit("x", number, dec!(1)).unwrap_err().is_not_found());
        assert!(bank.withdraw("x", number, 1).unwrap_err().is_not_found());
        assert!(bank.close_account("x", number).unwrap_err().is_not_found());
        assert!(bank.account_info("x", number).unwrap_err().is_not_found());
        assert!(bank.transactions("x", number).unwrap_err().is_not_found());
        assert!(bank.customer_details("x").unwrap_err().is_not_found());
        assert!(bank.delete_customer("x").unwrap_err().is_not_found());
        assert!(bank
            .change_customer_name(Some("a"), None, "x")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_close_account_interest() {
        let mut bank = bank_with_customers();
        let savings = bank.create_savings_account(ANNA).unwrap();
        let credit_pos = bank.create_credit_account(ANNA).unwrap();
        let credit_neg = bank.create_credit_account(ANNA).unwrap();
        bank.deposit(ANNA, savings, dec!(1000)).unwrap();
        bank.deposit(ANNA, credit_pos, dec!(1000)).unwrap();
        bank.withdraw(ANNA, credit_neg, 1000).unwrap();

        let closed = bank.close_account(ANNA, savings).unwrap();
        assert_eq!(closed.interest.amount(), dec!(24.0));
        assert_eq!(closed.account_type, AccountType::Savings);

        let closed = bank.close_account(ANNA, credit_pos).unwrap();
        assert_eq!(closed.interest.amount(), dec!(11.0));

        let closed = bank.close_account(ANNA, credit_neg).unwrap();
        assert_eq!(closed.interest.amount(), dec!(-50.0));
        assert_eq!(closed.balance, Money::from_units(-1000));

        assert!(bank.account_numbers(ANNA).unwrap().is_empty());
        assert!(bank.account_info(ANNA, savings).unwrap_err().is_not_found());
    }

    #[test]
    fn test_closed_numbers_are_not_reused() {
        let mut bank = bank_with_customers();
        let first = bank.create_savings_account(ANNA).unwrap();
        bank.close_account(ANNA, first).unwrap();

        let next = bank.create_savings_account(ANNA).unwrap();

        assert!(next > first);
    }

    #[test]
    fn test_delete_customer_closes_all_accounts() {
        let mut bank = bank_with_customers();
        bank.create_savings_account(ANNA).unwrap();
        let credit = bank.create_credit_account(ANNA).unwrap();
        bank.create_savings_account(ERIK).unwrap();
        bank.deposit(ANNA, credit, dec!(200)).unwrap();
        let owned = bank.account_numbers(ANNA).unwrap().len();

        let deleted = bank.delete_customer(ANNA).unwrap();

        assert_eq!(deleted.customer.to_string(), "19900101-1234 Anna Berg");
        assert_eq!(deleted.closed_accounts.len(), owned);
        assert_eq!(deleted.closed_accounts[1].balance, Money::from_units(200));
        assert!(bank.customer(ANNA).is_none());
        assert!(bank.customer_details(ANNA).unwrap_err().is_not_found());
        // Other customers are untouched.
        assert_eq!(bank.account_numbers(ERIK).unwrap().len(), 1);
    }

    #[test]
    fn test_change_customer_name() {
        let mut bank = bank_with_customers();

        assert!(bank.change_customer_name(Some("Annika"), None, ANNA).unwrap());
        assert!(!bank.change_customer_name(Some(""), Some(""), ANNA).unwrap());

        let details = bank.customer_details(ANNA).unwrap();
        assert_eq!(details.customer.given_name, "Annika");
        assert_eq!(details.customer.surname, "Berg");
    }

    #[test]
    fn test_customer_details_lists_accounts() {
        let mut bank = bank_with_customers();
        let savings = bank.create_savings_account(ANNA).unwrap();
        bank.create_credit_account(ANNA).unwrap();
        bank.deposit(ANNA, savings, dec!(500)).unwrap();

        let details = bank.customer_details(ANNA).unwrap();
        let lines: Vec<String> = details.accounts.iter().map(|a| a.to_string()).collect();

        assert_eq!(
            lines,
            vec!["1001 500.00 kr Savings 2.4 %", "1002 0.00 kr Credit 1.1 %"]
        );
    }

    #[test]
    fn test_transactions_in_order() {
        let mut bank = bank_with_customers();
        let account = bank.create_credit_account(ERIK).unwrap();
        bank.deposit(ERIK, account, dec!(100)).unwrap();
        bank.withdraw(ERIK, account, 300).unwrap();

        let history = bank.transactions(ERIK, account).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].transaction_type, TransactionType::Deposit);
        assert_eq!(history[1].transaction_type, TransactionType::Withdrawal);
        assert_eq!(history[1].amount, Money::from_units(-300));
        assert_eq!(history[1].balance_after, Money::from_units(-200));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut bank = bank_with_customers();
        let savings = bank.create_savings_account(ANNA).unwrap();
        let credit = bank.create_credit_account(ERIK).unwrap();
        bank.deposit(ANNA, savings, dec!(1000)).unwrap();
        bank.withdraw(ANNA, savings, 100).unwrap();
        bank.withdraw(ERIK, credit, 250).unwrap();

        let store = MockStore::new();
        bank.save_to(&store).unwrap();

        let mut restored = BankLogic::new();
        restored.load_from(&store).unwrap();

        assert_eq!(restored.snapshot(), bank.snapshot());
        assert_eq!(restored.next_account_number(), 1002);

        // The withdrawal counter survives, so the fee applies straight away.
        let balance = restored.withdraw(ANNA, savings, 100).unwrap();
        assert_eq!(balance, Money::from_units(798));
        assert_eq!(restored.create_savings_account(ERIK).unwrap().value(), 1003);
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut bank = bank_with_customers();

        let result = bank.load_from(&MockStore::new());

        assert!(matches!(result, Err(BankError::Store(StoreError::NotFound(_)))));
        assert_eq!(bank.customers().len(), 2);
    }

    #[test]
    fn test_load_rejects_counter_below_accounts() {
        let mut source = bank_with_customers();
        source.create_savings_account(ANNA).unwrap();
        let mut snapshot = source.snapshot();
        snapshot.next_account_number = INITIAL_ACCOUNT_COUNTER;

        let mut bank = BankLogic::new();
        let result = bank.load_from(&MockStore::with(snapshot));

        assert!(matches!(result, Err(BankError::InvalidInput(_))));
        assert!(bank.customers().is_empty());
    }

    #[test]
    fn test_load_rejects_duplicate_customers() {
        let source = bank_with_customers();
        let mut snapshot = source.snapshot();
        snapshot.customers.push(snapshot.customers[0].clone());

        let result = BankLogic::from_snapshot(snapshot);

        assert!(matches!(result, Err(BankError::InvalidInput(_))));
    }
}
