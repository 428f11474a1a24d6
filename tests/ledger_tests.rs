// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally::models::{NewTransaction, TransactionFilter, TxKind};
use tally::{Ledger, LedgerError};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx_count(ledger: &Ledger) -> i64 {
    ledger
        .conn()
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

fn entry(kind: TxKind, amount: Decimal, account_id: i64) -> NewTransaction {
    NewTransaction {
        kind,
        amount,
        description: Some("test".into()),
        date: day("2024-03-01"),
        category_id: None,
        account_id,
    }
}

#[test]
fn seeded_store_has_defaults() {
    let ledger = Ledger::open_in_memory().unwrap();
    let accounts = ledger.list_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Cash");
    assert_eq!(accounts[0].balance, Decimal::ZERO);

    let names: Vec<String> = ledger
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(
        names,
        vec!["Entertainment", "Food", "Housing", "Salary", "Transport"]
    );
}

#[test]
fn accounts_listed_by_name() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    ledger.add_account("Savings", dec!(0)).unwrap();
    ledger.add_account("Bank", dec!(1000)).unwrap();
    let names: Vec<String> = ledger
        .list_accounts()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Bank", "Cash", "Savings"]);
}

#[test]
fn income_and_expense_move_balance_exactly() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(100.10)).unwrap();

    ledger
        .record_transaction(&entry(TxKind::Income, dec!(49.95), bank))
        .unwrap();
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(150.05));

    ledger
        .record_transaction(&entry(TxKind::Expense, dec!(0.05), bank))
        .unwrap();
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(150.00));
    assert!(ledger.reconcile().unwrap().is_empty());
}

#[test]
fn expense_may_overdraw() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(10)).unwrap();
    ledger
        .record_transaction(&entry(TxKind::Expense, dec!(25), bank))
        .unwrap();
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(-15));
}

#[test]
fn record_rejects_transfer_kind() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(10)).unwrap();
    let err = ledger
        .record_transaction(&entry(TxKind::Transfer, dec!(5), bank))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidKind(_)));
    assert_eq!(tx_count(&ledger), 0);
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(10));
}

#[test]
fn record_rejects_negative_amount() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(10)).unwrap();
    let err = ledger
        .record_transaction(&entry(TxKind::Income, dec!(-1), bank))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(tx_count(&ledger), 0);
}

#[test]
fn unknown_references_leave_no_row() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let err = ledger
        .record_transaction(&entry(TxKind::Income, dec!(1), 4242))
        .unwrap_err();
    assert!(matches!(err, LedgerError::UnknownAccount(4242)));

    let bank = ledger.add_account("Bank", dec!(10)).unwrap();
    let mut bad_cat = entry(TxKind::Expense, dec!(1), bank);
    bad_cat.category_id = Some(777);
    let err = ledger.record_transaction(&bad_cat).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownCategory(777)));

    assert_eq!(tx_count(&ledger), 0);
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(10));
}

#[test]
fn failed_balance_write_rolls_back_row() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(10)).unwrap();
    ledger
        .conn()
        .execute_batch(
            "CREATE TRIGGER block_balance BEFORE UPDATE OF balance ON accounts
             BEGIN SELECT RAISE(ABORT, 'balance locked'); END;",
        )
        .unwrap();

    let err = ledger
        .record_transaction(&entry(TxKind::Income, dec!(5), bank))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Storage(_)));
    assert_eq!(tx_count(&ledger), 0);
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(10));
}

#[test]
fn duplicate_names_leave_store_unchanged() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    ledger.add_account("Bank", dec!(1000)).unwrap();
    let before = ledger.list_accounts().unwrap();

    let err = ledger.add_account("Bank", dec!(5)).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::DuplicateName { entity: "Account", .. }
    ));
    assert_eq!(ledger.list_accounts().unwrap(), before);

    let cats_before = ledger.list_categories().unwrap();
    let err = ledger.add_category("Food").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::DuplicateName { entity: "Category", .. }
    ));
    assert_eq!(ledger.list_categories().unwrap(), cats_before);
}

#[test]
fn list_transactions_filters_and_orders() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(0)).unwrap();
    for (i, d) in ["2024-01-01", "2024-01-03", "2024-01-02"].iter().enumerate() {
        let mut e = entry(TxKind::Income, Decimal::from(i + 1), bank);
        e.date = day(d);
        ledger.record_transaction(&e).unwrap();
    }

    let all = ledger
        .list_transactions(&TransactionFilter::default())
        .unwrap();
    let dates: Vec<String> = all.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);

    let mut filter = TransactionFilter {
        account_id: Some(bank),
        limit: Some(2),
        ..Default::default()
    };
    filter.range.from = Some(day("2024-01-02"));
    let some = ledger.list_transactions(&filter).unwrap();
    assert_eq!(some.len(), 2);
    assert!(some.iter().all(|t| t.date >= day("2024-01-02")));
}

#[test]
fn reconcile_reports_drift() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(100)).unwrap();
    ledger
        .record_transaction(&entry(TxKind::Expense, dec!(30), bank))
        .unwrap();
    ledger
        .conn()
        .execute("UPDATE accounts SET balance='999' WHERE id=?1", [bank])
        .unwrap();

    let drift = ledger.reconcile().unwrap();
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].account_name, "Bank");
    assert_eq!(drift[0].stored, dec!(999));
    assert_eq!(drift[0].expected, dec!(70));
}

#[test]
fn income_past_decimal_max_is_refused() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let full = ledger.add_account("Full", Decimal::MAX).unwrap();
    let err = ledger
        .record_transaction(&entry(TxKind::Income, dec!(1), full))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::BalanceOutOfRange { account_id, .. } if account_id == full
    ));
    assert_eq!(tx_count(&ledger), 0);
    assert_eq!(ledger.account_balance(full).unwrap(), Decimal::MAX);
}

#[test]
fn expense_past_decimal_min_is_refused() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let deep = ledger.add_account("Deep", Decimal::MIN).unwrap();
    let err = ledger
        .record_transaction(&entry(TxKind::Expense, dec!(1), deep))
        .unwrap_err();
    assert!(matches!(err, LedgerError::BalanceOutOfRange { .. }));
    assert_eq!(tx_count(&ledger), 0);
}

#[test]
fn income_that_would_round_away_is_refused() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let big = ledger
        .add_account("Big", dec!(100000000000000000000))
        .unwrap();
    let err = ledger
        .record_transaction(&entry(TxKind::Income, dec!(0.0000000001), big))
        .unwrap_err();
    assert!(matches!(err, LedgerError::BalanceOutOfRange { .. }));
    assert_eq!(tx_count(&ledger), 0);
    assert_eq!(
        ledger.account_balance(big).unwrap(),
        dec!(100000000000000000000)
    );
    assert!(ledger.reconcile().unwrap().is_empty());
}

#[test]
fn negative_zero_amount_is_rejected() {
    let mut ledger = Ledger::open_in_memory().unwrap();
    let bank = ledger.add_account("Bank", dec!(10)).unwrap();
    let mut neg_zero = Decimal::ZERO;
    neg_zero.set_sign_negative(true);
    let err = ledger
        .record_transaction(&entry(TxKind::Income, neg_zero, bank))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));

    ledger
        .record_transaction(&entry(TxKind::Income, Decimal::ZERO, bank))
        .unwrap();
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(10));
}
