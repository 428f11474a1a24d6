// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal_macros::dec;
use tally::{Ledger, db};
use tempfile::tempdir;

fn counts(conn: &Connection) -> (i64, i64) {
    let accounts = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    let categories = conn
        .query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))
        .unwrap();
    (accounts, categories)
}

#[test]
fn second_initialize_is_noop() {
    let mut conn = db::connect_in_memory().unwrap();
    assert!(db::initialize(&mut conn).unwrap());
    let first = counts(&conn);
    assert_eq!(first, (1, db::DEFAULT_CATEGORIES.len() as i64));

    assert!(!db::initialize(&mut conn).unwrap());
    assert_eq!(counts(&conn), first);
}

#[test]
fn reopening_a_file_keeps_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let bank = {
        let mut ledger = Ledger::open(&path).unwrap();
        ledger.add_account("Bank", dec!(12.5)).unwrap()
    };

    let ledger = Ledger::open(&path).unwrap();
    assert_eq!(counts(ledger.conn()), (2, 5));
    assert_eq!(ledger.account_balance(bank).unwrap(), dec!(12.5));
}

#[test]
fn transaction_kind_is_constrained() {
    let ledger = Ledger::open_in_memory().unwrap();
    let res = ledger.conn().execute(
        "INSERT INTO transactions(type, amount, transaction_date, account_id) \
         VALUES ('refund', '1', '2024-01-01', 1)",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn transfer_rows_require_counterpart() {
    let ledger = Ledger::open_in_memory().unwrap();
    let res = ledger.conn().execute(
        "INSERT INTO transactions(type, amount, transaction_date, account_id) \
         VALUES ('transfer', '1', '2024-01-01', 1)",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn two_handles_on_one_file_see_each_other() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shared.sqlite");
    let mut a = Ledger::open(&path).unwrap();
    let b = Ledger::open(&path).unwrap();

    let id = a.add_account("Bank", dec!(40)).unwrap();
    assert_eq!(b.account_balance(id).unwrap(), dec!(40));
}
