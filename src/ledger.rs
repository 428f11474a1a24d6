// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger repository: accounts, categories, and balance-mutating writes.
//!
//! Balances are read straight from `accounts.balance`. Every write that affects a
//! balance runs inside one IMMEDIATE transaction together with the rows it inserts,
//! so a failure at any step leaves the store untouched.

use crate::db;
use crate::error::{LedgerError, Result, is_unique_violation};
use crate::models::{
    Account, BalanceDrift, Category, Entry, NewTransaction, NewTransfer, Transaction,
    TransactionFilter, TransferIds, TransferLeg, TxKind,
};
use crate::utils::{date_column, decimal_column};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;

pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open (creating and seeding on first use) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(db::connect(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::connect_in_memory()?)
    }

    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        db::initialize(&mut conn)?;
        Ok(Self { conn })
    }

    /// Read-only access for projections and the credential store.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, balance, opening_balance FROM accounts ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(account_from_row(r)?);
        }
        Ok(out)
    }

    pub fn account(&self, id: i64) -> Result<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, balance, opening_balance FROM accounts WHERE id=?1")?;
        let mut rows = stmt.query(params![id])?;
        let mut found = None;
        if let Some(r) = rows.next()? {
            found = Some(account_from_row(r)?);
        }
        Ok(found)
    }

    pub fn add_account(&mut self, name: &str, initial_balance: Decimal) -> Result<i64> {
        let name = clean_name(name)?;
        let balance = initial_balance.normalize().to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let res = tx.execute(
            "INSERT INTO accounts(name, balance, opening_balance) VALUES (?1, ?2, ?2)",
            params![name, balance],
        );
        match res {
            Err(e) if is_unique_violation(&e) => return Err(LedgerError::duplicate_account(name)),
            other => other?,
        };
        let id = tx.last_insert_rowid();
        tx.commit()?;
        tracing::debug!(id, name, %initial_balance, "account added");
        Ok(id)
    }

    /// Stored balance column; not recomputed from history.
    pub fn account_balance(&self, id: i64) -> Result<Decimal> {
        read_balance(&self.conn, id)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, budget FROM categories ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(category_from_row(r)?);
        }
        Ok(out)
    }

    pub fn category(&self, id: i64) -> Result<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, budget FROM categories WHERE id=?1")?;
        let mut rows = stmt.query(params![id])?;
        let mut found = None;
        if let Some(r) = rows.next()? {
            found = Some(category_from_row(r)?);
        }
        Ok(found)
    }

    pub fn add_category(&mut self, name: &str) -> Result<i64> {
        let name = clean_name(name)?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match tx.execute("INSERT INTO categories(name) VALUES (?1)", params![name]) {
            Err(e) if is_unique_violation(&e) => {
                return Err(LedgerError::duplicate_category(name));
            }
            other => other?,
        };
        let id = tx.last_insert_rowid();
        tx.commit()?;
        tracing::debug!(id, name, "category added");
        Ok(id)
    }

    /// Store the advisory budget threshold for a category.
    pub fn set_category_budget(&mut self, id: i64, budget: Decimal) -> Result<()> {
        check_amount(budget)?;
        let n = self.conn.execute(
            "UPDATE categories SET budget=?1 WHERE id=?2",
            params![budget.normalize().to_string(), id],
        )?;
        if n == 0 {
            return Err(LedgerError::UnknownCategory(id));
        }
        Ok(())
    }

    /// Insert one income/expense row and apply it to the account balance as one unit.
    pub fn record_transaction(&mut self, new: &NewTransaction) -> Result<i64> {
        let entry = match new.kind {
            TxKind::Income => Entry::Income {
                category_id: new.category_id,
            },
            TxKind::Expense => Entry::Expense {
                category_id: new.category_id,
            },
            TxKind::Transfer => {
                return Err(LedgerError::InvalidKind(TxKind::Transfer.to_string()));
            }
        };
        check_amount(new.amount)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let balance = read_balance(&tx, new.account_id)?;
        if let Some(cat) = new.category_id {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id=?1)",
                params![cat],
                |r| r.get(0),
            )?;
            if !exists {
                return Err(LedgerError::UnknownCategory(cat));
            }
        }

        let delta = match new.kind {
            TxKind::Income => new.amount,
            _ => -new.amount,
        };
        let updated = shifted(balance, delta, new.account_id)?;

        let id = insert_row(
            &tx,
            new.account_id,
            new.amount,
            new.description.as_deref(),
            new.date,
            entry,
        )?;
        write_balance(&tx, new.account_id, updated)?;
        tx.commit()?;

        tracing::debug!(id, account_id = new.account_id, kind = %new.kind, amount = %new.amount, "transaction recorded");
        Ok(id)
    }

    /// Move `amount` between two accounts: two balance updates and two transfer legs,
    /// committed together or not at all.
    pub fn execute_transfer(&mut self, new: &NewTransfer) -> Result<TransferIds> {
        if new.from_account_id == new.to_account_id {
            return Err(LedgerError::SameAccount(new.from_account_id));
        }
        check_amount(new.amount)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let (from_name, from_balance) = read_name_and_balance(&tx, new.from_account_id)?;
        let (to_name, to_balance) = read_name_and_balance(&tx, new.to_account_id)?;
        let from_updated = shifted(from_balance, -new.amount, new.from_account_id)?;
        let to_updated = shifted(to_balance, new.amount, new.to_account_id)?;

        let debit_desc = format!("transfer to {}: {}", to_name, new.description);
        let credit_desc = format!("transfer from {}: {}", from_name, new.description);

        let debit_id = insert_row(
            &tx,
            new.from_account_id,
            new.amount,
            Some(debit_desc.as_str()),
            new.date,
            Entry::Transfer {
                counterpart_account_id: new.to_account_id,
                leg: TransferLeg::Debit,
            },
        )?;
        let credit_id = insert_row(
            &tx,
            new.to_account_id,
            new.amount,
            Some(credit_desc.as_str()),
            new.date,
            Entry::Transfer {
                counterpart_account_id: new.from_account_id,
                leg: TransferLeg::Credit,
            },
        )?;
        write_balance(&tx, new.from_account_id, from_updated)?;
        write_balance(&tx, new.to_account_id, to_updated)?;
        tx.commit()?;

        tracing::debug!(
            from = new.from_account_id,
            to = new.to_account_id,
            amount = %new.amount,
            debit_id,
            credit_id,
            "transfer executed"
        );
        Ok(TransferIds {
            debit_id,
            credit_id,
        })
    }

    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut sql = String::from(
            "SELECT id, type, amount, description, transaction_date, category_id, account_id, \
             counterpart_account_id, leg FROM transactions WHERE 1=1",
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(acct) = filter.account_id {
            sql.push_str(" AND account_id=?");
            args.push(Box::new(acct));
        }
        if let Some(from) = filter.range.from {
            sql.push_str(" AND transaction_date>=?");
            args.push(Box::new(from.to_string()));
        }
        if let Some(to) = filter.range.to {
            sql.push_str(" AND transaction_date<=?");
            args.push(Box::new(to.to_string()));
        }
        sql.push_str(" ORDER BY transaction_date DESC, id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            args.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(args.iter()))?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(transaction_from_row(r)?);
        }
        Ok(out)
    }

    /// Recompute each balance from its opening balance and transaction history and
    /// report every account whose stored balance disagrees.
    pub fn reconcile(&self) -> Result<Vec<BalanceDrift>> {
        let mut effects: HashMap<i64, Decimal> = HashMap::new();
        for t in self.list_transactions(&TransactionFilter::default())? {
            let sum = effects.entry(t.account_id).or_default();
            *sum = sum
                .checked_add(t.signed_effect())
                .ok_or(LedgerError::BalanceOutOfRange {
                    account_id: t.account_id,
                    amount: t.amount,
                })?;
        }

        let mut drift = Vec::new();
        for acct in self.list_accounts()? {
            let history = effects.get(&acct.id).copied().unwrap_or_default();
            let expected = acct.opening_balance.checked_add(history).ok_or(
                LedgerError::BalanceOutOfRange {
                    account_id: acct.id,
                    amount: history,
                },
            )?;
            if expected != acct.balance {
                tracing::warn!(
                    account_id = acct.id,
                    stored = %acct.balance,
                    %expected,
                    "stored balance drifted from history"
                );
                drift.push(BalanceDrift {
                    account_id: acct.id,
                    account_name: acct.name,
                    stored: acct.balance,
                    expected,
                });
            }
        }
        Ok(drift)
    }
}

fn clean_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidName);
    }
    Ok(name)
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

/// `balance + delta`, refused when the sum overflows or loses digits.
fn shifted(balance: Decimal, delta: Decimal, account_id: i64) -> Result<Decimal> {
    let out_of_range = || LedgerError::BalanceOutOfRange {
        account_id,
        amount: delta.abs(),
    };
    let updated = balance.checked_add(delta).ok_or_else(out_of_range)?;
    if updated.checked_sub(balance) != Some(delta) {
        return Err(out_of_range());
    }
    Ok(updated)
}

fn read_balance(conn: &Connection, id: i64) -> Result<Decimal> {
    Ok(read_name_and_balance(conn, id)?.1)
}

fn read_name_and_balance(conn: &Connection, id: i64) -> Result<(String, Decimal)> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT name, balance FROM accounts WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let (name, raw) = row.ok_or(LedgerError::UnknownAccount(id))?;
    Ok((name, decimal_column("account balance", &raw)?))
}

fn write_balance(conn: &Connection, id: i64, balance: Decimal) -> Result<()> {
    let n = conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2",
        params![balance.normalize().to_string(), id],
    )?;
    if n != 1 {
        return Err(LedgerError::UnknownAccount(id));
    }
    Ok(())
}

fn insert_row(
    conn: &Connection,
    account_id: i64,
    amount: Decimal,
    description: Option<&str>,
    date: chrono::NaiveDate,
    entry: Entry,
) -> Result<i64> {
    let (counterpart, leg) = match entry {
        Entry::Transfer {
            counterpart_account_id,
            leg,
        } => (Some(counterpart_account_id), Some(leg.as_str())),
        _ => (None, None),
    };
    conn.execute(
        "INSERT INTO transactions(type, amount, description, transaction_date, category_id, \
         account_id, counterpart_account_id, leg) VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            entry.kind().as_str(),
            amount.normalize().to_string(),
            description,
            date.to_string(),
            entry.category_id(),
            account_id,
            counterpart,
            leg
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn account_from_row(r: &Row<'_>) -> Result<Account> {
    let balance: String = r.get(2)?;
    let opening: String = r.get(3)?;
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        balance: decimal_column("account balance", &balance)?,
        opening_balance: decimal_column("opening balance", &opening)?,
    })
}

fn category_from_row(r: &Row<'_>) -> Result<Category> {
    let budget: Option<String> = r.get(2)?;
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        budget: match budget {
            Some(s) => decimal_column("category budget", &s)?,
            None => Decimal::ZERO,
        },
    })
}

fn transaction_from_row(r: &Row<'_>) -> Result<Transaction> {
    let kind: String = r.get(1)?;
    let amount: String = r.get(2)?;
    let date: String = r.get(4)?;
    let category_id: Option<i64> = r.get(5)?;
    let counterpart: Option<i64> = r.get(7)?;
    let leg: Option<String> = r.get(8)?;

    let entry = match kind.parse::<TxKind>() {
        Ok(TxKind::Income) => Entry::Income { category_id },
        Ok(TxKind::Expense) => Entry::Expense { category_id },
        Ok(TxKind::Transfer) => {
            let leg_raw = leg.unwrap_or_default();
            match (counterpart, TransferLeg::parse(&leg_raw)) {
                (Some(counterpart_account_id), Some(leg)) => Entry::Transfer {
                    counterpart_account_id,
                    leg,
                },
                _ => {
                    return Err(LedgerError::CorruptValue {
                        what: "transfer leg",
                        value: leg_raw,
                    });
                }
            }
        }
        Err(_) => {
            return Err(LedgerError::CorruptValue {
                what: "transaction kind",
                value: kind,
            });
        }
    };

    Ok(Transaction {
        id: r.get(0)?,
        account_id: r.get(6)?,
        amount: decimal_column("transaction amount", &amount)?,
        description: r.get(3)?,
        date: date_column(&date)?,
        entry,
    })
}
