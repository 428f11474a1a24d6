// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use anyhow::Context;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, TransactionBehavior, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.geekneuron", "Tally", "tally"));

pub const SCHEMA_VERSION: i64 = 1;

pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Food", "Transport", "Housing", "Salary", "Entertainment"];
pub const DEFAULT_ACCOUNT: &str = "Cash";

/// Resolve the store file: explicit path, then `TALLY_DB`, then the platform data dir.
pub fn db_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os("TALLY_DB").filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tally.sqlite"))
}

/// Open a connection with the pragmas every session relies on.
pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    configure(&conn)?;
    Ok(conn)
}

pub fn connect_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |r| r.get(0))?)
}

/// Create and seed the store if it has never been set up; otherwise do nothing.
///
/// Returns `true` when the schema was created by this call.
pub fn initialize(conn: &mut Connection) -> Result<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if schema_version(&tx)? != 0 {
        return Ok(false);
    }

    tx.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value BLOB
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        balance TEXT NOT NULL DEFAULT '0',
        opening_balance TEXT NOT NULL DEFAULT '0'
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        budget TEXT DEFAULT '0'
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income','expense','transfer')),
        amount TEXT NOT NULL,
        description TEXT,
        transaction_date TEXT NOT NULL,
        category_id INTEGER,
        account_id INTEGER NOT NULL,
        counterpart_account_id INTEGER,
        leg TEXT CHECK(leg IN ('debit','credit')),
        FOREIGN KEY(category_id) REFERENCES categories(id),
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(counterpart_account_id) REFERENCES accounts(id),
        CHECK(
            (type = 'transfer' AND counterpart_account_id IS NOT NULL AND leg IS NOT NULL
                AND category_id IS NULL)
            OR (type != 'transfer' AND counterpart_account_id IS NULL AND leg IS NULL)
        )
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);
    "#,
    )?;

    {
        let mut insert_cat = tx.prepare("INSERT INTO categories(name) VALUES (?1)")?;
        for name in DEFAULT_CATEGORIES {
            insert_cat.execute(params![name])?;
        }
    }
    tx.execute(
        "INSERT INTO accounts(name, balance, opening_balance) VALUES (?1, '0', '0')",
        params![DEFAULT_ACCOUNT],
    )?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    tracing::info!(version = SCHEMA_VERSION, "created ledger schema and seeded defaults");
    Ok(true)
}
