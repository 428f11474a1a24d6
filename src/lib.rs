// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tally: a mutable-balance personal ledger on a single SQLite file.
//!
//! Store layout note: `accounts.balance`, `accounts.opening_balance`,
//! `categories.budget` and `transactions.amount` are declared `TEXT` and hold
//! canonical decimal strings (e.g. `"800"`, `"12.5"`), not `REAL`. Tools reading the
//! file directly should parse them as decimals; `CAST(... AS REAL)` works for ad-hoc
//! queries but loses exactness.

pub mod cli;
pub mod commands;
pub mod credentials;
pub mod db;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod utils;

pub use error::{LedgerError, Result};
pub use ledger::Ledger;
