// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    pub opening_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Advisory threshold; no balance or report logic reads it.
    pub budget: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
    Transfer,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Transfer => "transfer",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, TxKind::Income) => "Income",
            (Locale::En, TxKind::Expense) => "Expense",
            (Locale::En, TxKind::Transfer) => "Transfer",
            (Locale::Fa, TxKind::Income) => "درآمد",
            (Locale::Fa, TxKind::Expense) => "هزینه",
            (Locale::Fa, TxKind::Transfer) => "انتقال",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            "transfer" => Ok(TxKind::Transfer),
            _ => Err(LedgerError::InvalidKind(s.to_string())),
        }
    }
}

/// Which side of a transfer a leg sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferLeg {
    Debit,
    Credit,
}

impl TransferLeg {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferLeg::Debit => "debit",
            TransferLeg::Credit => "credit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debit" => Some(TransferLeg::Debit),
            "credit" => Some(TransferLeg::Credit),
            _ => None,
        }
    }
}

/// Kind-specific payload of a stored transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Income {
        category_id: Option<i64>,
    },
    Expense {
        category_id: Option<i64>,
    },
    Transfer {
        counterpart_account_id: i64,
        leg: TransferLeg,
    },
}

impl Entry {
    pub fn kind(&self) -> TxKind {
        match self {
            Entry::Income { .. } => TxKind::Income,
            Entry::Expense { .. } => TxKind::Expense,
            Entry::Transfer { .. } => TxKind::Transfer,
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        match self {
            Entry::Income { category_id } | Entry::Expense { category_id } => *category_id,
            Entry::Transfer { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub entry: Entry,
}

impl Transaction {
    pub fn kind(&self) -> TxKind {
        self.entry.kind()
    }

    /// Signed change this row made to its account's balance.
    pub fn signed_effect(&self) -> Decimal {
        match self.entry {
            Entry::Income { .. } => self.amount,
            Entry::Expense { .. } => -self.amount,
            Entry::Transfer {
                leg: TransferLeg::Credit,
                ..
            } => self.amount,
            Entry::Transfer {
                leg: TransferLeg::Debit,
                ..
            } => -self.amount,
        }
    }
}

/// Input for `Ledger::record_transaction`.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    pub account_id: i64,
}

/// Input for `Ledger::execute_transfer`.
#[derive(Debug, Clone)]
pub struct NewTransfer {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

/// Ids of the two rows written by a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferIds {
    pub debit_id: i64,
    pub credit_id: i64,
}

/// Inclusive date window; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<i64>,
    pub range: DateRange,
    pub limit: Option<usize>,
}

/// An account whose stored balance disagrees with its history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceDrift {
    pub account_id: i64,
    pub account_name: String,
    pub stored: Decimal,
    pub expected: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Fa,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fa" => Ok(Locale::Fa),
            other => Err(format!("Unknown locale '{}' (use en|fa)", other)),
        }
    }
}

/// One denormalized row of the export projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub account: String,
    pub kind: String,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}
