// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy for the ledger engine.
//!
//! Caller-contract violations (`DuplicateName`, `UnknownAccount`, `SameAccount`,
//! `InvalidKind`, ...) are detected before any write. `Storage` means the unit of
//! work was rolled back in full.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{entity} '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    #[error("Account #{0} not found")]
    UnknownAccount(i64),

    #[error("Category #{0} not found")]
    UnknownCategory(i64),

    #[error("Cannot transfer from account #{0} to itself")]
    SameAccount(i64),

    #[error("Invalid transaction kind '{0}' (use income|expense; transfers go through `transfer`)")]
    InvalidKind(String),

    #[error("Invalid amount {0}: amounts must not be negative")]
    InvalidAmount(Decimal),

    #[error("Applying {amount} to account #{account_id} would overflow or round its balance")]
    BalanceOutOfRange { account_id: i64, amount: Decimal },

    #[error("Name must not be empty")]
    InvalidName,

    #[error("Password hashing failed: {0}")]
    Credential(String),

    #[error("Stored {what} '{value}' is not valid")]
    CorruptValue { what: &'static str, value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Export to {} failed: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportCause,
    },
}

/// Underlying cause of a failed export write.
#[derive(Error, Debug)]
pub enum ExportCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn duplicate_account(name: impl Into<String>) -> Self {
        Self::DuplicateName {
            entity: "Account",
            name: name.into(),
        }
    }

    pub fn duplicate_category(name: impl Into<String>) -> Self {
        Self::DuplicateName {
            entity: "Category",
            name: name.into(),
        }
    }

    /// True for errors the user can fix by re-entering data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. }
                | Self::UnknownAccount(_)
                | Self::UnknownCategory(_)
                | Self::SameAccount(_)
                | Self::InvalidKind(_)
                | Self::InvalidAmount(_)
                | Self::BalanceOutOfRange { .. }
                | Self::InvalidName
        )
    }
}

/// Whether a rusqlite error is a UNIQUE constraint failure.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
