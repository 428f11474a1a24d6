// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Startup password gate.
//!
//! A single Argon2id PHC string lives under the `password_hash` settings key.
//! A missing row, a NULL value and a zero-length value all mean "no password
//! configured", so a blanked hash reopens the setup flow instead of locking the store.

use crate::error::{LedgerError, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub const PASSWORD_KEY: &str = "password_hash";

fn stored_hash(conn: &Connection) -> Result<Option<Vec<u8>>> {
    let v: Option<Option<Vec<u8>>> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![PASSWORD_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.flatten().filter(|h| !h.is_empty()))
}

pub fn is_configured(conn: &Connection) -> Result<bool> {
    Ok(stored_hash(conn)?.is_some())
}

/// Like [`is_configured`], but false without touching the disk when the store
/// file does not exist yet.
pub fn is_configured_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let conn = Connection::open(path)?;
    let has_settings: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='settings')",
        [],
        |r| r.get(0),
    )?;
    if !has_settings {
        return Ok(false);
    }
    is_configured(&conn)
}

pub fn set_password(conn: &Connection, plaintext: &str) -> Result<()> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| LedgerError::Credential(e.to_string()))?
        .to_string();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![PASSWORD_KEY, hash.as_bytes()],
    )?;
    tracing::info!("password hash updated");
    Ok(())
}

/// True when no password is configured, or when `plaintext` matches the stored hash.
///
/// Callers must check [`is_configured`] first and route an unconfigured store to a
/// setup flow; the open default here is not an authentication success.
pub fn check_password(conn: &Connection, plaintext: &str) -> Result<bool> {
    let Some(raw) = stored_hash(conn)? else {
        return Ok(true);
    };
    let phc = std::str::from_utf8(&raw)
        .map_err(|_| LedgerError::Credential("stored hash is not UTF-8".into()))?;
    let parsed = PasswordHash::new(phc).map_err(|e| LedgerError::Credential(e.to_string()))?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => {
            tracing::debug!("password mismatch");
            Ok(false)
        }
        Err(e) => Err(LedgerError::Credential(e.to_string())),
    }
}
