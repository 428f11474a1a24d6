// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::credentials;
use crate::ledger::Ledger;
use anyhow::{Context, Result, bail};

/// Read a password from `--password`/`TALLY_PASSWORD`, or prompt without echo.
pub fn supplied_or_prompt(m: &clap::ArgMatches, id: &str, prompt: &str) -> Result<String> {
    if let Some(p) = m.get_one::<String>(id) {
        return Ok(p.clone());
    }
    rpassword::prompt_password(prompt).context("Failed to read password")
}

/// Refuse to continue unless the store is unprotected or the password matches.
pub fn gate(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    if !credentials::is_configured(ledger.conn())? {
        eprintln!("No password configured; run `tally password set` to protect this ledger.");
        return Ok(());
    }
    let attempt = supplied_or_prompt(m, "password", "Password: ")?;
    if !credentials::check_password(ledger.conn(), &attempt)? {
        bail!("Incorrect password");
    }
    Ok(())
}

pub fn handle(ledger: &Ledger, root: &clap::ArgMatches, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            if credentials::is_configured(ledger.conn())? {
                gate(ledger, root)?;
            }
            let new = match sub.get_one::<String>("new") {
                Some(p) => p.clone(),
                None => {
                    let first = rpassword::prompt_password("New password: ")
                        .context("Failed to read password")?;
                    let again = rpassword::prompt_password("Repeat password: ")
                        .context("Failed to read password")?;
                    if first != again {
                        bail!("Passwords do not match");
                    }
                    first
                }
            };
            if new.is_empty() {
                bail!("Password must not be empty");
            }
            credentials::set_password(ledger.conn(), &new)?;
            println!("Password updated");
        }
        Some(("check", _)) => {
            if !credentials::is_configured(ledger.conn())? {
                println!("No password configured");
                return Ok(());
            }
            let attempt = supplied_or_prompt(root, "password", "Password: ")?;
            if credentials::check_password(ledger.conn(), &attempt)? {
                println!("Password OK");
            } else {
                bail!("Incorrect password");
            }
        }
        Some(("status", _)) => {
            if credentials::is_configured(ledger.conn())? {
                println!("Password configured");
            } else {
                println!("No password configured");
            }
        }
        _ => {}
    }
    Ok(())
}
