// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, pretty_table};
use anyhow::{Result, bail};

pub fn handle(ledger: &Ledger) -> Result<()> {
    let drift = ledger.reconcile()?;
    if drift.is_empty() {
        println!("doctor: all balances match transaction history");
        return Ok(());
    }
    let rows = drift
        .iter()
        .map(|d| {
            vec![
                d.account_name.clone(),
                fmt_money(&d.stored),
                fmt_money(&d.expected),
                d.stored
                    .checked_sub(d.expected)
                    .map(|diff| fmt_money(&diff))
                    .unwrap_or_else(|| "out of range".to_string()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Account", "Stored", "From history", "Difference"], rows)
    );
    bail!("{} account(s) drifted from their history", drift.len())
}
