// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::ledger::Ledger;
use crate::models::NewTransfer;
use crate::utils::{fmt_money, id_for_account, parse_date, parse_decimal};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let from = arg(sub, "from")?;
    let to = arg(sub, "to")?;
    let from_id = id_for_account(ledger.conn(), from)?;
    let to_id = id_for_account(ledger.conn(), to)?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let date = parse_date(arg(sub, "date")?)?;

    let ids = ledger.execute_transfer(&NewTransfer {
        from_account_id: from_id,
        to_account_id: to_id,
        amount,
        description: arg(sub, "description")?.trim().to_string(),
        date,
    })?;
    println!(
        "Moved {} from {} to {} on {} (legs #{} / #{})",
        fmt_money(&amount),
        from.trim(),
        to.trim(),
        date,
        ids.debit_id,
        ids.credit_id
    );
    println!(
        "{}: {}  {}: {}",
        from.trim(),
        fmt_money(&ledger.account_balance(from_id)?),
        to.trim(),
        fmt_money(&ledger.account_balance(to_id)?)
    );
    Ok(())
}
