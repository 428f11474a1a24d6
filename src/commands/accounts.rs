// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::ledger::Ledger;
use crate::utils::{fmt_money, id_for_account, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let balance = parse_decimal(arg(sub, "balance")?)?;
            let id = ledger.add_account(name, balance)?;
            println!("Added account '{}' (#{}, opening {})", name.trim(), id, fmt_money(&balance));
        }
        Some(("list", sub)) => {
            let accounts = ledger.list_accounts()?;
            if !maybe_print_json(sub.get_flag("json"), &accounts)? {
                let data = accounts
                    .iter()
                    .map(|a| vec![a.id.to_string(), a.name.clone(), fmt_money(&a.balance)])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Balance"], data));
            }
        }
        Some(("balance", sub)) => {
            let name = arg(sub, "name")?;
            let id = id_for_account(ledger.conn(), name)?;
            println!("{}", fmt_money(&ledger.account_balance(id)?));
        }
        _ => {}
    }
    Ok(())
}
