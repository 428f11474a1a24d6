// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::ledger::Ledger;
use crate::utils::{fmt_money, id_for_category, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            ledger.add_category(name)?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", sub)) => {
            let categories = ledger.list_categories()?;
            if !maybe_print_json(sub.get_flag("json"), &categories)? {
                let data = categories
                    .iter()
                    .map(|c| vec![c.name.clone(), fmt_money(&c.budget)])
                    .collect();
                println!("{}", pretty_table(&["Category", "Budget"], data));
            }
        }
        Some(("budget", sub)) => {
            let name = arg(sub, "name")?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let id = id_for_category(ledger.conn(), name)?;
            ledger.set_category_budget(id, amount)?;
            println!("Budget for '{}' set to {}", name.trim(), fmt_money(&amount));
        }
        _ => {}
    }
    Ok(())
}
