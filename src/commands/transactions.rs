// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, date_range};
use crate::ledger::Ledger;
use crate::models::{NewTransaction, TransactionFilter, TxKind};
use crate::utils::{
    fmt_money, id_for_account, id_for_category, maybe_print_json, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = arg(sub, "kind")?.parse()?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let date = parse_date(arg(sub, "date")?)?;
    let account_name = arg(sub, "account")?;
    let account_id = id_for_account(ledger.conn(), account_name)?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(ledger.conn(), c))
        .transpose()?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let id = ledger.record_transaction(&NewTransaction {
        kind,
        amount,
        description,
        date,
        category_id,
        account_id,
    })?;
    println!(
        "Recorded {} {} on {} (acct: {}, #{}); balance now {}",
        kind,
        fmt_money(&amount),
        date,
        account_name.trim(),
        id,
        fmt_money(&ledger.account_balance(account_id)?)
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Account", "Type", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let account_id = sub
        .get_one::<String>("account")
        .map(|a| id_for_account(ledger.conn(), a))
        .transpose()?;
    let filter = TransactionFilter {
        account_id,
        range: date_range(sub)?.unwrap_or_default(),
        limit: sub.get_one::<usize>("limit").copied(),
    };

    let accounts: HashMap<i64, String> = ledger
        .list_accounts()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let categories: HashMap<i64, String> = ledger
        .list_categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let rows = ledger
        .list_transactions(&filter)?
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            account: accounts.get(&t.account_id).cloned().unwrap_or_default(),
            kind: t.kind().to_string(),
            amount: t.amount.to_string(),
            category: t
                .entry
                .category_id()
                .and_then(|c| categories.get(&c).cloned())
                .unwrap_or_default(),
            description: t.description.unwrap_or_default(),
        })
        .collect();
    Ok(rows)
}
