// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use tally::{Ledger, cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let mut ledger =
        Ledger::open(&path).with_context(|| format!("Open ledger at {}", path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger ready at {}", path.display());
        }
        Some(("password", sub)) => commands::password::handle(&ledger, &matches, sub)?,
        Some((name, sub)) => {
            commands::password::gate(&ledger, &matches)?;
            match name {
                "account" => commands::accounts::handle(&mut ledger, sub)?,
                "category" => commands::categories::handle(&mut ledger, sub)?,
                "tx" => commands::transactions::handle(&mut ledger, sub)?,
                "transfer" => commands::transfer::handle(&mut ledger, sub)?,
                "export" => commands::exporter::handle(&ledger, sub)?,
                "doctor" => commands::doctor::handle(&ledger)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
