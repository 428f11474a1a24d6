// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, date_range};
use crate::export::{ExportFormat, export_to};
use crate::ledger::Ledger;
use crate::models::Locale;
use anyhow::{Result, anyhow};
use std::path::Path;

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let format: ExportFormat = arg(sub, "format")?.parse().map_err(|e: String| anyhow!(e))?;
    let locale: Locale = arg(sub, "locale")?.parse().map_err(|e: String| anyhow!(e))?;
    let out = arg(sub, "out")?.trim();
    let range = date_range(sub)?;

    let n = export_to(ledger.conn(), Path::new(out), format, range, locale)?;
    println!("Exported {} transactions to {}", n, out);
    Ok(())
}
