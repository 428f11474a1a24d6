// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod doctor;
pub mod exporter;
pub mod password;
pub mod transactions;
pub mod transfer;

use anyhow::{Context, Result};

/// Fetch a string argument clap has already validated as present.
pub(crate) fn arg<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.as_str())
        .with_context(|| format!("Missing argument '{}'", id))
}

pub(crate) fn date_range(m: &clap::ArgMatches) -> Result<Option<crate::models::DateRange>> {
    let from = m
        .get_one::<String>("from")
        .map(|s| crate::utils::parse_date(s))
        .transpose()?;
    let to = m
        .get_one::<String>("to")
        .map(|s| crate::utils::parse_date(s))
        .transpose()?;
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    Ok(Some(crate::models::DateRange { from, to }))
}
