// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only projection of transactions joined to their account and category,
//! plus the CSV/JSON writers that put it on disk.

use crate::error::{ExportCause, LedgerError, Result};
use crate::models::{DateRange, ExportRow, Locale, TxKind};
use crate::utils::{date_column, decimal_column};
use rusqlite::Connection;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {} (use csv|json)", other)),
        }
    }
}

pub fn headers(locale: Locale) -> [&'static str; 6] {
    match locale {
        Locale::En => ["Date", "Account", "Type", "Amount", "Category", "Description"],
        Locale::Fa => ["تاریخ", "حساب", "نوع", "مبلغ", "دسته", "شرح"],
    }
}

/// Newest first; transfers and uncategorized rows carry an empty category.
pub fn export_rows(
    conn: &Connection,
    range: Option<DateRange>,
    locale: Locale,
) -> Result<Vec<ExportRow>> {
    let range = range.unwrap_or_default();
    let mut stmt = conn.prepare(
        "SELECT t.transaction_date, a.name, t.type, t.amount, c.name, t.description
         FROM transactions t
         JOIN accounts a ON t.account_id=a.id
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE (?1 IS NULL OR t.transaction_date>=?1)
           AND (?2 IS NULL OR t.transaction_date<=?2)
         ORDER BY t.transaction_date DESC, t.id DESC",
    )?;
    let mut rows = stmt.query((
        range.from.map(|d| d.to_string()),
        range.to.map(|d| d.to_string()),
    ))?;

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let category: Option<String> = r.get(4)?;
        let description: Option<String> = r.get(5)?;
        let kind = kind
            .parse::<TxKind>()
            .map_err(|_| LedgerError::CorruptValue {
                what: "transaction kind",
                value: kind.clone(),
            })?;
        out.push(ExportRow {
            date: date_column(&date)?,
            account: r.get(1)?,
            kind: kind.label(locale).to_string(),
            amount: decimal_column("transaction amount", &amount)?,
            category: category.unwrap_or_default(),
            description: description.unwrap_or_default(),
        });
    }
    Ok(out)
}

pub fn write_csv(rows: &[ExportRow], path: &Path, locale: Locale) -> Result<()> {
    let fail = |source: ExportCause| LedgerError::Export {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(|e| fail(e.into()))?;
    wtr.write_record(headers(locale))
        .map_err(|e| fail(e.into()))?;
    for row in rows {
        wtr.write_record([
            row.date.to_string(),
            row.account.clone(),
            row.kind.clone(),
            row.amount.to_string(),
            row.category.clone(),
            row.description.clone(),
        ])
        .map_err(|e| fail(e.into()))?;
    }
    wtr.flush().map_err(|e| fail(e.into()))?;
    Ok(())
}

pub fn write_json(rows: &[ExportRow], path: &Path) -> Result<()> {
    let fail = |source: ExportCause| LedgerError::Export {
        path: path.to_path_buf(),
        source,
    };
    let body = serde_json::to_string_pretty(rows).map_err(|e| fail(e.into()))?;
    std::fs::write(path, body).map_err(|e| fail(e.into()))?;
    Ok(())
}

/// Project the ledger and write it in `format`. Returns the number of rows written.
pub fn export_to(
    conn: &Connection,
    path: &Path,
    format: ExportFormat,
    range: Option<DateRange>,
    locale: Locale,
) -> Result<usize> {
    let rows = export_rows(conn, range, locale)?;
    match format {
        ExportFormat::Csv => write_csv(&rows, path, locale)?,
        ExportFormat::Json => write_json(&rows, path)?,
    }
    tracing::debug!(rows = rows.len(), path = %path.display(), "export written");
    Ok(rows.len())
}
