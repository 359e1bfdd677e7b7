// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::load;
use crate::db::StoreName;
use crate::models::Transaction;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    txs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "amount", "category", "note"])?;
            for t in &txs {
                wtr.write_record([
                    t.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                    t.r#type.as_str().to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.note.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                        "type": t.r#type.as_str(),
                        "amount": t.amount.to_string(),
                        "category": t.category,
                        "note": t.note,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::info!(count = txs.len(), format = %fmt, path = %out, "Transactions exported");
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
