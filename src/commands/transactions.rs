// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::categories::parse_type;
use crate::commands::settings::current;
use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::budget::record_expense;
use crate::finance::categories;
use crate::finance::period::month_key;
use crate::finance::transactions::{
    NewTransaction, TransactionPatch, add_transaction, delete_transaction, update_transaction,
};
use crate::models::{Budget, Category, Transaction};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_datetime, parse_month, pretty_table,
    resolve_id, short_id,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, clock, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let ty = parse_type(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => clock.now(),
    };
    let note = sub.get_one::<String>("note").cloned().unwrap_or_default();

    let cats: Vec<Category> = load(conn, StoreName::Categories)?;
    let category = categories::resolve(&cats, sub.get_one::<String>("category").unwrap())?
        .name
        .clone();

    let mut txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let tx = add_transaction(
        &mut txs,
        NewTransaction {
            r#type: ty,
            amount,
            date,
            category,
            note,
        },
        clock.now(),
    )?;

    let mut budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
    let alert = record_expense(&mut budgets, &cats, &tx, clock.today());

    // the transaction and the budget's spent figure commit together
    let db_tx = conn.unchecked_transaction()?;
    save(&db_tx, StoreName::Transactions, &txs)?;
    save(&db_tx, StoreName::Budgets, &budgets)?;
    db_tx.commit()?;

    let ccy = current(conn)?.currency;
    tracing::debug!(id = %tx.id, kind = ty.as_str(), amount = %tx.amount, "Transaction recorded");
    println!(
        "Recorded {} {} in '{}' on {} ({})",
        ty.as_str(),
        fmt_money(&tx.amount, &ccy),
        tx.category,
        tx.date.format("%Y-%m-%d %H:%M"),
        short_id(&tx.id)
    );
    if let Some(alert) = alert {
        println!(
            "Budget {}: '{}' at {}% ({} of {})",
            alert.level.as_str(),
            alert.category,
            alert.percentage.round(),
            fmt_money(&alert.spent, &ccy),
            fmt_money(&alert.limit, &ccy)
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    short_id(&r.id),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Amount", "Category", "Note"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub note: String,
}

/// Transactions matching the `month`, `category` and `type` filters, newest
/// first, cut to `limit` rows.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let ty = sub
        .get_one::<String>("type")
        .map(|s| parse_type(s))
        .transpose()?;
    let category = sub.get_one::<String>("category");

    let mut txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    txs.retain(|t| {
        month.as_ref().is_none_or(|m| month_key(t.date.date()) == *m)
            && ty.is_none_or(|ty| t.r#type == ty)
            && category.is_none_or(|c| t.category == *c)
    });
    txs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            r#type: t.r#type.as_str().to_string(),
            amount: t.amount.to_string(),
            category: t.category,
            note: t.note,
        })
        .collect())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let id = resolve_id(
        txs.iter().map(|t| t.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
        "Transaction",
    )?;

    let category = match sub.get_one::<String>("category") {
        Some(key) => {
            let cats: Vec<Category> = load(conn, StoreName::Categories)?;
            Some(categories::resolve(&cats, key)?.name.clone())
        }
        None => None,
    };
    let patch = TransactionPatch {
        r#type: sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_datetime(s))
            .transpose()?,
        category,
        note: sub.get_one::<String>("note").cloned(),
    };
    let tx = update_transaction(&mut txs, &id, patch)?;
    save(conn, StoreName::Transactions, &txs)?;
    println!("Updated transaction {}", short_id(&tx.id));
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let id = resolve_id(
        txs.iter().map(|t| t.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
        "Transaction",
    )?;
    let removed = delete_transaction(&mut txs, &id)?;
    save(conn, StoreName::Transactions, &txs)?;
    println!(
        "Deleted {} of {} in '{}'",
        removed.r#type.as_str(),
        removed.amount,
        removed.category
    );
    Ok(())
}
