// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::settings::current;
use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::debts::{
    DebtLoanPatch, NewDebtLoan, add_item, add_payment, delete_item, due_soon, mark_as_paid,
    remaining, total_outstanding, update_item,
};
use crate::models::{DebtKind, DebtLoan};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_datetime, pretty_table, resolve_id, short_id,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let mut items: Vec<DebtLoan> = load(conn, StoreName::DebtLoans)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let due_date = sub
                .get_one::<String>("due")
                .map(|s| parse_datetime(s))
                .transpose()?;
            let item = add_item(
                &mut items,
                NewDebtLoan {
                    kind,
                    person: sub.get_one::<String>("person").unwrap().trim().to_string(),
                    amount,
                    description: sub.get_one::<String>("description").cloned().unwrap_or_default(),
                    due_date,
                    note: sub.get_one::<String>("note").cloned(),
                },
                clock.now(),
            )?;
            save(conn, StoreName::DebtLoans, &items)?;
            println!(
                "Added {} with {} for {} ({})",
                item.r#type.as_str(),
                item.person,
                item.amount,
                short_id(&item.id)
            );
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|s| parse_kind(s))
                .transpose()?;
            let show_all = sub.get_flag("all");
            let rows: Vec<&DebtLoan> = items
                .iter()
                .filter(|i| show_all || !i.is_paid)
                .filter(|i| kind.is_none_or(|k| i.r#type == k))
                .collect();
            print_items(conn, sub, &rows)?;
        }
        Some(("pay", sub)) => {
            let id = resolve(&items, sub)?;
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let applied = add_payment(&mut items, &id, amount, clock.now())?;
            save(conn, StoreName::DebtLoans, &items)?;
            let left = items
                .iter()
                .find(|i| i.id == id)
                .map(remaining)
                .unwrap_or_default();
            println!("{}", payment_summary(&id, applied, amount));
            println!("Remaining: {}", left);
        }
        Some(("edit", sub)) => {
            let id = resolve(&items, sub)?;
            let patch = DebtLoanPatch {
                person: sub.get_one::<String>("person").map(|s| s.trim().to_string()),
                amount: sub
                    .get_one::<String>("amount")
                    .map(|s| parse_amount(s))
                    .transpose()?,
                description: sub.get_one::<String>("description").cloned(),
                due_date: sub
                    .get_one::<String>("due")
                    .map(|s| parse_datetime(s))
                    .transpose()?,
                note: sub.get_one::<String>("note").cloned(),
            };
            update_item(&mut items, &id, patch)?;
            save(conn, StoreName::DebtLoans, &items)?;
            println!("Updated {}", short_id(&id));
        }
        Some(("settle", sub)) => {
            let id = resolve(&items, sub)?;
            if mark_as_paid(&mut items, &id, clock.now())? {
                save(conn, StoreName::DebtLoans, &items)?;
                println!("Marked {} as paid", short_id(&id));
            } else {
                println!("{} is already settled", short_id(&id));
            }
        }
        Some(("due", sub)) => {
            let days = *sub.get_one::<u32>("days").unwrap();
            let rows = due_soon(&items, clock.now(), days);
            print_items(conn, sub, &rows)?;
        }
        Some(("totals", sub)) => {
            let totals = Totals {
                debt: total_outstanding(&items, DebtKind::Debt),
                loan: total_outstanding(&items, DebtKind::Loan),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
                let ccy = current(conn)?.currency;
                println!("You owe:      {}", fmt_money(&totals.debt, &ccy));
                println!("Owed to you:  {}", fmt_money(&totals.loan, &ccy));
            }
        }
        Some(("rm", sub)) => {
            let id = resolve(&items, sub)?;
            let removed = delete_item(&mut items, &id)?;
            save(conn, StoreName::DebtLoans, &items)?;
            println!("Deleted {} with {}", removed.r#type.as_str(), removed.person);
        }
        _ => {}
    }
    Ok(())
}

/// One-line outcome of `debt pay`, distinguishing a settled item from a
/// clamped overpayment.
pub fn payment_summary(id: &str, applied: Decimal, requested: Decimal) -> String {
    if applied.is_zero() {
        format!("Nothing applied; {} is already settled", short_id(id))
    } else if applied < requested {
        format!(
            "Applied {} of {} (the rest exceeded the balance)",
            applied, requested
        )
    } else {
        format!("Applied {}", applied)
    }
}

#[derive(Serialize)]
struct Totals {
    debt: Decimal,
    loan: Decimal,
}

fn parse_kind(s: &str) -> Result<DebtKind> {
    s.parse::<DebtKind>().map_err(|e| anyhow!(e))
}

fn resolve(items: &[DebtLoan], sub: &clap::ArgMatches) -> Result<String> {
    resolve_id(
        items.iter().map(|i| i.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
        "Debt/loan",
    )
}

fn print_items(conn: &Connection, sub: &clap::ArgMatches, rows: &[&DebtLoan]) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let ccy = current(conn)?.currency;
    let data = rows
        .iter()
        .map(|i| {
            vec![
                short_id(&i.id),
                i.r#type.as_str().to_string(),
                i.person.clone(),
                fmt_money(&i.amount, &ccy),
                fmt_money(&remaining(i), &ccy),
                i.due_date
                    .map(|d| d.date().to_string())
                    .unwrap_or_default(),
                if i.is_paid { "paid" } else { "open" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Type", "Person", "Amount", "Remaining", "Due", "Status"],
            data
        )
    );
    Ok(())
}
