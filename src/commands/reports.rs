// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::categories::parse_type;
use crate::commands::load;
use crate::commands::settings::current;
use crate::db::StoreName;
use crate::finance::aggregate::{
    cashflow, daily_totals, monthly_report, period_summary, recent, top_categories,
};
use crate::finance::period::{PeriodKind, Window, month_key, resolve_period};
use crate::models::Transaction;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("top", sub)) => top(conn, clock, sub)?,
        Some(("cashflow", sub)) => cashflow_report(conn, clock, sub)?,
        Some(("month", sub)) => month(conn, clock, sub)?,
        Some(("daily", sub)) => daily(conn, clock, sub)?,
        Some(("recent", sub)) => recent_report(conn, clock, sub)?,
        _ => {}
    }
    Ok(())
}

/// Resolves `--period` against the configured fiscal start day.
fn window_for(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<Window> {
    let kind = sub
        .get_one::<String>("period")
        .map(|s| s.parse::<PeriodKind>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or(PeriodKind::Month);
    let settings = current(conn)?;
    Ok(resolve_period(clock.now(), kind, settings.start_day_of_month))
}

fn window_label(w: &Window) -> String {
    format!("{} .. {}", w.first_day(), w.last_day())
}

pub fn summary(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let window = window_for(conn, clock, sub)?;
    let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let s = period_summary(&txs, &window);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let ccy = current(conn)?.currency;
        println!("Period {}", window_label(&window));
        let rows = vec![
            vec!["Income".into(), fmt_money(&s.income, &ccy)],
            vec!["Expense".into(), fmt_money(&s.expense, &ccy)],
            vec!["Balance".into(), fmt_money(&s.balance, &ccy)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

fn top(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let ty = parse_type(sub.get_one::<String>("type").unwrap())?;
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let window = window_for(conn, clock, sub)?;
    let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let data = top_categories(&txs, &window, ty, limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = current(conn)?.currency;
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.amount, &ccy),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!("Top {} categories, {}", ty.as_str(), window_label(&window));
        println!("{}", pretty_table(&["Category", "Amount", "Share"], rows));
    }
    Ok(())
}

fn cashflow_report(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let months = *sub.get_one::<usize>("months").unwrap();
    let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let data = cashflow(&txs, clock.today(), months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = current(conn)?.currency;
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    fmt_money(&p.income, &ccy),
                    fmt_money(&p.expense, &ccy),
                    fmt_money(&p.balance, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}

fn month(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => month_key(clock.today()),
    };
    let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let report = monthly_report(&txs, &month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let ccy = current(conn)?.currency;
        println!(
            "{}: income {}, expense {}, balance {}",
            report.month,
            fmt_money(&report.total_income, &ccy),
            fmt_money(&report.total_expense, &ccy),
            fmt_money(&report.balance, &ccy)
        );
        let rows = report
            .expenses_by_category
            .iter()
            .map(|(cat, amount)| vec![cat.clone(), fmt_money(amount, &ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn daily(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let window = window_for(conn, clock, sub)?;
    let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let data = daily_totals(&txs, &window);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = current(conn)?.currency;
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    fmt_money(&d.total_income, &ccy),
                    fmt_money(&d.total_expense, &ccy),
                    d.transactions.len().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expense", "Entries"], rows)
        );
    }
    Ok(())
}

fn recent_report(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let window = window_for(conn, clock, sub)?;
    let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
    let data = recent(&txs, &window, limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = current(conn)?.currency;
        let rows = data
            .iter()
            .map(|t| {
                vec![
                    t.date.format("%Y-%m-%d %H:%M").to_string(),
                    t.r#type.as_str().to_string(),
                    fmt_money(&t.amount, &ccy),
                    t.category.clone(),
                    t.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Note"], rows)
        );
    }
    Ok(())
}
