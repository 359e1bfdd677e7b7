// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::categories::resolve_category_id;
use crate::commands::settings::current;
use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::aggregate::{period_summary, spending_on};
use crate::finance::budget::{
    category_name, create_budget, daily_budget_from_balance, daily_budget_from_limits,
    delete_budget, evaluate, safe_to_spend, set_limit,
};
use crate::finance::period::{PeriodKind, month_key, resolve_period};
use crate::models::{Budget, Category, Transaction};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_month, pretty_table, resolve_id, short_id,
};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let cats: Vec<Category> = load(conn, StoreName::Categories)?;
            let category_id = resolve_category_id(&cats, sub.get_one::<String>("category").unwrap())?;
            let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
            let month = month_arg(sub, clock)?;
            let mut budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
            let budget = create_budget(&budgets, &category_id, limit, &month, clock.now())?;
            println!(
                "Budget for '{}' in {} set to {}",
                category_name(&cats, &category_id).unwrap_or_default(),
                budget.month,
                budget.limit
            );
            budgets.push(budget);
            save(conn, StoreName::Budgets, &budgets)?;
        }
        Some(("limit", sub)) => {
            let mut budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
            let id = resolve_id(
                budgets.iter().map(|b| b.id.as_str()),
                sub.get_one::<String>("id").unwrap(),
                "Budget",
            )?;
            let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
            set_limit(&mut budgets, &id, limit)?;
            save(conn, StoreName::Budgets, &budgets)?;
            println!("Budget {} limit changed to {}", short_id(&id), limit);
        }
        Some(("list", sub)) => {
            let month = month_arg(sub, clock)?;
            let budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
            let cats: Vec<Category> = load(conn, StoreName::Categories)?;
            let rows: Vec<&Budget> = budgets.iter().filter(|b| b.month == month).collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                let ccy = current(conn)?.currency;
                let data = rows
                    .iter()
                    .map(|b| {
                        vec![
                            short_id(&b.id),
                            b.month.clone(),
                            category_name(&cats, &b.category_id)
                                .unwrap_or("(deleted)")
                                .to_string(),
                            fmt_money(&b.limit, &ccy),
                            fmt_money(&b.spent, &ccy),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Month", "Category", "Limit", "Recorded"], data)
                );
            }
        }
        Some(("status", sub)) => {
            let month = month_arg(sub, clock)?;
            let budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
            let cats: Vec<Category> = load(conn, StoreName::Categories)?;
            let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
            let data = evaluate(&budgets, &cats, &txs, &month);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let ccy = current(conn)?.currency;
                let rows = data
                    .iter()
                    .map(|s| {
                        vec![
                            s.category_name.clone(),
                            fmt_money(&s.limit, &ccy),
                            fmt_money(&s.spent, &ccy),
                            fmt_money(&s.remaining, &ccy),
                            format!("{}%", s.percentage.round_dp(1)),
                            s.level.as_str().to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Category", "Limit", "Spent", "Remaining", "Used", "Status"],
                        rows
                    )
                );
            }
        }
        Some(("safe", sub)) => {
            let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
            let daily = daily_budget(conn, clock, &txs, "balance")?.unwrap_or(Decimal::ZERO);
            let s = safe_to_spend(daily, spending_on(&txs, clock.today()));
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let ccy = current(conn)?.currency;
                println!("Daily budget: {}", fmt_money(&s.daily_budget, &ccy));
                println!("Spent today:  {}", fmt_money(&s.spent_today, &ccy));
                if s.over_by > Decimal::ZERO {
                    println!("Over by:      {}", fmt_money(&s.over_by, &ccy));
                } else {
                    println!("Left today:   {}", fmt_money(&s.left_today, &ccy));
                }
            }
        }
        Some(("rm", sub)) => {
            let mut budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
            let id = resolve_id(
                budgets.iter().map(|b| b.id.as_str()),
                sub.get_one::<String>("id").unwrap(),
                "Budget",
            )?;
            let removed = delete_budget(&mut budgets, &id)?;
            save(conn, StoreName::Budgets, &budgets)?;
            println!("Deleted budget {} for {}", short_id(&removed.id), removed.month);
        }
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches, clock: &dyn Clock) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(month_key(clock.today())),
    }
}

/// Daily budget for today. `balance` spreads the fiscal-month balance over
/// the days left; `budgets` spreads this month's limits over 30 days.
pub(crate) fn daily_budget(
    conn: &Connection,
    clock: &dyn Clock,
    txs: &[Transaction],
    basis: &str,
) -> Result<Option<Decimal>> {
    let today = clock.today();
    match basis {
        "budgets" => {
            let budgets: Vec<Budget> = load(conn, StoreName::Budgets)?;
            Ok(daily_budget_from_limits(&budgets, &month_key(today)))
        }
        _ => {
            let settings = current(conn)?;
            let window = resolve_period(clock.now(), PeriodKind::Month, settings.start_day_of_month);
            let s = period_summary(txs, &window);
            Ok(Some(daily_budget_from_balance(s.income, s.expense, today)))
        }
    }
}
