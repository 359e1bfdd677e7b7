// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::budgets::daily_budget;
use crate::commands::settings::current;
use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::aggregate::spending_on;
use crate::finance::streak::{HISTORY_DAYS, StreakUpdate, history};
use crate::models::{DailyStreak, Transaction};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let streak: DailyStreak = load(conn, StoreName::Streak)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &streak)? {
                let tier = streak.tier();
                println!(
                    "{} {} day streak (best {}). {}",
                    tier.icon(),
                    streak.current_streak,
                    streak.longest_streak,
                    tier.message()
                );
                println!(
                    "Saving days: {}, overspend days: {}, last evaluated: {}",
                    streak.total_saving_days,
                    streak.total_overspend_days,
                    streak
                        .last_active_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "never".into())
                );
            }
        }
        Some(("update", sub)) => {
            let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
            let basis = sub.get_one::<String>("basis").unwrap();
            let budget = daily_budget(conn, clock, &txs, basis)?;
            let today = clock.today();
            let spending = spending_on(&txs, today);

            let mut streak: DailyStreak = load(conn, StoreName::Streak)?;
            match streak.update(today, spending, budget) {
                StreakUpdate::AlreadyRecorded => {
                    println!("Already evaluated {}; streak is {}", today, streak.current_streak);
                }
                StreakUpdate::Saved { current_streak } => {
                    save(conn, StoreName::Streak, &streak)?;
                    println!(
                        "{} Within budget today. Streak: {} days",
                        streak.tier().icon(),
                        current_streak
                    );
                }
                StreakUpdate::Overspent => {
                    save(conn, StoreName::Streak, &streak)?;
                    let ccy = current(conn)?.currency;
                    println!(
                        "{} Spent {} today; streak reset",
                        streak.tier().icon(),
                        fmt_money(&spending, &ccy)
                    );
                }
            }
        }
        Some(("history", sub)) => {
            let days = sub.get_one::<usize>("days").copied().unwrap_or(HISTORY_DAYS);
            let txs: Vec<Transaction> = load(conn, StoreName::Transactions)?;
            let basis = sub.get_one::<String>("basis").unwrap();
            let budget = daily_budget(conn, clock, &txs, basis)?;
            let h = history(&txs, clock.today(), budget, days);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &h)? {
                let ccy = current(conn)?.currency;
                let rows = h
                    .days
                    .iter()
                    .map(|d| {
                        vec![
                            d.date.to_string(),
                            fmt_money(&d.spending, &ccy),
                            if d.within_budget { "✓" } else { "✗" }.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Date", "Spent", "Within budget"], rows));
                println!(
                    "{} within budget, {} over, success rate {}%",
                    h.within_budget, h.over_budget, h.success_rate
                );
            }
        }
        Some(("reset", _)) => {
            let mut streak: DailyStreak = load(conn, StoreName::Streak)?;
            streak.reset();
            save(conn, StoreName::Streak, &streak)?;
            tracing::info!("Streak reset");
            println!("Streak reset");
        }
        _ => {}
    }
    Ok(())
}
