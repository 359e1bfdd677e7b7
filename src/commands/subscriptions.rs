// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::settings::current;
use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::subscriptions::{
    NewSubscription, SubscriptionPatch, add_subscription, cancel, delete_subscription, due_soon,
    due_today, process_payment, toggle_active, total_monthly, update_subscription,
};
use crate::models::{BillingCycle, Subscription};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_datetime, pretty_table, resolve_id, short_id,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let mut subs: Vec<Subscription> = load(conn, StoreName::Subscriptions)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let billing_cycle = sub
                .get_one::<String>("cycle")
                .unwrap()
                .parse::<BillingCycle>()
                .map_err(|e| anyhow!(e))?;
            let added = add_subscription(
                &mut subs,
                NewSubscription {
                    name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                    amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
                    description: sub.get_one::<String>("description").cloned(),
                    billing_cycle,
                    next_billing_date: parse_datetime(sub.get_one::<String>("next").unwrap())?,
                    category: sub.get_one::<String>("category").cloned(),
                },
                clock.now(),
            )?;
            save(conn, StoreName::Subscriptions, &subs)?;
            println!(
                "Added {} subscription '{}' ({}), next bill {}",
                added.billing_cycle.as_str(),
                added.name,
                short_id(&added.id),
                added.next_billing_date.date()
            );
        }
        Some(("list", sub)) => {
            let rows: Vec<&Subscription> = subs.iter().collect();
            print_subs(conn, sub, &rows)?;
            if !sub.get_flag("json") && !sub.get_flag("jsonl") {
                for s in due_today(&subs, clock.today()) {
                    println!("Due today: {} ({})", s.name, s.amount);
                }
            }
        }
        Some(("pay", sub)) => {
            let id = resolve(&subs, sub)?;
            let next = process_payment(&mut subs, &id)?;
            save(conn, StoreName::Subscriptions, &subs)?;
            println!("Paid; next bill on {}", next.date());
        }
        Some(("edit", sub)) => {
            let id = resolve(&subs, sub)?;
            let patch = SubscriptionPatch {
                name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
                amount: sub
                    .get_one::<String>("amount")
                    .map(|s| parse_amount(s))
                    .transpose()?,
                description: sub.get_one::<String>("description").cloned(),
                billing_cycle: sub
                    .get_one::<String>("cycle")
                    .map(|s| s.parse::<BillingCycle>().map_err(|e| anyhow!(e)))
                    .transpose()?,
                category: sub.get_one::<String>("category").cloned(),
            };
            update_subscription(&mut subs, &id, patch)?;
            save(conn, StoreName::Subscriptions, &subs)?;
            println!("Updated subscription {}", short_id(&id));
        }
        Some(("toggle", sub)) => {
            let id = resolve(&subs, sub)?;
            let active = toggle_active(&mut subs, &id)?;
            save(conn, StoreName::Subscriptions, &subs)?;
            println!(
                "Subscription {} is now {}",
                short_id(&id),
                if active { "active" } else { "paused" }
            );
        }
        Some(("cancel", sub)) => {
            let id = resolve(&subs, sub)?;
            cancel(&mut subs, &id)?;
            save(conn, StoreName::Subscriptions, &subs)?;
            println!("Cancelled subscription {}", short_id(&id));
        }
        Some(("due", sub)) => {
            let days = *sub.get_one::<u32>("days").unwrap();
            let rows = due_soon(&subs, clock.now(), days);
            print_subs(conn, sub, &rows)?;
        }
        Some(("total", _)) => {
            let ccy = current(conn)?.currency;
            println!(
                "Monthly cost of active subscriptions: {}",
                fmt_money(&total_monthly(&subs), &ccy)
            );
        }
        Some(("rm", sub)) => {
            let id = resolve(&subs, sub)?;
            let removed = delete_subscription(&mut subs, &id)?;
            save(conn, StoreName::Subscriptions, &subs)?;
            println!("Deleted subscription '{}'", removed.name);
        }
        _ => {}
    }
    Ok(())
}

fn resolve(subs: &[Subscription], sub: &clap::ArgMatches) -> Result<String> {
    resolve_id(
        subs.iter().map(|s| s.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
        "Subscription",
    )
}

fn print_subs(conn: &Connection, sub: &clap::ArgMatches, rows: &[&Subscription]) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let ccy = current(conn)?.currency;
    let data = rows
        .iter()
        .map(|s| {
            vec![
                short_id(&s.id),
                s.name.clone(),
                fmt_money(&s.amount, &ccy),
                s.billing_cycle.as_str().to_string(),
                s.next_billing_date.date().to_string(),
                fmt_money(&s.billing_cycle.monthly_equivalent(s.amount), &ccy),
                if s.is_active { "active" } else { "paused" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Amount", "Cycle", "Next bill", "Per month", "Status"],
            data
        )
    );
    Ok(())
}
