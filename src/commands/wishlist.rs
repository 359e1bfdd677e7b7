// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::settings::current;
use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::wishlist::{
    NewWishlistItem, add_item, cancel, delete_item, purchase, state, update_saved_amount,
};
use crate::models::WishlistItem;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_decimal, pretty_table, resolve_id, short_id,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let mut items: Vec<WishlistItem> = load(conn, StoreName::Wishlist)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let item = add_item(
                &mut items,
                NewWishlistItem {
                    name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                    price: parse_amount(sub.get_one::<String>("price").unwrap())?,
                    description: sub.get_one::<String>("description").cloned().unwrap_or_default(),
                    icon: sub.get_one::<String>("icon").cloned().unwrap_or_default(),
                },
                clock.now(),
            )?;
            save(conn, StoreName::Wishlist, &items)?;
            println!(
                "Added '{}' ({}). Come back in 30 days to decide.",
                item.name,
                short_id(&item.id)
            );
        }
        Some(("list", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let ccy = current(conn)?.currency;
                let now = clock.now();
                let data = items
                    .iter()
                    .map(|i| {
                        vec![
                            short_id(&i.id),
                            format!("{} {}", i.icon, i.name).trim().to_string(),
                            fmt_money(&i.price, &ccy),
                            fmt_money(&i.saved_amount, &ccy),
                            state(i, now).label(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Item", "Price", "Saved", "State"], data)
                );
            }
        }
        Some(("buy", sub)) => {
            let id = resolve(&items, sub)?;
            purchase(&mut items, &id, clock.now())?;
            save(conn, StoreName::Wishlist, &items)?;
            println!("Marked {} as purchased", short_id(&id));
        }
        Some(("cancel", sub)) => {
            let id = resolve(&items, sub)?;
            cancel(&mut items, &id)?;
            save(conn, StoreName::Wishlist, &items)?;
            println!("Cancelled {}; money saved", short_id(&id));
        }
        Some(("save", sub)) => {
            let id = resolve(&items, sub)?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            update_saved_amount(&mut items, &id, amount)?;
            save(conn, StoreName::Wishlist, &items)?;
            println!("Saved amount for {} set to {}", short_id(&id), amount);
        }
        Some(("rm", sub)) => {
            let id = resolve(&items, sub)?;
            let removed = delete_item(&mut items, &id)?;
            save(conn, StoreName::Wishlist, &items)?;
            println!("Deleted '{}'", removed.name);
        }
        _ => {}
    }
    Ok(())
}

fn resolve(items: &[WishlistItem], sub: &clap::ArgMatches) -> Result<String> {
    resolve_id(
        items.iter().map(|i| i.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
        "Wishlist item",
    )
}
