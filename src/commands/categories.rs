// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::categories;
use crate::models::{Category, TransactionType};
use crate::utils::{maybe_print_json, pretty_table, short_id};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut cats: Vec<Category> = load(conn, StoreName::Categories)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let ty = parse_type(sub.get_one::<String>("type").unwrap())?;
            let added = categories::add_category(&mut cats, name, ty);
            save(conn, StoreName::Categories, &cats)?;
            println!("Added {} category '{}'", ty.as_str(), added.name);
        }
        Some(("list", sub)) => {
            let ty = sub
                .get_one::<String>("type")
                .map(|s| parse_type(s))
                .transpose()?;
            let rows: Vec<&Category> = match ty {
                Some(ty) if !sub.get_flag("all") => categories::visible_by_type(&cats, ty),
                _ => cats
                    .iter()
                    .filter(|c| sub.get_flag("all") || !c.is_hidden)
                    .filter(|c| ty.is_none_or(|ty| c.r#type == ty))
                    .collect(),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                let data = rows
                    .iter()
                    .map(|c| {
                        vec![
                            short_id(&c.id),
                            c.name.clone(),
                            c.r#type.as_str().to_string(),
                            if c.is_default { "yes" } else { "" }.to_string(),
                            if c.is_hidden { "hidden" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Category", "Type", "Default", "Visibility"], data)
                );
            }
        }
        Some(("hide", sub)) => {
            let id = resolve_category_id(&cats, sub.get_one::<String>("id").unwrap())?;
            let hidden = categories::toggle_hidden(&mut cats, &id)?;
            save(conn, StoreName::Categories, &cats)?;
            println!(
                "Category {} is now {}",
                short_id(&id),
                if hidden { "hidden" } else { "visible" }
            );
        }
        Some(("rename", sub)) => {
            let id = resolve_category_id(&cats, sub.get_one::<String>("id").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap();
            categories::rename(&mut cats, &id, name)?;
            save(conn, StoreName::Categories, &cats)?;
            println!(
                "Renamed category {} to '{}' (existing transactions keep the old name)",
                short_id(&id),
                name.trim()
            );
        }
        Some(("seed", _)) => {
            let added = categories::seed_defaults(&mut cats);
            if added > 0 {
                save(conn, StoreName::Categories, &cats)?;
            }
            println!("Seeded {} default categories", added);
        }
        _ => {}
    }
    Ok(())
}

pub(crate) fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>().map_err(|e| anyhow!(e))
}

/// Accepts a full id, an id prefix, or an exact category name.
pub(crate) fn resolve_category_id(cats: &[Category], key: &str) -> Result<String> {
    if let Ok(found) = categories::resolve(cats, key) {
        return Ok(found.id.clone());
    }
    crate::utils::resolve_id(cats.iter().map(|c| c.id.as_str()), key, "Category")
}
