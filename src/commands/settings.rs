// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{load, save};
use crate::db::StoreName;
use crate::finance::period::validate_start_day;
use crate::models::{AccentColor, Theme, UserSettings};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn current(conn: &Connection) -> Result<UserSettings> {
    load(conn, StoreName::Settings)
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = current(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
        let rows = vec![
            vec!["currency".into(), settings.currency.clone()],
            vec![
                "start day of month".into(),
                settings.start_day_of_month.to_string(),
            ],
            vec!["theme".into(), format!("{:?}", settings.theme).to_lowercase()],
            vec![
                "accent color".into(),
                format!("{:?}", settings.accent_color).to_lowercase(),
            ],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut settings = current(conn)?;
    if let Some(ccy) = sub.get_one::<String>("currency") {
        settings.currency = ccy.trim().to_uppercase();
    }
    if let Some(day) = sub.get_one::<u32>("start_day") {
        settings.start_day_of_month = validate_start_day(*day)?;
    }
    if let Some(theme) = sub.get_one::<String>("theme") {
        settings.theme = theme.parse::<Theme>().map_err(|e| anyhow!(e))?;
    }
    if let Some(accent) = sub.get_one::<String>("accent") {
        settings.accent_color = accent.parse::<AccentColor>().map_err(|e| anyhow!(e))?;
    }
    save(conn, StoreName::Settings, &settings)?;
    tracing::info!(
        currency = %settings.currency,
        start_day = settings.start_day_of_month,
        "Settings updated"
    );
    println!(
        "Settings saved (currency {}, month starts on day {})",
        settings.currency, settings.start_day_of_month
    );
    Ok(())
}
