// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneystreak::clock::SystemClock;
use moneystreak::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let clock = SystemClock;

    match matches.subcommand() {
        Some(("init", _)) => {
            let seeded = commands::init(&conn)?;
            println!("Database initialized at {}", db::db_path()?.display());
            if seeded > 0 {
                println!("Seeded {} default categories", seeded);
            }
        }
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &clock, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&conn, &clock, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &clock, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, &clock, sub)?,
        Some(("streak", sub)) => commands::streak::handle(&conn, &clock, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&conn, &clock, sub)?,
        Some(("sub", sub)) => commands::subscriptions::handle(&conn, &clock, sub)?,
        Some(("wish", sub)) => commands::wishlist::handle(&conn, &clock, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
