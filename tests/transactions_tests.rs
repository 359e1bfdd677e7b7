// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneystreak::clock::FixedClock;
use moneystreak::commands::{self, transactions};
use moneystreak::db::{StoreName, init_schema, load_store};
use moneystreak::models::{Budget, Transaction};
use moneystreak::cli;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap(),
    )
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    commands::init(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["moneystreak"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let clock = clock();
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(conn, &clock, sub).unwrap(),
        Some(("budget", sub)) => commands::budgets::handle(conn, &clock, sub).unwrap(),
        Some(("category", sub)) => commands::categories::handle(conn, sub).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(name, _)| name)),
    }
}

fn list(conn: &Connection, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["moneystreak", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn add_defaults_to_now_and_lists_newest_first() {
    let conn = setup();
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "45000", "--category", "Food & Beverage", "--date", "2025-03-01"]);
    run(&conn, &["tx", "add", "--type", "income", "--amount", "15000000", "--category", "Salary", "--date", "2025-03-05 09:00"]);
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "12000", "--category", "Transportation", "--note", "bus"]);

    let rows = list(&conn, &[]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, "2025-03-10 18:30");
    assert_eq!(rows[0].note, "bus");
    assert_eq!(rows[2].category, "Food & Beverage");

    let limited = list(&conn, &["--limit", "2"]);
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[1].r#type, "income");
}

#[test]
fn list_filters_combine() {
    let conn = setup();
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "10", "--category", "Shopping", "--date", "2025-02-27"]);
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "20", "--category", "Shopping", "--date", "2025-03-02"]);
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "30", "--category", "Housing", "--date", "2025-03-03"]);

    assert_eq!(list(&conn, &["--month", "2025-03"]).len(), 2);
    let shopping = list(&conn, &["--month", "2025-03", "--category", "Shopping"]);
    assert_eq!(shopping.len(), 1);
    assert_eq!(shopping[0].amount, "20");
    assert!(list(&conn, &["--type", "income"]).is_empty());
}

#[test]
fn expenses_update_the_current_month_budget() {
    let conn = setup();
    run(&conn, &["budget", "add", "--category", "Food & Beverage", "--limit", "100000"]);
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "50000", "--category", "Food & Beverage"]);
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "30000", "--category", "Food & Beverage"]);

    let budgets: Vec<Budget> = load_store(&conn, StoreName::Budgets).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].month, "2025-03");
    assert_eq!(budgets[0].spent, Decimal::from(80_000));
}

#[test]
fn edit_and_remove_by_id_prefix() {
    let conn = setup();
    run(&conn, &["tx", "add", "--type", "expense", "--amount", "99", "--category", "Others"]);
    let txs: Vec<Transaction> = load_store(&conn, StoreName::Transactions).unwrap();
    let prefix = &txs[0].id[..8];

    run(&conn, &["tx", "edit", "--id", prefix, "--amount", "120", "--note", "fixed"]);
    let txs: Vec<Transaction> = load_store(&conn, StoreName::Transactions).unwrap();
    assert_eq!(txs[0].amount, Decimal::from(120));
    assert_eq!(txs[0].note, "fixed");

    run(&conn, &["tx", "rm", "--id", prefix]);
    let txs: Vec<Transaction> = load_store(&conn, StoreName::Transactions).unwrap();
    assert!(txs.is_empty());
}

#[test]
fn unknown_category_is_an_error() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "moneystreak", "tx", "add", "--type", "expense", "--amount", "1", "--category", "Nope",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&conn, &clock(), sub).is_err());
    assert!(list(&conn, &[]).is_empty());
}

#[test]
fn non_positive_amounts_are_rejected() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "moneystreak", "tx", "add", "--type", "expense", "--amount", "0", "--category", "Others",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&conn, &clock(), sub).is_err());
}

#[test]
fn failed_budget_write_rolls_back_the_transaction() {
    let conn = setup();
    conn.execute_batch(
        "CREATE TRIGGER lock_budgets_insert BEFORE INSERT ON stores WHEN NEW.name = 'budgets'
         BEGIN SELECT RAISE(ABORT, 'budgets locked'); END;
         CREATE TRIGGER lock_budgets_update BEFORE UPDATE ON stores WHEN NEW.name = 'budgets'
         BEGIN SELECT RAISE(ABORT, 'budgets locked'); END;",
    )
    .unwrap();
    let matches = cli::build_cli().get_matches_from([
        "moneystreak", "tx", "add", "--type", "expense", "--amount", "25", "--category", "Others",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&conn, &clock(), sub).is_err());
    let txs: Vec<Transaction> = load_store(&conn, StoreName::Transactions).unwrap();
    assert!(txs.is_empty());
}
