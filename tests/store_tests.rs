// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneystreak::commands;
use moneystreak::db::{StoreName, init_schema, load_store, save_store, saved_stores};
use moneystreak::models::{Category, DailyStreak, Transaction, UserSettings};
use rusqlite::Connection;
use std::collections::HashSet;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[test]
fn missing_stores_load_as_defaults() {
    let conn = setup();
    let txs: Vec<Transaction> = load_store(&conn, StoreName::Transactions).unwrap();
    assert!(txs.is_empty());
    let streak: DailyStreak = load_store(&conn, StoreName::Streak).unwrap();
    assert_eq!(streak, DailyStreak::default());
    let settings: UserSettings = load_store(&conn, StoreName::Settings).unwrap();
    assert_eq!(settings.currency, "VND");
    assert_eq!(settings.start_day_of_month, 1);
}

#[test]
fn last_save_wins() {
    let conn = setup();
    let mut settings = UserSettings::default();
    settings.start_day_of_month = 15;
    save_store(&conn, StoreName::Settings, &settings).unwrap();
    settings.currency = "USD".into();
    save_store(&conn, StoreName::Settings, &settings).unwrap();

    let loaded: UserSettings = load_store(&conn, StoreName::Settings).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(saved_stores(&conn).unwrap(), vec!["settings"]);
}

#[test]
fn settings_json_uses_camel_case_keys() {
    let conn = setup();
    save_store(&conn, StoreName::Settings, &UserSettings::default()).unwrap();
    let raw: String = conn
        .query_row("SELECT value FROM stores WHERE name='settings'", [], |r| r.get(0))
        .unwrap();
    assert!(raw.contains("\"startDayOfMonth\":1"));
    assert!(raw.contains("\"accentColor\":\"blue\""));
}

#[test]
fn store_names_are_distinct() {
    let names: HashSet<&str> = StoreName::ALL.iter().map(|s| s.as_str()).collect();
    assert_eq!(names.len(), StoreName::ALL.len());
    assert!(names.contains("debtLoans"));
}

#[test]
fn init_seeds_once() {
    let conn = setup();
    let seeded = commands::init(&conn).unwrap();
    assert_eq!(seeded, 19);
    assert_eq!(commands::init(&conn).unwrap(), 0);

    let cats: Vec<Category> = load_store(&conn, StoreName::Categories).unwrap();
    assert_eq!(cats.len(), 19);
    assert!(cats.iter().all(|c| c.is_default));
    let stored = saved_stores(&conn).unwrap();
    assert_eq!(stored, vec!["categories", "settings"]);
}
