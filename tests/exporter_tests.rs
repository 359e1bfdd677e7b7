// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneystreak::db::{StoreName, init_schema, save_store};
use moneystreak::models::{Transaction, TransactionType, new_id};
use moneystreak::{cli, commands::exporter};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let at = |d: u32| {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    };
    let txs = vec![
        Transaction {
            id: new_id(),
            r#type: TransactionType::Expense,
            amount: Decimal::new(1250, 2),
            date: at(3),
            category: "Food & Beverage".into(),
            note: "lunch, with team".into(),
            created_at: at(3),
        },
        Transaction {
            id: new_id(),
            r#type: TransactionType::Income,
            amount: Decimal::from(5000),
            date: at(1),
            category: "Salary".into(),
            note: String::new(),
            created_at: at(1),
        },
    ];
    save_store(&conn, StoreName::Transactions, &txs).unwrap();
    conn
}

fn export(conn: &Connection, format: &str, out: &str) {
    let matches = cli::build_cli().get_matches_from([
        "moneystreak", "export", "transactions", "--format", format, "--out", out,
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        exporter::handle(conn, sub).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_as_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    export(&conn, "json", out.to_str().unwrap());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            {"date": "2025-01-01 08:15:00", "type": "income", "amount": "5000", "category": "Salary", "note": ""},
            {"date": "2025-01-03 08:15:00", "type": "expense", "amount": "12.50", "category": "Food & Beverage", "note": "lunch, with team"}
        ])
    );
}

#[test]
fn export_transactions_as_csv_oldest_first() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    export(&conn, "csv", out.to_str().unwrap());

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["date", "type", "amount", "category", "note"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][2], "5000");
    assert_eq!(&records[1][4], "lunch, with team");
}
