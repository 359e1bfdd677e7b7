// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::FinanceResult;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneystreak", "moneystreak"));

pub const DB_ENV: &str = "MONEYSTREAK_DB";

/// Named JSON documents kept in the `stores` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreName {
    Transactions,
    Budgets,
    DebtLoans,
    Subscriptions,
    Wishlist,
    Streak,
    Settings,
    Categories,
}

impl StoreName {
    pub const ALL: [StoreName; 8] = [
        StoreName::Transactions,
        StoreName::Budgets,
        StoreName::DebtLoans,
        StoreName::Subscriptions,
        StoreName::Wishlist,
        StoreName::Streak,
        StoreName::Settings,
        StoreName::Categories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreName::Transactions => "transactions",
            StoreName::Budgets => "budgets",
            StoreName::DebtLoans => "debtLoans",
            StoreName::Subscriptions => "subscriptions",
            StoreName::Wishlist => "wishlist",
            StoreName::Streak => "streak",
            StoreName::Settings => "settings",
            StoreName::Categories => "categories",
        }
    }
}

pub fn db_path() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var(DB_ENV) {
        return Ok(PathBuf::from(custom));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneystreak.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "Store opened");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS stores(
        name TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

/// Loads a store, or its default when nothing was saved yet.
pub fn load_store<T: DeserializeOwned + Default>(conn: &Connection, name: StoreName) -> FinanceResult<T> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM stores WHERE name=?1",
            params![name.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    tracing::debug!(store = name.as_str(), found = raw.is_some(), "Store loaded");
    match raw {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(T::default()),
    }
}

/// Replaces a store wholesale; the last write wins.
pub fn save_store<T: Serialize>(conn: &Connection, name: StoreName, value: &T) -> FinanceResult<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO stores(name, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(name) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![name.as_str(), json],
    )?;
    tracing::debug!(store = name.as_str(), bytes = json.len(), "Store saved");
    Ok(())
}

/// Names of stores that currently hold data.
pub fn saved_stores(conn: &Connection) -> FinanceResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM stores ORDER BY name")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}
