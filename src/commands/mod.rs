// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod debts;
pub mod exporter;
pub mod reports;
pub mod settings;
pub mod streak;
pub mod subscriptions;
pub mod transactions;
pub mod wishlist;

use crate::db::{StoreName, load_store, save_store};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub(crate) fn load<T: DeserializeOwned + Default>(conn: &Connection, name: StoreName) -> Result<T> {
    load_store(conn, name).with_context(|| format!("Failed to load store '{}'", name.as_str()))
}

pub(crate) fn save<T: Serialize>(conn: &Connection, name: StoreName, value: &T) -> Result<()> {
    save_store(conn, name, value).with_context(|| format!("Failed to save store '{}'", name.as_str()))
}

/// First-run setup: default categories and settings, each only if absent.
/// Returns how many categories were seeded.
pub fn init(conn: &Connection) -> Result<usize> {
    let stored = crate::db::saved_stores(conn)?;
    let mut cats: Vec<crate::models::Category> = load(conn, StoreName::Categories)?;
    let seeded = crate::finance::categories::seed_defaults(&mut cats);
    if seeded > 0 {
        save(conn, StoreName::Categories, &cats)?;
    }
    if !stored.iter().any(|s| s == StoreName::Settings.as_str()) {
        save(conn, StoreName::Settings, &crate::models::UserSettings::default())?;
    }
    tracing::info!(seeded, "Data file initialized");
    Ok(seeded)
}
