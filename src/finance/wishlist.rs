// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wishlist with a 30-day cooling-off period before a purchase decision.

use crate::errors::{FinanceError, FinanceResult};
use crate::models::{WishlistItem, new_id};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

pub const WAITING_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WishState {
    Waiting { days_left: i64 },
    ReadyToBuy,
    Purchased,
    Cancelled,
}

impl WishState {
    pub fn label(&self) -> String {
        match self {
            WishState::Waiting { days_left } => format!("waiting ({} days left)", days_left),
            WishState::ReadyToBuy => "ready to decide".to_string(),
            WishState::Purchased => "purchased".to_string(),
            WishState::Cancelled => "cancelled".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewWishlistItem {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub icon: String,
}

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days elapsed since creation, rounded down; negative when
/// `created_at` lies in the future.
pub fn days_since_created(item: &WishlistItem, now: NaiveDateTime) -> i64 {
    (now - item.created_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

pub fn days_left(item: &WishlistItem, now: NaiveDateTime) -> i64 {
    (WAITING_DAYS - days_since_created(item, now)).max(0)
}

pub fn state(item: &WishlistItem, now: NaiveDateTime) -> WishState {
    if item.is_purchased {
        WishState::Purchased
    } else if item.is_cancelled {
        WishState::Cancelled
    } else if days_since_created(item, now) < WAITING_DAYS {
        WishState::Waiting {
            days_left: days_left(item, now),
        }
    } else {
        WishState::ReadyToBuy
    }
}

pub fn waiting_items(items: &[WishlistItem], now: NaiveDateTime) -> Vec<&WishlistItem> {
    items
        .iter()
        .filter(|i| matches!(state(i, now), WishState::Waiting { .. }))
        .collect()
}

pub fn ready_items(items: &[WishlistItem], now: NaiveDateTime) -> Vec<&WishlistItem> {
    items
        .iter()
        .filter(|i| state(i, now) == WishState::ReadyToBuy)
        .collect()
}

pub fn purchased_items(items: &[WishlistItem]) -> Vec<&WishlistItem> {
    items.iter().filter(|i| i.is_purchased).collect()
}

pub fn add_item(
    items: &mut Vec<WishlistItem>,
    new: NewWishlistItem,
    now: NaiveDateTime,
) -> FinanceResult<WishlistItem> {
    if new.price <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveAmount(new.price));
    }
    let item = WishlistItem {
        id: new_id(),
        name: new.name,
        price: new.price,
        description: new.description,
        icon: new.icon,
        created_at: now,
        saved_amount: Decimal::ZERO,
        is_purchased: false,
        purchased_at: None,
        is_cancelled: false,
    };
    items.push(item.clone());
    Ok(item)
}

fn find_open<'a>(items: &'a mut [WishlistItem], id: &str) -> FinanceResult<&'a mut WishlistItem> {
    let item = items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| FinanceError::not_found("Wishlist item", id))?;
    if item.is_purchased || item.is_cancelled {
        return Err(FinanceError::AlreadyClosed {
            kind: "Wishlist item",
            id: id.to_string(),
        });
    }
    Ok(item)
}

pub fn purchase(items: &mut [WishlistItem], id: &str, now: NaiveDateTime) -> FinanceResult<()> {
    let item = find_open(items, id)?;
    item.is_purchased = true;
    item.purchased_at = Some(now);
    tracing::info!(id, name = %item.name, "Wishlist item purchased");
    Ok(())
}

pub fn cancel(items: &mut [WishlistItem], id: &str) -> FinanceResult<()> {
    let item = find_open(items, id)?;
    item.is_cancelled = true;
    tracing::info!(id, name = %item.name, "Wishlist item cancelled");
    Ok(())
}

pub fn update_saved_amount(items: &mut [WishlistItem], id: &str, amount: Decimal) -> FinanceResult<()> {
    let item = items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| FinanceError::not_found("Wishlist item", id))?;
    item.saved_amount = amount.max(Decimal::ZERO);
    Ok(())
}

pub fn delete_item(items: &mut Vec<WishlistItem>, id: &str) -> FinanceResult<WishlistItem> {
    let pos = items
        .iter()
        .position(|i| i.id == id)
        .ok_or_else(|| FinanceError::not_found("Wishlist item", id))?;
    Ok(items.remove(pos))
}
