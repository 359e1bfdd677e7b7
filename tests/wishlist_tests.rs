// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use moneystreak::errors::FinanceError;
use moneystreak::finance::wishlist::{
    NewWishlistItem, WishState, add_item, cancel, days_left, days_since_created, purchase,
    purchased_items, ready_items, state, update_saved_amount, waiting_items,
};
use moneystreak::models::WishlistItem;
use rust_decimal::Decimal;

fn created() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

fn new(name: &str) -> NewWishlistItem {
    NewWishlistItem {
        name: name.into(),
        price: Decimal::from(2_000_000),
        description: String::new(),
        icon: "🎧".into(),
    }
}

#[test]
fn waiting_period_lasts_thirty_days() {
    let mut items: Vec<WishlistItem> = Vec::new();
    add_item(&mut items, new("Headphones"), created()).unwrap();
    let item = &items[0];

    let day29 = created() + Duration::days(29);
    assert_eq!(state(item, day29), WishState::Waiting { days_left: 1 });
    assert_eq!(days_left(item, day29), 1);

    let almost = created() + Duration::days(30) - Duration::seconds(1);
    assert!(matches!(state(item, almost), WishState::Waiting { .. }));

    let day30 = created() + Duration::days(30);
    assert_eq!(state(item, day30), WishState::ReadyToBuy);
    assert_eq!(days_left(item, day30), 0);
    assert_eq!(days_left(item, created() + Duration::days(90)), 0);
}

#[test]
fn items_are_partitioned_by_state() {
    let mut items: Vec<WishlistItem> = Vec::new();
    add_item(&mut items, new("old"), created()).unwrap();
    add_item(&mut items, new("fresh"), created() + Duration::days(20)).unwrap();
    let bought = add_item(&mut items, new("bought"), created()).unwrap();
    purchase(&mut items, &bought.id, created() + Duration::days(31)).unwrap();

    let now = created() + Duration::days(31);
    assert_eq!(ready_items(&items, now)[0].name, "old");
    assert_eq!(waiting_items(&items, now)[0].name, "fresh");
    assert_eq!(purchased_items(&items)[0].name, "bought");
    assert_eq!(ready_items(&items, now).len(), 1);
}

#[test]
fn closed_items_cannot_change_outcome() {
    let mut items: Vec<WishlistItem> = Vec::new();
    let a = add_item(&mut items, new("a"), created()).unwrap();
    let b = add_item(&mut items, new("b"), created()).unwrap();
    purchase(&mut items, &a.id, created()).unwrap();
    cancel(&mut items, &b.id).unwrap();

    assert!(matches!(
        cancel(&mut items, &a.id),
        Err(FinanceError::AlreadyClosed { .. })
    ));
    assert!(matches!(
        purchase(&mut items, &b.id, created()),
        Err(FinanceError::AlreadyClosed { .. })
    ));
    assert_eq!(state(&items[0], created()), WishState::Purchased);
    assert_eq!(state(&items[1], created()), WishState::Cancelled);
    assert!(items[0].purchased_at.is_some());
}

#[test]
fn saved_amount_never_goes_negative() {
    let mut items: Vec<WishlistItem> = Vec::new();
    let a = add_item(&mut items, new("a"), created()).unwrap();
    update_saved_amount(&mut items, &a.id, Decimal::from(500_000)).unwrap();
    assert_eq!(items[0].saved_amount, Decimal::from(500_000));
    update_saved_amount(&mut items, &a.id, Decimal::from(-1)).unwrap();
    assert_eq!(items[0].saved_amount, Decimal::ZERO);
}

#[test]
fn elapsed_days_round_down_even_before_creation() {
    let mut items: Vec<WishlistItem> = Vec::new();
    add_item(&mut items, new("Lamp"), created()).unwrap();
    let item = &items[0];
    assert_eq!(days_since_created(item, created()), 0);
    assert_eq!(days_since_created(item, created() + Duration::hours(47)), 1);
    assert_eq!(days_since_created(item, created() - Duration::minutes(1)), -1);
    assert_eq!(days_since_created(item, created() - Duration::days(1)), -1);
}
