// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures over raw collections. Nothing in here touches storage or
//! reads the system clock; callers pass collections and `now` in and persist
//! whatever comes back.

pub mod aggregate;
pub mod budget;
pub mod categories;
pub mod debts;
pub mod period;
pub mod streak;
pub mod subscriptions;
pub mod transactions;
pub mod wishlist;
