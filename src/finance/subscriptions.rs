// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{FinanceError, FinanceResult};
use crate::finance::period::{add_months, days_ahead};
use crate::models::{BillingCycle, Subscription, new_id};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub billing_cycle: BillingCycle,
    pub next_billing_date: NaiveDateTime,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub category: Option<String>,
}

impl BillingCycle {
    /// One cycle forward. Month and year steps clamp to the end of a shorter
    /// month (Jan 31 -> Feb 28/29, Feb 29 -> Feb 28 the next year).
    pub fn advance(&self, from: NaiveDateTime) -> FinanceResult<NaiveDateTime> {
        let step = match self {
            BillingCycle::Daily => TimeDelta::days(1),
            BillingCycle::Weekly => TimeDelta::weeks(1),
            BillingCycle::Monthly => return add_months(from, 1),
            BillingCycle::Yearly => return add_months(from, 12),
        };
        from.checked_add_signed(step)
            .ok_or_else(|| FinanceError::DateOverflow(from.to_string()))
    }

    /// Monthly-equivalent cost: daily x30, weekly x4, yearly /12.
    pub fn monthly_equivalent(&self, amount: Decimal) -> Decimal {
        match self {
            BillingCycle::Daily => amount * Decimal::from(30),
            BillingCycle::Weekly => amount * Decimal::from(4),
            BillingCycle::Monthly => amount,
            BillingCycle::Yearly => amount / Decimal::from(12),
        }
    }
}

pub fn add_subscription(
    subs: &mut Vec<Subscription>,
    new: NewSubscription,
    now: NaiveDateTime,
) -> FinanceResult<Subscription> {
    if new.amount <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveAmount(new.amount));
    }
    let sub = Subscription {
        id: new_id(),
        name: new.name,
        amount: new.amount,
        description: new.description,
        billing_cycle: new.billing_cycle,
        next_billing_date: new.next_billing_date,
        is_active: true,
        category: new.category,
        created_at: now,
    };
    subs.push(sub.clone());
    Ok(sub)
}

fn find_mut<'a>(subs: &'a mut [Subscription], id: &str) -> FinanceResult<&'a mut Subscription> {
    subs.iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| FinanceError::not_found("Subscription", id))
}

/// Moves the next billing date forward by exactly one cycle and returns it.
pub fn process_payment(subs: &mut [Subscription], id: &str) -> FinanceResult<NaiveDateTime> {
    let sub = find_mut(subs, id)?;
    let next = sub.billing_cycle.advance(sub.next_billing_date)?;
    tracing::debug!(
        id,
        from = %sub.next_billing_date,
        to = %next,
        cycle = sub.billing_cycle.as_str(),
        "Subscription advanced"
    );
    sub.next_billing_date = next;
    Ok(next)
}

pub fn update_subscription(
    subs: &mut [Subscription],
    id: &str,
    patch: SubscriptionPatch,
) -> FinanceResult<()> {
    match patch.amount {
        Some(amount) if amount <= Decimal::ZERO => {
            return Err(FinanceError::NonPositiveAmount(amount));
        }
        _ => {}
    }
    let sub = find_mut(subs, id)?;
    if let Some(name) = patch.name {
        sub.name = name;
    }
    if let Some(amount) = patch.amount {
        sub.amount = amount;
    }
    if let Some(description) = patch.description {
        sub.description = Some(description);
    }
    if let Some(cycle) = patch.billing_cycle {
        sub.billing_cycle = cycle;
    }
    if let Some(category) = patch.category {
        sub.category = Some(category);
    }
    Ok(())
}

/// Flips active/paused and returns the new state.
pub fn toggle_active(subs: &mut [Subscription], id: &str) -> FinanceResult<bool> {
    let sub = find_mut(subs, id)?;
    sub.is_active = !sub.is_active;
    Ok(sub.is_active)
}

pub fn cancel(subs: &mut [Subscription], id: &str) -> FinanceResult<()> {
    find_mut(subs, id)?.is_active = false;
    Ok(())
}

pub fn delete_subscription(subs: &mut Vec<Subscription>, id: &str) -> FinanceResult<Subscription> {
    let pos = subs
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| FinanceError::not_found("Subscription", id))?;
    Ok(subs.remove(pos))
}

pub fn total_monthly(subs: &[Subscription]) -> Decimal {
    subs.iter()
        .filter(|s| s.is_active)
        .map(|s| s.billing_cycle.monthly_equivalent(s.amount))
        .sum()
}

pub fn due_today(subs: &[Subscription], today: NaiveDate) -> Vec<&Subscription> {
    subs.iter()
        .filter(|s| s.is_active && s.next_billing_date.date() == today)
        .collect()
}

/// Active subscriptions billing within `[now, now + days]`; past-due dates
/// are not included.
pub fn due_soon(subs: &[Subscription], now: NaiveDateTime, days: u32) -> Vec<&Subscription> {
    let horizon = days_ahead(now, days);
    subs.iter()
        .filter(|s| s.is_active && s.next_billing_date >= now && s.next_billing_date <= horizon)
        .collect()
}
