// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Money owed by the user (debts) and to the user (loans), settled through
//! partial payments.

use crate::errors::{FinanceError, FinanceResult};
use crate::finance::period::days_ahead;
use crate::models::{DebtKind, DebtLoan, Payment, new_id};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewDebtLoan {
    pub kind: DebtKind,
    pub person: String,
    pub amount: Decimal,
    pub description: String,
    pub due_date: Option<NaiveDateTime>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DebtLoanPatch {
    pub person: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub note: Option<String>,
}

pub fn remaining(item: &DebtLoan) -> Decimal {
    (item.amount - item.paid_amount).max(Decimal::ZERO)
}

pub fn add_item(items: &mut Vec<DebtLoan>, new: NewDebtLoan, now: NaiveDateTime) -> FinanceResult<DebtLoan> {
    if new.amount <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveAmount(new.amount));
    }
    let item = DebtLoan {
        id: new_id(),
        r#type: new.kind,
        person: new.person,
        amount: new.amount,
        paid_amount: Decimal::ZERO,
        description: new.description,
        created_at: now,
        due_date: new.due_date,
        is_paid: false,
        paid_at: None,
        note: new.note,
        payments: Vec::new(),
    };
    items.push(item.clone());
    Ok(item)
}

fn find_mut<'a>(items: &'a mut [DebtLoan], id: &str) -> FinanceResult<&'a mut DebtLoan> {
    items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| FinanceError::not_found("Debt/loan", id))
}

/// Records a partial payment and returns the amount actually applied.
/// Anything beyond the outstanding balance is clamped away; a settled item
/// takes nothing further.
pub fn add_payment(
    items: &mut [DebtLoan],
    id: &str,
    payment: Decimal,
    now: NaiveDateTime,
) -> FinanceResult<Decimal> {
    if payment <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveAmount(payment));
    }
    let item = find_mut(items, id)?;
    if item.is_paid {
        return Ok(Decimal::ZERO);
    }
    let new_paid = item.amount.min(item.paid_amount + payment);
    let applied = new_paid - item.paid_amount;
    item.paid_amount = new_paid;
    item.is_paid = new_paid >= item.amount;
    item.paid_at = if item.is_paid { Some(now) } else { None };
    if applied > Decimal::ZERO {
        item.payments.push(Payment {
            amount: applied,
            paid_at: now,
        });
    }
    if item.is_paid {
        tracing::info!(id, person = %item.person, "Debt/loan settled");
    }
    Ok(applied)
}

/// "Pay in full": settles whatever is outstanding. Returns false, leaving the
/// item untouched, when it was already settled.
pub fn mark_as_paid(items: &mut [DebtLoan], id: &str, now: NaiveDateTime) -> FinanceResult<bool> {
    let item = find_mut(items, id)?;
    if item.is_paid {
        return Ok(false);
    }
    let outstanding = remaining(item);
    if outstanding > Decimal::ZERO {
        item.payments.push(Payment {
            amount: outstanding,
            paid_at: now,
        });
    }
    item.paid_amount = item.amount;
    item.is_paid = true;
    item.paid_at = Some(now);
    tracing::info!(id, person = %item.person, "Debt/loan marked as paid");
    Ok(true)
}

pub fn update_item(items: &mut [DebtLoan], id: &str, patch: DebtLoanPatch) -> FinanceResult<()> {
    match patch.amount {
        Some(amount) if amount <= Decimal::ZERO => {
            return Err(FinanceError::NonPositiveAmount(amount));
        }
        _ => {}
    }
    let item = find_mut(items, id)?;
    if let Some(person) = patch.person {
        item.person = person;
    }
    if let Some(description) = patch.description {
        item.description = description;
    }
    if let Some(due) = patch.due_date {
        item.due_date = Some(due);
    }
    if let Some(note) = patch.note {
        item.note = Some(note);
    }
    if let Some(amount) = patch.amount {
        item.amount = amount;
        item.paid_amount = item.paid_amount.min(amount);
        let was_paid = item.is_paid;
        item.is_paid = item.paid_amount >= amount;
        if !item.is_paid {
            item.paid_at = None;
        } else if !was_paid {
            item.paid_at = item.payments.last().map(|p| p.paid_at);
        }
    }
    Ok(())
}

pub fn delete_item(items: &mut Vec<DebtLoan>, id: &str) -> FinanceResult<DebtLoan> {
    let pos = items
        .iter()
        .position(|i| i.id == id)
        .ok_or_else(|| FinanceError::not_found("Debt/loan", id))?;
    Ok(items.remove(pos))
}

pub fn active(items: &[DebtLoan], kind: DebtKind) -> Vec<&DebtLoan> {
    items
        .iter()
        .filter(|i| i.r#type == kind && !i.is_paid)
        .collect()
}

/// Unpaid items due within `[now, now + days]`. Already overdue items are
/// not included.
pub fn due_soon(items: &[DebtLoan], now: NaiveDateTime, days: u32) -> Vec<&DebtLoan> {
    let horizon = days_ahead(now, days);
    items
        .iter()
        .filter(|i| !i.is_paid)
        .filter(|i| i.due_date.is_some_and(|due| due >= now && due <= horizon))
        .collect()
}

/// Outstanding balance across unpaid items of one kind.
pub fn total_outstanding(items: &[DebtLoan], kind: DebtKind) -> Decimal {
    active(items, kind).into_iter().map(remaining).sum()
}
