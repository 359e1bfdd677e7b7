// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{FinanceError, FinanceResult};
use crate::models::{Transaction, TransactionType, new_id};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: String,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub r#type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDateTime>,
    pub category: Option<String>,
    pub note: Option<String>,
}

pub fn add_transaction(
    transactions: &mut Vec<Transaction>,
    new: NewTransaction,
    now: NaiveDateTime,
) -> FinanceResult<Transaction> {
    if new.amount <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveAmount(new.amount));
    }
    let tx = Transaction {
        id: new_id(),
        r#type: new.r#type,
        amount: new.amount,
        date: new.date,
        category: new.category,
        note: new.note,
        created_at: now,
    };
    transactions.push(tx.clone());
    Ok(tx)
}

pub fn update_transaction(
    transactions: &mut [Transaction],
    id: &str,
    patch: TransactionPatch,
) -> FinanceResult<Transaction> {
    match patch.amount {
        Some(amount) if amount <= Decimal::ZERO => {
            return Err(FinanceError::NonPositiveAmount(amount));
        }
        _ => {}
    }
    let tx = transactions
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| FinanceError::not_found("Transaction", id))?;
    if let Some(ty) = patch.r#type {
        tx.r#type = ty;
    }
    if let Some(amount) = patch.amount {
        tx.amount = amount;
    }
    if let Some(date) = patch.date {
        tx.date = date;
    }
    if let Some(category) = patch.category {
        tx.category = category;
    }
    if let Some(note) = patch.note {
        tx.note = note;
    }
    Ok(tx.clone())
}

pub fn delete_transaction(transactions: &mut Vec<Transaction>, id: &str) -> FinanceResult<Transaction> {
    let pos = transactions
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| FinanceError::not_found("Transaction", id))?;
    Ok(transactions.remove(pos))
}
