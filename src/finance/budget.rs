// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget evaluation against category spend.
//!
//! Budgets point at a category id, but spend is matched by category *name*
//! against `Transaction::category`. Renaming a category therefore detaches it
//! from the transactions recorded under the old name.
//!
//! Budgets are scoped to plain calendar months (`YYYY-MM`), not the fiscal
//! window used by the dashboard.

use crate::errors::{FinanceError, FinanceResult};
use crate::finance::period::{days_in_month, month_key, parse_month_key};
use crate::models::{Budget, Category, Transaction, TransactionType, new_id};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const DAYS_PER_BUDGET_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Success,
    Warning,
    Danger,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::Success => "success",
            BudgetLevel::Warning => "warning",
            BudgetLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget_id: String,
    pub category_id: String,
    pub category_name: String,
    pub month: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub level: BudgetLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    pub percentage: Decimal,
    pub level: BudgetLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeToSpend {
    pub daily_budget: Decimal,
    pub spent_today: Decimal,
    pub left_today: Decimal,
    pub over_by: Decimal,
}

/// `spent / limit * 100`. A zero or negative limit reads as fully used.
pub fn budget_percentage(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return Decimal::ONE_HUNDRED;
    }
    spent / limit * Decimal::ONE_HUNDRED
}

pub fn classify(percentage: Decimal) -> BudgetLevel {
    if percentage >= Decimal::ONE_HUNDRED {
        BudgetLevel::Danger
    } else if percentage >= WARNING_PERCENT {
        BudgetLevel::Warning
    } else {
        BudgetLevel::Success
    }
}

pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> Option<&'a str> {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.as_str())
}

/// Status of every budget in `month`, with spend recomputed from transactions.
pub fn evaluate(
    budgets: &[Budget],
    categories: &[Category],
    transactions: &[Transaction],
    month: &str,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|b| {
            let name = category_name(categories, &b.category_id);
            let spent = match name {
                Some(name) => month_spend(transactions, name, month),
                None => Decimal::ZERO,
            };
            let percentage = budget_percentage(spent, b.limit);
            BudgetStatus {
                budget_id: b.id.clone(),
                category_id: b.category_id.clone(),
                category_name: name.unwrap_or_default().to_string(),
                month: b.month.clone(),
                limit: b.limit,
                spent,
                remaining: b.limit - spent,
                percentage,
                level: classify(percentage),
            }
        })
        .collect()
}

fn month_spend(transactions: &[Transaction], category: &str, month: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            t.r#type == TransactionType::Expense
                && t.category == category
                && month_key(t.date.date()) == month
        })
        .map(|t| t.amount)
        .sum()
}

/// Builds a new budget, refusing a second one for the same category and month.
pub fn create_budget(
    budgets: &[Budget],
    category_id: &str,
    limit: Decimal,
    month: &str,
    now: NaiveDateTime,
) -> FinanceResult<Budget> {
    if limit <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveLimit(limit));
    }
    let month = month_key(parse_month_key(month)?);
    if find_budget(budgets, category_id, &month).is_some() {
        return Err(FinanceError::DuplicateBudget {
            category_id: category_id.to_string(),
            month,
        });
    }
    Ok(Budget {
        id: new_id(),
        category_id: category_id.to_string(),
        limit,
        spent: Decimal::ZERO,
        month,
        created_at: now,
    })
}

pub fn find_budget<'a>(budgets: &'a [Budget], category_id: &str, month: &str) -> Option<&'a Budget> {
    budgets
        .iter()
        .find(|b| b.category_id == category_id && b.month == month)
}

pub fn set_limit(budgets: &mut [Budget], id: &str, limit: Decimal) -> FinanceResult<()> {
    if limit <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveLimit(limit));
    }
    let budget = budgets
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| FinanceError::not_found("Budget", id))?;
    budget.limit = limit;
    Ok(())
}

pub fn delete_budget(budgets: &mut Vec<Budget>, id: &str) -> FinanceResult<Budget> {
    let pos = budgets
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| FinanceError::not_found("Budget", id))?;
    Ok(budgets.remove(pos))
}

/// Bumps the cached `spent` of the budget matching a freshly recorded
/// expense (same category name, current calendar month). Returns an alert
/// once the budget is at or above the warning threshold. Never rejects.
pub fn record_expense(
    budgets: &mut [Budget],
    categories: &[Category],
    transaction: &Transaction,
    today: NaiveDate,
) -> Option<BudgetAlert> {
    if transaction.r#type != TransactionType::Expense {
        return None;
    }
    let month = month_key(today);
    let budget = budgets.iter_mut().find(|b| {
        b.month == month
            && category_name(categories, &b.category_id) == Some(transaction.category.as_str())
    })?;
    budget.spent += transaction.amount;

    let percentage = budget_percentage(budget.spent, budget.limit);
    let level = classify(percentage);
    if level == BudgetLevel::Success {
        return None;
    }
    tracing::warn!(
        category = %transaction.category,
        spent = %budget.spent,
        limit = %budget.limit,
        level = level.as_str(),
        "Budget threshold reached"
    );
    Some(BudgetAlert {
        category: transaction.category.clone(),
        spent: budget.spent,
        limit: budget.limit,
        percentage,
        level,
    })
}

/// What is left of the fiscal-month balance, spread over the remaining days
/// of the calendar month (today included). Never negative.
pub fn daily_budget_from_balance(income: Decimal, expense: Decimal, today: NaiveDate) -> Decimal {
    let remaining_days = days_in_month(today) - today.day() + 1;
    let per_day = (income - expense) / Decimal::from(remaining_days);
    per_day.max(Decimal::ZERO)
}

/// Sum of the month's budget limits spread over a 30-day month. `None` when
/// the month has no budgeted amount at all.
pub fn daily_budget_from_limits(budgets: &[Budget], month: &str) -> Option<Decimal> {
    let total: Decimal = budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|b| b.limit)
        .sum();
    if total <= Decimal::ZERO {
        return None;
    }
    Some(total / DAYS_PER_BUDGET_MONTH)
}

pub fn safe_to_spend(daily_budget: Decimal, spent_today: Decimal) -> SafeToSpend {
    SafeToSpend {
        daily_budget,
        spent_today,
        left_today: (daily_budget - spent_today).max(Decimal::ZERO),
        over_by: (spent_today - daily_budget).max(Decimal::ZERO),
    }
}
