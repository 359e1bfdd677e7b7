// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::FinanceResult;
use crate::finance::period::{Window, calendar_month, day_window, month_key, trailing_months};
use crate::models::{Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Whole percent of the type's total in the window.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub window: Window,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowPoint {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub transactions: Vec<Transaction>,
}

pub fn in_window<'a>(
    transactions: &'a [Transaction],
    window: &Window,
) -> impl Iterator<Item = &'a Transaction> + use<'a> {
    let window = *window;
    transactions.iter().filter(move |t| window.contains(t.date))
}

pub fn sum_by_type(transactions: &[Transaction], window: &Window, ty: TransactionType) -> Decimal {
    in_window(transactions, window)
        .filter(|t| t.r#type == ty)
        .map(|t| t.amount)
        .sum()
}

/// Per-category totals for one transaction type, largest first. Equal
/// amounts keep the order in which their category first appeared.
pub fn top_categories(
    transactions: &[Transaction],
    window: &Window,
    ty: TransactionType,
    limit: usize,
) -> Vec<CategoryShare> {
    let mut order: Vec<(String, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in in_window(transactions, window).filter(|t| t.r#type == ty) {
        match index.get(t.category.as_str()) {
            Some(&i) => order[i].1 += t.amount,
            None => {
                index.insert(t.category.as_str(), order.len());
                order.push((t.category.clone(), t.amount));
            }
        }
    }
    let total: Decimal = order.iter().map(|(_, amount)| *amount).sum();

    // stable sort keeps first-seen order for ties
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(limit)
        .map(|(category, amount)| CategoryShare {
            percentage: whole_percent(amount, total),
            category,
            amount,
        })
        .collect()
}

/// Newest first.
pub fn recent<'a>(transactions: &'a [Transaction], window: &Window, n: usize) -> Vec<&'a Transaction> {
    let mut rows: Vec<&Transaction> = in_window(transactions, window).collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows.truncate(n);
    rows
}

pub fn period_summary(transactions: &[Transaction], window: &Window) -> PeriodSummary {
    let income = sum_by_type(transactions, window, TransactionType::Income);
    let expense = sum_by_type(transactions, window, TransactionType::Expense);
    PeriodSummary {
        window: *window,
        income,
        expense,
        balance: income - expense,
    }
}

pub fn spending_on(transactions: &[Transaction], day: NaiveDate) -> Decimal {
    sum_by_type(transactions, &day_window(day), TransactionType::Expense)
}

pub fn monthly_report(transactions: &[Transaction], month: &str) -> FinanceResult<MonthlyReport> {
    let window = calendar_month(month)?;
    let mut expenses_by_category = BTreeMap::new();
    for t in in_window(transactions, &window).filter(|t| t.r#type == TransactionType::Expense) {
        *expenses_by_category
            .entry(t.category.clone())
            .or_insert(Decimal::ZERO) += t.amount;
    }
    let total_income = sum_by_type(transactions, &window, TransactionType::Income);
    let total_expense = sum_by_type(transactions, &window, TransactionType::Expense);
    Ok(MonthlyReport {
        month: month_key(window.first_day()),
        total_income,
        total_expense,
        balance: total_income - total_expense,
        expenses_by_category,
    })
}

/// Income and expense for the last `months` calendar months, oldest first.
pub fn cashflow(transactions: &[Transaction], today: NaiveDate, months: usize) -> Vec<CashflowPoint> {
    let mut buckets: BTreeMap<String, (Decimal, Decimal)> = trailing_months(today, months)
        .into_iter()
        .map(|m| (m, (Decimal::ZERO, Decimal::ZERO)))
        .collect();
    for t in transactions {
        if let Some(entry) = buckets.get_mut(&month_key(t.date.date())) {
            match t.r#type {
                TransactionType::Income => entry.0 += t.amount,
                TransactionType::Expense => entry.1 += t.amount,
            }
        }
    }
    buckets
        .into_iter()
        .map(|(month, (income, expense))| CashflowPoint {
            month,
            income,
            expense,
            balance: income - expense,
        })
        .collect()
}

/// One entry per day of the window, including empty days.
pub fn daily_totals(transactions: &[Transaction], window: &Window) -> Vec<DailyTotal> {
    window
        .days()
        .map(|day| {
            let mut rows: Vec<Transaction> = by_date(transactions, day).cloned().collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            let (mut total_income, mut total_expense) = (Decimal::ZERO, Decimal::ZERO);
            for t in &rows {
                match t.r#type {
                    TransactionType::Income => total_income += t.amount,
                    TransactionType::Expense => total_expense += t.amount,
                }
            }
            DailyTotal {
                date: day,
                total_income,
                total_expense,
                transactions: rows,
            }
        })
        .collect()
}

pub fn by_date(transactions: &[Transaction], day: NaiveDate) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(move |t| t.date.date() == day)
}

pub fn by_month<'a>(transactions: &'a [Transaction], month: &'a str) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |t| month_key(t.date.date()) == month)
}

/// Matches on category name, the same key budgets use.
pub fn by_category<'a>(
    transactions: &'a [Transaction],
    category: &'a str,
    ty: Option<TransactionType>,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |t| t.category == category && ty.is_none_or(|ty| t.r#type == ty))
}

fn whole_percent(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (amount / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
