// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use moneystreak::finance::aggregate::{
    by_category, by_month, cashflow, daily_totals, monthly_report, period_summary, recent,
    spending_on, sum_by_type, top_categories,
};
use moneystreak::finance::period::{Window, fiscal_month};
use moneystreak::models::{Transaction, TransactionType, new_id};
use rust_decimal::Decimal;

fn dt(y: i32, m: u32, day: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, day)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn tx(ty: TransactionType, amount: i64, category: &str, at: NaiveDateTime) -> Transaction {
    Transaction {
        id: new_id(),
        r#type: ty,
        amount: Decimal::from(amount),
        date: at,
        category: category.to_string(),
        note: String::new(),
        created_at: at,
    }
}

fn march() -> Window {
    Window::from_days(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    )
}

fn sample() -> Vec<Transaction> {
    use TransactionType::*;
    vec![
        tx(Income, 10_000, "Salary", dt(2025, 3, 1, 9)),
        tx(Expense, 500, "Food", dt(2025, 3, 2, 12)),
        tx(Expense, 300, "Transport", dt(2025, 3, 2, 18)),
        tx(Expense, 200, "Food", dt(2025, 3, 15, 13)),
        tx(Expense, 700, "Housing", dt(2025, 3, 31, 23)),
        tx(Expense, 999, "Food", dt(2025, 4, 1, 0)),
        tx(Income, 50, "Gift", dt(2025, 2, 28, 10)),
    ]
}

#[test]
fn sums_only_count_the_window() {
    let txs = sample();
    assert_eq!(
        sum_by_type(&txs, &march(), TransactionType::Expense),
        Decimal::from(1700)
    );
    assert_eq!(
        sum_by_type(&txs, &march(), TransactionType::Income),
        Decimal::from(10_000)
    );

    let s = period_summary(&txs, &march());
    assert_eq!(s.balance, s.income - s.expense);
    assert_eq!(s.balance, Decimal::from(8300));
}

#[test]
fn top_categories_cover_all_spend_and_rank_descending() {
    let txs = sample();
    let top = top_categories(&txs, &march(), TransactionType::Expense, 10);
    let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Housing", "Transport"]);
    let total: Decimal = top.iter().map(|c| c.amount).sum();
    assert_eq!(total, Decimal::from(1700));
    // 700 / 1700 = 41.18 -> 41
    assert_eq!(top[0].percentage, Decimal::from(41));
    assert_eq!(top[1].percentage, Decimal::from(41));
    assert_eq!(top[2].percentage, Decimal::from(18));

    let limited = top_categories(&txs, &march(), TransactionType::Expense, 1);
    assert_eq!(limited.len(), 1);
}

#[test]
fn top_categories_ties_keep_first_seen_order() {
    use TransactionType::Expense;
    let txs = vec![
        tx(Expense, 100, "Books", dt(2025, 3, 3, 9)),
        tx(Expense, 100, "Games", dt(2025, 3, 4, 9)),
        tx(Expense, 100, "Apps", dt(2025, 3, 5, 9)),
    ];
    let top = top_categories(&txs, &march(), Expense, 5);
    let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Books", "Games", "Apps"]);
}

#[test]
fn empty_window_has_no_shares() {
    let top = top_categories(&[], &march(), TransactionType::Expense, 5);
    assert!(top.is_empty());
    let s = period_summary(&[], &march());
    assert_eq!(s.balance, Decimal::ZERO);
}

#[test]
fn recent_is_newest_first_and_truncated() {
    let txs = sample();
    let rows = recent(&txs, &march(), 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Housing");
    assert_eq!(rows[1].category, "Food");
    assert_eq!(rows[1].date, dt(2025, 3, 15, 13));
}

#[test]
fn fiscal_window_feeds_the_summary() {
    let txs = sample();
    // start day 15: 2025-03-20 falls in [Mar 15, Apr 14]
    let w = fiscal_month(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(), 15);
    let s = period_summary(&txs, &w);
    assert_eq!(s.expense, Decimal::from(200 + 700 + 999));
    assert_eq!(s.income, Decimal::ZERO);
}

#[test]
fn monthly_report_groups_expenses_by_category() {
    let txs = sample();
    let report = monthly_report(&txs, "2025-03").unwrap();
    assert_eq!(report.total_income, Decimal::from(10_000));
    assert_eq!(report.total_expense, Decimal::from(1700));
    assert_eq!(report.balance, Decimal::from(8300));
    assert_eq!(report.expenses_by_category["Food"], Decimal::from(700));
    assert_eq!(report.expenses_by_category.len(), 3);
    assert!(monthly_report(&txs, "2025/03").is_err());
}

#[test]
fn cashflow_fills_empty_months() {
    let txs = sample();
    let points = cashflow(&txs, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), 3);
    let months: Vec<&str> = points.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, vec!["2025-02", "2025-03", "2025-04"]);
    assert_eq!(points[0].income, Decimal::from(50));
    assert_eq!(points[2].expense, Decimal::from(999));
    assert_eq!(points[1].balance, Decimal::from(8300));
}

#[test]
fn daily_totals_include_every_day() {
    let txs = sample();
    let days = daily_totals(&txs, &march());
    assert_eq!(days.len(), 31);
    let second = &days[1];
    assert_eq!(second.total_expense, Decimal::from(800));
    assert_eq!(second.transactions.len(), 2);
    assert_eq!(second.transactions[0].category, "Transport");
    assert!(days[2].transactions.is_empty());
}

#[test]
fn per_day_and_per_category_queries() {
    let txs = sample();
    assert_eq!(
        spending_on(&txs, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()),
        Decimal::from(800)
    );
    assert_eq!(by_category(&txs, "Food", None).count(), 3);
    assert_eq!(
        by_category(&txs, "Salary", Some(TransactionType::Expense)).count(),
        0
    );
}

#[test]
fn by_month_uses_calendar_months() {
    let txs = sample();
    assert_eq!(by_month(&txs, "2025-03").count(), 5);
    assert_eq!(by_month(&txs, "2025-04").count(), 1);
    assert_eq!(by_month(&txs, "2024-12").count(), 0);
}
