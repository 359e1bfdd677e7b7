// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use moneystreak::errors::FinanceError;
use moneystreak::finance::budget::{
    BudgetLevel, budget_percentage, classify, create_budget, daily_budget_from_balance,
    daily_budget_from_limits, evaluate, record_expense, safe_to_spend, set_limit,
};
use moneystreak::finance::categories::{add_category, rename};
use moneystreak::models::{Budget, Category, Transaction, TransactionType, new_id};
use rust_decimal::Decimal;

fn dt(y: i32, m: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn expense(amount: i64, category: &str, at: NaiveDateTime) -> Transaction {
    Transaction {
        id: new_id(),
        r#type: TransactionType::Expense,
        amount: Decimal::from(amount),
        date: at,
        category: category.to_string(),
        note: String::new(),
        created_at: at,
    }
}

fn setup() -> (Vec<Category>, Vec<Budget>) {
    let mut cats = Vec::new();
    let food = add_category(&mut cats, "Food", TransactionType::Expense);
    add_category(&mut cats, "Transport", TransactionType::Expense);
    let budget = create_budget(&[], &food.id, Decimal::from(100_000), "2025-03", dt(2025, 3, 1)).unwrap();
    (cats, vec![budget])
}

#[test]
fn eighty_percent_is_a_warning() {
    let (cats, budgets) = setup();
    let txs = vec![
        expense(50_000, "Food", dt(2025, 3, 3)),
        expense(30_000, "Food", dt(2025, 3, 9)),
        expense(90_000, "Transport", dt(2025, 3, 9)),
    ];
    let status = evaluate(&budgets, &cats, &txs, "2025-03");
    assert_eq!(status.len(), 1);
    let food = &status[0];
    assert_eq!(food.category_name, "Food");
    assert_eq!(food.spent, Decimal::from(80_000));
    assert_eq!(food.remaining, Decimal::from(20_000));
    assert_eq!(food.percentage, Decimal::from(80));
    assert_eq!(food.level, BudgetLevel::Warning);
}

#[test]
fn levels_follow_thresholds() {
    assert_eq!(classify(Decimal::from(79)), BudgetLevel::Success);
    assert_eq!(classify(Decimal::from(80)), BudgetLevel::Warning);
    assert_eq!(classify(Decimal::from(99)), BudgetLevel::Warning);
    assert_eq!(classify(Decimal::from(100)), BudgetLevel::Danger);
    assert_eq!(classify(Decimal::from(250)), BudgetLevel::Danger);
}

#[test]
fn percentage_grows_with_spend() {
    let limit = Decimal::from(1000);
    let mut last = Decimal::ZERO;
    for spent in [0, 10, 500, 800, 1000, 1500] {
        let p = budget_percentage(Decimal::from(spent), limit);
        assert!(p >= last);
        last = p;
    }
    assert_eq!(budget_percentage(Decimal::from(5), Decimal::ZERO), Decimal::ONE_HUNDRED);
}

#[test]
fn other_months_do_not_count() {
    let (cats, budgets) = setup();
    let txs = vec![
        expense(70_000, "Food", dt(2025, 2, 28)),
        expense(10_000, "Food", dt(2025, 3, 31)),
        expense(70_000, "Food", dt(2025, 4, 1)),
    ];
    let status = evaluate(&budgets, &cats, &txs, "2025-03");
    assert_eq!(status[0].spent, Decimal::from(10_000));
    assert_eq!(status[0].level, BudgetLevel::Success);
    assert!(evaluate(&budgets, &cats, &txs, "2025-04").is_empty());
}

#[test]
fn renaming_a_category_detaches_old_transactions() {
    let (mut cats, budgets) = setup();
    let txs = vec![expense(60_000, "Food", dt(2025, 3, 3))];
    let food_id = budgets[0].category_id.clone();
    rename(&mut cats, &food_id, "Groceries").unwrap();

    let status = evaluate(&budgets, &cats, &txs, "2025-03");
    assert_eq!(status[0].category_name, "Groceries");
    assert_eq!(status[0].spent, Decimal::ZERO);
}

#[test]
fn one_budget_per_category_and_month() {
    let (cats, budgets) = setup();
    let food_id = &cats[0].id;
    let dup = create_budget(&budgets, food_id, Decimal::from(5), "2025-03", dt(2025, 3, 2));
    assert!(matches!(dup, Err(FinanceError::DuplicateBudget { .. })));

    let next_month = create_budget(&budgets, food_id, Decimal::from(5), "2025-04", dt(2025, 3, 2));
    assert!(next_month.is_ok());
}

#[test]
fn limits_must_be_positive() {
    let (cats, mut budgets) = setup();
    let zero = create_budget(&[], &cats[1].id, Decimal::ZERO, "2025-03", dt(2025, 3, 1));
    assert!(matches!(zero, Err(FinanceError::NonPositiveLimit(_))));

    let id = budgets[0].id.clone();
    assert!(set_limit(&mut budgets, &id, Decimal::from(-1)).is_err());
    set_limit(&mut budgets, &id, Decimal::from(200_000)).unwrap();
    assert_eq!(budgets[0].limit, Decimal::from(200_000));
}

#[test]
fn recording_expenses_alerts_from_warning_on() {
    let (cats, mut budgets) = setup();
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let first = expense(50_000, "Food", dt(2025, 3, 10));
    assert!(record_expense(&mut budgets, &cats, &first, today).is_none());

    let second = expense(30_000, "Food", dt(2025, 3, 10));
    let alert = record_expense(&mut budgets, &cats, &second, today).unwrap();
    assert_eq!(alert.level, BudgetLevel::Warning);
    assert_eq!(alert.spent, Decimal::from(80_000));

    let third = expense(25_000, "Food", dt(2025, 3, 10));
    let alert = record_expense(&mut budgets, &cats, &third, today).unwrap();
    assert_eq!(alert.level, BudgetLevel::Danger);
    assert_eq!(budgets[0].spent, Decimal::from(105_000));
}

#[test]
fn recording_ignores_income_and_unbudgeted_categories() {
    let (cats, mut budgets) = setup();
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let mut income = expense(500_000, "Food", dt(2025, 3, 10));
    income.r#type = TransactionType::Income;
    assert!(record_expense(&mut budgets, &cats, &income, today).is_none());

    let other = expense(500_000, "Transport", dt(2025, 3, 10));
    assert!(record_expense(&mut budgets, &cats, &other, today).is_none());
    assert_eq!(budgets[0].spent, Decimal::ZERO);
}

#[test]
fn daily_budget_spreads_balance_over_days_left() {
    // 31-day March, today the 22nd: 10 days left including today
    let today = NaiveDate::from_ymd_opt(2025, 3, 22).unwrap();
    let daily = daily_budget_from_balance(Decimal::from(1500), Decimal::from(500), today);
    assert_eq!(daily, Decimal::from(100));

    let broke = daily_budget_from_balance(Decimal::from(100), Decimal::from(500), today);
    assert_eq!(broke, Decimal::ZERO);
}

#[test]
fn daily_budget_from_limits_needs_a_budgeted_month() {
    let (_, budgets) = setup();
    assert_eq!(
        daily_budget_from_limits(&budgets, "2025-03"),
        Some(Decimal::from(100_000) / Decimal::from(30))
    );
    assert_eq!(daily_budget_from_limits(&budgets, "2025-04"), None);
}

#[test]
fn safe_to_spend_reports_left_or_over() {
    let s = safe_to_spend(Decimal::from(100), Decimal::from(40));
    assert_eq!(s.left_today, Decimal::from(60));
    assert_eq!(s.over_by, Decimal::ZERO);

    let s = safe_to_spend(Decimal::from(100), Decimal::from(140));
    assert_eq!(s.left_today, Decimal::ZERO);
    assert_eq!(s.over_by, Decimal::from(40));
}
