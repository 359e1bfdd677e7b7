// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{FinanceError, FinanceResult};
use crate::models::{Category, TransactionType, new_id};

const DEFAULT_EXPENSE: &[&str] = &[
    "Food & Beverage",
    "Daily Living",
    "Clothing",
    "Cosmetics",
    "Transportation",
    "Healthcare",
    "Entertainment",
    "Education",
    "Housing",
    "Utilities",
    "Insurance",
    "Shopping",
    "Others",
];

const DEFAULT_INCOME: &[&str] = &[
    "Salary",
    "Allowance",
    "Side Hustle",
    "Investment",
    "Gift",
    "Others",
];

pub fn default_categories() -> Vec<Category> {
    let expense = DEFAULT_EXPENSE
        .iter()
        .map(|name| (*name, TransactionType::Expense));
    let income = DEFAULT_INCOME
        .iter()
        .map(|name| (*name, TransactionType::Income));
    expense
        .chain(income)
        .map(|(name, ty)| Category {
            id: new_id(),
            name: name.to_string(),
            r#type: ty,
            is_default: true,
            is_hidden: false,
        })
        .collect()
}

/// Installs the defaults into an empty list. Returns how many were added.
pub fn seed_defaults(categories: &mut Vec<Category>) -> usize {
    if !categories.is_empty() {
        return 0;
    }
    categories.extend(default_categories());
    categories.len()
}

pub fn add_category(categories: &mut Vec<Category>, name: &str, ty: TransactionType) -> Category {
    let category = Category {
        id: new_id(),
        name: name.trim().to_string(),
        r#type: ty,
        is_default: false,
        is_hidden: false,
    };
    categories.push(category.clone());
    category
}

pub fn visible_by_type(categories: &[Category], ty: TransactionType) -> Vec<&Category> {
    categories
        .iter()
        .filter(|c| c.r#type == ty && !c.is_hidden)
        .collect()
}

/// Looks a category up by id first, then by exact name.
pub fn resolve<'a>(categories: &'a [Category], key: &str) -> FinanceResult<&'a Category> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| categories.iter().find(|c| c.name == key))
        .ok_or_else(|| FinanceError::not_found("Category", key))
}

pub fn toggle_hidden(categories: &mut [Category], id: &str) -> FinanceResult<bool> {
    let category = categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| FinanceError::not_found("Category", id))?;
    category.is_hidden = !category.is_hidden;
    Ok(category.is_hidden)
}

/// Renames in place. Transactions keep the old name, so budgets for this
/// category stop matching them.
pub fn rename(categories: &mut [Category], id: &str, name: &str) -> FinanceResult<()> {
    let category = categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| FinanceError::not_found("Category", id))?;
    category.name = name.trim().to_string();
    Ok(())
}
