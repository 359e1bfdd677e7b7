// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    /// Category *name*, not id. Budgets join on this string.
    pub category: String,
    #[serde(default)]
    pub note: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub r#type: TransactionType,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub limit: Decimal,
    /// Cached running total, bumped as expenses are recorded.
    #[serde(default)]
    pub spent: Decimal,
    pub month: String, // YYYY-MM
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    /// Money the user owes someone.
    Debt,
    /// Money someone owes the user.
    Loan,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::Debt => "debt",
            DebtKind::Loan => "loan",
        }
    }
}

impl std::str::FromStr for DebtKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debt" => Ok(DebtKind::Debt),
            "loan" => Ok(DebtKind::Loan),
            other => Err(format!("Unknown debt/loan type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: Decimal,
    pub paid_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtLoan {
    pub id: String,
    pub r#type: DebtKind,
    pub person: String,
    pub amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub created_at: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub note: Option<String>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Daily => "daily",
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(BillingCycle::Daily),
            "weekly" => Ok(BillingCycle::Weekly),
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" => Ok(BillingCycle::Yearly),
            other => Err(format!("Unknown billing cycle '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub billing_cycle: BillingCycle,
    pub next_billing_date: NaiveDateTime,
    pub is_active: bool,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub saved_amount: Decimal,
    #[serde(default)]
    pub is_purchased: bool,
    pub purchased_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_cancelled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStreak {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// `None` until the first evaluation.
    pub last_active_date: Option<NaiveDate>,
    pub total_saving_days: u32,
    pub total_overspend_days: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Blue,
    Green,
    Violet,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub currency: String,
    pub start_day_of_month: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub accent_color: AccentColor,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: "VND".to_string(),
            start_day_of_month: 1,
            theme: Theme::default(),
            accent_color: AccentColor::default(),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("Unknown theme '{}'", other)),
        }
    }
}

impl std::str::FromStr for AccentColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blue" => Ok(AccentColor::Blue),
            "green" => Ok(AccentColor::Green),
            "violet" => Ok(AccentColor::Violet),
            "orange" => Ok(AccentColor::Orange),
            "red" => Ok(AccentColor::Red),
            other => Err(format!("Unknown accent color '{}'", other)),
        }
    }
}
