// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the finance core and its store.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Budget limit must be greater than zero (got {0})")]
    NonPositiveLimit(Decimal),
    #[error("Start day of month must be between 1 and 28 (got {0})")]
    StartDayOutOfRange(u32),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("A budget for category {category_id} already exists in {month}")]
    DuplicateBudget { category_id: String, month: String },
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} '{id}' is already closed")]
    AlreadyClosed { kind: &'static str, id: String },
    #[error("Date arithmetic overflowed while advancing {0}")]
    DateOverflow(String),
    #[error("Store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FinanceError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        FinanceError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type FinanceResult<T> = Result<T, FinanceError>;
