// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings streak: consecutive days on which spending stayed within the
//! daily budget. Evaluated at most once per calendar day.

use crate::finance::aggregate::spending_on;
use crate::models::{DailyStreak, Transaction};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub const HISTORY_DAYS: usize = 30;
/// Longest history a single query will score.
pub const MAX_HISTORY_DAYS: usize = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakUpdate {
    /// Today was already evaluated; nothing changed.
    AlreadyRecorded,
    Saved { current_streak: u32 },
    Overspent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakTier {
    Broken,
    Started,
    GoodStart,
    Week,
    TwoWeeks,
    ThreeWeeks,
    Legend,
}

impl StreakTier {
    pub fn for_streak(days: u32) -> Self {
        match days {
            0 => StreakTier::Broken,
            1..=2 => StreakTier::Started,
            3..=6 => StreakTier::GoodStart,
            7..=13 => StreakTier::Week,
            14..=20 => StreakTier::TwoWeeks,
            21..=29 => StreakTier::ThreeWeeks,
            _ => StreakTier::Legend,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StreakTier::Broken => "😢",
            StreakTier::Started => "👍",
            StreakTier::GoodStart => "✨",
            StreakTier::Week => "🔥",
            StreakTier::TwoWeeks => "⭐",
            StreakTier::ThreeWeeks => "💎",
            StreakTier::Legend => "🏆",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StreakTier::Broken => "A little over budget today!",
            StreakTier::Started => "Nice! Keep it going!",
            StreakTier::GoodStart => "Good start! Try to keep it up!",
            StreakTier::Week => "Well done! A perfect week!",
            StreakTier::TwoWeeks => "Impressive! Keep pushing!",
            StreakTier::ThreeWeeks => "Amazing! You're doing great!",
            StreakTier::Legend => "Legendary! Outstanding financial discipline!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakDay {
    pub date: NaiveDate,
    pub spending: Decimal,
    pub within_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakHistory {
    pub days: Vec<StreakDay>,
    pub within_budget: usize,
    pub over_budget: usize,
    /// Percent of days within budget, one decimal place.
    pub success_rate: Decimal,
}

/// A missing daily budget counts as overspending, whatever was spent.
pub fn is_saving(spending: Decimal, daily_budget: Option<Decimal>) -> bool {
    daily_budget.is_some_and(|budget| spending <= budget)
}

impl DailyStreak {
    /// Applies today's result. A second call on the same day is a no-op, so
    /// callers may invoke this as often as they like.
    pub fn update(
        &mut self,
        today: NaiveDate,
        spending: Decimal,
        daily_budget: Option<Decimal>,
    ) -> StreakUpdate {
        if self.last_active_date == Some(today) {
            tracing::debug!(%today, "Streak already evaluated today");
            return StreakUpdate::AlreadyRecorded;
        }

        let saving = is_saving(spending, daily_budget);
        let continues = self.last_active_date.is_some() && self.last_active_date == today.pred_opt();
        self.current_streak = match (saving, continues) {
            (true, true) => self.current_streak + 1,
            (true, false) => 1,
            (false, _) => 0,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_active_date = Some(today);
        if saving {
            self.total_saving_days += 1;
        } else {
            self.total_overspend_days += 1;
        }

        tracing::info!(
            %today,
            %spending,
            saving,
            current = self.current_streak,
            longest = self.longest_streak,
            "Streak updated"
        );
        if saving {
            StreakUpdate::Saved {
                current_streak: self.current_streak,
            }
        } else {
            StreakUpdate::Overspent
        }
    }

    pub fn reset(&mut self) {
        *self = DailyStreak::default();
    }

    pub fn tier(&self) -> StreakTier {
        StreakTier::for_streak(self.current_streak)
    }
}

/// Per-day spending for the `days` days ending today, oldest first. The
/// window is capped at [`MAX_HISTORY_DAYS`] and stops at the earliest
/// representable date.
pub fn history(
    transactions: &[Transaction],
    today: NaiveDate,
    daily_budget: Option<Decimal>,
    days: usize,
) -> StreakHistory {
    let mut dates: Vec<NaiveDate> = today
        .iter_days()
        .rev()
        .take(days.min(MAX_HISTORY_DAYS))
        .collect();
    dates.reverse();
    let days_out: Vec<StreakDay> = dates
        .into_iter()
        .map(|date| {
            let spending = spending_on(transactions, date);
            StreakDay {
                date,
                spending,
                within_budget: is_saving(spending, daily_budget),
            }
        })
        .collect();
    let days = days_out.len();
    let within_budget = days_out.iter().filter(|d| d.within_budget).count();
    let success_rate = if days == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(within_budget as u64) / Decimal::from(days as u64) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    };
    StreakHistory {
        over_budget: days - within_budget,
        within_budget,
        success_rate,
        days: days_out,
    }
}
