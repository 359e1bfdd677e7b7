// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reporting windows: calendar day, ISO week, and the "fiscal" month that
//! starts on a configurable day so it can follow a pay cycle.

use crate::errors::{FinanceError, FinanceResult};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Highest selectable fiscal start day; every month has at least this many days.
pub const MAX_START_DAY: u32 = 28;

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(t) => t,
    None => panic!("invalid end-of-day literal"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
}

impl std::str::FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(PeriodKind::Day),
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            other => Err(format!("Unknown period '{}', expected day|week|month", other)),
        }
    }
}

/// Closed interval `[start, end]`; `end` is the last millisecond of its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn from_days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(END_OF_DAY),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// Every calendar day in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }
}

pub fn validate_start_day(day: u32) -> FinanceResult<u32> {
    if (1..=MAX_START_DAY).contains(&day) {
        Ok(day)
    } else {
        Err(FinanceError::StartDayOutOfRange(day))
    }
}

pub fn resolve_period(now: NaiveDateTime, kind: PeriodKind, start_day_of_month: u32) -> Window {
    let today = now.date();
    match kind {
        PeriodKind::Day => day_window(today),
        PeriodKind::Week => week_window(today),
        PeriodKind::Month => fiscal_month(today, start_day_of_month),
    }
}

pub fn day_window(date: NaiveDate) -> Window {
    Window::from_days(date, date)
}

/// Monday through Sunday.
pub fn week_window(date: NaiveDate) -> Window {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    Window::from_days(monday, monday + Duration::days(6))
}

/// The pay-cycle month containing `date`. With a start day of 15, the 10th of
/// March belongs to `[Feb 15, Mar 14]` and the 20th to `[Mar 15, Apr 14]`.
pub fn fiscal_month(date: NaiveDate, start_day_of_month: u32) -> Window {
    let start_day = start_day_of_month.clamp(1, MAX_START_DAY);
    let this_start = first_of_month(date) + Duration::days(start_day as i64 - 1);
    let start = if date.day() >= start_day {
        this_start
    } else {
        shift_month(this_start, -1)
    };
    let next_start = shift_month(start, 1);
    Window::from_days(start, next_start - Duration::days(1))
}

/// Plain calendar month for a `YYYY-MM` key.
pub fn calendar_month(month: &str) -> FinanceResult<Window> {
    let first = parse_month_key(month)?;
    let last = first + Duration::days(days_in_month(first) as i64 - 1);
    Ok(Window::from_days(first, last))
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// First day of the month named by a `YYYY-MM` key.
pub fn parse_month_key(month: &str) -> FinanceResult<NaiveDate> {
    let trimmed = month.trim();
    if trimmed.len() != 7 {
        return Err(FinanceError::InvalidMonth(month.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map_err(|_| FinanceError::InvalidMonth(month.to_string()))
}

/// The last `count` month keys ending with the month of `today`, oldest first.
pub fn trailing_months(today: NaiveDate, count: usize) -> Vec<String> {
    let current = first_of_month(today);
    (0..count)
        .rev()
        .map(|back| month_key(shift_month(current, -(back as i32))))
        .collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    let next = shift_month(first, 1);
    (next - first).num_days() as u32
}

/// Calendar month addition with end-of-month clamping: Jan 31 + 1 month is
/// Feb 28 (or 29), never Mar 3. The time of day is kept.
pub fn add_months(at: NaiveDateTime, months: u32) -> FinanceResult<NaiveDateTime> {
    at.checked_add_months(Months::new(months))
        .ok_or_else(|| FinanceError::DateOverflow(at.to_string()))
}

/// `now` plus `days` whole days, saturating at the latest representable
/// instant so a look-ahead window never overflows.
pub fn days_ahead(now: NaiveDateTime, days: u32) -> NaiveDateTime {
    TimeDelta::try_days(i64::from(days))
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(NaiveDateTime::MAX)
}

fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
