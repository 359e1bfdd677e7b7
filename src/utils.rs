// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// `moneystreak=info` directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("moneystreak=info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM:SS`.
/// A bare date means local midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    parse_date(s)
        .map(|d| d.and_time(NaiveTime::MIN))
        .with_context(|| format!("Invalid date/time '{}'", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    crate::finance::period::parse_month_key(s)?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts entered by the user must be strictly positive.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than zero (got {})", d));
    }
    Ok(d)
}

/// VND is shown without decimals and with dot grouping (`1.500.000 ₫`);
/// other currencies as `CCY 1,234.56`.
pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    if ccy.eq_ignore_ascii_case("VND") {
        format!("{} ₫", group_thousands(&d.round_dp(0).to_string(), '.', ','))
    } else {
        format!("{} {}", ccy, group_thousands(&format!("{:.2}", d), ',', '.'))
    }
}

fn group_thousands(raw: &str, sep: char, decimal_mark: char) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{}{}{}{}", sign, grouped, decimal_mark, f),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Finds the single id starting with `prefix`, so tables can show short ids.
pub fn resolve_id<'a, I>(ids: I, prefix: &str, kind: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = prefix.trim();
    let matches: Vec<&str> = ids.into_iter().filter(|id| id.starts_with(prefix)).collect();
    match matches.as_slice() {
        [one] => Ok(one.to_string()),
        [] => Err(anyhow!("{} '{}' not found", kind, prefix)),
        _ => Err(anyhow!("{} id '{}' is ambiguous", kind, prefix)),
    }
}
