//! Display formatting for counts, reactions and timestamps.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::patterns::DIGITS;

const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Abbreviate an integer count: `1500000` becomes `1.5M`.
///
/// The value is first rounded to three significant digits, then scaled down
/// by thousands while it is at least 1000, so `999999` becomes `1M`.
#[must_use]
pub fn abbreviate_number(n: i64) -> String {
    let mut num = round_significant(n as f64);
    let mut magnitude = 0;
    while num.abs() >= 1000.0 && magnitude < SUFFIXES.len() - 1 {
        magnitude += 1;
        num /= 1000.0;
    }
    let digits = format!("{num:.6}");
    let digits = digits.trim_end_matches('0').trim_end_matches('.');
    format!("{digits}{}", SUFFIXES[magnitude])
}

fn round_significant(n: f64) -> f64 {
    format!("{n:.2e}").parse().unwrap_or(n)
}

/// Abbreviate a numeric string; anything else passes through unchanged.
#[must_use]
pub fn abbreviate(text: &str) -> String {
    if DIGITS.is_match(text) {
        if let Ok(n) = text.parse::<i64>() {
            return abbreviate_number(n);
        }
    }
    text.to_string()
}

/// Abbreviate a JSON count; `null` is an absent count.
#[must_use]
pub fn abbreviate_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_i64().map_or_else(|| n.to_string(), abbreviate_number)),
        Value::String(s) => Some(abbreviate(s)),
        other => Some(other.to_string()),
    }
}

/// Join counts as `❤️ likes • 💬 comments • 🔁 shares`.
///
/// Segments that are absent, empty or the literal `null` are left out.
/// Commas become dots so locale-formatted counts read consistently.
#[must_use]
pub fn format_reactions(likes: Option<&str>, comments: Option<&str>, shares: Option<&str>) -> String {
    fn present(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.is_empty() && *s != "null")
    }

    [("❤️", likes), ("💬", comments), ("🔁", shares)]
        .into_iter()
        .filter_map(|(marker, value)| present(value).map(|v| format!("{marker} {v}")))
        .collect::<Vec<_>>()
        .join(" • ")
        .replace(',', ".")
}

/// Render epoch seconds as `⌚ 2024/04/25 06:40:00 UTC+07`.
///
/// Unknown or negative timestamps, and offsets outside a day, render as an
/// empty string.
#[must_use]
pub fn format_timestamp(date: Option<i64>, timezone_offset: i32) -> String {
    let Some(ts) = date.filter(|ts| *ts >= 0) else {
        return String::new();
    };
    let Some(offset) = timezone_offset.checked_mul(3600).and_then(FixedOffset::east_opt) else {
        return String::new();
    };
    let Some(utc) = DateTime::from_timestamp(ts, 0) else {
        return String::new();
    };
    let local = utc.with_timezone(&offset);
    let zone = local.format("%z").to_string();
    let hours = zone.get(..3).unwrap_or(&zone);
    format!("⌚ {} UTC{hours}", local.format("%Y/%m/%d %H:%M:%S"))
}
