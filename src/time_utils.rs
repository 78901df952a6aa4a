// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time bucketing and formatting.

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, Utc};

/// Truncate a timestamp to UTC midnight of the same calendar day.
pub fn start_of_day(d: DateTime<Utc>) -> DateTime<Utc> {
    d.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Shift a timestamp by `n` calendar days. `n` may be negative or zero.
pub fn add_days(d: DateTime<Utc>, n: i64) -> DateTime<Utc> {
    d + Duration::days(n)
}

/// Abbreviated weekday label ("Mon", "Tue", ...). Display only; never
/// used for comparisons.
pub fn short_weekday(d: DateTime<Utc>) -> String {
    d.format("%a").to_string()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
