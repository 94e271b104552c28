// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix, keeping sub-second digits.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Format the month/day/time part of a workout label: `April 14 at 09:05` (UTC).
pub fn format_label_time(date: DateTime<Utc>) -> String {
    date.format("%B %-d at %H:%M").to_string()
}
