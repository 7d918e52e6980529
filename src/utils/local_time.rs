// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Human-readable timestamp formatting for the post list.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use time::OffsetDateTime;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a stored UTC timestamp in the user's local time zone.
pub fn format_local(timestamp: OffsetDateTime) -> String {
    format_in(timestamp, &Local)
}

/// Format a timestamp in an arbitrary chrono time zone.
pub fn format_in<Tz>(timestamp: OffsetDateTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(timestamp.unix_timestamp(), timestamp.nanosecond()) {
        Some(utc) => utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        // Outside chrono's range; show the raw RFC 3339-ish value instead.
        None => timestamp.to_string(),
    }
}
