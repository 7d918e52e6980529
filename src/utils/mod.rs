// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and start-up code.

pub mod local_time;
pub mod logging;

/// Format a stored timestamp in the local time zone.
pub use local_time::format_local;
