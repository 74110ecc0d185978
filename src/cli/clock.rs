use std::fmt::Display;

use chrono::{DateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%a, %b %-d, %Y | %I:%M:%S %p";

/// `Fri, Oct 16, 2026 | 09:05:03 AM`
pub fn format_display<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format(DISPLAY_FORMAT).to_string()
}

/// Yields a refreshed clock string at most once per wall-clock second.
///
/// Polling is driven by the caller; the ticker keeps no reference to ledger state.
#[derive(Debug, Default)]
pub struct ClockTicker {
    last_second: Option<i64>,
}

impl ClockTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll<Tz>(&mut self, now: &DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let second = now.timestamp();
        if self.last_second == Some(second) {
            return None;
        }
        self.last_second = Some(second);
        Some(format_display(now))
    }
}
