//! Maps calendar dates onto ISO weeks and calendar months.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::errors::BudgetError;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Granularity used to bucket expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    #[default]
    Weekly,
    Monthly,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKind::Weekly => f.write_str("weekly"),
            PeriodKind::Monthly => f.write_str("monthly"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = BudgetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(PeriodKind::Weekly),
            "monthly" | "month" | "m" => Ok(PeriodKind::Monthly),
            other => Err(BudgetError::InvalidPeriod(format!(
                "unknown period type `{other}` (use weekly or monthly)"
            ))),
        }
    }
}

/// ISO-8601 week number and ISO year of `date`.
///
/// Weeks start on Monday and week 1 is the week holding the year's first
/// Thursday, so late December can belong to week 1 of the next year and early
/// January to the last week of the previous one.
pub fn week_of(date: NaiveDate) -> (u32, i32) {
    let weekday = i64::from(date.weekday().number_from_monday());
    let Some(thursday) = date.checked_add_signed(Duration::days(4 - weekday)) else {
        let iso = date.iso_week();
        return (iso.week(), iso.year());
    };
    let iso_year = thursday.year();
    let Some(year_start) = NaiveDate::from_ymd_opt(iso_year, 1, 1) else {
        let iso = date.iso_week();
        return (iso.week(), iso.year());
    };
    let days_since_start = (thursday - year_start).num_days();
    let week = (days_since_start + 1 + 6) / 7;
    (week as u32, iso_year)
}

/// Zero-based month index and calendar year of `date`.
pub fn month_of(date: NaiveDate) -> (u32, i32) {
    (date.month0(), date.year())
}

/// Parses a `YYYY-MM-DD` date and rejects dates after `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, BudgetError> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        BudgetError::InvalidDate(format!("`{trimmed}` is not a date (use YYYY-MM-DD)"))
    })?;
    ensure_not_future(date, today)?;
    Ok(date)
}

pub(crate) fn ensure_not_future(date: NaiveDate, today: NaiveDate) -> Result<(), BudgetError> {
    if date > today {
        return Err(BudgetError::InvalidDate(format!(
            "{} is in the future (today is {})",
            date.format(DATE_FORMAT),
            today.format(DATE_FORMAT)
        )));
    }
    Ok(())
}

/// Identifies one aggregation bucket.
///
/// Formats as `W<week>-<year>` or `<MonthName>-<year>` and parses back from the
/// same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    Week { week: u32, year: i32 },
    /// `month` is zero-based.
    Month { month: u32, year: i32 },
}

impl PeriodKey {
    pub fn of(kind: PeriodKind, date: NaiveDate) -> Self {
        match kind {
            PeriodKind::Weekly => {
                let (week, year) = week_of(date);
                PeriodKey::Week { week, year }
            }
            PeriodKind::Monthly => {
                let (month, year) = month_of(date);
                PeriodKey::Month { month, year }
            }
        }
    }

    pub fn kind(&self) -> PeriodKind {
        match self {
            PeriodKey::Week { .. } => PeriodKind::Weekly,
            PeriodKey::Month { .. } => PeriodKind::Monthly,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            PeriodKey::Week { year, .. } | PeriodKey::Month { year, .. } => *year,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        PeriodKey::of(self.kind(), date) == *self
    }

    /// Label used in period pickers: `Week 44-2025` or `October-2025`.
    pub fn display_label(&self) -> String {
        match self {
            PeriodKey::Week { week, year } => format!("Week {week}-{year}"),
            PeriodKey::Month { .. } => self.to_string(),
        }
    }

    /// Heading used on reports: `Week 44` or `October-2025`.
    pub fn heading(&self) -> String {
        match self {
            PeriodKey::Week { week, .. } => format!("Week {week}"),
            PeriodKey::Month { .. } => self.to_string(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Week { week, year } => write!(f, "W{week}-{year}"),
            PeriodKey::Month { month, year } => {
                let name = MONTH_NAMES.get(*month as usize).copied().unwrap_or("?");
                write!(f, "{name}-{year}")
            }
        }
    }
}

impl FromStr for PeriodKey {
    type Err = BudgetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let invalid = || {
            BudgetError::InvalidPeriod(format!(
                "`{trimmed}` is not a period (use W<week>-<year> or <Month>-<year>)"
            ))
        };
        let (head, year) = trimmed.rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        if let Some(week) = head.strip_prefix('W').or_else(|| head.strip_prefix('w')) {
            if let Ok(week) = week.parse::<u32>() {
                if !(1..=53).contains(&week) {
                    return Err(invalid());
                }
                return Ok(PeriodKey::Week { week, year });
            }
        }

        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(head))
            .map(|month| PeriodKey::Month {
                month: month as u32,
                year,
            })
            .ok_or_else(invalid)
    }
}
