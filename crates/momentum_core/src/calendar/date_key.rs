//! Canonical local-day key.
//!
//! # Responsibility
//! - Identify one local calendar day independent of time-of-day.
//! - Provide day arithmetic and conversions to/from local-midnight instants.
//!
//! # Invariants
//! - Text form is always fixed-width `YYYY-MM-DD`, zero-padded.
//! - `Ord` on keys matches chronological order of the days they denote.
//! - `parse_date_key(to_date_key(x)) == x` for any local-midnight instant `x`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// One local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

/// Error returned when text is not a canonical date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    Empty,
    Malformed(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date key cannot be empty"),
            Self::Malformed(value) => {
                write!(f, "invalid date key `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for DateKeyError {}

impl DateKey {
    /// Builds a key from calendar parts; `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1-based.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day `n` days away from this one; `n` may be negative.
    ///
    /// Saturates at the representable date range instead of overflowing.
    pub fn add_days(self, n: i64) -> Self {
        let magnitude = Days::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            self.0.checked_add_days(magnitude).unwrap_or(NaiveDate::MAX)
        } else {
            self.0.checked_sub_days(magnitude).unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    /// Previous day, or `None` at the start of the representable range.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Signed whole-day distance `self - other`.
    pub fn days_since(&self, other: DateKey) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// First day of this key's month.
    pub fn first_of_month(&self) -> Self {
        self.add_days(1 - i64::from(self.day()))
    }

    /// Human-facing form, e.g. `15 Oct 2026`.
    pub fn display_date(&self) -> String {
        self.0.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DateKeyError::Empty);
        }
        let date = NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map_err(|_| DateKeyError::Malformed(trimmed.to_string()))?;
        let key = Self(date);
        // chrono accepts unpadded fields; only the fixed-width form is canonical.
        if key.to_string() != trimmed {
            return Err(DateKeyError::Malformed(trimmed.to_string()));
        }
        Ok(key)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateKeyVisitor;

        impl Visitor<'_> for DateKeyVisitor {
            type Value = DateKey;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a YYYY-MM-DD date key")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<DateKey, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DateKeyVisitor)
    }
}

/// Converts a local-midnight instant to its day key.
///
/// Any time-of-day component is discarded.
pub fn to_date_key(local_midnight: NaiveDateTime) -> DateKey {
    DateKey(local_midnight.date())
}

/// Returns the local-midnight instant that starts the keyed day.
pub fn parse_date_key(key: DateKey) -> NaiveDateTime {
    key.0.and_time(NaiveTime::MIN)
}

/// Convenience wrapper over [`DateKey::add_days`].
pub fn add_days(key: DateKey, n: i64) -> DateKey {
    key.add_days(n)
}

/// Number of days in `month` (1-based) of `year`; `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Formats a stored key for display, e.g. `2026-10-15` -> `15 Oct 2026`.
///
/// Returns an empty string for empty input and echoes malformed input.
pub fn format_display_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match value.parse::<DateKey>() {
        Ok(key) => key.display_date(),
        Err(_) => value.to_string(),
    }
}
