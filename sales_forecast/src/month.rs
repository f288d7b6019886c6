//! Calendar months as the unit of the forecast index

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, Month, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month label format of the sales CSV, e.g. `Jan-14`
pub const DEFAULT_MONTH_FORMAT: &str = "%b-%y";

/// A calendar month, stored as the first day of that month.
///
/// Pinning the day keeps month arithmetic exact: two stamps in the same month
/// always compare equal, whatever day the caller started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthStamp(NaiveDate);

impl MonthStamp {
    /// Create a month stamp from a year and a 1-based month number
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "No such month: year {}, month {}",
                    year, month
                ))
            })
    }

    /// Normalize any date to the month it falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// Create a month stamp from an English month name ("March" or "mar")
    pub fn from_month_name(name: &str, year: i32) -> Result<Self> {
        let month = name
            .trim()
            .parse::<Month>()
            .map_err(|_| ForecastError::ParseError(format!("Unknown month name: {}", name)))?;

        Self::new(year, month.number_from_month())
    }

    /// Parse a month label with a chrono format that has no day field.
    ///
    /// The day is pinned to the first of the month before parsing, so formats
    /// such as `%b-%y` (`Jan-14`) or `%Y-%m` (`2014-01`) are accepted.
    pub fn parse(text: &str, format: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(
            &format!("01|{}", text.trim()),
            &format!("%d|{}", format),
        )?;

        Ok(Self(date))
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 to 12
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Whole months from `self` to `other`, negative when `other` is earlier.
    ///
    /// Computed from the calendar fields, never from elapsed days.
    pub fn months_until(&self, other: &MonthStamp) -> i64 {
        i64::from(other.year() - self.year()) * 12 + i64::from(other.month()) - i64::from(self.month())
    }

    /// The month `months` months later
    pub fn add_months(&self, months: u32) -> Result<Self> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Self)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "{} plus {} months is out of the calendar range",
                    self, months
                ))
            })
    }

    /// The `count` months that follow this one, in order
    pub fn successors(&self, count: u32) -> Result<Vec<Self>> {
        (1..=count).map(|k| self.add_months(k)).collect()
    }
}

impl fmt::Display for MonthStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%b-%Y"))
    }
}

impl FromStr for MonthStamp {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, DEFAULT_MONTH_FORMAT)
    }
}

impl From<NaiveDate> for MonthStamp {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
