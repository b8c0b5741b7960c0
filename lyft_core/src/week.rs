//! ISO-8601 week partitioning.
//!
//! Weeks start on Monday and week 1 is the week containing the year's first
//! Thursday, so the week-year of a date can differ from its calendar year
//! (2021-01-01 belongs to 2020-W53).

use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ISO week: week-year plus week number (1..=53)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekId {
    year: i32,
    week: u32,
}

impl WeekId {
    /// Build a week id, rejecting weeks the ISO year does not have
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(Error::InvalidDate(format!(
                "week {} does not exist in ISO year {}",
                week, year
            )));
        }
        Ok(Self { year, week })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Monday and Sunday of this week
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        // Construction guarantees the week exists.
        let start = NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Sun)
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        week_of(date) == *self
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

// Errors print through Debug when they leave `main`, so keep it readable.
impl fmt::Debug for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for WeekId {
    type Err = Error;

    /// Parses `YYYY-Www` (e.g. `2021-W08`)
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDate(format!("'{}' is not an ISO week (YYYY-Www)", s));
        let (year, week) = s.trim().split_once("-W").ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;
        WeekId::new(year, week)
    }
}

impl Serialize for WeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The ISO week a date falls into
pub fn week_of(date: NaiveDate) -> WeekId {
    let iso = date.iso_week();
    WeekId {
        year: iso.year(),
        week: iso.week(),
    }
}

/// Monday..Sunday range of `week_number` in ISO week-year `year`
pub fn week_bounds(week_number: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    Ok(WeekId::new(year, week_number)?.bounds())
}

/// Every ISO week of a week-year, in order
pub fn weeks_in_year(year: i32) -> Result<Vec<WeekId>> {
    // Dec 28 always falls in the last ISO week of its year.
    let last = NaiveDate::from_ymd_opt(year, 12, 28)
        .ok_or_else(|| Error::InvalidDate(format!("year {} is out of range", year)))?
        .iso_week()
        .week();
    (1..=last).map(|week| WeekId::new(year, week)).collect()
}
