//! Accounting period (competence) representation
//!
//! A competence is the calendar month a transaction is attributed to,
//! distinct from the literal date it occurred on. It is written `YYYY-MM`.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::calendar::{first_of_month, last_day_of_month};

/// A calendar month used as an accounting key
///
/// Internally holds the first day of the month, so every value is a valid
/// month by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Competence(NaiveDate);

impl Competence {
    /// Create a competence for a year and month (1-12)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The competence a date belongs to
    pub fn from_date(date: NaiveDate) -> Self {
        Self(first_of_month(date))
    }

    /// Competence of a card purchase given the card's closing day
    ///
    /// Purchases made on or after the closing day are billed in the next
    /// month's statement.
    pub fn for_billing_cycle(date: NaiveDate, closing_day: u32) -> Self {
        let own = Self::from_date(date);
        if date.day() >= closing_day {
            own.next()
        } else {
            own
        }
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First day of this month
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Last day of this month
    pub fn last_day(&self) -> NaiveDate {
        let last = last_day_of_month(self.year(), self.month());
        self.0.with_day(last).unwrap_or(self.0)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    /// The competence `months` months later, if representable
    pub fn offset(&self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// The following month
    pub fn next(&self) -> Self {
        self.offset(1).unwrap_or(*self)
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map(Self)
            .unwrap_or(*self)
    }

    /// `count` consecutive months starting at this one
    pub fn range(&self, count: usize) -> Vec<Self> {
        std::iter::successors(Some(*self), |c| c.offset(1))
            .take(count)
            .collect()
    }
}

impl fmt::Display for Competence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Competence {
    type Err = CompetenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CompetenceParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for Competence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Competence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when a competence string is not `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetenceParseError(String);

impl fmt::Display for CompetenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid competence '{}', expected YYYY-MM", self.0)
    }
}

impl std::error::Error for CompetenceParseError {}
