//! Calendar arithmetic and the local clock
//!
//! Every "today" in the crate comes from a [`Clock`], which converts the
//! current instant into one configured timezone before truncating to a
//! calendar date. All other date handling works on timezone-free
//! `NaiveDate`s that the caller has already normalized.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;

use super::competence::Competence;

/// Timezone used when the settings do not name one
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Source of the local calendar date
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    tz: Tz,
    pinned: Option<NaiveDate>,
}

impl Clock {
    /// A clock that follows the system time in the given timezone
    pub fn new(tz: Tz) -> Self {
        Self { tz, pinned: None }
    }

    /// A clock frozen on a given local date
    pub fn fixed(today: NaiveDate) -> Self {
        Self {
            tz: DEFAULT_TIMEZONE,
            pinned: Some(today),
        }
    }

    /// Freeze this clock on a given date, keeping its timezone
    pub fn pinned_to(self, today: NaiveDate) -> Self {
        Self {
            pinned: Some(today),
            ..self
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The local calendar date right now
    pub fn today(&self) -> NaiveDate {
        self.pinned
            .unwrap_or_else(|| self.local_date(Utc::now()))
    }

    /// Convert an instant into the local calendar date
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// The accounting month containing today
    pub fn current_competence(&self) -> Competence {
        Competence::from_date(self.today())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

/// Number of days in the given month
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.day() == last_day_of_month(date.year(), date.month())
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift `date` forward by whole calendar months, forcing the day of month
/// to `day` clamped to the last day of the resulting month
///
/// Returns `None` only when the result falls outside the supported date range.
pub fn shift_months_clamped(date: NaiveDate, months: u32, day: u32) -> Option<NaiveDate> {
    let shifted = first_of_month(date).checked_add_months(Months::new(months))?;
    let last = last_day_of_month(shifted.year(), shifted.month());
    shifted.with_day(day.clamp(1, last))
}

/// First day of the month `months` months after the month of `date`
pub fn first_of_month_after(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    first_of_month(date).checked_add_months(Months::new(months))
}

/// Difference in calendar months, ignoring the day of month
pub fn calendar_months_between(later: NaiveDate, earlier: NaiveDate) -> i32 {
    (later.year() - earlier.year()) * 12 + later.month() as i32 - earlier.month() as i32
}

/// Number of full months from `earlier` to `later`
///
/// Negative when `later` is before `earlier`. A month only counts once its
/// day of month is reached. The one exception is a single calendar month
/// step that lands on the last day of a short month (Jan 31 to Feb 29 is
/// one full month, Jan 31 to Apr 30 is still only two).
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i32 {
    if later < earlier {
        return -months_between(earlier, later);
    }

    let mut diff = calendar_months_between(later, earlier);
    if diff > 0 && later.day() < earlier.day() && !(diff == 1 && is_last_day_of_month(later)) {
        diff -= 1;
    }
    diff
}
