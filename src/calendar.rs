use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workweek definition: the contiguous run of weekday positions counted as
/// working days, plus the hours worked on each of those days.
///
/// Positions are Monday-based (Monday = 0 .. Sunday = 6), matching the
/// calendar grid the hour math walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workweek {
    pub starts: Weekday,
    pub ends: Weekday,
    pub hours_per_day: u32,
}

impl Default for Workweek {
    fn default() -> Self {
        Self {
            starts: Weekday::Mon,
            ends: Weekday::Fri,
            hours_per_day: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    InvalidMonth { month: u32 },
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::InvalidMonth { month } => {
                write!(f, "month {month} is outside the 1-12 range")
            }
            CalendarError::InvalidRange { start, end } => {
                write!(f, "range start {start} must be before range end {end}")
            }
        }
    }
}

impl std::error::Error for CalendarError {}

impl Workweek {
    pub fn new(starts: Weekday, ends: Weekday, hours_per_day: u32) -> Self {
        Self {
            starts,
            ends,
            hours_per_day,
        }
    }

    /// Working hours in `year`/`month` between `start_day` and `end_day`
    /// (both inclusive, day-of-month numbers).
    ///
    /// `end_day` is clamped to the month's actual last day, so callers may
    /// pass 31 for "through the end of the month". A window that is empty
    /// after clamping counts zero hours rather than failing.
    pub fn working_hours(
        &self,
        year: i32,
        month: u32,
        start_day: u32,
        end_day: u32,
    ) -> Result<u32, CalendarError> {
        let end_day = end_day.min(days_in_month(year, month)?);
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { month })?;

        let mut days = 0;
        let mut current = first;
        while current.month() == month {
            let position = current.weekday().num_days_from_monday();
            if current.day() >= start_day
                && current.day() <= end_day
                && position >= self.starts.num_days_from_monday()
                && position <= self.ends.num_days_from_monday()
            {
                days += 1;
            }
            current = current + Duration::days(1);
        }
        Ok(days * self.hours_per_day)
    }

    /// Working hours of the whole month.
    pub fn month_hours(&self, year: i32, month: u32) -> Result<u32, CalendarError> {
        self.working_hours(year, month, 1, 31)
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { month })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first day of the following month");
    Ok((next - first).num_days() as u32)
}

/// Canonical month-bucket key: the first day of the month containing `date`.
/// Any two dates in the same calendar month map to the identical key.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("month of a valid date")
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let day = days_in_month(date.year(), date.month()).expect("month of a valid date");
    NaiveDate::from_ymd_opt(date.year(), date.month(), day).expect("month of a valid date")
}

/// The month anchors touched by `[start, end]`, in order.
///
/// The first entry is `start` itself, even when it is not the first of its
/// month; it stands for the partial month containing the range start. Every
/// subsequent entry is the first-of-month date of the next calendar month,
/// through the month containing `end`. Recomputing from the same range always
/// yields the identical sequence.
pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
    if start >= end {
        return Err(CalendarError::InvalidRange { start, end });
    }

    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut anchors = Vec::with_capacity(span as usize + 1);
    anchors.push(start);

    // Month arithmetic on a 1-based month number; dividing by 12 rolls the
    // year, the remainder picks the month.
    let base = start.month() as i32;
    for offset in 0..span {
        let next = base + offset;
        let year = start.year() + next / 12;
        let month = 1 + (next % 12) as u32;
        anchors.push(NaiveDate::from_ymd_opt(year, month, 1).expect("first day of a month"));
    }
    Ok(anchors)
}
