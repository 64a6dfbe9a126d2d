use crate::calendar::{self, CalendarError, Workweek};
use crate::validation::CommitmentValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated hours keyed by month bucket (first-of-month date).
pub type CommittedHoursMap = BTreeMap<NaiveDate, f64>;

/// How a commitment states its allocation: a flat monthly hour count, or a
/// percentage of the month's working-hour capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allocation {
    Hours(f64),
    Percentage(f64),
}

impl Allocation {
    /// Resolve the two optional input fields into the one allowed allocation.
    /// Both set, or neither set, is a conflict.
    pub fn from_options(
        hours: Option<f64>,
        percentage: Option<f64>,
    ) -> Result<Self, CommitmentValidationError> {
        match (hours, percentage) {
            (Some(hours), None) => Ok(Allocation::Hours(hours)),
            (None, Some(percentage)) => Ok(Allocation::Percentage(percentage)),
            (hours, percentage) => {
                Err(CommitmentValidationError::AllocationConflict { hours, percentage })
            }
        }
    }
}

/// A resource's pledged time on a project over a date range.
///
/// Validated at creation against the owning project's window (see
/// [`crate::validation::validate_commitment`]); treated as immutable once
/// accepted — the surrounding system replaces rather than mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub project_id: String,
    pub resource_id: String,
    /// Subaccount the committed time bills against, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub allocation: Allocation,
}

impl Commitment {
    /// Build a commitment from the raw record shape: two optional allocation
    /// fields of which exactly one must be set, and an inclusive date range
    /// that must be properly ordered.
    pub fn new(
        project_id: impl Into<String>,
        resource_id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        hours: Option<f64>,
        percentage: Option<f64>,
    ) -> Result<Self, CommitmentValidationError> {
        if start >= end {
            return Err(CalendarError::InvalidRange { start, end }.into());
        }
        let allocation = Allocation::from_options(hours, percentage)?;
        Ok(Self {
            project_id: project_id.into(),
            resource_id: resource_id.into(),
            account_id: None,
            start,
            end,
            allocation,
        })
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Month anchors of the commitment's own range. Recomputed on every call,
    /// so the sequence is always restartable.
    pub fn months(&self) -> Result<Vec<NaiveDate>, CalendarError> {
        calendar::month_starts(self.start, self.end)
    }

    /// Per-month hour breakdown over the commitment's whole lifetime.
    pub fn hours_per_month(&self, workweek: &Workweek) -> Result<CommittedHoursMap, CalendarError> {
        self.hours_in_period(self.start, Some(self.end), workweek)
    }

    /// Per-month hour breakdown restricted to `[period_start, period_end]`.
    /// `period_end` defaults to the last day of `period_start`'s month.
    ///
    /// A period that does not overlap the commitment's range yields an empty
    /// map; that is a normal outcome, not an error. Percentage allocations
    /// pro-rate against the working hours of each month window; fixed-hours
    /// allocations contribute their flat stated value to every month they
    /// touch, partial boundary months included.
    pub fn hours_in_period(
        &self,
        period_start: NaiveDate,
        period_end: Option<NaiveDate>,
        workweek: &Workweek,
    ) -> Result<CommittedHoursMap, CalendarError> {
        let period_end = period_end.unwrap_or_else(|| calendar::last_of_month(period_start));
        if period_start >= period_end {
            return Err(CalendarError::InvalidRange {
                start: period_start,
                end: period_end,
            });
        }

        let mut breakdown = CommittedHoursMap::new();
        if period_end < self.start || period_start > self.end {
            return Ok(breakdown);
        }

        let start = period_start.max(self.start);
        let end = period_end.min(self.end);

        if (start.year(), start.month()) == (end.year(), end.month()) {
            let hours = self.window_hours(start.year(), start.month(), start.day(), end.day(), workweek)?;
            breakdown.insert(calendar::first_of_month(start), hours);
            return Ok(breakdown);
        }

        for anchor in calendar::month_starts(start, end)? {
            let first_month = (anchor.year(), anchor.month()) == (start.year(), start.month());
            let last_month = (anchor.year(), anchor.month()) == (end.year(), end.month());
            let start_day = if first_month { start.day() } else { 1 };
            let end_day = if last_month {
                end.day()
            } else {
                calendar::days_in_month(anchor.year(), anchor.month())?
            };
            let hours =
                self.window_hours(anchor.year(), anchor.month(), start_day, end_day, workweek)?;
            breakdown.insert(calendar::first_of_month(anchor), hours);
        }
        Ok(breakdown)
    }

    fn window_hours(
        &self,
        year: i32,
        month: u32,
        start_day: u32,
        end_day: u32,
        workweek: &Workweek,
    ) -> Result<f64, CalendarError> {
        match self.allocation {
            Allocation::Percentage(percentage) => {
                let available = workweek.working_hours(year, month, start_day, end_day)?;
                Ok(f64::from(available) * percentage / 100.0)
            }
            Allocation::Hours(hours) => Ok(hours),
        }
    }
}
