use crate::calendar::{self, CalendarError, Workweek};
use crate::commitment::{Commitment, CommittedHoursMap};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Coverage ratio (committed hours / available working hours) keyed by month
/// bucket.
pub type CoverageMap = BTreeMap<NaiveDate, f64>;

/// Aggregates one resource's commitments into month-keyed totals and
/// coverage ratios.
///
/// Borrows the commitment slice and recomputes on every call; if the caller's
/// commitment set changes, the next call reflects it.
#[derive(Debug, Clone)]
pub struct CoverageAggregator<'a> {
    commitments: &'a [Commitment],
    workweek: Workweek,
}

impl<'a> CoverageAggregator<'a> {
    pub fn new(commitments: &'a [Commitment]) -> Self {
        Self::with_workweek(commitments, Workweek::default())
    }

    pub fn with_workweek(commitments: &'a [Commitment], workweek: Workweek) -> Self {
        Self {
            commitments,
            workweek,
        }
    }

    /// Total committed hours per month across every commitment's lifetime.
    pub fn committed_hours(&self) -> Result<CommittedHoursMap, CalendarError> {
        let mut totals = CommittedHoursMap::new();
        for commitment in self.commitments {
            for (month, hours) in commitment.hours_per_month(&self.workweek)? {
                *totals.entry(month).or_insert(0.0) += hours;
            }
        }
        Ok(totals)
    }

    /// Total committed hours per month within `[start, end]`; `end` defaults
    /// to the last day of `start`'s month.
    ///
    /// Commitments are screened with the record keeper's historical filter:
    /// a commitment is considered when it starts on or before the period
    /// start, or ends on or after the period end. Note this is not a strict
    /// interval intersection; a commitment lying strictly inside the period
    /// is skipped.
    pub fn committed_hours_in_period(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<CommittedHoursMap, CalendarError> {
        let end = end.unwrap_or_else(|| calendar::last_of_month(start));
        let mut totals = CommittedHoursMap::new();
        for commitment in self
            .commitments
            .iter()
            .filter(|c| c.start <= start || c.end >= end)
        {
            for (month, hours) in commitment.hours_in_period(start, Some(end), &self.workweek)? {
                *totals.entry(month).or_insert(0.0) += hours;
            }
        }
        Ok(totals)
    }

    /// Coverage ratio per month over every commitment's lifetime. The
    /// denominator is always the full month's working hours.
    pub fn coverage(&self) -> Result<CoverageMap, CalendarError> {
        self.ratios(self.committed_hours()?)
    }

    /// Coverage ratio per month within `[start, end]`.
    pub fn coverage_in_period(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<CoverageMap, CalendarError> {
        self.ratios(self.committed_hours_in_period(start, end)?)
    }

    fn ratios(&self, totals: CommittedHoursMap) -> Result<CoverageMap, CalendarError> {
        let mut coverage = CoverageMap::new();
        for (month, hours) in totals {
            let available = self.workweek.month_hours(month.year(), month.month())?;
            coverage.insert(month, hours / f64::from(available));
        }
        Ok(coverage)
    }
}
