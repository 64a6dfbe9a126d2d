use crate::calendar::{self, CalendarError, Workweek};
use crate::commitment::{Allocation, Commitment};
use crate::project::Project;
use chrono::{Datelike, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CommitmentValidationError {
    /// Both or neither of the hours/percentage fields were given.
    AllocationConflict {
        hours: Option<f64>,
        percentage: Option<f64>,
    },
    /// The commitment's range falls outside its project's window.
    RangeOutOfProjectBounds {
        start: NaiveDate,
        end: NaiveDate,
        project_start: NaiveDate,
        project_end: NaiveDate,
    },
    /// A fixed-hours commitment asks for more hours in a month than the
    /// month's window has working hours.
    OverCommitment {
        month: NaiveDate,
        requested: f64,
        available: f64,
    },
    Calendar(CalendarError),
}

impl fmt::Display for CommitmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitmentValidationError::AllocationConflict { hours, percentage } => match (hours, percentage) {
                (Some(hours), Some(percentage)) => write!(
                    f,
                    "commitment sets both hours ({hours}) and percentage ({percentage}); provide one or the other"
                ),
                _ => write!(f, "commitment must set either hours or a percentage"),
            },
            CommitmentValidationError::RangeOutOfProjectBounds {
                start,
                end,
                project_start,
                project_end,
            } => write!(
                f,
                "commitment range {start}..{end} falls outside the project window {project_start}..{project_end}"
            ),
            CommitmentValidationError::OverCommitment {
                month,
                requested,
                available,
            } => write!(
                f,
                "commitment asks for {requested} hours in {month} but only {available} working hours are available"
            ),
            CommitmentValidationError::Calendar(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommitmentValidationError {}

impl From<CalendarError> for CommitmentValidationError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

/// Validate a commitment against its project's window.
///
/// Run at creation and again on every persist; any error must cause the
/// storage layer to reject the write outright.
pub fn validate_commitment(
    commitment: &Commitment,
    project: &Project,
    workweek: &Workweek,
) -> Result<(), CommitmentValidationError> {
    if commitment.start >= commitment.end {
        return Err(CalendarError::InvalidRange {
            start: commitment.start,
            end: commitment.end,
        }
        .into());
    }

    let within_project = commitment.start >= project.start
        && commitment.end > project.start
        && commitment.start < project.end
        && commitment.end <= project.end;
    if !within_project {
        return Err(CommitmentValidationError::RangeOutOfProjectBounds {
            start: commitment.start,
            end: commitment.end,
            project_start: project.start,
            project_end: project.end,
        });
    }

    if let Allocation::Hours(requested) = commitment.allocation {
        // Fixed hours repeat in every touched month, so each month's own
        // window must be able to absorb the full stated amount.
        for anchor in calendar::month_starts(commitment.start, commitment.end)? {
            let first_month = (anchor.year(), anchor.month())
                == (commitment.start.year(), commitment.start.month());
            let last_month = (anchor.year(), anchor.month())
                == (commitment.end.year(), commitment.end.month());
            let start_day = if first_month { commitment.start.day() } else { 1 };
            let end_day = if last_month {
                commitment.end.day()
            } else {
                calendar::days_in_month(anchor.year(), anchor.month())?
            };
            let available =
                workweek.working_hours(anchor.year(), anchor.month(), start_day, end_day)?;
            if requested > f64::from(available) {
                return Err(CommitmentValidationError::OverCommitment {
                    month: calendar::first_of_month(anchor),
                    requested,
                    available: f64::from(available),
                });
            }
        }
    }

    Ok(())
}
