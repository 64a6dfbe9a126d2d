pub mod accounts;
pub mod calendar;
pub mod commitment;
pub mod coverage;
pub mod project;
pub mod resource;
pub mod validation;

pub use accounts::{Account, AccountTree, AccountTreeError, Charge};
pub use calendar::{
    CalendarError, Workweek, days_in_month, first_of_month, last_of_month, month_starts,
};
pub use commitment::{Allocation, Commitment, CommittedHoursMap};
pub use coverage::{CoverageAggregator, CoverageMap};
pub use project::{Project, ProjectStatus};
pub use resource::{Resource, ResourceRate};
pub use validation::{CommitmentValidationError, validate_commitment};
