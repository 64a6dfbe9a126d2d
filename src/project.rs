use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a project, from early pipeline to closed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Low probability project.
    Opportunity,
    /// High probability project.
    Pending,
    Active,
    /// In close-out plan, commitments firm.
    CloseOut,
    Archived,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Opportunity
    }
}

/// A project window: the date bounds every commitment against the project
/// must fall within, plus descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Follow-on projects point at the project they continue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Project {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: ProjectStatus::default(),
            predecessor: None,
            start,
            end,
        }
    }
}
