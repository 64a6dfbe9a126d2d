use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated billing rate. A rate applies from its start date until a
/// later-starting rate supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceRate {
    pub start: NaiveDate,
    pub rate: f64,
}

/// An employee or other person whose time gets committed to projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_id: String,
    pub name: String,
    /// Organizational unit the resource belongs to, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rates: Vec<ResourceRate>,
}

impl Resource {
    pub fn new(resource_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            name: name.into(),
            unit: None,
            rates: Vec::new(),
        }
    }

    pub fn add_rate(&mut self, start: NaiveDate, rate: f64) {
        self.rates.push(ResourceRate { start, rate });
    }

    /// The rate in effect on `date`: the latest rate starting on or before
    /// that day, or `None` before the first rate.
    pub fn rate_on(&self, date: NaiveDate) -> Option<f64> {
        self.rates
            .iter()
            .filter(|rate| rate.start <= date)
            .max_by_key(|rate| rate.start)
            .map(|rate| rate.rate)
    }
}
