use crate::calendar;
use crate::resource::Resource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A billing account, optionally nested under a parent account. Accounts form
/// a tree per project; child placement is owned by [`AccountTree`], parents
/// are referenced by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub budget: f64,
}

impl Account {
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            name: name.into(),
            project: None,
            parent: None,
            budget,
        }
    }

    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn for_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountTreeError {
    DuplicateAccount { name: String },
    UnknownParent { name: String, parent: String },
}

impl fmt::Display for AccountTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountTreeError::DuplicateAccount { name } => {
                write!(f, "account '{name}' already exists")
            }
            AccountTreeError::UnknownParent { name, parent } => {
                write!(f, "account '{name}' references unknown parent '{parent}'")
            }
        }
    }
}

impl std::error::Error for AccountTreeError {}

/// Owning collection of accounts. Parents must be inserted before their
/// children; an account inserted without a project inherits its parent's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTree {
    accounts: BTreeMap<String, Account>,
}

impl AccountTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut account: Account) -> Result<(), AccountTreeError> {
        if self.accounts.contains_key(&account.name) {
            return Err(AccountTreeError::DuplicateAccount {
                name: account.name.clone(),
            });
        }
        if let Some(parent) = &account.parent {
            let parent_account =
                self.accounts
                    .get(parent)
                    .ok_or_else(|| AccountTreeError::UnknownParent {
                        name: account.name.clone(),
                        parent: parent.clone(),
                    })?;
            if account.project.is_none() {
                account.project = parent_account.project.clone();
            }
        }
        self.accounts.insert(account.name.clone(), account);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Direct children of `name`.
    pub fn subaccounts(&self, name: &str) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|account| account.parent.as_deref() == Some(name))
            .collect()
    }

    /// Every descendant of `name`, depth first.
    pub fn all_subaccounts(&self, name: &str) -> Vec<&Account> {
        let mut descendants = Vec::new();
        for child in self.subaccounts(name) {
            descendants.push(child);
            descendants.extend(self.all_subaccounts(&child.name));
        }
        descendants
    }

    /// Budget of `name` plus all of its descendants.
    pub fn rolled_up_budget(&self, name: &str) -> Option<f64> {
        let account = self.get(name)?;
        let subtotal: f64 = self
            .all_subaccounts(name)
            .iter()
            .map(|account| account.budget)
            .sum();
        Some(account.budget + subtotal)
    }

    /// Charged cost per month bucket for `name` and its descendants. Charges
    /// against resources with no applicable rate carry no cost and are
    /// skipped.
    pub fn charged_cost_by_month(
        &self,
        name: &str,
        charges: &[Charge],
        resources: &[Resource],
    ) -> BTreeMap<NaiveDate, f64> {
        let mut scope: Vec<&str> = vec![name];
        scope.extend(self.all_subaccounts(name).iter().map(|a| a.name.as_str()));

        let mut costs = BTreeMap::new();
        for charge in charges
            .iter()
            .filter(|charge| scope.contains(&charge.account.as_str()))
        {
            let resource = resources
                .iter()
                .find(|resource| resource.resource_id == charge.resource_id);
            if let Some(cost) = resource.and_then(|resource| charge.cost(resource)) {
                *costs.entry(calendar::first_of_month(charge.start)).or_insert(0.0) += cost;
            }
        }
        costs
    }
}

/// Hours billed by a resource against an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub account: String,
    pub resource_id: String,
    pub start: NaiveDate,
    /// Defaults to the last day of the charge month when not given.
    pub end: NaiveDate,
    pub hours: f64,
}

impl Charge {
    pub fn new(
        account: impl Into<String>,
        resource_id: impl Into<String>,
        start: NaiveDate,
        hours: f64,
    ) -> Self {
        Self {
            account: account.into(),
            resource_id: resource_id.into(),
            start,
            end: calendar::last_of_month(start),
            hours,
        }
    }

    /// Cost of the charge at the resource's rate in effect on the charge
    /// start date.
    pub fn cost(&self, resource: &Resource) -> Option<f64> {
        resource.rate_on(self.start).map(|rate| rate * self.hours)
    }
}
