// src/check/mod.rs
use crate::probe::ProbeResponse;
use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the status check every probe evaluates.
pub const IS_STATUS_200: &str = "is status 200";

/// A named boolean assertion over a response.
#[derive(Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    predicate: fn(&ProbeResponse) -> bool,
}

impl Check {
    pub const fn new(name: &'static str, predicate: fn(&ProbeResponse) -> bool) -> Self {
        Self { name, predicate }
    }

    pub fn holds(&self, response: &ProbeResponse) -> bool {
        (self.predicate)(response)
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

pub fn status_is_200() -> Check {
    Check::new(IS_STATUS_200, |r| r.status == 200)
}

pub fn default_checks() -> Vec<Check> {
    vec![status_is_200()]
}

/// Outcome of every check in a run, keyed by check name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckResult {
    checks: BTreeMap<String, bool>,
}

impl CheckResult {
    pub fn get(&self, name: &str) -> Option<bool> {
        self.checks.get(name).copied()
    }

    /// True when at least one check ran and none failed.
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.values().all(|ok| *ok)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.checks.iter().map(|(name, ok)| (name.as_str(), *ok))
    }
}

impl FromIterator<(String, bool)> for CheckResult {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self {
            checks: iter.into_iter().collect(),
        }
    }
}

/// Evaluate `checks` against a response. A request that never completed
/// (`None`) fails every check.
pub fn evaluate(response: Option<&ProbeResponse>, checks: &[Check]) -> CheckResult {
    checks
        .iter()
        .map(|check| {
            let ok = response.is_some_and(|r| check.holds(r));
            (check.name.to_string(), ok)
        })
        .collect()
}
