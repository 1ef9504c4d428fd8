//! Test run records as published in the libjs-data results feeds.

pub mod feed;
pub mod resolve;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key in [`RunRecord::versions`] holding the commit the run was built from.
pub const PRIMARY_REPOSITORY: &str = "serenity";

/// One test execution snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub commit_timestamp: i64,
    pub run_timestamp: i64,
    /// Repository name -> commit hash, in feed order.
    pub versions: IndexMap<String, String>,
    /// Test group name -> results, in feed order.
    pub tests: IndexMap<String, TestGroupResult>,
}

impl RunRecord {
    /// Commit hash of the primary repository, if the record carries one.
    pub fn primary_commit(&self) -> Option<&str> {
        self.versions.get(PRIMARY_REPOSITORY).map(String::as_str)
    }
}

/// Outcome counts and timing for one named test group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGroupResult {
    /// Seconds.
    pub duration: f64,
    /// Outcome label -> count. Labels are open-ended.
    pub results: IndexMap<String, i64>,
}

impl TestGroupResult {
    pub fn count(&self, label: &str) -> Option<i64> {
        self.results.get(label).copied()
    }

    /// Share of passed tests, `passed / (total / 100)`. Not clamped.
    ///
    /// A missing count is read as zero, and an empty group reports 0%.
    pub fn percentage(&self) -> f64 {
        let total = self.count("total").unwrap_or(0) as f64;
        let passed = self.count("passed").unwrap_or(0) as f64;
        if total == 0.0 {
            return 0.0;
        }
        passed / (total / 100.0)
    }
}

/// Runs ordered oldest to newest.
pub type RunSequence = Vec<RunRecord>;
