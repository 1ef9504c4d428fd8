//! Locating the run to report on and its baseline.

use thiserror::Error;

use super::RunRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no run found for commit {prefix}")]
    NotFound { prefix: String },

    #[error("the results feed is empty")]
    Empty,
}

/// A target run and the run immediately preceding it in the feed.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub target: &'a RunRecord,
    pub previous: Option<&'a RunRecord>,
}

/// Pick the run to report on.
///
/// Without a prefix the latest run is used. With one, the feed is scanned
/// oldest first and the first run whose primary commit starts with `prefix`
/// wins. Either way the baseline is the element right before the target.
pub fn resolve<'a>(runs: &'a [RunRecord], prefix: Option<&str>) -> Result<Resolved<'a>, ResolveError> {
    let index = match prefix {
        None => runs.len().checked_sub(1).ok_or(ResolveError::Empty)?,
        Some(prefix) => runs
            .iter()
            .position(|run| run.primary_commit().is_some_and(|hash| hash.starts_with(prefix)))
            .ok_or_else(|| ResolveError::NotFound {
                prefix: prefix.to_string(),
            })?,
    };

    Ok(Resolved {
        target: &runs[index],
        previous: index.checked_sub(1).map(|i| &runs[i]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::fixtures::run;

    fn sequence(commits: &[&str]) -> Vec<RunRecord> {
        commits.iter().map(|commit| run(commit, vec![])).collect()
    }

    #[test]
    fn test_latest_pair() {
        let runs = sequence(&["aaa111", "bbb222", "ccc333"]);
        let resolved = resolve(&runs, None).unwrap();
        assert_eq!(resolved.target.primary_commit(), Some("ccc333"));
        assert_eq!(resolved.previous.and_then(RunRecord::primary_commit), Some("bbb222"));
    }

    #[test]
    fn test_single_run_has_no_baseline() {
        let runs = sequence(&["aaa111"]);
        let resolved = resolve(&runs, None).unwrap();
        assert_eq!(resolved.target.primary_commit(), Some("aaa111"));
        assert!(resolved.previous.is_none());
    }

    #[test]
    fn test_empty_feed() {
        assert_eq!(resolve(&[], None).unwrap_err(), ResolveError::Empty);
    }

    #[test]
    fn test_prefix_not_found_keeps_prefix() {
        let runs = sequence(&["aaa111", "bbb222"]);
        let err = resolve(&runs, Some("fff")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotFound {
                prefix: "fff".to_string()
            }
        );
    }

    #[test]
    fn test_prefix_match_returns_predecessor() {
        let runs = sequence(&["aaa111", "bbb222", "ccc333"]);
        let resolved = resolve(&runs, Some("bbb")).unwrap();
        assert_eq!(resolved.target.primary_commit(), Some("bbb222"));
        assert_eq!(resolved.previous.and_then(RunRecord::primary_commit), Some("aaa111"));
    }

    #[test]
    fn test_prefix_match_at_first_index() {
        let runs = sequence(&["aaa111", "bbb222"]);
        let resolved = resolve(&runs, Some("aaa1")).unwrap();
        assert!(resolved.previous.is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let runs = sequence(&["aaa111", "abc001", "abc002", "ddd444"]);
        let resolved = resolve(&runs, Some("abc")).unwrap();
        assert_eq!(resolved.target.primary_commit(), Some("abc001"));
        assert_eq!(resolved.previous.and_then(RunRecord::primary_commit), Some("aaa111"));
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let runs = sequence(&["abcdef"]);
        assert!(resolve(&runs, Some("ABC")).is_err());
    }

    #[test]
    fn test_runs_without_primary_commit_never_match() {
        let mut runs = sequence(&["abc123"]);
        runs[0].versions.clear();
        assert!(resolve(&runs, Some("abc")).is_err());
    }
}
