//! Manifest Checker
//!
//! Compares an actual file listing against a required/optional manifest.
//! A mismatch is never an error here; callers pick the policy.

use serde::Serialize;
use std::collections::HashSet;

/// What a caller does when manifest files are missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    /// Stop the operation
    Abort,
    /// Log, record a warning and carry on
    SkipAndWarn,
}

/// Outcome of a manifest check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
}

impl CheckResult {
    /// True when every required file is present
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Compute which manifest files are absent from `actual`.
///
/// Names are compared exactly (case-sensitive); order follows the manifest.
pub fn check<S: AsRef<str>>(
    actual: &HashSet<String>,
    required: &[S],
    optional: &[S],
) -> CheckResult {
    let missing = |names: &[S]| -> Vec<String> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !actual.contains(*name))
            .map(String::from)
            .collect()
    };

    CheckResult {
        missing_required: missing(required),
        missing_optional: missing(optional),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_complete_listing() {
        let actual = set(&["game.cfg", "PersistedSettings.json", "input.ini"]);
        let result = check(
            &actual,
            &["game.cfg", "PersistedSettings.json"],
            &["input.ini"],
        );
        assert!(result.is_complete());
        assert!(result.missing_optional.is_empty());
    }

    #[test]
    fn test_missing_optional_is_still_complete() {
        let actual = set(&["game.cfg", "PersistedSettings.json"]);
        let result = check(&actual, &["game.cfg", "PersistedSettings.json"], &["input.ini"]);
        assert!(result.is_complete());
        assert_eq!(result.missing_optional, vec!["input.ini"]);
    }

    #[test]
    fn test_missing_required_in_manifest_order() {
        let actual = set(&["input.ini"]);
        let result = check(&actual, &["game.cfg", "PersistedSettings.json"], &["input.ini"]);
        assert!(!result.is_complete());
        assert_eq!(
            result.missing_required,
            vec!["game.cfg", "PersistedSettings.json"]
        );
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let actual = set(&["GAME.CFG"]);
        let result = check(&actual, &["game.cfg"], &[]);
        assert_eq!(result.missing_required, vec!["game.cfg"]);
    }
}
