//! Response assertions
//!
//! Declarative checks evaluated against a response: status code, headers,
//! and body values selected by path expressions. Outcomes are three-valued
//! so "the selector did not resolve" stays distinct from "the value was
//! wrong".

use serde::{Deserialize, Serialize};

/// A check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check the response status code.
    Status {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check a header's value (case-insensitive name lookup).
    Header {
        /// Header name.
        name: String,
        /// Expected value.
        expected: String,
    },
    /// Check the Content-Type header (substring match).
    ContentType {
        /// Expected content type fragment, e.g. `application/json`.
        expected: String,
    },
    /// Check the value a body path expression resolves to.
    BodyPath {
        /// Path expression into the parsed body.
        path: String,
        /// Expected value (scalar or sequence).
        expected: serde_json::Value,
    },
    /// Check that a body path expression resolves to a sequence of exactly
    /// this many elements.
    BodyPathCount {
        /// Path expression into the parsed body.
        path: String,
        /// Expected element count.
        expected: usize,
    },
    /// Check that a body path expression resolves to a string matching a
    /// regex.
    BodyPathMatches {
        /// Path expression into the parsed body.
        path: String,
        /// Regex pattern.
        pattern: String,
    },
}

impl Assertion {
    /// Creates an exact status-code check.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::Status {
            expected: StatusExpectation::Exact(expected),
        }
    }

    /// Creates a header equality check.
    #[must_use]
    pub fn header(name: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// Creates a body path equality check.
    #[must_use]
    pub fn body_path(path: impl Into<String>, expected: serde_json::Value) -> Self {
        Self::BodyPath {
            path: path.into(),
            expected,
        }
    }

    /// Creates a body path element-count check.
    #[must_use]
    pub fn body_path_count(path: impl Into<String>, expected: usize) -> Self {
        Self::BodyPathCount {
            path: path.into(),
            expected,
        }
    }

    /// Returns a human-readable description of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("status {}", expected.description()),
            Self::Header { name, expected } => format!("header '{name}' equals '{expected}'"),
            Self::ContentType { expected } => format!("content type contains '{expected}'"),
            Self::BodyPath { path, expected } => format!("body {path} equals {expected}"),
            Self::BodyPathCount { path, expected } => {
                format!("body {path} has {expected} elements")
            }
            Self::BodyPathMatches { path, pattern } => format!("body {path} matches /{pattern}/"),
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes, inclusive on both ends.
    Range {
        /// Minimum status code.
        min: u16,
        /// Maximum status code.
        max: u16,
    },
}

impl StatusExpectation {
    /// Checks whether a status code satisfies this expectation.
    #[must_use]
    pub const fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
        }
    }

    /// Creates a "any 2xx" expectation.
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Returns a description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
        }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// How a single check turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The check passed.
    Pass,
    /// The selector resolved but the value differed.
    Mismatch,
    /// The selector did not resolve (absent header, missing field, index
    /// out of range, unparseable body).
    Missing,
}

/// Result of running a single check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// The check that was run.
    pub assertion: Assertion,
    /// How it turned out.
    pub outcome: Outcome,
    /// Actual value found, when there was one.
    pub actual: Option<String>,
    /// Failure explanation, when the check did not pass.
    pub message: Option<String>,
}

impl CheckResult {
    /// Creates a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            outcome: Outcome::Pass,
            actual: None,
            message: None,
        }
    }

    /// Creates a passed result recording the actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            outcome: Outcome::Pass,
            actual: Some(actual.into()),
            message: None,
        }
    }

    /// Creates a mismatch result with the actual value found.
    #[must_use]
    pub fn mismatch(
        assertion: Assertion,
        actual: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            outcome: Outcome::Mismatch,
            actual: Some(actual.into()),
            message: Some(message.into()),
        }
    }

    /// Creates a missing result.
    #[must_use]
    pub fn missing(assertion: Assertion, message: impl Into<String>) -> Self {
        Self {
            assertion,
            outcome: Outcome::Missing,
            actual: None,
            message: Some(message.into()),
        }
    }

    /// Returns true if the check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Pass)
    }
}

/// Aggregated results from running a list of checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Individual check results, in execution order.
    pub results: Vec<CheckResult>,
    /// Total number of checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks (mismatch or missing).
    pub failed: usize,
    /// Evaluation time in milliseconds.
    pub duration_ms: u64,
}

impl CheckReport {
    /// Creates a report from individual results.
    #[must_use]
    pub fn new(results: Vec<CheckResult>, duration_ms: u64) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = total - passed;

        Self {
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Returns true if every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_expectation_exact() {
        let exp = StatusExpectation::Exact(404);
        assert!(exp.matches(404));
        assert!(!exp.matches(200));
    }

    #[test]
    fn test_status_expectation_range() {
        let exp = StatusExpectation::success();
        assert!(exp.matches(200));
        assert!(exp.matches(299));
        assert!(!exp.matches(300));
        assert!(!exp.matches(199));
    }

    #[test]
    fn test_assertion_description() {
        assert_eq!(Assertion::status(200).description(), "status = 200");
        assert_eq!(
            Assertion::header("Content-Length", "4551").description(),
            "header 'Content-Length' equals '4551'"
        );
        assert_eq!(
            Assertion::body_path_count("MRData.CircuitTable.Circuits.circuitId", 20).description(),
            "body MRData.CircuitTable.Circuits.circuitId has 20 elements"
        );
    }

    #[test]
    fn test_check_result_outcomes() {
        let pass = CheckResult::pass(Assertion::status(200));
        assert!(pass.passed());

        let mismatch = CheckResult::mismatch(Assertion::status(200), "404", "expected 200");
        assert_eq!(mismatch.outcome, Outcome::Mismatch);
        assert!(!mismatch.passed());

        let missing = CheckResult::missing(
            Assertion::header("X-Missing", "v"),
            "header not present",
        );
        assert_eq!(missing.outcome, Outcome::Missing);
    }

    #[test]
    fn test_check_report_counts() {
        let results = vec![
            CheckResult::pass(Assertion::status(200)),
            CheckResult::mismatch(Assertion::status(200), "404", "expected 200"),
            CheckResult::missing(Assertion::header("X", "v"), "absent"),
        ];

        let report = CheckReport::new(results, 3);
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 2);
        assert!(!report.all_passed());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_assertion_serde_round_trip() {
        let checks = vec![
            Assertion::status(200),
            Assertion::Status {
                expected: StatusExpectation::success(),
            },
            Assertion::header("Content-Length", "4551"),
            Assertion::body_path("md5", serde_json::json!("abc")),
            Assertion::body_path_count("items.id", 3),
        ];

        let json = serde_json::to_string(&checks).unwrap();
        let back: Vec<Assertion> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, checks);
    }
}
