//! Check runner implementation.
//!
//! Evaluates assertions against HTTP responses and produces check reports.

use std::time::Instant;

use regex::Regex;

use restcheck_domain::check::{Assertion, CheckReport, CheckResult, StatusExpectation};
use restcheck_domain::path::{PathError, PathExpr};
use restcheck_domain::response::ResponseSpec;
use restcheck_domain::DomainError;

/// Evaluates assertions against responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckRunner;

impl CheckRunner {
    /// Creates a new check runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs a list of checks against a response.
    #[must_use]
    pub fn run(&self, checks: &[Assertion], response: &ResponseSpec) -> CheckReport {
        let start = Instant::now();
        let results = checks
            .iter()
            .map(|check| self.run_check(check, response))
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        CheckReport::new(results, duration_ms)
    }

    /// Runs a single check against a response.
    #[must_use]
    pub fn run_check(&self, check: &Assertion, response: &ResponseSpec) -> CheckResult {
        match check {
            Assertion::Status { expected } => check_status(check, response, expected),
            Assertion::Header { name, expected } => check_header(check, response, name, expected),
            Assertion::ContentType { expected } => check_content_type(check, response, expected),
            Assertion::BodyPath { path, expected } => {
                with_body_value(check, response, path, |check, value| {
                    if &value == expected {
                        CheckResult::pass_with_value(check.clone(), value.to_string())
                    } else {
                        CheckResult::mismatch(
                            check.clone(),
                            value.to_string(),
                            format!("body {path}: expected {expected}, got {value}"),
                        )
                    }
                })
            }
            Assertion::BodyPathCount { path, expected } => {
                with_body_value(check, response, path, |check, value| {
                    value.as_array().map_or_else(
                        || {
                            CheckResult::mismatch(
                                check.clone(),
                                value.to_string(),
                                format!("body {path} did not resolve to a sequence"),
                            )
                        },
                        |items| {
                            if items.len() == *expected {
                                CheckResult::pass_with_value(check.clone(), items.len().to_string())
                            } else {
                                CheckResult::mismatch(
                                    check.clone(),
                                    items.len().to_string(),
                                    format!(
                                        "body {path}: expected {expected} elements, got {}",
                                        items.len()
                                    ),
                                )
                            }
                        },
                    )
                })
            }
            Assertion::BodyPathMatches { path, pattern } => {
                with_body_value(check, response, path, |check, value| {
                    check_value_matches(check, path, &value, pattern)
                })
            }
        }
    }
}

fn check_status(
    check: &Assertion,
    response: &ResponseSpec,
    expected: &StatusExpectation,
) -> CheckResult {
    let actual = response.status;
    if expected.matches(actual) {
        CheckResult::pass_with_value(check.clone(), actual.to_string())
    } else {
        CheckResult::mismatch(
            check.clone(),
            actual.to_string(),
            format!("expected status {}, got {actual}", expected.description()),
        )
    }
}

fn check_header(
    check: &Assertion,
    response: &ResponseSpec,
    name: &str,
    expected: &str,
) -> CheckResult {
    match response.get_header(name) {
        Some(actual) if actual == expected => {
            CheckResult::pass_with_value(check.clone(), actual.clone())
        }
        Some(actual) => CheckResult::mismatch(
            check.clone(),
            actual.clone(),
            format!("header '{name}': expected '{expected}', got '{actual}'"),
        ),
        None => CheckResult::missing(check.clone(), format!("header '{name}' not present")),
    }
}

fn check_content_type(check: &Assertion, response: &ResponseSpec, expected: &str) -> CheckResult {
    match &response.content_type {
        Some(actual) if actual.contains(expected) => {
            CheckResult::pass_with_value(check.clone(), actual.clone())
        }
        Some(actual) => CheckResult::mismatch(
            check.clone(),
            actual.clone(),
            format!("content type '{actual}' does not contain '{expected}'"),
        ),
        None => CheckResult::missing(check.clone(), "no Content-Type header present".to_string()),
    }
}

/// Parses the body as JSON, resolves `path`, and hands the value to `f`.
///
/// Parse failures and unresolved paths both report as missing: in either
/// case the selector never produced a value to compare.
fn with_body_value<F>(
    check: &Assertion,
    response: &ResponseSpec,
    path: &str,
    f: F,
) -> CheckResult
where
    F: FnOnce(&Assertion, serde_json::Value) -> CheckResult,
{
    let expr = match PathExpr::parse(path) {
        Ok(expr) => expr,
        Err(DomainError::InvalidPathExpression(msg)) => {
            return CheckResult::missing(check.clone(), format!("invalid path expression: {msg}"));
        }
        Err(e) => return CheckResult::missing(check.clone(), e.to_string()),
    };

    let body: serde_json::Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(e) => {
            return CheckResult::missing(
                check.clone(),
                format!("failed to parse body as JSON: {e}"),
            );
        }
    };

    match expr.evaluate(&body) {
        Ok(value) => f(check, value),
        Err(PathError::Missing { .. }) => CheckResult::missing(
            check.clone(),
            format!("body path '{path}' did not resolve"),
        ),
    }
}

fn check_value_matches(
    check: &Assertion,
    path: &str,
    value: &serde_json::Value,
    pattern: &str,
) -> CheckResult {
    let Some(actual) = value.as_str() else {
        return CheckResult::mismatch(
            check.clone(),
            value.to_string(),
            format!("body {path} is not a string"),
        );
    };

    match Regex::new(pattern) {
        Ok(regex) if regex.is_match(actual) => {
            CheckResult::pass_with_value(check.clone(), actual.to_string())
        }
        Ok(_) => CheckResult::mismatch(
            check.clone(),
            actual.to_string(),
            format!("body {path}: '{actual}' does not match /{pattern}/"),
        ),
        Err(e) => CheckResult::mismatch(
            check.clone(),
            actual.to_string(),
            format!("invalid regex pattern '{pattern}': {e}"),
        ),
    }
}
