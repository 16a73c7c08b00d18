//! Scenario file types
//!
//! A scenario is a named sequence of steps, each a request plus the checks
//! to run against its response. A step may extract body values and store
//! them under a name; later steps pick stored values up as path parameters,
//! which is how one response's field feeds the next request.

use serde::{Deserialize, Serialize};

use crate::check::Assertion;
use crate::request::RequestSpec;

/// A named sequence of request/check steps, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, used in reports.
    pub name: String,
    /// Steps, executed in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Creates an empty scenario.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Adds a step (builder pattern).
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// One request, its checks, and any values to extract from the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step name, used in reports. Falls back to the request name when empty.
    #[serde(default)]
    pub name: String,
    /// The request to execute.
    pub request: RequestSpec,
    /// Checks to run against the response.
    #[serde(default)]
    pub checks: Vec<Assertion>,
    /// Values to extract from the response body for later steps.
    #[serde(default)]
    pub extract: Vec<ExtractRule>,
}

impl Step {
    /// Creates a step for a request with no checks.
    #[must_use]
    pub fn new(request: RequestSpec) -> Self {
        Self {
            name: String::new(),
            request,
            checks: Vec::new(),
            extract: Vec::new(),
        }
    }

    /// Adds a check (builder pattern).
    #[must_use]
    pub fn with_check(mut self, check: Assertion) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds an extraction rule (builder pattern).
    #[must_use]
    pub fn with_extract(mut self, rule: ExtractRule) -> Self {
        self.extract.push(rule);
        self
    }

    /// Returns the display name: the step name, or the request name when the
    /// step has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.request.name
        } else {
            &self.name
        }
    }
}

/// Extraction of a body value into a named binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRule {
    /// Path expression into the response body.
    pub path: String,
    /// Binding name; later steps see it as a path parameter.
    pub store_as: String,
}

impl ExtractRule {
    /// Creates a new extraction rule.
    #[must_use]
    pub fn new(path: impl Into<String>, store_as: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            store_as: store_as.into(),
        }
    }
}
