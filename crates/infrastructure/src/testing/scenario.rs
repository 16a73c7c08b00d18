//! Scenario execution.
//!
//! Runs a scenario's steps in order: binds previously extracted values into
//! each request's path parameters, executes the request, evaluates the
//! step's checks, and stores any extracted values for later steps.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use thiserror::Error;

use restcheck_application::ports::HttpClient;
use restcheck_application::run_request::{RunRequest, RunRequestError};
use restcheck_domain::check::CheckReport;
use restcheck_domain::path::PathExpr;
use restcheck_domain::request::PathParam;
use restcheck_domain::scenario::{Scenario, Step};

use super::runner::CheckRunner;

/// Error produced when a scenario cannot proceed.
///
/// Check failures are reported, not raised; this error covers transport
/// failures and extraction problems, which leave later steps without the
/// data they need.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A step failed to execute or extract.
    #[error("step '{step}': {source}")]
    Step {
        /// The step that failed.
        step: String,
        /// The underlying failure.
        source: RunRequestError,
    },
}

/// Results from one scenario step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Step display name.
    pub name: String,
    /// The final URL that was requested.
    pub url: String,
    /// Response status code.
    pub status: u16,
    /// Check results for this step.
    pub checks: CheckReport,
    /// Values extracted from this step's response.
    pub extracted: Vec<(String, String)>,
}

/// Results from a whole scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-step reports, in execution order.
    pub steps: Vec<StepReport>,
    /// Total wall-clock time in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Returns true if every check in every step passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|s| s.checks.all_passed())
    }

    /// Total number of checks across all steps.
    #[must_use]
    pub fn total_checks(&self) -> usize {
        self.steps.iter().map(|s| s.checks.total).sum()
    }

    /// Number of failed checks across all steps.
    #[must_use]
    pub fn failed_checks(&self) -> usize {
        self.steps.iter().map(|s| s.checks.failed).sum()
    }
}

/// Runs scenarios: sequential steps, one request in flight at a time.
pub struct ScenarioRunner<C: HttpClient> {
    requests: RunRequest<C>,
    checks: CheckRunner,
}

impl<C: HttpClient> ScenarioRunner<C> {
    /// Creates a scenario runner on top of the given HTTP client.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            requests: RunRequest::new(client),
            checks: CheckRunner::new(),
        }
    }

    /// Runs every step of a scenario in order.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if a step's request fails at the transport
    /// level or an extraction does not resolve. Check failures do not stop
    /// the run; they are recorded in the report.
    pub async fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        let start = Instant::now();
        let started_at = Utc::now();
        let mut bindings: HashMap<String, String> = HashMap::new();
        let mut steps = Vec::with_capacity(scenario.steps.len());

        for step in &scenario.steps {
            let report = self.run_step(step, &mut bindings).await?;
            steps.push(report);
        }

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            started_at,
            steps,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn run_step(
        &self,
        step: &Step,
        bindings: &mut HashMap<String, String>,
    ) -> Result<StepReport, ScenarioError> {
        let name = step.display_name().to_string();
        let spec = apply_bindings(step, bindings);
        let url = spec.full_url();

        tracing::info!(step = %name, %url, "running step");

        let response = self
            .requests
            .execute(&spec)
            .await
            .map_err(|source| ScenarioError::Step {
                step: name.clone(),
                source,
            })?;

        let checks = self.checks.run(&step.checks, &response);

        let mut extracted = Vec::with_capacity(step.extract.len());
        if !step.extract.is_empty() {
            let body: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
                ScenarioError::Step {
                    step: name.clone(),
                    source: RunRequestError::BodyNotJson(e.to_string()),
                }
            })?;

            for rule in &step.extract {
                let value = PathExpr::parse(&rule.path)
                    .map_err(RunRequestError::from)
                    .and_then(|expr| expr.evaluate(&body).map_err(RunRequestError::from))
                    .map_err(|source| ScenarioError::Step {
                        step: name.clone(),
                        source,
                    })?;

                let value = binding_value(&value);
                tracing::debug!(binding = %rule.store_as, value = %value, "extracted value");
                bindings.insert(rule.store_as.clone(), value.clone());
                extracted.push((rule.store_as.clone(), value));
            }
        }

        Ok(StepReport {
            name,
            url,
            status: response.status,
            checks,
            extracted,
        })
    }
}

/// Fills placeholders the step does not supply itself from the scenario's
/// extracted bindings. The step's own parameters take precedence.
fn apply_bindings(step: &Step, bindings: &HashMap<String, String>) -> restcheck_domain::RequestSpec {
    let mut spec = step.request.clone();
    for name in spec.unresolved_placeholders() {
        if let Some(value) = bindings.get(&name) {
            spec.path_params.add(PathParam::new(name, value.clone()));
        }
    }
    spec
}

/// Converts an extracted JSON value into path-parameter text. Strings are
/// used verbatim; anything else keeps its JSON rendering.
fn binding_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
