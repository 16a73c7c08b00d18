//! Offline tests for scenario files: load from disk, run against a canned
//! HTTP client, and verify the report.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;

use restcheck_application::ports::{HttpClient, HttpClientError};
use restcheck_domain::{RequestSpec, ResponseSpec, Scenario};
use restcheck_infrastructure::ScenarioRunner;

/// Serves canned JSON bodies in order, recording every requested URL.
struct CannedClient {
    bodies: Mutex<Vec<String>>,
    requested: Mutex<Vec<String>>,
}

impl CannedClient {
    fn new(bodies: &[&str]) -> Self {
        Self {
            bodies: Mutex::new(bodies.iter().rev().map(ToString::to_string).collect()),
            requested: Mutex::new(Vec::new()),
        }
    }
}

impl HttpClient for CannedClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        self.requested.lock().unwrap().push(request.full_url());
        let body = self.bodies.lock().unwrap().pop();
        Box::pin(async move {
            let body =
                body.ok_or_else(|| HttpClientError::Other("no canned response".to_string()))?;
            let mut headers = HashMap::new();
            headers.insert("Content-Type".to_string(), "application/json".to_string());
            Ok(ResponseSpec::new(
                200,
                headers,
                body.into_bytes(),
                Duration::from_millis(1),
            ))
        })
    }
}

const SCENARIO_JSON: &str = r#"{
    "name": "chained lookup",
    "steps": [
        {
            "name": "list",
            "request": {
                "url": "http://ergast.com/api/f1/{season}/circuits.json",
                "path_params": [{"name": "season", "value": "2017"}]
            },
            "checks": [
                {"type": "status", "expected": 200},
                {"type": "body_path_count", "path": "MRData.CircuitTable.Circuits.circuitId", "expected": 2}
            ],
            "extract": [
                {"path": "MRData.CircuitTable.Circuits.circuitId[1]", "store_as": "circuitId"}
            ]
        },
        {
            "name": "single",
            "request": {
                "url": "http://ergast.com/api/f1/circuits/{circuitId}.json"
            },
            "checks": [
                {"type": "body_path", "path": "MRData.CircuitTable.Circuits.Location[0].country", "expected": "USA"}
            ]
        }
    ]
}"#;

const LIST_BODY: &str = r#"{"MRData": {"CircuitTable": {"Circuits": [
    {"circuitId": "albert_park"},
    {"circuitId": "americas"}
]}}}"#;

const SINGLE_BODY: &str = r#"{"MRData": {"CircuitTable": {"Circuits": [
    {"circuitId": "americas", "Location": {"country": "USA"}}
]}}}"#;

#[tokio::test]
async fn scenario_loaded_from_file_runs_and_chains() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO_JSON.as_bytes()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let scenario: Scenario = serde_json::from_str(&text).unwrap();
    assert_eq!(scenario.name, "chained lookup");
    assert_eq!(scenario.steps.len(), 2);

    let client = Arc::new(CannedClient::new(&[LIST_BODY, SINGLE_BODY]));
    let runner = ScenarioRunner::new(Arc::clone(&client));
    let report = runner.run(&scenario).await.unwrap();

    assert!(report.all_passed());
    assert_eq!(report.total_checks(), 3);
    assert_eq!(report.failed_checks(), 0);

    // The id extracted from the first response must appear literally in the
    // second request's path.
    let requested = client.requested.lock().unwrap();
    assert_eq!(
        requested.as_slice(),
        [
            "http://ergast.com/api/f1/2017/circuits.json",
            "http://ergast.com/api/f1/circuits/americas.json",
        ]
    );
}

#[tokio::test]
async fn failing_check_is_reported_not_raised() {
    let scenario: Scenario = serde_json::from_str(
        r#"{
            "name": "expect wrong status",
            "steps": [
                {
                    "request": {"url": "http://ergast.com/api/f1/2017/circuits.json"},
                    "checks": [{"type": "status", "expected": 404}]
                }
            ]
        }"#,
    )
    .unwrap();

    let client = Arc::new(CannedClient::new(&[LIST_BODY]));
    let runner = ScenarioRunner::new(client);
    let report = runner.run(&scenario).await.unwrap();

    assert!(!report.all_passed());
    assert_eq!(report.failed_checks(), 1);
    assert_eq!(report.steps[0].status, 200);
}

#[tokio::test]
async fn transport_failure_aborts_the_scenario() {
    let scenario: Scenario = serde_json::from_str(
        r#"{
            "name": "two steps",
            "steps": [
                {"request": {"url": "http://ergast.com/api/f1/2017/circuits.json"}},
                {"request": {"url": "http://ergast.com/api/f1/2018/circuits.json"}}
            ]
        }"#,
    )
    .unwrap();

    // Only one canned body: the second step's send fails.
    let client = Arc::new(CannedClient::new(&[LIST_BODY]));
    let runner = ScenarioRunner::new(client);

    let err = runner.run(&scenario).await.unwrap_err();
    let restcheck_infrastructure::ScenarioError::Step { source, .. } = err;
    assert!(source.is_transport());
}
