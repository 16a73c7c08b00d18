//! Exploratory checks against two public JSON APIs: the Ergast motor racing
//! archive and the jsontest.com MD5 service.
//!
//! These hit the live services, so they are ignored by default; run them
//! with `cargo test -- --ignored`. The fixed expected values (content
//! length, checksum, coordinates) are tied to the services' current
//! datasets and will drift if the upstream data changes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use restcheck_application::RunRequest;
use restcheck_domain::check::Assertion;
use restcheck_domain::RequestSpec;
use restcheck_infrastructure::{CheckRunner, ReqwestHttpClient};

const CIRCUITS_2017: &str = "http://ergast.com/api/f1/2017/circuits.json";
const CIRCUIT_IDS: &str = "MRData.CircuitTable.Circuits.circuitId";

fn runner() -> RunRequest<ReqwestHttpClient> {
    RunRequest::new(Arc::new(
        ReqwestHttpClient::new().expect("failed to build HTTP client"),
    ))
}

#[tokio::test]
#[ignore = "hits the live Ergast API"]
async fn circuits_2017_has_twenty_circuit_ids() {
    let spec = RequestSpec::get("circuits 2017", CIRCUITS_2017);
    let response = runner().execute(&spec).await.unwrap();

    let report = CheckRunner::new().run(&[Assertion::body_path_count(CIRCUIT_IDS, 20)], &response);
    assert!(report.all_passed(), "{:?}", report.results);
}

#[tokio::test]
#[ignore = "hits the live Ergast API"]
async fn circuits_2017_status_and_headers() {
    let spec = RequestSpec::get("circuits 2017", CIRCUITS_2017);
    let response = runner().execute(&spec).await.unwrap();

    let checks = [
        Assertion::status(200),
        Assertion::ContentType {
            expected: "application/json".to_string(),
        },
        Assertion::header("Content-Length", "4551"),
    ];
    let report = CheckRunner::new().run(&checks, &response);
    assert!(report.all_passed(), "{:?}", report.results);
}

#[tokio::test]
#[ignore = "hits the live jsontest API"]
async fn md5_of_known_text() {
    let spec =
        RequestSpec::get("md5", "http://md5.jsontest.com").with_query_param("text", "oohrah");
    let response = runner().execute(&spec).await.unwrap();

    let report = CheckRunner::new().run(
        &[Assertion::body_path(
            "md5",
            serde_json::json!("4d69131dd7eaed4aedbafd4333c1ccf1"),
        )],
        &response,
    );
    assert!(report.all_passed(), "{:?}", report.results);
}

#[tokio::test]
#[ignore = "hits the live Ergast API"]
async fn mismatched_series_parameter_yields_404() {
    // Substituting "f2" for the series segment builds a path the archive
    // does not serve; the 404 is itself the expectation.
    let spec = RequestSpec::get(
        "bad series",
        "http://ergast.com/api/{badParam}/{season}/circuits.json",
    )
    .with_path_param("season", "2017")
    .with_path_param("badParam", "f2");
    let response = runner().execute(&spec).await.unwrap();

    let report = CheckRunner::new().run(&[Assertion::status(404)], &response);
    assert!(report.all_passed(), "{:?}", report.results);
}

#[tokio::test]
#[ignore = "hits the live Ergast API"]
async fn extracted_circuit_id_feeds_location_lookup() {
    let requests = runner();

    // The circuit id at index 1 of the 2017 list is the Austin, TX circuit.
    let list = RequestSpec::get("circuits 2017", CIRCUITS_2017);
    let circuit_id = requests
        .execute_and_extract(&list, "MRData.CircuitTable.Circuits.circuitId[1]")
        .await
        .unwrap();
    let circuit_id = circuit_id.as_str().expect("circuit id is a string");

    let single = RequestSpec::get(
        "circuit by id",
        "http://ergast.com/api/f1/circuits/{circuitId}.json",
    )
    .with_path_param("circuitId", circuit_id);
    let response = requests.execute(&single).await.unwrap();

    let checks = [
        Assertion::body_path(
            "MRData.CircuitTable.Circuits.Location[0].country",
            serde_json::json!("USA"),
        ),
        Assertion::body_path(
            "MRData.CircuitTable.Circuits.Location[0].lat",
            serde_json::json!("30.1328"),
        ),
        Assertion::body_path(
            "MRData.CircuitTable.Circuits.Location[0].long",
            serde_json::json!("-97.6411"),
        ),
    ];
    let report = CheckRunner::new().run(&checks, &response);
    assert!(report.all_passed(), "{:?}", report.results);
}
