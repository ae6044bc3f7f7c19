mod common;

use common::TestApp;
use reqwest::Client;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn_local().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn unknown_routes_return_not_found() {
    let app = TestApp::spawn_local().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/no-such-route", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_routes_return_not_found_for_any_method() {
    let app = TestApp::spawn_local().await;
    let client = Client::new();

    // The static fallback only serves GET/HEAD; other methods on unmatched
    // paths must still 404, not 405.
    let response = client
        .post(format!("{}/no-such-route", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{}/stimuli/scenarios.csv", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
