use std::time::Duration;

use dropdeck_client::{ApiSettings, FileApi, FileItem, HttpApi, LinkOutcome, ResolveOutcome};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn resolve_returns_items_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .and(body_json(json!({"url": "http://host.test/f/abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "",
            "file": [{
                "id": "abc",
                "name": "clip.mp4",
                "image": "http://cdn.test/abc.jpg",
                "domain": "host.test"
            }]
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve("http://host.test/f/abc").await;

    assert_eq!(
        outcome,
        ResolveOutcome::Resolved(vec![FileItem {
            id: "abc".to_string(),
            name: "clip.mp4".to_string(),
            image: "http://cdn.test/abc.jpg".to_string(),
            domain: "host.test".to_string(),
        }])
    );
}

#[tokio::test]
async fn resolve_with_zero_items_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "",
            "file": []
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve("http://host.test/f/none").await;
    assert_eq!(outcome, ResolveOutcome::Empty);
}

#[tokio::test]
async fn resolve_drops_rows_without_an_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "",
            "file": [
                {"id": "", "name": "ghost"},
                {"id": "real", "name": "clip.mp4", "image": "i", "domain": "host.test"}
            ]
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve("http://host.test/f/mixed").await;
    match outcome {
        ResolveOutcome::Resolved(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].id, "real");
        }
        other => panic!("expected Resolved, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_surfaces_backend_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "message": "file not found",
            "file": []
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve("http://host.test/f/gone").await;
    assert_eq!(outcome, ResolveOutcome::Failed("file not found".to_string()));
}

#[tokio::test]
async fn resolve_treats_http_errors_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve("http://host.test/f/x").await;
    match outcome {
        ResolveOutcome::Failed(message) => assert!(message.contains("500"), "{message}"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_treats_malformed_json_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve("http://host.test/f/x").await;
    assert!(matches!(outcome, ResolveOutcome::Failed(_)));
}

#[tokio::test]
async fn resolve_rejects_blank_url_without_a_request() {
    // No mock mounted: a request would 404 and change the failure message.
    let server = MockServer::start().await;
    let outcome = api_for(&server).resolve("   ").await;
    assert_eq!(outcome, ResolveOutcome::Failed("empty url".to_string()));
}

#[tokio::test]
async fn resolve_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_file"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"status": "success", "message": "", "file": []})),
        )
        .mount(&server)
        .await;

    let api = HttpApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .expect("client builds");

    let outcome = api.resolve("http://host.test/f/slow").await;
    assert!(matches!(outcome, ResolveOutcome::Failed(_)));
}

#[tokio::test]
async fn link_returns_issued_url_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_link"))
        .and(body_json(json!({"domain": "host.test", "id": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "",
            "link": "http://dl.test/abc"
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).link("host.test", "abc").await;
    assert_eq!(outcome, LinkOutcome::Issued("http://dl.test/abc".to_string()));
}

#[tokio::test]
async fn link_with_empty_url_is_failure() {
    // The backend's failure paths answer success-shaped bodies with an
    // empty link string; an empty link is never usable.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_link"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "",
            "link": ""
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).link("host.test", "abc").await;
    assert!(matches!(outcome, LinkOutcome::Failed(_)));
}

#[tokio::test]
async fn link_surfaces_backend_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_link"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "message": "link not found",
            "link": ""
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server).link("host.test", "abc").await;
    assert_eq!(outcome, LinkOutcome::Failed("link not found".to_string()));
}
