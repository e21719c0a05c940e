mod common;

use common::{ok, overloaded, service, ScriptedModel, WILDLIFE_ANSWER, WILDLIFE_QUERY};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use uganda_guide::server;

/// Bind a random port, serve the scripted model, and return the base URL.
async fn spawn_server(model: Arc<ScriptedModel>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::run_server_on_listener(listener, service(model)));
    format!("http://{}", addr)
}

async fn post_json(url: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_recommend_end_to_end() {
    let model = ScriptedModel::new([ok(WILDLIFE_ANSWER)]);
    let base = spawn_server(model.clone()).await;

    let (status, body) = post_json(
        &format!("{}/recommend", base),
        json!({ "query": WILDLIFE_QUERY }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::from_str::<Value>(WILDLIFE_ANSWER).unwrap());
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_api_prefix_routes_to_same_handler() {
    let model = ScriptedModel::new([ok("```json\n{\"recommendations\":[]}\n```")]);
    let base = spawn_server(model).await;

    let (status, body) = post_json(
        &format!("{}/api/recommend", base),
        json!({ "query": "ice climbing" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "recommendations": [] }));
}

#[tokio::test]
async fn test_missing_or_blank_query_is_400() {
    let model = ScriptedModel::new([]);
    let base = spawn_server(model.clone()).await;
    let url = format!("{}/recommend", base);

    for body in [json!({}), json!({ "query": "   " }), json!({ "query": 42 })] {
        let (status, payload) = post_json(&url, body).await;
        assert_eq!(status, 400);
        assert_eq!(payload, json!({ "error": "Query is required" }));
    }

    let response = reqwest::Client::new()
        .post(&url)
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_model_output_is_generic_500() {
    let model = ScriptedModel::new([ok("Sorry, I can't help.")]);
    let base = spawn_server(model).await;

    let (status, body) = post_json(
        &format!("{}/recommend", base),
        json!({ "query": "wildlife" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to parse AI response" }));
}

#[tokio::test]
async fn test_repeated_overload_is_500() {
    let model = ScriptedModel::new([overloaded(), overloaded()]);
    let base = spawn_server(model.clone()).await;

    let (status, body) = post_json(
        &format!("{}/api/recommend", base),
        json!({ "query": "wildlife" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Internal server error" }));
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server(ScriptedModel::new([])).await;

    for path in ["/health", "/api/health"] {
        let response = reqwest::get(format!("{}{}", base, path)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "Server is running");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(), "{timestamp}");
        assert!(timestamp.ends_with('Z'));
    }
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let base = spawn_server(ScriptedModel::new([])).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/api/recommend", base))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
