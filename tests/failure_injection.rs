//! Upstream failure handling: every failure becomes a JSON error envelope.

use axum::http::StatusCode;
use serde_json::Value;

mod common;

async fn error_message(res: reqwest::Response) -> String {
    assert_eq!(res.headers()["content-type"], "application/json; charset=UTF-8");
    let body: Value = res.json().await.expect("error body must be valid JSON");
    body["error"].as_str().expect("envelope must carry an error key").to_string()
}

#[tokio::test]
async fn test_list_all_unreachable_upstream() {
    let proxy = common::start_proxy(common::unreachable_base_url()).await;

    let res = common::client().get(proxy.url("/proxy/books")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!error_message(res).await.is_empty());
}

#[tokio::test]
async fn test_list_all_upstream_error_status() {
    let upstream = common::start_fixed_upstream(503, "maintenance").await;
    let proxy = common::start_proxy(upstream.base_url()).await;

    let res = common::client().get(proxy.url("/proxy/books")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = error_message(res).await;
    assert!(message.contains("503"), "message was {message}");
    assert_eq!(upstream.requests().len(), 1, "no retries");
}

#[tokio::test]
async fn test_get_by_id_failure_is_always_not_found() {
    let upstream = common::start_fixed_upstream(500, "boom").await;
    let proxy = common::start_proxy(upstream.base_url()).await;

    let res = common::client().get(proxy.url("/proxy/books/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), r#"{"error": "Book not found"}"#);

    let proxy = common::start_proxy(common::unreachable_base_url()).await;
    let res = common::client().get(proxy.url("/proxy/books/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), r#"{"error": "Book not found"}"#);
}

#[tokio::test]
async fn test_create_failure() {
    let upstream = common::start_fixed_upstream(400, "title is required").await;
    let proxy = common::start_proxy(upstream.base_url()).await;

    let res = common::client()
        .post(proxy.url("/proxy/books"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = error_message(res).await;
    assert!(message.starts_with("Error creating book: "), "message was {message}");
    assert!(message.contains("title is required"));
}

#[tokio::test]
async fn test_update_failure() {
    let upstream = common::start_fixed_upstream(404, "no such book").await;
    let proxy = common::start_proxy(upstream.base_url()).await;

    let res = common::client()
        .put(proxy.url("/proxy/books/11"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(res).await.starts_with("Error updating book: "));
}

#[tokio::test]
async fn test_delete_failure() {
    let proxy = common::start_proxy(common::unreachable_base_url()).await;

    let res = common::client().delete(proxy.url("/proxy/books/5")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(res).await.starts_with("Error deleting book: "));
}

#[tokio::test]
async fn test_search_failure() {
    let upstream = common::start_fixed_upstream(500, "index offline").await;
    let proxy = common::start_proxy(upstream.base_url()).await;

    let res = common::client()
        .get(proxy.url("/proxy/books/search?title=War"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(res).await.starts_with("Search error: "));
}

#[tokio::test]
async fn test_upstream_text_with_quotes_keeps_envelope_valid() {
    let upstream = common::start_fixed_upstream(500, r#"{"detail": "bad "input""}"#).await;
    let proxy = common::start_proxy(upstream.base_url()).await;

    let res = common::client().get(proxy.url("/proxy/books")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = error_message(res).await;
    assert!(message.contains(r#"bad "input""#));
}
