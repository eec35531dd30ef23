//! Forwarding handlers for `/proxy/books`.
//!
//! Each handler makes exactly one upstream call and relays the body, or
//! converts the failure into the error envelope. Status codes are fixed per
//! operation; the upstream status is only used to decide success.
//!
//! Extractor rejections (bad id, oversized or non-UTF-8 body) are answered
//! with the envelope too, carrying the rejection's status, and never reach
//! the upstream.

use axum::extract::rejection::{PathRejection, StringRejection};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::time::Instant;

use crate::http::response::{JsonText, ProxyError, DELETED_BODY};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{SearchFilter, UpstreamError};

/// `GET /proxy/books`
pub async fn list_books(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let result = state
        .upstream
        .get_all()
        .await
        .map(JsonText::ok)
        .map_err(|e| {
            log_failure("get_all", &e);
            ProxyError::internal(e.to_string())
        });
    finish("get_all", start, result)
}

/// `GET /proxy/books/{id}`
///
/// Every upstream failure, including transport errors, is reported as 404.
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let start = Instant::now();
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return finish("get_by_id", start, reject("get_by_id", rejection)),
    };

    let result = state
        .upstream
        .get_by_id(id)
        .await
        .map(JsonText::ok)
        .map_err(|e| {
            log_failure("get_by_id", &e);
            ProxyError::not_found()
        });
    finish("get_by_id", start, result)
}

/// `POST /proxy/books`
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<String, StringRejection>,
) -> Response {
    let start = Instant::now();
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return finish("create", start, reject("create", rejection)),
    };

    let result = state
        .upstream
        .create(body)
        .await
        .map(JsonText::created)
        .map_err(|e| {
            log_failure("create", &e);
            ProxyError::internal(format!("Error creating book: {}", e))
        });
    finish("create", start, result)
}

/// `PUT /proxy/books/{id}`
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<String, StringRejection>,
) -> Response {
    let start = Instant::now();
    let (id, body) = match (path, body) {
        (Ok(Path(id)), Ok(body)) => (id, body),
        (Err(rejection), _) => return finish("update", start, reject("update", rejection)),
        (_, Err(rejection)) => return finish("update", start, reject("update", rejection)),
    };

    let result = state
        .upstream
        .update(id, body)
        .await
        .map(JsonText::ok)
        .map_err(|e| {
            log_failure("update", &e);
            ProxyError::internal(format!("Error updating book: {}", e))
        });
    finish("update", start, result)
}

/// `DELETE /proxy/books/{id}`
///
/// The upstream body is ignored; success always yields the fixed message.
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let start = Instant::now();
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return finish("delete", start, reject("delete", rejection)),
    };

    let result = state
        .upstream
        .delete(id)
        .await
        .map(|()| JsonText::ok(DELETED_BODY))
        .map_err(|e| {
            log_failure("delete", &e);
            ProxyError::internal(format!("Error deleting book: {}", e))
        });
    finish("delete", start, result)
}

/// `GET /proxy/books/search?title=&author=&genre=`
///
/// The raw query is parsed by hand so repeated keys are joined rather than
/// rejected.
pub async fn search_books(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let filter = SearchFilter::from_query(query.as_deref());
    let result = state
        .upstream
        .search(filter)
        .await
        .map(JsonText::ok)
        .map_err(|e| {
            log_failure("search", &e);
            ProxyError::internal(format!("Search error: {}", e))
        });
    finish("search", start, result)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Unknown paths.
pub async fn not_found() -> ProxyError {
    ProxyError::new(StatusCode::NOT_FOUND, "Not found")
}

/// Known paths with an unsupported method.
pub async fn method_not_allowed() -> ProxyError {
    ProxyError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn log_failure(operation: &'static str, error: &UpstreamError) {
    tracing::error!(operation, error = %error, "Upstream call failed");
}

fn reject(operation: &'static str, rejection: impl Into<ProxyError>) -> Result<JsonText, ProxyError> {
    let error = rejection.into();
    tracing::warn!(operation, status = %error.status, error = %error.message, "Request rejected");
    Err(error)
}

fn finish(operation: &'static str, start: Instant, result: Result<JsonText, ProxyError>) -> Response {
    let response = result.into_response();
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}
