//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Graceful shutdown on the lifecycle signal

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::handlers::{
    create_book, delete_book, get_book, health, list_books, method_not_allowed, not_found,
    search_books, update_book,
};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the book proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        tracing::info!(base_url = %upstream.base_url(), "Upstream client ready");

        let state = AppState { upstream };
        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/proxy/books", get(list_books).post(create_book))
            .route("/proxy/books/search", get(search_books))
            .route(
                "/proxy/books/{id}",
                get(get_book).put(update_book).delete(delete_book),
            )
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            uri = %req.uri(),
                            request_id = request_id(req).unwrap_or("unknown"),
                        )
                    }))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
