//! HTTP client for the upstream book service.
//!
//! # Responsibilities
//! - Build the outbound URL for each operation
//! - Issue exactly one request per call, with no retries
//! - Buffer the response body as text and turn non-2xx into an error

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::upstream::types::{Endpoint, SearchFilter, UpstreamError, UpstreamResult};

/// Shared client for the upstream book service.
///
/// Cloning is cheap: the inner reqwest client is reference counted and
/// keeps one connection pool for all handlers.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/getAll`
    pub async fn get_all(&self) -> UpstreamResult<String> {
        self.send(Method::GET, &Endpoint::GetAll, None).await
    }

    /// `GET {base}/getById/{id}`
    pub async fn get_by_id(&self, id: i64) -> UpstreamResult<String> {
        self.send(Method::GET, &Endpoint::GetById(id), None).await
    }

    /// `POST {base}/create` with the body forwarded verbatim.
    pub async fn create(&self, body: String) -> UpstreamResult<String> {
        self.send(Method::POST, &Endpoint::Create, Some(body)).await
    }

    /// `PUT {base}/update/{id}` with the body forwarded verbatim.
    pub async fn update(&self, id: i64, body: String) -> UpstreamResult<String> {
        self.send(Method::PUT, &Endpoint::Update(id), Some(body)).await
    }

    /// `DELETE {base}/delete/{id}`; the upstream body is discarded.
    pub async fn delete(&self, id: i64) -> UpstreamResult<()> {
        self.send(Method::DELETE, &Endpoint::Delete(id), None).await?;
        Ok(())
    }

    /// `GET {base}/search[?title=..&author=..&genre=..]`
    pub async fn search(&self, filter: SearchFilter) -> UpstreamResult<String> {
        self.send(Method::GET, &Endpoint::Search(filter), None).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<String>,
    ) -> UpstreamResult<String> {
        let url = endpoint.url(&self.base_url);
        tracing::info!(operation = endpoint.operation(), method = %method, url = %url, "Forwarding to upstream");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            tracing::info!(operation = endpoint.operation(), body = %body, "Forwarding body");
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body: text });
        }

        Ok(text)
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = UpstreamClient::new(&UpstreamConfig::default()).unwrap();
        assert_eq!(client.base_url(), crate::config::schema::DEFAULT_UPSTREAM_BASE_URL);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_an_error() {
        // Reserve a port, then release it so nothing is listening there.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let config = UpstreamConfig {
            base_url: format!("http://{}/api/books", addr),
            connect_timeout_secs: 1,
            request_timeout_secs: Some(2),
        };
        let client = UpstreamClient::new(&config).unwrap();

        let result = client.get_all().await;
        assert!(matches!(result, Err(UpstreamError::Request(_))));
    }
}
