//! Shared utilities for integration testing.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use book_proxy::config::ProxyConfig;
use book_proxy::http::HttpServer;
use book_proxy::lifecycle::Shutdown;

/// A request as seen by the mock upstream.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Path and query exactly as received, e.g. `/api/books/search?author=Tolstoy`.
    pub uri: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// A running mock upstream that records every request.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    /// Base URL to configure the proxy with.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/books", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request received; panics if there were zero or several.
    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call, got {:?}", requests);
        requests.into_iter().next().unwrap()
    }
}

/// Start a programmable mock upstream.
///
/// `respond` picks the status and body for each recorded request.
pub async fn start_mock_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorder = requests.clone();
    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
            let recorder = recorder.clone();
            let respond = respond.clone();
            async move {
                let recorded = Recorded {
                    method,
                    uri: uri.to_string(),
                    content_type: headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from),
                    body: String::from_utf8_lossy(&body).into_owned(),
                };
                let (status, body) = respond(&recorded);
                recorder.lock().unwrap().push(recorded);
                (StatusCode::from_u16(status).unwrap(), body)
            }
        },
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests }
}

/// Start a mock upstream that answers every request with the same response.
#[allow(dead_code)]
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_mock_upstream(move |_| (status, body.to_string())).await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    format!("http://{}/api/books", addr)
}

/// A proxy instance bound to a loopback port.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy forwarding to `base_url`.
pub async fn start_proxy(base_url: String) -> TestProxy {
    start_proxy_with(base_url, |_| {}).await
}

/// Start the proxy, letting the caller adjust the config first.
pub async fn start_proxy_with<F>(base_url: String, configure: F) -> TestProxy
where
    F: FnOnce(&mut ProxyConfig),
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ProxyConfig::default();
    config.listener.bind_address = addr.to_string();
    config.upstream.base_url = base_url;
    config.upstream.connect_timeout_secs = 1;
    config.upstream.request_timeout_secs = Some(5);
    configure(&mut config);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy { addr, shutdown }
}

/// Client that never goes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
