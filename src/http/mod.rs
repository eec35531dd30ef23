//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id)
//!     → handlers.rs (one upstream call per request)
//!     → response.rs (relay body or error envelope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{JsonText, ProxyError};
pub use server::{AppState, HttpServer};
