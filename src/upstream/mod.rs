//! Upstream book service subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → types.rs (Endpoint + SearchFilter render the outbound URL)
//!     → client.rs (one reqwest call, body buffered as text)
//!     → Result<String, UpstreamError> back to the handler
//! ```
//!
//! # Design Decisions
//! - One shared connection-pooled client, no per-request state
//! - URLs are built by plain string concatenation, values are not escaped
//! - No retries: each inbound request causes at most one outbound call

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{Endpoint, SearchFilter, UpstreamError, UpstreamResult};
