//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (request counters, latency histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
