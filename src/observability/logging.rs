//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! this crate and tower-http request traces are shown at debug.
//! Warnings and errors go to stderr, everything else to stdout.

use tracing::Level;
use tracing_subscriber::fmt::writer::{MakeWriter, MakeWriterExt, OrElse, WithMaxLevel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the given level.
pub fn default_directive(log_level: &str) -> String {
    format!("book_proxy={},tower_http=debug", log_level)
}

/// Route WARN and ERROR events to `errors`, the rest to `output`.
pub fn split_writer<E, O>(errors: E, output: O) -> OrElse<WithMaxLevel<E>, O>
where
    E: for<'a> MakeWriter<'a>,
    O: for<'a> MakeWriter<'a>,
{
    errors.with_max_level(Level::WARN).or_else(output)
}

/// Install the global tracing subscriber.
pub fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)));

    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(split_writer(std::io::stderr, std::io::stdout)),
        )
        .try_init();
}
