//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the upstream base URL and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::new("listener.max_body_size", "must be greater than 0"));
    }

    validate_base_url(&config.upstream.base_url, &mut errors);

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "upstream.connect_timeout_secs",
            "must be greater than 0",
        ));
    }

    if config.upstream.request_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "upstream.request_timeout_secs",
            "must be greater than 0 when set",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_base_url(base_url: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::new(
                "upstream.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(_) if base_url.ends_with('/') => {
            errors.push(ValidationError::new(
                "upstream.base_url",
                "must not end with '/'",
            ));
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::new(
                "upstream.base_url",
                format!("'{}' is not a valid URL: {}", base_url, e),
            ));
        }
    }
}
