//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles parsing)
//! - Check the base endpoint is an HTTP(S) URL
//! - Check the listener address is a socket address
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base endpoint scheme must be http or https, got `{0}`")]
    UnsupportedScheme(String),

    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let scheme = config.base_endpoint.scheme();
    if scheme != "http" && scheme != "https" {
        errors.push(ValidationError::UnsupportedScheme(scheme.to_string()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
