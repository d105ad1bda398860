//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mapper
//! service. Rewrite options live in [`MapperOptions`].

use std::net::SocketAddr;

use url::Url;

use crate::mapper::MapperOptions;

/// Root configuration for the mapper service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Control plane URL the routing document is fetched from.
    pub base_endpoint: Url,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Upstream fetch timeout, in seconds. The request as a whole is allowed
    /// a short grace on top so the fetch times out first.
    pub request_timeout_secs: u64,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Rewrites applied to every served document.
    pub options: MapperOptions,
}

impl ServiceConfig {
    /// Configuration with defaults for everything but the base endpoint.
    pub fn new(base_endpoint: Url) -> Self {
        Self {
            base_endpoint,
            listener: ListenerConfig::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            observability: ObservabilityConfig::default(),
            options: MapperOptions::default(),
        }
    }
}

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Prometheus exporter bind address. Metrics are not exported when unset.
    pub metrics_address: Option<SocketAddr>,
}
