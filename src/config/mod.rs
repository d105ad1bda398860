//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TRAEFIK_MAPPER_* environment variables
//!     → loader.rs (read, split lists, parse flags)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - Everything except the base endpoint has a default
//! - Loading runs over a lookup function so it can be tested without
//!   touching the process environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_from_lookup, options_from_lookup, ConfigError, ENV_PREFIX};
pub use schema::{ListenerConfig, ObservabilityConfig, ServiceConfig};
