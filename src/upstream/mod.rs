//! Upstream fetch of the routing document.
//!
//! # Data Flow
//! ```text
//! base endpoint URL (from config)
//!     → client.rs (plain GET with timeout)
//!     → status check, JSON decode
//!     → RoutingDocument
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client, reused across requests
//! - No retries, auth or custom headers
//! - Non-2xx responses are errors, never decoded

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
