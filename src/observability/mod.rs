//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler and mapper pipeline produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Log level comes from `RUST_LOG`, with a sane default
//! - Request ID flows through the HTTP layer's spans
//! - Metric recording is a no-op unless an exporter is installed

pub mod logging;
pub mod metrics;
