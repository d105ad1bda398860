//! Routing document model.
//!
//! # Data Flow
//! ```text
//! control plane JSON
//!     → types.rs (serde deserialization into typed collections)
//!     → mapper pipeline (rewrites by value)
//!     → types.rs (serialization back to JSON)
//! ```
//!
//! # Design Decisions
//! - Only the `http` section is modelled; everything the mapper never touches
//!   is carried through untouched in flattened `extra` maps
//! - Collections are ordered maps so output is deterministic
//! - Middlewares are opaque JSON values

pub mod types;

pub use types::{
    HttpConfiguration, LoadBalancer, Middleware, Router, RouterTls, RoutingDocument, ServerUrl,
    Service,
};
