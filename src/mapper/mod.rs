//! Routing document rewrite pipeline.
//!
//! # Data Flow
//! ```text
//! MapperOptions
//!     → pipeline.rs (select operations from a fixed stage table)
//!     → pipeline.rs (fold the document through them, left to right)
//!         → operations.rs (rename / filter / inject primitives)
//!             → collection.rs (map or filter one keyed collection)
//!     → rewritten RoutingDocument
//! ```
//!
//! # Design Decisions
//! - Every step takes the document by value and returns a new one
//! - Stage order is fixed; options only switch stages on or off
//! - Rule checks are substring matches, not a rule parser
//! - Filtering services or middlewares never rewrites routers that still
//!   reference them

pub mod collection;
pub mod operations;
pub mod pipeline;

pub use pipeline::{compose, transform, MapperOptions, Operation, Pipeline};
