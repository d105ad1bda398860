//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! GET /
//!     → request.rs (assign / propagate request ID)
//!     → server.rs (fetch upstream document)
//!     → mapper pipeline (rewrite)
//!     → JSON response
//! ```

pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
