//! Rewrites the dynamic routing document of a reverse-proxy control plane
//! before serving it to a downstream proxy.

pub mod config;
pub mod document;
pub mod http;
pub mod lifecycle;
pub mod mapper;
pub mod observability;
pub mod upstream;

pub use config::ServiceConfig;
pub use document::RoutingDocument;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mapper::{transform, MapperOptions};
