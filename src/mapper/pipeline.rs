//! Pipeline assembly and composition.
//!
//! [`Pipeline::from_options`] walks a fixed, ordered stage table and keeps
//! the operations whose option is set. [`compose`] then folds the document
//! through them left to right. Later stages see the output of earlier ones,
//! so the table order is part of the observable behaviour.

use serde::{Deserialize, Serialize};

use super::operations;
use crate::document::RoutingDocument;

/// Options selecting which rewrites run.
///
/// Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapperOptions {
    pub new_http_entrypoint_name: Option<String>,
    pub new_https_entrypoint_name: Option<String>,
    pub add_middleware: Option<String>,
    pub new_cert_resolver: Option<String>,
    pub remove_http_routers: bool,
    pub remove_www_routers: bool,
    pub remove_coolify: bool,
    pub remove_www_middlewares: bool,
    /// Rule substrings exempted from `add_middleware`.
    pub ignore_middleware_sites: Vec<String>,
}

/// A single selected rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    FilterHttpRouters,
    FilterWwwRouters,
    RenameHttpEntrypoint(String),
    RenameHttpsEntrypoint(String),
    RenameCertResolver(String),
    /// Routers first, then services.
    FilterCoolify,
    /// Middleware collection first, then router chains.
    FilterWwwMiddlewares,
    AddMiddleware { name: String, ignore: Vec<String> },
}

impl Operation {
    /// Stable identifier used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FilterHttpRouters => "filter_http_routers",
            Operation::FilterWwwRouters => "filter_www_routers",
            Operation::RenameHttpEntrypoint(_) => "rename_http_entrypoint",
            Operation::RenameHttpsEntrypoint(_) => "rename_https_entrypoint",
            Operation::RenameCertResolver(_) => "rename_cert_resolver",
            Operation::FilterCoolify => "filter_coolify",
            Operation::FilterWwwMiddlewares => "filter_www_middlewares",
            Operation::AddMiddleware { .. } => "add_middleware",
        }
    }

    /// Applies this operation, returning the rewritten document.
    pub fn apply(&self, doc: RoutingDocument) -> RoutingDocument {
        match self {
            Operation::FilterHttpRouters => operations::filter_http_routers(doc),
            Operation::FilterWwwRouters => operations::filter_www_routers(doc),
            Operation::RenameHttpEntrypoint(name) => operations::rename_http_entrypoint(doc, name),
            Operation::RenameHttpsEntrypoint(name) => operations::rename_https_entrypoint(doc, name),
            Operation::RenameCertResolver(name) => operations::rename_cert_resolver(doc, name),
            Operation::FilterCoolify => operations::filter_coolify(doc),
            Operation::FilterWwwMiddlewares => operations::filter_www_middlewares(doc),
            Operation::AddMiddleware { name, ignore } => operations::add_middleware(doc, name, ignore),
        }
    }
}

type StageBuilder = fn(&MapperOptions) -> Option<Operation>;

/// Option name → builder, in evaluation order.
const STAGES: [(&str, StageBuilder); 8] = [
    ("removeHttpRouters", http_routers_stage),
    ("removeWwwRouters", www_routers_stage),
    ("newHttpEntrypointName", http_entrypoint_stage),
    ("newHttpsEntrypointName", https_entrypoint_stage),
    ("newCertResolver", cert_resolver_stage),
    ("removeCoolify", coolify_stage),
    ("removeWwwMiddlewares", www_middlewares_stage),
    ("addMiddleware", add_middleware_stage),
];

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn http_routers_stage(options: &MapperOptions) -> Option<Operation> {
    options.remove_http_routers.then_some(Operation::FilterHttpRouters)
}

fn www_routers_stage(options: &MapperOptions) -> Option<Operation> {
    options.remove_www_routers.then_some(Operation::FilterWwwRouters)
}

fn http_entrypoint_stage(options: &MapperOptions) -> Option<Operation> {
    non_empty(&options.new_http_entrypoint_name).map(Operation::RenameHttpEntrypoint)
}

fn https_entrypoint_stage(options: &MapperOptions) -> Option<Operation> {
    non_empty(&options.new_https_entrypoint_name).map(Operation::RenameHttpsEntrypoint)
}

fn cert_resolver_stage(options: &MapperOptions) -> Option<Operation> {
    non_empty(&options.new_cert_resolver).map(Operation::RenameCertResolver)
}

fn coolify_stage(options: &MapperOptions) -> Option<Operation> {
    options.remove_coolify.then_some(Operation::FilterCoolify)
}

fn www_middlewares_stage(options: &MapperOptions) -> Option<Operation> {
    options.remove_www_middlewares.then_some(Operation::FilterWwwMiddlewares)
}

fn add_middleware_stage(options: &MapperOptions) -> Option<Operation> {
    non_empty(&options.add_middleware).map(|name| Operation::AddMiddleware {
        name,
        ignore: options.ignore_middleware_sites.clone(),
    })
}

/// An ordered list of operations selected from [`MapperOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    operations: Vec<Operation>,
}

impl Pipeline {
    /// Builds the pipeline for the given options.
    pub fn from_options(options: &MapperOptions) -> Self {
        let operations = STAGES
            .iter()
            .filter_map(|(option, build)| {
                let operation = build(options)?;
                tracing::trace!(option = *option, operation = operation.name(), "Stage selected");
                Some(operation)
            })
            .collect();
        Self { operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn apply(&self, doc: RoutingDocument) -> RoutingDocument {
        compose(doc, &self.operations)
    }
}

/// Folds `doc` through `operations` left to right. An empty list is the identity.
pub fn compose(doc: RoutingDocument, operations: &[Operation]) -> RoutingDocument {
    operations.iter().fold(doc, |acc, operation| {
        let next = operation.apply(acc);
        tracing::debug!(
            operation = operation.name(),
            routers = next.http.routers.len(),
            services = next.http.services.len(),
            middlewares = next.http.middlewares.len(),
            "Operation applied"
        );
        next
    })
}

/// Rewrites a copy of `doc` according to `options`. The input is left untouched.
pub fn transform(doc: &RoutingDocument, options: &MapperOptions) -> RoutingDocument {
    Pipeline::from_options(options).apply(doc.clone())
}
