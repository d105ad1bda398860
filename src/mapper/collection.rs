//! Generic helpers over one named sub-collection of the document.
//!
//! # Design Decisions
//! - One implementation for routers, services and middlewares; the
//!   collection is selected through the [`Section`] marker type
//! - The document is taken by value: the caller's copy is never touched
//! - Key order of survivors is preserved

use std::collections::BTreeMap;

use crate::document::{HttpConfiguration, Middleware, Router, RoutingDocument, Service};

/// Selects one keyed collection of the `http` section.
pub trait Section {
    /// Value type stored in the collection.
    type Entry;

    /// Returns the collection inside the given configuration.
    fn entries(http: &mut HttpConfiguration) -> &mut BTreeMap<String, Self::Entry>;
}

/// The `routers` collection.
pub struct Routers;

/// The `services` collection.
pub struct Services;

/// The `middlewares` collection.
pub struct Middlewares;

impl Section for Routers {
    type Entry = Router;

    fn entries(http: &mut HttpConfiguration) -> &mut BTreeMap<String, Router> {
        &mut http.routers
    }
}

impl Section for Services {
    type Entry = Service;

    fn entries(http: &mut HttpConfiguration) -> &mut BTreeMap<String, Service> {
        &mut http.services
    }
}

impl Section for Middlewares {
    type Entry = Middleware;

    fn entries(http: &mut HttpConfiguration) -> &mut BTreeMap<String, Middleware> {
        &mut http.middlewares
    }
}

/// Replaces every entry of section `S` with `f(key, entry)`.
pub fn map_section<S, F>(mut doc: RoutingDocument, f: F) -> RoutingDocument
where
    S: Section,
    F: Fn(&str, S::Entry) -> S::Entry,
{
    let entries = std::mem::take(S::entries(&mut doc.http));
    *S::entries(&mut doc.http) = entries
        .into_iter()
        .map(|(key, entry)| {
            let mapped = f(&key, entry);
            (key, mapped)
        })
        .collect();
    doc
}

/// Keeps only the entries of section `S` for which `keep(key, entry)` holds.
pub fn filter_section<S, P>(mut doc: RoutingDocument, keep: P) -> RoutingDocument
where
    S: Section,
    P: Fn(&str, &S::Entry) -> bool,
{
    S::entries(&mut doc.http).retain(|key, entry| keep(key.as_str(), &*entry));
    doc
}
