//! Document rewrite primitives.
//!
//! Each primitive takes a [`RoutingDocument`] by value and returns the
//! rewritten document. Rule checks are plain substring searches over the
//! rule text; the rule grammar is never parsed.

use super::collection::{filter_section, map_section, Middlewares, Routers, Services};
use crate::document::RoutingDocument;

/// Conventional plain-HTTP entrypoint.
pub const HTTP_ENTRYPOINT: &str = "web";

/// Conventional HTTPS entrypoint.
pub const HTTPS_ENTRYPOINT: &str = "websecure";

/// Rule fragment that identifies a `www.` host match.
pub const WWW_HOST_PATTERN: &str = "Host(`www.";

/// Key prefix of the control plane's own routers and services.
pub const COOLIFY_PREFIX: &str = "coolify";

pub const REDIRECT_TO_NON_WWW: &str = "redirect-to-non-www";
pub const REDIRECT_TO_WWW: &str = "redirect-to-www";

/// Middlewares dropped by [`filter_www_middlewares`].
pub const WWW_MIDDLEWARES: [&str; 2] = [REDIRECT_TO_NON_WWW, REDIRECT_TO_WWW];

/// Replaces `old` with `new` in every router's entrypoints.
pub fn rename_entrypoint(doc: RoutingDocument, old: &str, new: &str) -> RoutingDocument {
    map_section::<Routers, _>(doc, |_, mut router| {
        for entrypoint in router.entrypoints.iter_mut().filter(|e| e.as_str() == old) {
            *entrypoint = new.to_string();
        }
        router
    })
}

pub fn rename_http_entrypoint(doc: RoutingDocument, new: &str) -> RoutingDocument {
    rename_entrypoint(doc, HTTP_ENTRYPOINT, new)
}

pub fn rename_https_entrypoint(doc: RoutingDocument, new: &str) -> RoutingDocument {
    rename_entrypoint(doc, HTTPS_ENTRYPOINT, new)
}

/// Points every router that already has a certificate resolver at `new`.
///
/// Routers with TLS but no resolver are left as they are.
pub fn rename_cert_resolver(doc: RoutingDocument, new: &str) -> RoutingDocument {
    map_section::<Routers, _>(doc, |_, mut router| {
        if router.cert_resolver().is_some() {
            if let Some(tls) = router.tls.as_mut() {
                tls.certresolver = Some(new.to_string());
            }
        }
        router
    })
}

/// Appends `middleware` to every router's chain, except routers whose rule
/// contains one of the `ignore` entries.
pub fn add_middleware(doc: RoutingDocument, middleware: &str, ignore: &[String]) -> RoutingDocument {
    map_section::<Routers, _>(doc, |_, mut router| {
        if ignore.iter().any(|site| router.rule.contains(site.as_str())) {
            return router;
        }
        router.middlewares.push(middleware.to_string());
        router
    })
}

/// Drops every router that listens on the plain-HTTP entrypoint.
pub fn filter_http_routers(doc: RoutingDocument) -> RoutingDocument {
    filter_section::<Routers, _>(doc, |_, router| !router.has_entrypoint(HTTP_ENTRYPOINT))
}

/// Drops every router whose rule matches a `www.` host.
pub fn filter_www_routers(doc: RoutingDocument) -> RoutingDocument {
    filter_section::<Routers, _>(doc, |_, router| !router.rule.contains(WWW_HOST_PATTERN))
}

pub fn filter_coolify_routers(doc: RoutingDocument) -> RoutingDocument {
    filter_section::<Routers, _>(doc, |key, _| !key.starts_with(COOLIFY_PREFIX))
}

pub fn filter_coolify_services(doc: RoutingDocument) -> RoutingDocument {
    filter_section::<Services, _>(doc, |key, _| !key.starts_with(COOLIFY_PREFIX))
}

/// Drops the control plane's own routers, then its services.
///
/// Routers of other applications that reference a dropped service are kept.
pub fn filter_coolify(doc: RoutingDocument) -> RoutingDocument {
    filter_coolify_services(filter_coolify_routers(doc))
}

/// Removes the www redirect middlewares, then strips them from every router chain.
pub fn filter_www_middlewares(doc: RoutingDocument) -> RoutingDocument {
    let doc = filter_section::<Middlewares, _>(doc, |key, _| !WWW_MIDDLEWARES.contains(&key));
    map_section::<Routers, _>(doc, |_, mut router| {
        router
            .middlewares
            .retain(|name| !WWW_MIDDLEWARES.contains(&name.as_str()));
        router
    })
}
