//! Typed view of the dynamic routing configuration served by the control plane.
//!
//! All types derive Serde traits so the document round-trips through JSON.
//! Fields the mapper does not interpret are kept in `extra` so the rewritten
//! document does not silently lose configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque middleware definition. Only its key is ever inspected.
pub type Middleware = Value;

/// Root of the routing document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RoutingDocument {
    /// HTTP routing section.
    #[serde(default)]
    pub http: HttpConfiguration,
}

/// The `http` section: routers, services and middlewares keyed by name.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfiguration {
    pub routers: BTreeMap<String, Router>,
    pub services: BTreeMap<String, Service>,
    pub middlewares: BTreeMap<String, Middleware>,

    /// Sibling keys (e.g. `serversTransports`) passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named router binding entrypoints and a rule to a service.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Router {
    /// Entrypoint names, in declaration order.
    #[serde(default)]
    pub entrypoints: Vec<String>,

    /// Proxy matching expression, e.g. ``Host(`example.io`)``.
    #[serde(default)]
    pub rule: String,

    /// Key of the target service.
    #[serde(default)]
    pub service: String,

    /// Middleware chain, applied in order.
    #[serde(default)]
    pub middlewares: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<RouterTls>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Router {
    /// Returns true if the router listens on the given entrypoint.
    pub fn has_entrypoint(&self, name: &str) -> bool {
        self.entrypoints.iter().any(|e| e == name)
    }

    /// Returns the configured certificate resolver, treating an empty name as unset.
    pub fn cert_resolver(&self) -> Option<&str> {
        self.tls
            .as_ref()
            .and_then(|tls| tls.certresolver.as_deref())
            .filter(|resolver| !resolver.is_empty())
    }
}

/// Router TLS settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RouterTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certresolver: Option<String>,

    /// Passed through as-is: a single `{main}` object or a `[{main, sans}]` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A load-balanced service.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Service {
    #[serde(default)]
    pub loadbalancer: LoadBalancer,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LoadBalancer {
    #[serde(default)]
    pub servers: Vec<ServerUrl>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ServerUrl {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_router() {
        let router: Router = serde_json::from_value(json!({
            "entrypoints": ["websecure"],
            "rule": "Host(`example.io`)",
            "service": "app",
            "middlewares": []
        }))
        .unwrap();

        assert_eq!(router.entrypoints, vec!["websecure"]);
        assert!(router.tls.is_none());
        assert!(router.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let input = json!({
            "http": {
                "routers": {
                    "app": {
                        "entrypoints": ["web"],
                        "rule": "Host(`example.io`)",
                        "service": "app",
                        "middlewares": [],
                        "priority": 10,
                        "tls": { "certresolver": "letsencrypt", "options": "modern" }
                    }
                },
                "services": {},
                "middlewares": {},
                "serversTransports": { "insecure": { "insecureSkipVerify": true } }
            }
        });

        let doc: RoutingDocument = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(doc.http.routers["app"].extra["priority"], json!(10));
        assert_eq!(serde_json::to_value(&doc).unwrap(), input);
    }

    #[test]
    fn test_tls_domains_list_round_trips() {
        let input = json!({
            "http": {
                "routers": {
                    "app": {
                        "entrypoints": ["websecure"],
                        "rule": "Host(`a.example.io`)",
                        "service": "app",
                        "middlewares": [],
                        "tls": {
                            "certresolver": "le",
                            "domains": [{ "main": "a.example.io", "sans": ["b"] }]
                        }
                    }
                },
                "services": {},
                "middlewares": {}
            }
        });

        let doc: RoutingDocument = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(doc.http.routers["app"].cert_resolver(), Some("le"));
        assert_eq!(serde_json::to_value(&doc).unwrap(), input);
    }

    #[test]
    fn test_tls_domains_object_round_trips() {
        let input = json!({
            "entrypoints": ["websecure"],
            "rule": "",
            "service": "",
            "middlewares": [],
            "tls": { "domains": { "main": "coolify.example.io" } }
        });

        let router: Router = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(serde_json::to_value(&router).unwrap(), input);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let doc: RoutingDocument = serde_json::from_value(json!({ "http": {} })).unwrap();
        assert!(doc.http.routers.is_empty());
        assert!(doc.http.services.is_empty());
        assert!(doc.http.middlewares.is_empty());
    }

    #[test]
    fn test_absent_tls_is_not_serialized() {
        let router = Router {
            entrypoints: vec!["web".into()],
            ..Router::default()
        };
        let value = serde_json::to_value(&router).unwrap();
        assert!(value.get("tls").is_none());
    }

    #[test]
    fn test_cert_resolver_ignores_empty_name() {
        let mut router = Router {
            tls: Some(RouterTls {
                certresolver: Some(String::new()),
                ..RouterTls::default()
            }),
            ..Router::default()
        };
        assert_eq!(router.cert_resolver(), None);

        router.tls = Some(RouterTls {
            certresolver: Some("letsencrypt".into()),
            ..RouterTls::default()
        });
        assert_eq!(router.cert_resolver(), Some("letsencrypt"));
    }
}
