//! Configuration loading from `TRAEFIK_MAPPER_*` environment variables.

use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ServiceConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::config::validation::{validate_config, ValidationError};
use crate::mapper::MapperOptions;

/// Prefix shared by every variable the service reads.
pub const ENV_PREFIX: &str = "TRAEFIK_MAPPER_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TRAEFIK_MAPPER_BASE_ENDPOINT is missing")]
    MissingBaseEndpoint,

    #[error("invalid base endpoint `{value}`: {source}")]
    InvalidBaseEndpoint {
        value: String,
        source: url::ParseError,
    },

    #[error("invalid metrics address `{value}`: {source}")]
    InvalidMetricsAddress {
        value: String,
        source: AddrParseError,
    },

    #[error("invalid request timeout `{value}`: {source}")]
    InvalidTimeout { value: String, source: ParseIntError },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads prefixed variables through a lookup function.
struct EnvSource<F> {
    lookup: F,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(&format!("{ENV_PREFIX}{name}"))
    }

    /// Semicolon-delimited list.
    ///
    /// Empty segments (e.g. from a trailing `;`) are dropped on purpose, unlike
    /// a plain split: an empty entry would substring-match every rule.
    fn list(&self, name: &str) -> Vec<String> {
        self.string(name)
            .map(|raw| {
                raw.split(';')
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True only for the literal `true`.
    fn flag(&self, name: &str) -> bool {
        self.string(name).as_deref() == Some("true")
    }
}

/// Load rewrite options only. Used where no upstream is needed.
pub fn options_from_lookup<F>(lookup: F) -> MapperOptions
where
    F: Fn(&str) -> Option<String>,
{
    read_options(&EnvSource { lookup })
}

fn read_options<F>(env: &EnvSource<F>) -> MapperOptions
where
    F: Fn(&str) -> Option<String>,
{
    MapperOptions {
        new_cert_resolver: env.string("NEW_CERT_RESOLVER"),
        new_http_entrypoint_name: env.string("NEW_HTTP_ENTRYPOINT"),
        new_https_entrypoint_name: env.string("NEW_HTTPS_ENTRYPOINT"),
        add_middleware: env.string("ADD_MIDDLEWARE_NAME"),
        ignore_middleware_sites: env.list("IGNORE_MIDDLEWARE_SITES"),
        remove_coolify: env.flag("FILTER_COOLIFY"),
        remove_www_middlewares: env.flag("FILTER_WWW_MIDDLEWARE"),
        remove_http_routers: env.flag("FILTER_HTTP_ROUTERS"),
        remove_www_routers: env.flag("FILTER_WWW_ROUTERS"),
    }
}

/// Load and validate configuration through `lookup`.
pub fn load_from_lookup<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = EnvSource { lookup };

    let raw_endpoint = env
        .string("BASE_ENDPOINT")
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingBaseEndpoint)?;
    let base_endpoint = Url::parse(&raw_endpoint).map_err(|source| {
        ConfigError::InvalidBaseEndpoint {
            value: raw_endpoint.clone(),
            source,
        }
    })?;

    let mut config = ServiceConfig::new(base_endpoint);
    config.options = read_options(&env);

    if let Some(addr) = env.string("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    config.observability.metrics_address = env
        .string("METRICS_ADDRESS")
        .map(|value| {
            value
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidMetricsAddress { value, source })
        })
        .transpose()?;
    config.request_timeout_secs = match env.string("REQUEST_TIMEOUT_SECS") {
        Some(value) => value
            .parse()
            .map_err(|source| ConfigError::InvalidTimeout { value, source })?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from the process environment.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    load_from_lookup(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_base_endpoint() {
        let err = load_from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseEndpoint));
        assert_eq!(err.to_string(), "TRAEFIK_MAPPER_BASE_ENDPOINT is missing");
    }

    #[test]
    fn test_empty_base_endpoint_is_missing() {
        let err = load_from_lookup(lookup(&[("BASE_ENDPOINT", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseEndpoint));
    }

    #[test]
    fn test_invalid_base_endpoint() {
        let err = load_from_lookup(lookup(&[("BASE_ENDPOINT", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseEndpoint { .. }));
    }

    #[test]
    fn test_invalid_metrics_address() {
        let err = load_from_lookup(lookup(&[
            ("BASE_ENDPOINT", "http://coolify:3000/traefik"),
            ("METRICS_ADDRESS", "localhost"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidMetricsAddress { ref value, .. } if value == "localhost"
        ));
    }

    #[test]
    fn test_defaults() {
        let config = load_from_lookup(lookup(&[("BASE_ENDPOINT", "http://coolify:3000/traefik")])).unwrap();

        assert_eq!(config.base_endpoint.as_str(), "http://coolify:3000/traefik");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.observability.metrics_address.is_none());
        assert_eq!(config.options, MapperOptions::default());
    }

    #[test]
    fn test_reads_all_options() {
        let config = load_from_lookup(lookup(&[
            ("BASE_ENDPOINT", "http://coolify:3000/traefik"),
            ("NEW_CERT_RESOLVER", "myLetsEncrypt"),
            ("NEW_HTTP_ENTRYPOINT", "http"),
            ("NEW_HTTPS_ENTRYPOINT", "https"),
            ("ADD_MIDDLEWARE_NAME", "auth"),
            ("IGNORE_MIDDLEWARE_SITES", "a.example.io;b.example.io"),
            ("FILTER_COOLIFY", "true"),
            ("FILTER_WWW_MIDDLEWARE", "true"),
            ("FILTER_HTTP_ROUTERS", "true"),
            ("FILTER_WWW_ROUTERS", "true"),
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("METRICS_ADDRESS", "127.0.0.1:9090"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(
            config.options,
            MapperOptions {
                new_http_entrypoint_name: Some("http".into()),
                new_https_entrypoint_name: Some("https".into()),
                add_middleware: Some("auth".into()),
                new_cert_resolver: Some("myLetsEncrypt".into()),
                remove_http_routers: true,
                remove_www_routers: true,
                remove_coolify: true,
                remove_www_middlewares: true,
                ignore_middleware_sites: vec!["a.example.io".into(), "b.example.io".into()],
            }
        );
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(
            config.observability.metrics_address,
            Some(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_flags_require_literal_true() {
        let options = options_from_lookup(lookup(&[
            ("FILTER_COOLIFY", "TRUE"),
            ("FILTER_WWW_MIDDLEWARE", "1"),
            ("FILTER_HTTP_ROUTERS", "yes"),
            ("FILTER_WWW_ROUTERS", "true"),
        ]));

        assert!(!options.remove_coolify);
        assert!(!options.remove_www_middlewares);
        assert!(!options.remove_http_routers);
        assert!(options.remove_www_routers);
    }

    #[test]
    fn test_ignore_list_drops_empty_segments() {
        let options = options_from_lookup(lookup(&[("IGNORE_MIDDLEWARE_SITES", "a.example.io;;b.example.io;")]));
        assert_eq!(options.ignore_middleware_sites, vec!["a.example.io", "b.example.io"]);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load_from_lookup(lookup(&[
            ("BASE_ENDPOINT", "http://coolify:3000/traefik"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let err = load_from_lookup(lookup(&[
            ("BASE_ENDPOINT", "http://coolify:3000/traefik"),
            ("BIND_ADDRESS", "everywhere"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "validation failed: invalid bind address `everywhere`");
    }
}
