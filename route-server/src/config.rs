//! Server configuration loaded from the environment.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::cache::CacheConfig;
use crate::geocode::GeocoderConfig;
use crate::opendata::OpenDataConfig;
use crate::ors::OrsConfig;
use crate::planner::PlannerConfig;

const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// `None` runs with offline straight-line directions.
    pub ors: Option<OrsConfig>,
    pub opendata: OpenDataConfig,
    pub geocoder: GeocoderConfig,
    pub cache: CacheConfig,
    pub planner: PlannerConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `ORS_API_KEY`: OpenRouteService key
    /// - `ORS_BASE_URL`: directions host; without a key it is treated as a
    ///   self-hosted instance. With neither set, directions are offline.
    /// - `ROUTE_SERVER_ADDR`: listen address (default `127.0.0.1:3000`)
    /// - `OPENDATA_BASE_URL`: records search endpoint override
    /// - `NOMINATIM_BASE_URL`: geocoder override
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr = match get("ROUTE_SERVER_ADDR") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "ROUTE_SERVER_ADDR",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_ADDR,
        };

        let ors_url = get("ORS_BASE_URL")
            .map(|url| require_http("ORS_BASE_URL", url))
            .transpose()?;
        let ors = match (get("ORS_API_KEY"), ors_url) {
            (Some(key), Some(url)) => Some(OrsConfig::new(key).with_base_url(url)),
            (Some(key), None) => Some(OrsConfig::new(key)),
            (None, Some(url)) => Some(OrsConfig::self_hosted(url)),
            (None, None) => None,
        };

        let mut opendata = OpenDataConfig::default();
        if let Some(url) = get("OPENDATA_BASE_URL") {
            opendata = opendata.with_base_url(require_http("OPENDATA_BASE_URL", url)?);
        }

        let mut geocoder = GeocoderConfig::default();
        if let Some(url) = get("NOMINATIM_BASE_URL") {
            geocoder = geocoder.with_base_url(require_http("NOMINATIM_BASE_URL", url)?);
        }

        Ok(Self {
            addr,
            ors,
            opendata,
            geocoder,
            cache: CacheConfig::default(),
            planner: PlannerConfig::default(),
        })
    }
}

fn require_http(var: &'static str, url: String) -> Result<String, ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ConfigError::Invalid {
            var,
            value: url,
            reason: "expected an http(s) URL".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| vars.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert!(config.ors.is_none());
        assert_eq!(config.opendata.base_url, OpenDataConfig::default().base_url);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("ROUTE_SERVER_ADDR", "0.0.0.0:8080"),
            ("NOMINATIM_BASE_URL", "http://localhost:7070"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.ors.unwrap().api_key.as_deref(), Some("secret"));
        assert_eq!(config.geocoder.base_url, "http://localhost:7070");
    }

    #[test]
    fn blank_key_is_offline() {
        let config = ServerConfig::from_lookup(lookup(&[("ORS_API_KEY", "  ")])).unwrap();
        assert!(config.ors.is_none());
    }

    #[test]
    fn base_url_without_key_is_self_hosted() {
        let config =
            ServerConfig::from_lookup(lookup(&[("ORS_BASE_URL", "http://localhost:8080/ors")]))
                .unwrap();
        let ors = config.ors.unwrap();
        assert!(ors.api_key.is_none());
        assert_eq!(ors.base_url, "http://localhost:8080/ors");

        let config = ServerConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("ORS_BASE_URL", "https://ors.example.org"),
        ]))
        .unwrap();
        let ors = config.ors.unwrap();
        assert_eq!(ors.api_key.as_deref(), Some("secret"));
        assert_eq!(ors.base_url, "https://ors.example.org");
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServerConfig::from_lookup(lookup(&[("ROUTE_SERVER_ADDR", "localhost")]))
            .unwrap_err();
        assert!(err.to_string().contains("ROUTE_SERVER_ADDR"));

        let err = ServerConfig::from_lookup(lookup(&[("OPENDATA_BASE_URL", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "OPENDATA_BASE_URL", .. }));
    }
}
