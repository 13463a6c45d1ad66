//! Application configuration, read from the environment.

mod error;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::ors::OrsConfig;
use crate::travel::CachePolicy;

pub use error::ConfigError;

const DEFAULT_CATALOG: &str = "temp/data/report.json";
const DEFAULT_STATIC_DIR: &str = "routefinder-server/static";

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ors: OrsConfig,
    pub addr: SocketAddr,
    pub catalog_path: PathBuf,
    pub static_dir: PathBuf,
    pub cache: CachePolicy,
}

impl AppConfig {
    /// Defaults with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            ors: OrsConfig::new(api_key),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cache: CachePolicy::unbounded(),
        }
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Unset and empty variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("ORS_API_KEY").unwrap_or_else(|| {
            warn!("ORS_API_KEY not set. Routing requests will be rejected.");
            String::new()
        });
        let mut config = Self::new(api_key);

        if let Some(url) = var("ORS_BASE_URL") {
            config.ors = config.ors.with_base_url(url);
        }
        if let Some(secs) = parse_var(&var, "ORS_TIMEOUT_SECS", "a number of seconds")? {
            config.ors = config.ors.with_timeout(secs);
        }
        if let Some(n) = parse_var::<usize>(&var, "ORS_MAX_CONCURRENT", "a positive integer")? {
            if n == 0 {
                return Err(ConfigError::Invalid {
                    name: "ORS_MAX_CONCURRENT",
                    expected: "a positive integer",
                    value: n.to_string(),
                });
            }
            config.ors = config.ors.with_max_concurrent(n);
        }

        if let Some(addr) = parse_var(&var, "ROUTEFINDER_ADDR", "a socket address")? {
            config.addr = addr;
        }
        if let Some(path) = var("ROUTEFINDER_CATALOG") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(dir) = var("ROUTEFINDER_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(n) = parse_var(&var, "ROUTEFINDER_CACHE_CAPACITY", "an entry count")? {
            config.cache = config.cache.with_max_capacity(n);
        }
        if let Some(secs) = parse_var(&var, "ROUTEFINDER_CACHE_TTL_SECS", "a number of seconds")? {
            config.cache = config.cache.with_time_to_live(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_cache(mut self, policy: CachePolicy) -> Self {
        self.cache = policy;
        self
    }
}

fn parse_var<T: FromStr>(
    var: impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    var(name)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.ors.api_key, "");
        assert_eq!(config.ors.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.ors.max_concurrent, 5);
        assert_eq!(config.ors.timeout_secs, None);
        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.catalog_path, PathBuf::from("temp/data/report.json"));
        assert_eq!(config.cache, CachePolicy::unbounded());
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("ORS_BASE_URL", "http://localhost:8080/ors"),
            ("ORS_TIMEOUT_SECS", "30"),
            ("ORS_MAX_CONCURRENT", "2"),
            ("ROUTEFINDER_ADDR", "0.0.0.0:8000"),
            ("ROUTEFINDER_CATALOG", "/srv/report.json"),
            ("ROUTEFINDER_CACHE_CAPACITY", "1000"),
            ("ROUTEFINDER_CACHE_TTL_SECS", "3600"),
        ]))
        .unwrap();

        assert_eq!(config.ors.api_key, "secret");
        assert_eq!(config.ors.base_url, "http://localhost:8080/ors");
        assert_eq!(config.ors.timeout_secs, Some(30));
        assert_eq!(config.ors.max_concurrent, 2);
        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.catalog_path, PathBuf::from("/srv/report.json"));
        assert_eq!(
            config.cache,
            CachePolicy::unbounded()
                .with_max_capacity(1000)
                .with_time_to_live(Duration::from_secs(3600))
        );
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("ORS_TIMEOUT_SECS", " ")])).unwrap();
        assert_eq!(config.ors.timeout_secs, None);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("ORS_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ORS_TIMEOUT_SECS must be a number of seconds, got \"soon\""
        );

        assert!(AppConfig::from_lookup(lookup(&[("ORS_MAX_CONCURRENT", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("ROUTEFINDER_ADDR", "nowhere")])).is_err());
    }
}
