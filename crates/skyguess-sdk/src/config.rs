//! Upstream feed configuration.
//!
//! Endpoints, credentials and timings for every external source. Built once
//! at startup and shared by the poller and the route resolver.

use std::time::Duration;

use skyguess_models::DEFAULT_RADIUS_KM;

/// Default live-state / route-registry base URL.
pub const DEFAULT_OPENSKY_BASE_URL: &str = "https://opensky-network.org/api";
/// Default commercial flight-data base URL.
pub const DEFAULT_AVIATIONSTACK_BASE_URL: &str = "http://api.aviationstack.com/v1";
/// Default search engine base URL.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com";
/// Default poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
/// Upper bound on a single live-state fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Username/password pair for the live-state provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Settings for every upstream the SDK talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Base URL serving `/states/all` and `/routes`.
    pub opensky_base_url: String,
    /// Optional Basic-auth credentials; anonymous access is rate limited.
    pub opensky_credentials: Option<BasicCredentials>,
    /// Base URL serving `/flights`.
    pub aviationstack_base_url: String,
    /// Access key; the flight-data provider is skipped without one.
    pub aviationstack_api_key: Option<String>,
    /// Base URL serving `/search`.
    pub search_base_url: String,
    /// Time between poll cycles.
    pub poll_interval: Duration,
    /// Bounding-box radius around the poll center.
    pub radius_km: f64,
    /// Upper bound on each upstream request.
    pub fetch_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            opensky_base_url: DEFAULT_OPENSKY_BASE_URL.to_string(),
            opensky_credentials: None,
            aviationstack_base_url: DEFAULT_AVIATIONSTACK_BASE_URL.to_string(),
            aviationstack_api_key: None,
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            radius_km: DEFAULT_RADIUS_KM,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl FeedConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                 | Default                           | Description            |
    /// |--------------------------|-----------------------------------|------------------------|
    /// | `OPENSKY_BASE_URL`       | `https://opensky-network.org/api` | states, route registry |
    /// | `OPENSKY_USERNAME`       | —                                 | Basic auth user        |
    /// | `OPENSKY_PASSWORD`       | —                                 | Basic auth password    |
    /// | `AVIATIONSTACK_BASE_URL` | `http://api.aviationstack.com/v1` | flight-data API        |
    /// | `AVIATIONSTACK_API_KEY`  | —                                 | skip provider if unset |
    /// | `SEARCH_BASE_URL`        | `https://www.google.com`          | search fallback        |
    /// | `POLL_INTERVAL_SECS`     | `15`                              | poll period            |
    /// | `SEARCH_RADIUS_KM`       | `50`                              | bounding-box radius    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let opensky_credentials = match (get("OPENSKY_USERNAME"), get("OPENSKY_PASSWORD")) {
            (Some(username), Some(password)) => Some(BasicCredentials { username, password }),
            _ => None,
        };

        Self {
            opensky_base_url: get("OPENSKY_BASE_URL").unwrap_or(defaults.opensky_base_url),
            opensky_credentials,
            aviationstack_base_url: get("AVIATIONSTACK_BASE_URL")
                .unwrap_or(defaults.aviationstack_base_url),
            aviationstack_api_key: get("AVIATIONSTACK_API_KEY"),
            search_base_url: get("SEARCH_BASE_URL").unwrap_or(defaults.search_base_url),
            poll_interval: get("POLL_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .map_or(defaults.poll_interval, Duration::from_secs),
            radius_km: get("SEARCH_RADIUS_KM")
                .and_then(|v| v.parse().ok())
                .filter(|&km: &f64| km > 0.0)
                .unwrap_or(defaults.radius_km),
            fetch_timeout: defaults.fetch_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> FeedConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        FeedConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = config_from(&[]);
        assert_eq!(cfg, FeedConfig::default());
        assert_eq!(cfg.poll_interval, Duration::from_secs(15));
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(10));
        assert!((cfg.radius_km - 50.0).abs() < f64::EPSILON);
        assert!(cfg.aviationstack_api_key.is_none());
    }

    #[test]
    fn credentials_need_both_halves() {
        let cfg = config_from(&[("OPENSKY_USERNAME", "alice")]);
        assert!(cfg.opensky_credentials.is_none());

        let cfg = config_from(&[("OPENSKY_USERNAME", "alice"), ("OPENSKY_PASSWORD", "s3cret")]);
        assert_eq!(
            cfg.opensky_credentials,
            Some(BasicCredentials {
                username: "alice".into(),
                password: "s3cret".into(),
            })
        );
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let cfg = config_from(&[("AVIATIONSTACK_API_KEY", "  ")]);
        assert!(cfg.aviationstack_api_key.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("OPENSKY_BASE_URL", "http://localhost:4000/api"),
            ("AVIATIONSTACK_API_KEY", "key123"),
            ("POLL_INTERVAL_SECS", "30"),
            ("SEARCH_RADIUS_KM", "25.5"),
        ]);
        assert_eq!(cfg.opensky_base_url, "http://localhost:4000/api");
        assert_eq!(cfg.aviationstack_api_key.as_deref(), Some("key123"));
        assert_eq!(cfg.poll_interval, Duration::from_secs(30));
        assert!((cfg.radius_km - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let cfg = config_from(&[("POLL_INTERVAL_SECS", "0"), ("SEARCH_RADIUS_KM", "wide")]);
        assert_eq!(cfg.poll_interval, DEFAULT_POLL_INTERVAL);
        assert!((cfg.radius_km - DEFAULT_RADIUS_KM).abs() < f64::EPSILON);
    }
}
