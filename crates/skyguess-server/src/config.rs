//! Server configuration.
//!
//! Wraps the SDK's [`FeedConfig`] with the settings only the HTTP boundary
//! needs. Built once from the environment and injected into handlers via
//! [`axum::extract::State`].

use skyguess_sdk::FeedConfig;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Global configuration shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to listen on (default `3000`).
    pub listen_port: u16,
    /// Upstream endpoints, credentials and timings.
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable        | Default | Description      |
    /// |-----------------|---------|------------------|
    /// | `SKYGUESS_PORT` | `3000`  | HTTP listen port |
    ///
    /// Upstream settings are read by [`FeedConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_port = lookup("SKYGUESS_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            listen_port,
            feed: FeedConfig::from_lookup(lookup),
        }
    }
}
