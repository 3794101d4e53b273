//! Telemetry route registry (`GET {base}/routes?callsign=...`).
//!
//! The registry answers with a list of `"ORIGIN-DEST"` strings; only the
//! first one is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use skyguess_models::{RouteEndpoints, RouteSource};

use super::{endpoints_from_codes, RouteProvider};
use crate::config::FeedConfig;
use crate::error::SdkError;
use crate::http;

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    #[serde(default)]
    route: Option<Vec<String>>,
}

/// First route string of a registry payload, split into two airports.
fn parse_registry_route(body: &RegistryResponse) -> Option<RouteEndpoints> {
    let first = body.route.as_ref()?.first()?;
    let (origin, destination) = first.split_once('-')?;
    // multi-leg routes ("A-B-C") keep only the first leg's end
    let destination = destination.split('-').next().unwrap_or(destination);
    endpoints_from_codes(origin, destination)
}

/// Route lookup by raw callsign against the telemetry registry.
#[derive(Clone)]
pub struct RouteRegistryProvider {
    http: Client,
    base_url: String,
}

impl RouteRegistryProvider {
    /// Create the provider from the feed configuration.
    pub fn new(http: Client, config: &FeedConfig) -> Self {
        Self {
            http,
            base_url: config.opensky_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RouteProvider for RouteRegistryProvider {
    fn source(&self) -> RouteSource {
        RouteSource::OpenSky
    }

    async fn attempt(&self, callsign: &str) -> Result<Option<RouteEndpoints>, SdkError> {
        let request = self
            .http
            .get(format!("{}/routes", self.base_url))
            .query(&[("callsign", callsign)]);
        let body: RegistryResponse = http::get_json(request).await?;
        Ok(parse_registry_route(&body))
    }
}
