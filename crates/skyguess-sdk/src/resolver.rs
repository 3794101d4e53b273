//! Ordered route resolution.
//!
//! [`RouteResolver`] walks its providers strictly in order and stops at the
//! first one that returns a complete route. Provider failures are logged and
//! skipped; they never abort the chain.

use skyguess_models::FlightRoute;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::error::SdkError;
use crate::http;
use crate::providers::{
    FlightDataProvider, RouteProvider, RouteRegistryProvider, SearchFallbackProvider,
};

/// Fallback chain of route providers.
pub struct RouteResolver {
    providers: Vec<Box<dyn RouteProvider>>,
}

impl RouteResolver {
    /// Build a resolver over an explicit provider list, tried in order.
    pub fn new(providers: Vec<Box<dyn RouteProvider>>) -> Self {
        Self { providers }
    }

    /// The production chain: route registry, then flight-data API, then
    /// search fallback.
    pub fn from_config(config: &FeedConfig) -> Result<Self, SdkError> {
        let client = http::build_client(config.fetch_timeout)?;
        Ok(Self::new(vec![
            Box::new(RouteRegistryProvider::new(client.clone(), config)),
            Box::new(FlightDataProvider::new(client.clone(), config)),
            Box::new(SearchFallbackProvider::new(client, config)),
        ]))
    }

    /// Resolve the route for `callsign`.
    ///
    /// Always returns a [`FlightRoute`]: either resolved, with `source` set
    /// to the answering provider, or [`FlightRoute::not_found`].
    pub async fn resolve(&self, callsign: &str, icao24: &str) -> FlightRoute {
        let callsign = callsign.trim();
        info!(callsign, icao24, "looking up route");

        for provider in &self.providers {
            let source = provider.source();
            match provider.attempt(callsign).await {
                Ok(Some(endpoints)) => {
                    info!(
                        callsign,
                        provider = %source,
                        origin = %endpoints.origin.code,
                        destination = %endpoints.destination.code,
                        "route found"
                    );
                    return FlightRoute::found(callsign, icao24, endpoints, source);
                }
                Ok(None) => debug!(callsign, provider = %source, "provider had no route"),
                Err(e) => warn!(callsign, provider = %source, error = %e, "provider failed"),
            }
        }

        info!(callsign, "no route data found");
        FlightRoute::not_found(callsign, icao24)
    }
}
