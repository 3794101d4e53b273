//! Route providers.
//!
//! Each provider answers one question — "where is this callsign flying
//! from and to?" — from one external source. A provider returns:
//!
//! * `Ok(Some(endpoints))` when it found a complete route,
//! * `Ok(None)` when it has nothing (unknown flight, unusable payload,
//!   missing credential),
//! * `Err(_)` on transport or decoding failure.
//!
//! The [`RouteResolver`](crate::RouteResolver) treats the last two alike.
//!
//! | Provider | Source | Needs |
//! |----------|--------|-------|
//! | [`RouteRegistryProvider`] | telemetry route registry | raw callsign |
//! | [`FlightDataProvider`] | commercial flight-data API | access key, flight number |
//! | [`SearchFallbackProvider`] | web search results page | flight number |

mod flight_data;
mod registry;
mod search;

use async_trait::async_trait;
use skyguess_models::{RouteEndpoints, RouteSource};

use crate::error::SdkError;

pub use flight_data::FlightDataProvider;
pub use registry::RouteRegistryProvider;
pub use search::SearchFallbackProvider;

/// One step of the route fallback chain.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Which source this provider represents.
    fn source(&self) -> RouteSource;

    /// Try to resolve `callsign` to an origin/destination pair.
    async fn attempt(&self, callsign: &str) -> Result<Option<RouteEndpoints>, SdkError>;
}

/// Resolve both codes through the airport table, or neither.
fn endpoints_from_codes(origin: &str, destination: &str) -> Option<RouteEndpoints> {
    let origin = skyguess_models::lookup_airport(origin)?;
    let destination = skyguess_models::lookup_airport(destination)?;
    Some(RouteEndpoints::new(origin, destination))
}
