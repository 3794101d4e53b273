//! Resolved flight routes.

use serde::{Deserialize, Serialize};

use crate::airport::AirportInfo;

/// Message carried by a route when every provider came up empty.
pub const ROUTE_NOT_AVAILABLE: &str = "Route data not available from any source";

/// The provider that answered a route query.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
pub enum RouteSource {
    /// Telemetry route registry.
    OpenSky,
    /// Commercial flight-data API.
    AviationStack,
    /// Free-text search fallback.
    Google,
}

/// A complete origin/destination pair produced by one provider.
///
/// Having both airports in one value is what keeps partial routes out of
/// [`FlightRoute`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEndpoints {
    /// Departure airport.
    pub origin: AirportInfo,
    /// Arrival airport.
    pub destination: AirportInfo,
    /// Scheduled block time, when the provider publishes a schedule.
    pub scheduled_duration_minutes: Option<i64>,
}

impl RouteEndpoints {
    /// Pair two airports with no schedule information.
    pub fn new(origin: AirportInfo, destination: AirportInfo) -> Self {
        Self {
            origin,
            destination,
            scheduled_duration_minutes: None,
        }
    }

    /// Attach a scheduled duration.
    pub fn with_duration(mut self, minutes: Option<i64>) -> Self {
        self.scheduled_duration_minutes = minutes;
        self
    }
}

/// Result of resolving a flight's route.
///
/// `origin` and `destination` are either both set (with `source` naming the
/// provider) or both `None` (with `error` explaining why).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRoute {
    /// Departure airport.
    pub origin: Option<AirportInfo>,
    /// Arrival airport.
    pub destination: Option<AirportInfo>,
    /// Callsign the route was resolved for.
    pub callsign: String,
    /// Transponder address of the selected aircraft.
    pub icao24: String,
    /// Provider that produced the route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RouteSource>,
    /// Scheduled duration in minutes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_duration_minutes: Option<i64>,
    /// Explanation when no provider could resolve the route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlightRoute {
    /// A route resolved by `source`.
    pub fn found(
        callsign: &str,
        icao24: &str,
        endpoints: RouteEndpoints,
        source: RouteSource,
    ) -> Self {
        Self {
            origin: Some(endpoints.origin),
            destination: Some(endpoints.destination),
            callsign: callsign.to_string(),
            icao24: icao24.to_string(),
            source: Some(source),
            scheduled_duration_minutes: endpoints.scheduled_duration_minutes,
            error: None,
        }
    }

    /// The terminal "no provider knew this flight" result.
    pub fn not_found(callsign: &str, icao24: &str) -> Self {
        Self {
            origin: None,
            destination: None,
            callsign: callsign.to_string(),
            icao24: icao24.to_string(),
            source: None,
            scheduled_duration_minutes: None,
            error: Some(ROUTE_NOT_AVAILABLE.to_string()),
        }
    }

    /// Both airports, when the route was resolved.
    pub fn endpoints(&self) -> Option<(&AirportInfo, &AirportInfo)> {
        self.origin.as_ref().zip(self.destination.as_ref())
    }

    /// Whether a provider answered.
    pub fn is_resolved(&self) -> bool {
        self.endpoints().is_some()
    }
}
