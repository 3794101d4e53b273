//! Commercial flight-data API (`GET {base}/flights?access_key=..&flight_iata=..`).
//!
//! Airports are built straight from the departure/arrival blocks of the
//! first matching flight. City and country come from the IANA timezone
//! name (`"America/Los_Angeles"` → country `"America"`, city
//! `"Los_Angeles"`), which is a region rather than a country: good enough
//! for a hint, not a geocode.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use skyguess_models::{
    AirportInfo, FlightNumber, RouteEndpoints, RouteSource, UNKNOWN_CODE, UNKNOWN_PLACE,
};
use tracing::debug;

use super::RouteProvider;
use crate::config::FeedConfig;
use crate::error::SdkError;
use crate::http;

#[derive(Debug, Default, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Option<Vec<FlightRecord>>,
}

#[derive(Debug, Deserialize)]
struct FlightRecord {
    #[serde(default)]
    departure: Option<AirportBlock>,
    #[serde(default)]
    arrival: Option<AirportBlock>,
}

#[derive(Debug, Deserialize)]
struct AirportBlock {
    #[serde(default)]
    airport: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    iata: Option<String>,
    #[serde(default)]
    icao: Option<String>,
    #[serde(default)]
    scheduled: Option<String>,
}

impl AirportBlock {
    fn to_airport_info(&self) -> AirportInfo {
        let non_empty =
            |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
        let mut zone = self.timezone.as_deref().unwrap_or_default().split('/');
        let region = zone.next().filter(|s| !s.is_empty());
        let city = zone.next().filter(|s| !s.is_empty());

        AirportInfo {
            code: non_empty(&self.iata)
                .or_else(|| non_empty(&self.icao))
                .unwrap_or_else(|| UNKNOWN_CODE.to_string()),
            name: non_empty(&self.airport).unwrap_or_else(|| "Unknown Airport".to_string()),
            city: city.unwrap_or(UNKNOWN_PLACE).to_string(),
            country: region.unwrap_or(UNKNOWN_PLACE).to_string(),
        }
    }
}

/// Scheduled block time in minutes, when both timestamps parse and the
/// arrival is after the departure.
fn scheduled_minutes(departure: &AirportBlock, arrival: &AirportBlock) -> Option<i64> {
    let dep = DateTime::parse_from_rfc3339(departure.scheduled.as_deref()?).ok()?;
    let arr = DateTime::parse_from_rfc3339(arrival.scheduled.as_deref()?).ok()?;
    let minutes = (arr - dep).num_minutes();
    (minutes > 0).then_some(minutes)
}

fn parse_flights(body: &FlightsResponse) -> Option<RouteEndpoints> {
    let flight = body.data.as_ref()?.first()?;
    let departure = flight.departure.as_ref()?;
    let arrival = flight.arrival.as_ref()?;

    Some(
        RouteEndpoints::new(departure.to_airport_info(), arrival.to_airport_info())
            .with_duration(scheduled_minutes(departure, arrival)),
    )
}

/// Route lookup by commercial flight number. Skipped without an access key.
#[derive(Clone)]
pub struct FlightDataProvider {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FlightDataProvider {
    /// Create the provider from the feed configuration.
    pub fn new(http: Client, config: &FeedConfig) -> Self {
        Self {
            http,
            base_url: config.aviationstack_base_url.trim_end_matches('/').to_string(),
            api_key: config.aviationstack_api_key.clone(),
        }
    }
}

#[async_trait]
impl RouteProvider for FlightDataProvider {
    fn source(&self) -> RouteSource {
        RouteSource::AviationStack
    }

    async fn attempt(&self, callsign: &str) -> Result<Option<RouteEndpoints>, SdkError> {
        let Some(api_key) = &self.api_key else {
            debug!("flight-data API key not configured, skipping");
            return Ok(None);
        };
        let Ok(flight_number) = FlightNumber::from_callsign(callsign) else {
            debug!(callsign, "callsign has no flight-number form, skipping");
            return Ok(None);
        };

        let request = self.http.get(format!("{}/flights", self.base_url)).query(&[
            ("access_key", api_key.as_str()),
            ("flight_iata", flight_number.as_str()),
        ]);
        let body: FlightsResponse = http::get_json(request).await?;
        Ok(parse_flights(&body))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    use super::*;

    fn parse(value: Value) -> Option<RouteEndpoints> {
        let body: FlightsResponse = serde_json::from_value(value).unwrap();
        parse_flights(&body)
    }

    fn sample_flight() -> Value {
        json!({
            "data": [{
                "flight_date": "2026-10-18",
                "departure": {
                    "airport": "San Francisco International",
                    "timezone": "America/Los_Angeles",
                    "iata": "SFO",
                    "icao": "KSFO",
                    "scheduled": "2026-10-18T16:35:00+00:00"
                },
                "arrival": {
                    "airport": "Heathrow",
                    "timezone": "Europe/London",
                    "iata": null,
                    "icao": "EGLL",
                    "scheduled": "2026-10-19T10:55:00+00:00"
                }
            }]
        })
    }

    #[test]
    fn builds_airports_from_blocks() {
        let ep = parse(sample_flight()).unwrap();
        assert_eq!(
            ep.origin,
            AirportInfo {
                code: "SFO".into(),
                name: "San Francisco International".into(),
                city: "Los_Angeles".into(),
                country: "America".into(),
            }
        );
        assert_eq!(ep.destination.code, "EGLL");
        assert_eq!(ep.destination.city, "London");
        assert_eq!(ep.destination.country, "Europe");
    }

    #[test]
    fn computes_scheduled_duration() {
        let ep = parse(sample_flight()).unwrap();
        assert_eq!(ep.scheduled_duration_minutes, Some(18 * 60 + 20));
    }

    #[test]
    fn missing_fields_fall_back_to_unknown() {
        let ep =
            parse(json!({"data": [{"departure": {}, "arrival": {"timezone": "UTC"}}]})).unwrap();
        assert_eq!(ep.origin.code, "Unknown");
        assert_eq!(ep.origin.name, "Unknown Airport");
        assert_eq!(ep.origin.city, "Unknown");
        assert_eq!(ep.destination.country, "UTC");
        assert_eq!(ep.destination.city, "Unknown");
        assert!(ep.scheduled_duration_minutes.is_none());
    }

    #[test]
    fn missing_side_or_data_yields_nothing() {
        assert!(parse(json!({"data": [{"departure": {"iata": "SFO"}}]})).is_none());
        assert!(parse(json!({"data": []})).is_none());
        assert!(parse(json!({"error": {"code": "invalid_access_key"}})).is_none());
    }

    #[tokio::test]
    async fn skipped_without_api_key() {
        let provider = FlightDataProvider::new(Client::new(), &FeedConfig::default());
        assert!(provider.attempt("UAL123").await.unwrap().is_none());
    }

    async fn provider_for(app: Router) -> FlightDataProvider {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        let config = FeedConfig {
            aviationstack_base_url: format!("http://{addr}/v1"),
            aviationstack_api_key: Some("test-key".into()),
            ..FeedConfig::default()
        };
        FlightDataProvider::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn queries_by_normalized_flight_number() {
        let app = Router::new().route(
            "/v1/flights",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("flight_iata").map(String::as_str) == Some("UA901")
                    && q.get("access_key").map(String::as_str) == Some("test-key")
                {
                    Json(sample_flight())
                } else {
                    Json(json!({"data": []}))
                }
            }),
        );
        let provider = provider_for(app).await;
        let ep = provider.attempt("UAL901").await.unwrap().unwrap();
        assert_eq!(ep.origin.code, "SFO");
    }

    #[tokio::test]
    async fn unnormalizable_callsign_is_skipped() {
        let app = Router::new().route(
            "/v1/flights",
            get(|| async { Json(sample_flight()) }),
        );
        let provider = provider_for(app).await;
        assert!(provider.attempt("N12345").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transport_error_does_not_carry_access_key() {
        // Reserve a port, then free it so the connection is refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = FeedConfig {
            aviationstack_base_url: format!("http://{addr}/v1"),
            aviationstack_api_key: Some("SECRETKEY123".into()),
            ..FeedConfig::default()
        };
        let provider = FlightDataProvider::new(Client::new(), &config);
        let err = provider.attempt("UAL901").await.unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
        assert!(!format!("{err:?}").contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn status_error_does_not_carry_access_key() {
        let app = Router::new().route(
            "/v1/flights",
            get(|| async { axum::http::StatusCode::UNAUTHORIZED }),
        );
        let provider = provider_for(app).await;
        let err = provider.attempt("UAL901").await.unwrap_err();
        assert!(matches!(err, SdkError::Status { status: 401, .. }));
        assert!(!err.to_string().contains("test-key"));
    }
}
