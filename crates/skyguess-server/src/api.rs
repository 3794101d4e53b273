//! HTTP routes and shared handler state.
//!
//! | Route                    | Purpose                                          |
//! |--------------------------|--------------------------------------------------|
//! | `GET /api/aircraft`      | forward a bounding-box query to the live feed    |
//! | `GET /api/flight-route`  | resolve a flight's route through the provider chain |
//! | `GET /api/clues`         | phase, prompt and route clues for one round      |
//! | `PUT /api/center`        | (re)start the poller around a point              |
//! | `DELETE /api/center`     | stop the poller                                  |
//! | `GET /api/tracked`       | the set most recently published by the poller    |

use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skyguess_models::{AircraftSnapshot, BoundingBox, FlightRoute, GameRound, GeoPoint};
use skyguess_sdk::{
    AircraftPoller, FeedConfig, OpenSkyStatesClient, PollerHandle, RouteResolver, SdkError,
    StateSource,
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::ApiError;

const MISSING_BBOX: &str = "Missing bounding box parameters";
const MISSING_IDS: &str = "Missing callsign or icao24 parameter";

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Live-state provider used by the aircraft query.
    states: Arc<dyn StateSource>,
    /// Provider chain for route lookups.
    resolver: Arc<RouteResolver>,
    /// Factory for the tracking poller.
    poller: AircraftPoller,
    /// The single server-owned poller, if a center is set.
    tracking: Mutex<Option<PollerHandle>>,
}

impl AppState {
    /// Assemble state from explicit parts.
    pub fn new(states: Arc<dyn StateSource>, resolver: RouteResolver, feed: &FeedConfig) -> Self {
        Self {
            poller: AircraftPoller::new(Arc::clone(&states), feed),
            states,
            resolver: Arc::new(resolver),
            tracking: Mutex::new(None),
        }
    }

    /// Production state: real live-state client and provider chain.
    pub fn from_config(config: &AppConfig) -> Result<Self, SdkError> {
        let states = Arc::new(OpenSkyStatesClient::from_config(&config.feed)?);
        let resolver = RouteResolver::from_config(&config.feed)?;
        Ok(Self::new(states, resolver, &config.feed))
    }

    /// Stop the poller, if any.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.tracking.lock().await.take() {
            handle.stop().await;
        }
    }
}

/// Build the router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/aircraft", get(get_aircraft))
        .route("/api/flight-route", get(get_flight_route))
        .route("/api/clues", get(get_clues))
        .route("/api/center", axum::routing::put(put_center).delete(delete_center))
        .route("/api/tracked", get(get_tracked))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response DTOs
// ---------------------------------------------------------------------------

/// Query of `GET /api/aircraft`. Values stay strings so that an unparsable
/// coordinate is reported like a missing one.
#[derive(Deserialize)]
struct AircraftQuery {
    lamin: Option<String>,
    lomin: Option<String>,
    lamax: Option<String>,
    lomax: Option<String>,
    /// `commercial` adds decoded, filtered snapshots to the response.
    filter: Option<String>,
}

impl AircraftQuery {
    fn bounding_box(&self) -> Option<BoundingBox> {
        let coord = |v: &Option<String>| v.as_deref()?.trim().parse::<f64>().ok();
        Some(BoundingBox {
            lat_min: coord(&self.lamin)?,
            lat_max: coord(&self.lamax)?,
            lon_min: coord(&self.lomin)?,
            lon_max: coord(&self.lomax)?,
        })
    }

    fn wants_commercial(&self) -> bool {
        self.filter.as_deref() == Some("commercial")
    }
}

/// Response of `GET /api/aircraft`: the provider's payload, passed through.
#[derive(Serialize)]
struct AircraftResponse {
    time: i64,
    states: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aircraft: Option<Vec<AircraftSnapshot>>,
}

/// Query of `GET /api/flight-route`.
#[derive(Deserialize)]
struct RouteQuery {
    callsign: Option<String>,
    icao24: Option<String>,
}

/// Query of `GET /api/clues`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CluesQuery {
    callsign: Option<String>,
    icao24: Option<String>,
    vertical_rate: Option<f64>,
}

/// Body of `PUT /api/center`.
#[derive(Deserialize)]
struct CenterRequest {
    lat: f64,
    lon: f64,
}

/// Response of `PUT /api/center`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CenterResponse {
    center: GeoPoint,
    bounding_box: BoundingBox,
}

/// Response of `GET /api/tracked`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackedResponse {
    center: GeoPoint,
    bounding_box: BoundingBox,
    provider_time: Option<i64>,
    aircraft: Vec<AircraftSnapshot>,
}

/// Trimmed, non-empty callsign and icao24, or a 400.
fn required_ids(
    callsign: Option<&str>,
    icao24: Option<&str>,
) -> Result<(String, String), ApiError> {
    let present = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
    match (present(callsign), present(icao24)) {
        (Some(callsign), Some(icao24)) => Ok((callsign, icao24)),
        _ => Err(ApiError::MissingParameter(MISSING_IDS)),
    }
}

/// Run the resolver on its own task; a panicking provider becomes a 500.
async fn lookup_route(
    state: &AppState,
    callsign: String,
    icao24: String,
) -> Result<FlightRoute, ApiError> {
    let resolver = Arc::clone(&state.resolver);
    let (cs, addr) = (callsign.clone(), icao24.clone());
    tokio::spawn(async move { resolver.resolve(&cs, &addr).await })
        .await
        .map_err(|e| {
            error!(callsign = %callsign, error = %e, "route lookup task failed");
            ApiError::RouteLookup { callsign, icao24 }
        })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /api/aircraft` — forward a bounding-box query to the live-state
/// provider.
///
/// A provider error status is passed on; a transport failure answers 200
/// with `states: null` so the map simply shows nothing this cycle.
async fn get_aircraft(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AircraftQuery>,
) -> Result<Json<AircraftResponse>, ApiError> {
    let bbox = query
        .bounding_box()
        .ok_or(ApiError::MissingParameter(MISSING_BBOX))?;

    match state.states.fetch_states(&bbox).await {
        Ok(resp) => {
            let aircraft = query.wants_commercial().then(|| resp.relevant_snapshots());
            Ok(Json(AircraftResponse {
                time: resp.time,
                states: resp.states,
                aircraft,
            }))
        }
        Err(SdkError::Status { status, .. }) => Err(ApiError::Upstream { status }),
        Err(e) => {
            warn!(error = %e, "live-state fetch failed");
            Ok(Json(AircraftResponse {
                time: Utc::now().timestamp(),
                states: None,
                aircraft: None,
            }))
        }
    }
}

/// `GET /api/flight-route` — resolve origin and destination for a flight.
async fn get_flight_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<FlightRoute>, ApiError> {
    let (callsign, icao24) = required_ids(query.callsign.as_deref(), query.icao24.as_deref())?;
    Ok(Json(lookup_route(&state, callsign, icao24).await?))
}

/// `GET /api/clues` — everything the game shows for one aircraft.
async fn get_clues(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CluesQuery>,
) -> Result<Json<GameRound>, ApiError> {
    let (callsign, icao24) = required_ids(query.callsign.as_deref(), query.icao24.as_deref())?;
    let route = lookup_route(&state, callsign, icao24).await?;
    Ok(Json(GameRound::new(query.vertical_rate, Some(route))))
}

/// `PUT /api/center` — start polling around a new point, replacing any
/// running poller.
async fn put_center(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CenterRequest>,
) -> Result<Json<CenterResponse>, ApiError> {
    if !(-90.0..=90.0).contains(&req.lat) || !(-180.0..=180.0).contains(&req.lon) {
        return Err(ApiError::InvalidParameter(format!(
            "center out of range: {}, {}",
            req.lat, req.lon
        )));
    }

    let mut tracking = state.tracking.lock().await;
    if let Some(previous) = tracking.take() {
        previous.stop().await;
    }

    let handle = state.poller.start(GeoPoint::new(req.lat, req.lon));
    let resp = CenterResponse {
        center: handle.center(),
        bounding_box: handle.bounding_box(),
    };
    *tracking = Some(handle);

    info!(lat = req.lat, lon = req.lon, "tracking center set");
    Ok(Json(resp))
}

/// `DELETE /api/center` — stop polling.
async fn delete_center(State(state): State<Arc<AppState>>) -> StatusCode {
    state.shutdown().await;
    info!("tracking center cleared");
    StatusCode::NO_CONTENT
}

/// `GET /api/tracked` — the poller's current set.
async fn get_tracked(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrackedResponse>, ApiError> {
    let tracking = state.tracking.lock().await;
    let handle = tracking.as_ref().ok_or(ApiError::NotTracking)?;
    let set = handle.current();

    Ok(Json(TrackedResponse {
        center: handle.center(),
        bounding_box: handle.bounding_box(),
        provider_time: set.provider_time,
        aircraft: set.aircraft.clone(),
    }))
}
