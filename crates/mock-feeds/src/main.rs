use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

// Point the server or CLI here with:
//   OPENSKY_BASE_URL=http://localhost:4000/api
//   AVIATIONSTACK_BASE_URL=http://localhost:4000/v1 AVIATIONSTACK_API_KEY=mock
//   SEARCH_BASE_URL=http://localhost:4000

/// Traffic around San Francisco:
/// (icao24, callsign, country, lon, lat, altitude, on_ground, velocity, vertical rate)
const AIRCRAFT: &[(&str, &str, &str, f64, f64, f64, bool, f64, f64)] = &[
    ("a1b2c3", "UAL901  ", "United States", -122.31, 37.58, 2400.0, false, 140.0, -6.5),
    ("a4d5e6", "SWA456  ", "United States", -122.25, 37.71, 1800.0, false, 120.0, 9.8),
    ("400abc", "BAW286  ", "United Kingdom", -122.55, 37.90, 10600.0, false, 240.0, 0.0),
    ("3c6444", "DLH455  ", "Germany", -122.10, 37.45, 3300.0, false, 160.0, -4.2),
    ("a0f1b2", "N123AB  ", "United States", -122.45, 37.66, 900.0, false, 60.0, 1.0),
    ("ab12cd", "DAL88   ", "United States", -122.38, 37.62, 0.0, true, 5.0, 0.0),
];

/// (radio callsign, flight number, origin, destination, block minutes, in registry)
const FLIGHTS: &[(&str, &str, &str, &str, i64, bool)] = &[
    ("UAL901", "UA901", "SFO", "LHR", 625, true),
    ("SWA456", "WN456", "SFO", "LAS", 95, false),
    ("BAW286", "BA286", "SFO", "LHR", 610, true),
    ("DLH455", "LH455", "FRA", "SFO", 705, false),
];

#[tokio::main]
async fn main() {
    let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await.unwrap();
    println!("MOCK-FEEDS: Listening on http://localhost:4000");
    axum::serve(listener, app()).await.unwrap();
}

fn app() -> Router {
    Router::new()
        .route("/api/states/all", get(states_all))
        .route("/api/routes", get(routes))
        .route("/v1/flights", get(flights))
        .route("/search", get(search))
}

// --- Endpoints ---

#[derive(Deserialize)]
struct BoxParams {
    lamin: Option<f64>,
    lomin: Option<f64>,
    lamax: Option<f64>,
    lomax: Option<f64>,
}

async fn states_all(Query(params): Query<BoxParams>) -> Json<Value> {
    println!(
        "MOCK-FEEDS: States request lamin={:?} lomin={:?} lamax={:?} lomax={:?}",
        params.lamin, params.lomin, params.lamax, params.lomax
    );

    let inside = |lat: f64, lon: f64| {
        params.lamin.map_or(true, |v| lat >= v)
            && params.lamax.map_or(true, |v| lat <= v)
            && params.lomin.map_or(true, |v| lon >= v)
            && params.lomax.map_or(true, |v| lon <= v)
    };

    let now = Utc::now().timestamp();
    let states: Vec<Value> = AIRCRAFT
        .iter()
        .filter(|a| inside(a.4, a.3))
        .map(|&(icao24, callsign, country, lon, lat, alt, on_ground, velocity, rate)| {
            json!([icao24, callsign, country, now - 1, now, lon, lat, alt, on_ground,
                   velocity, 90.0, rate, null, alt + 30.0, "1200", false, 0])
        })
        .collect();

    Json(json!({ "time": now, "states": states }))
}

#[derive(Deserialize)]
struct RouteParams {
    callsign: Option<String>,
}

async fn routes(Query(params): Query<RouteParams>) -> impl IntoResponse {
    let callsign = params.callsign.unwrap_or_default();
    println!("MOCK-FEEDS: Route request callsign='{callsign}'");

    match FLIGHTS
        .iter()
        .find(|f| f.5 && f.0 == callsign.trim())
    {
        Some(f) => (
            StatusCode::OK,
            Json(json!({ "callsign": f.0, "route": [format!("{}-{}", f.2, f.3)] })),
        ),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
    }
}

#[derive(Deserialize)]
struct FlightParams {
    access_key: Option<String>,
    flight_iata: Option<String>,
}

async fn flights(Query(params): Query<FlightParams>) -> Json<Value> {
    println!("MOCK-FEEDS: Flights request flight_iata={:?}", params.flight_iata);

    if params.access_key.as_deref().unwrap_or_default().is_empty() {
        return Json(json!({ "error": { "code": "missing_access_key" } }));
    }

    let Some(f) = FLIGHTS
        .iter()
        .find(|f| Some(f.1) == params.flight_iata.as_deref())
    else {
        return Json(json!({ "data": [] }));
    };

    let departure = Utc::now();
    let arrival = departure + Duration::minutes(f.4);
    Json(json!({
        "data": [{
            "flight": { "iata": f.1 },
            "departure": {
                "airport": format!("{} Airport", f.2),
                "timezone": timezone(f.2),
                "iata": f.2,
                "scheduled": departure.to_rfc3339(),
            },
            "arrival": {
                "airport": format!("{} Airport", f.3),
                "timezone": timezone(f.3),
                "iata": f.3,
                "scheduled": arrival.to_rfc3339(),
            }
        }]
    }))
}

fn timezone(code: &str) -> &'static str {
    match code {
        "LHR" => "Europe/London",
        "FRA" => "Europe/Berlin",
        _ => "America/Los_Angeles",
    }
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(Query(params): Query<SearchParams>) -> Html<String> {
    let q = params.q.unwrap_or_default();
    println!("MOCK-FEEDS: Search request q='{q}'");

    let hit = q
        .split_whitespace()
        .next()
        .and_then(|number| FLIGHTS.iter().find(|f| f.1 == number));
    Html(match hit {
        Some(f) => format!(
            "<html><body><div>{} &middot; {} to {}</div></body></html>",
            f.1, f.2, f.3
        ),
        None => "<html><body>No results</body></html>".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;

    fn server() -> TestServer {
        TestServer::new(app()).unwrap()
    }

    #[tokio::test]
    async fn states_are_clipped_to_box() {
        let body: Value = server()
            .get("/api/states/all")
            .add_query_param("lamin", 37.5)
            .add_query_param("lomin", -122.35)
            .add_query_param("lamax", 37.8)
            .add_query_param("lomax", -122.2)
            .await
            .json();
        let states = body["states"].as_array().unwrap();
        let ids: Vec<&str> = states.iter().map(|s| s[0].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a1b2c3", "a4d5e6"]);
        assert_eq!(states[0].as_array().unwrap().len(), 17);
    }

    #[tokio::test]
    async fn registry_only_knows_some_flights() {
        let s = server();
        let body: Value = s.get("/api/routes").add_query_param("callsign", "UAL901").await.json();
        assert_eq!(body["route"], json!(["SFO-LHR"]));

        s.get("/api/routes")
            .add_query_param("callsign", "SWA456")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn flights_need_access_key() {
        let s = server();
        let body: Value = s.get("/v1/flights").add_query_param("flight_iata", "WN456").await.json();
        assert!(body.get("data").is_none());

        let body: Value = s
            .get("/v1/flights")
            .add_query_param("access_key", "mock")
            .add_query_param("flight_iata", "WN456")
            .await
            .json();
        assert_eq!(body["data"][0]["arrival"]["iata"], "LAS");
    }

    #[tokio::test]
    async fn search_page_mentions_airport_pair() {
        let html = server()
            .get("/search")
            .add_query_param("q", "LH455 flight route origin destination")
            .await
            .text();
        assert!(html.contains("FRA to SFO"));
    }
}
