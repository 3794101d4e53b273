//! Live aircraft states.
//!
//! [`StateSource`] is the seam between the poller and the network: the
//! production implementation is [`OpenSkyStatesClient`], tests plug in an
//! in-memory source.

use async_trait::async_trait;
use reqwest::Client;
use skyguess_models::{BoundingBox, StatesResponse};
use tracing::{debug, info};

use crate::config::{BasicCredentials, FeedConfig};
use crate::error::SdkError;
use crate::http;

/// Anything that can answer a bounding-box query with raw state vectors.
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Fetch the current states inside `bbox`.
    async fn fetch_states(&self, bbox: &BoundingBox) -> Result<StatesResponse, SdkError>;
}

/// Client for the live-state provider's `/states/all` endpoint.
#[derive(Clone)]
pub struct OpenSkyStatesClient {
    http: Client,
    base_url: String,
    credentials: Option<BasicCredentials>,
}

impl OpenSkyStatesClient {
    /// Create a client from the feed configuration.
    ///
    /// The fetch timeout from `config` bounds every request.
    pub fn from_config(config: &FeedConfig) -> Result<Self, SdkError> {
        let http = http::build_client(config.fetch_timeout)?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client that reuses an existing HTTP client.
    pub fn with_client(http: Client, config: &FeedConfig) -> Self {
        if config.opensky_credentials.is_some() {
            info!("using authenticated live-state access");
        } else {
            info!("using anonymous live-state access (rate limited)");
        }
        Self {
            http,
            base_url: config.opensky_base_url.trim_end_matches('/').to_string(),
            credentials: config.opensky_credentials.clone(),
        }
    }

    fn states_url(&self) -> String {
        format!("{}/states/all", self.base_url)
    }
}

#[async_trait]
impl StateSource for OpenSkyStatesClient {
    async fn fetch_states(&self, bbox: &BoundingBox) -> Result<StatesResponse, SdkError> {
        let mut request = self.http.get(self.states_url()).query(&bbox.query_pairs());
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response: StatesResponse = http::get_json(request).await?;
        debug!(
            time = response.time,
            states = response.states.as_ref().map_or(0, Vec::len),
            "live states received"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use skyguess_models::calculate_bounding_box;

    use super::*;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn config_for(addr: SocketAddr) -> FeedConfig {
        FeedConfig {
            opensky_base_url: format!("http://{addr}/api"),
            ..FeedConfig::default()
        }
    }

    async fn echo_states(
        Query(params): Query<std::collections::HashMap<String, f64>>,
        headers: HeaderMap,
    ) -> Json<Value> {
        let authed = headers.contains_key("authorization");
        let callsign = if authed { "UAL1" } else { "DAL2" };
        Json(json!({
            "time": 1_700_000_000,
            "states": [[
                "abc123", callsign, "United States", null, null,
                params["lomin"], params["lamin"], 9000.0, false, 220.0, 90.0, 0.5
            ]]
        }))
    }

    #[tokio::test]
    async fn fetches_and_decodes_states() {
        let addr = serve(Router::new().route("/api/states/all", get(echo_states))).await;
        let client = OpenSkyStatesClient::from_config(&config_for(addr)).unwrap();
        let bbox = calculate_bounding_box(37.0, -122.0, 50.0);

        let resp = client.fetch_states(&bbox).await.unwrap();
        let snaps = resp.snapshots();
        assert_eq!(resp.time, 1_700_000_000);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].callsign.as_deref(), Some("DAL2"));
        assert!((snaps[0].latitude.unwrap() - bbox.lat_min).abs() < 1e-9);
        assert!((snaps[0].longitude.unwrap() - bbox.lon_min).abs() < 1e-9);
    }

    #[tokio::test]
    async fn sends_basic_auth_when_configured() {
        let addr = serve(Router::new().route("/api/states/all", get(echo_states))).await;
        let config = FeedConfig {
            opensky_credentials: Some(BasicCredentials {
                username: "alice".into(),
                password: "s3cret".into(),
            }),
            ..config_for(addr)
        };
        let client = OpenSkyStatesClient::from_config(&config).unwrap();

        let resp = client
            .fetch_states(&calculate_bounding_box(37.0, -122.0, 50.0))
            .await
            .unwrap();
        assert_eq!(resp.snapshots()[0].callsign.as_deref(), Some("UAL1"));
    }

    #[tokio::test]
    async fn null_states_are_not_an_error() {
        let app = Router::new().route(
            "/api/states/all",
            get(|| async { Json(json!({"time": 5, "states": null})) }),
        );
        let addr = serve(app).await;
        let client = OpenSkyStatesClient::from_config(&config_for(addr)).unwrap();

        let resp = client
            .fetch_states(&calculate_bounding_box(0.0, 0.0, 10.0))
            .await
            .unwrap();
        assert!(resp.states.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let app = Router::new().route(
            "/api/states/all",
            get(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let addr = serve(app).await;
        let client = OpenSkyStatesClient::from_config(&config_for(addr)).unwrap();

        let err = client
            .fetch_states(&calculate_bounding_box(0.0, 0.0, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Status { status: 429, .. }));
    }
}
