//! Error types for the skyguess HTTP boundary.
//!
//! [`ApiError`] covers every failure a handler can report and implements
//! [`axum::response::IntoResponse`] so handlers can return
//! `Result<…, ApiError>` directly.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required query or body parameter was absent or empty.
    #[error("{0}")]
    MissingParameter(&'static str),

    /// A parameter was present but unusable.
    #[error("{0}")]
    InvalidParameter(String),

    /// The live-state provider answered with a non-success status.
    #[error("OpenSky API returned {status}")]
    Upstream {
        /// Status code returned by the provider.
        status: u16,
    },

    /// No poller center has been set.
    #[error("no center point set")]
    NotTracking,

    /// The route lookup task ended abnormally.
    #[error("Failed to fetch flight route")]
    RouteLookup {
        /// Callsign being resolved.
        callsign: String,
        /// Transponder address being resolved.
        icao24: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match &self {
            Self::MissingParameter(_) | Self::InvalidParameter(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Self::Upstream { status } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": message, "states": null }),
            ),
            Self::NotTracking => (StatusCode::NOT_FOUND, json!({ "error": message })),
            Self::RouteLookup { callsign, icao24 } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "callsign": callsign, "icao24": icao24 }),
            ),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::debug!(%status, error = %message, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}
