//! Free-text search fallback.
//!
//! Fetches a search results page for `"<flight> flight route origin
//! destination"` and scans the raw HTML for the first `XXX to YYY`,
//! `XXX → YYY` or `XXX - YYY` pair. Entirely at the mercy of the page
//! layout; it is the last resort in the chain.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use skyguess_models::{FlightNumber, RouteEndpoints, RouteSource};
use tracing::debug;

use super::{endpoints_from_codes, RouteProvider};
use crate::config::FeedConfig;
use crate::error::SdkError;
use crate::http::{self, BROWSER_USER_AGENT};

static AIRPORT_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]{3})\s+(?:to|→|-)\s+([A-Z]{3})").expect("airport pair pattern is valid")
});

/// Search query for a flight number.
fn search_query(flight_number: &FlightNumber) -> String {
    format!("{flight_number} flight route origin destination")
}

/// First airport-code pair on the page, resolved through the airport table.
fn scan_page(html: &str) -> Option<RouteEndpoints> {
    let caps = AIRPORT_PAIR_RE.captures(html)?;
    endpoints_from_codes(&caps[1], &caps[2])
}

/// Route lookup by scraping a search results page.
#[derive(Clone)]
pub struct SearchFallbackProvider {
    http: Client,
    base_url: String,
}

impl SearchFallbackProvider {
    /// Create the provider from the feed configuration.
    pub fn new(http: Client, config: &FeedConfig) -> Self {
        Self {
            http,
            base_url: config.search_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RouteProvider for SearchFallbackProvider {
    fn source(&self) -> RouteSource {
        RouteSource::Google
    }

    async fn attempt(&self, callsign: &str) -> Result<Option<RouteEndpoints>, SdkError> {
        let Ok(flight_number) = FlightNumber::from_callsign(callsign) else {
            debug!(callsign, "callsign has no flight-number form, skipping search");
            return Ok(None);
        };

        let query = search_query(&flight_number);
        let request = self
            .http
            .get(format!("{}/search", self.base_url))
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .query(&[("q", query.as_str())]);
        let html = http::get_text(request).await?;
        Ok(scan_page(&html))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn builds_query_from_flight_number() {
        let fnum = FlightNumber::from_callsign("UAL123").unwrap();
        assert_eq!(search_query(&fnum), "UA123 flight route origin destination");
    }

    #[test]
    fn finds_pair_with_each_separator() {
        for page in [
            "<span>SFO to JFK</span>",
            "<div>SFO → JFK</div>",
            "<b>SFO - JFK</b>",
            "United 123 SFO  to\nJFK departs 8:00",
        ] {
            let ep = scan_page(page).unwrap_or_else(|| panic!("no match in {page}"));
            assert_eq!(ep.origin.code, "SFO");
            assert_eq!(ep.destination.code, "JFK");
        }
    }

    #[test]
    fn first_match_wins() {
        let ep = scan_page("LAX to ORD ... BOS to MIA").unwrap();
        assert_eq!(ep.origin.code, "LAX");
        assert_eq!(ep.destination.code, "ORD");
    }

    #[test]
    fn no_pattern_yields_nothing() {
        assert!(scan_page("<html>no flights here</html>").is_none());
        assert!(scan_page("sfo to jfk").is_none());
        assert!(scan_page("SFO-JFK").is_none());
    }

    async fn provider_for(app: Router) -> SearchFallbackProvider {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        let config = FeedConfig {
            search_base_url: format!("http://{addr}"),
            ..FeedConfig::default()
        };
        SearchFallbackProvider::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn scrapes_with_browser_user_agent() {
        let app = Router::new().route(
            "/search",
            get(|Query(q): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                let ua = headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                let asks_for_dl88 = q.get("q").is_some_and(|s| s.starts_with("DL88 "));
                if ua.starts_with("Mozilla/5.0") && asks_for_dl88 {
                    "<p>Delta 88 ATL to CDG</p>".to_string()
                } else {
                    "<p>nothing</p>".to_string()
                }
            }),
        );
        let provider = provider_for(app).await;
        let ep = provider.attempt("DAL88").await.unwrap().unwrap();
        assert_eq!(ep.origin.city, "Atlanta");
        assert_eq!(ep.destination.country, "France");
    }

    #[tokio::test]
    async fn unnormalizable_callsign_sends_no_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/search",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { "<p>SFO to JFK</p>" }
            }),
        );
        let provider = provider_for(app).await;
        assert!(provider.attempt("N12345").await.unwrap().is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
