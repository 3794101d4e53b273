//! Shared HTTP plumbing for upstream requests.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::SdkError;

/// Desktop browser User-Agent. Search pages serve a stripped layout (or
/// refuse) to clients that do not send one.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Build the client shared by every provider.
///
/// `timeout` bounds the whole request, body included.
pub fn build_client(timeout: Duration) -> Result<Client, SdkError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("skyguess/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SdkError::Config(format!("failed to create HTTP client: {e}")))
}

/// Send `request` and fail on any non-success status.
///
/// Transport errors lose their URL: query strings may carry access keys.
async fn send_checked(request: RequestBuilder) -> Result<reqwest::Response, SdkError> {
    let res = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = res.status();
    trace!(%status, url = %res.url(), "upstream response");

    if !status.is_success() {
        let mut url = res.url().clone();
        // never log access keys
        url.set_query(None);
        return Err(SdkError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(res)
}

/// Send `request` and decode a JSON body.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, SdkError> {
    let res = send_checked(request).await?;
    let bytes = res.bytes().await.map_err(reqwest::Error::without_url)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Send `request` and return the body as text.
pub async fn get_text(request: RequestBuilder) -> Result<String, SdkError> {
    let res = send_checked(request).await?;
    Ok(res.text().await.map_err(reqwest::Error::without_url)?)
}
