//! Shared HTTP helpers for the relay clients.

use std::time::Duration;

use crate::error::RelayError;

/// Build a client with a fixed user agent and overall timeout.
pub fn build_client(user_agent: &str, timeout_secs: u64) -> Result<reqwest::Client, RelayError> {
    Ok(reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Return the response unchanged on success, otherwise
/// [`RelayError::Upstream`] carrying the status and body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RelayError> {
    if !resp.status().is_success() {
        return Err(RelayError::Upstream {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
